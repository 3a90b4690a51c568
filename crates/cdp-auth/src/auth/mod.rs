/*
[INPUT]:  API key and wallet key material plus request coordinates
[OUTPUT]: Signed bearer tokens and wallet proof tokens
[POS]:    Auth layer - handles CDP API request authentication
[UPDATE]: When token formats or supported key types change
*/

pub mod claims;
pub mod jwt;
pub mod key;
pub mod nonce;
pub mod signer;
pub mod token;
pub mod wallet;

pub use claims::{ClaimSet, RequestUri, WalletClaims};
pub use jwt::generate_jwt;
pub use key::KeyMaterial;
pub use nonce::{FixedNonceSource, Nonce, NonceSource, OsNonceSource};
pub use signer::TokenSigner;
pub use token::Header;
pub use wallet::generate_wallet_jwt;
