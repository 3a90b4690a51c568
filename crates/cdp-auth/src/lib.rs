/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public CDP request-authentication crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod error;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    ClaimSet,
    FixedNonceSource,
    KeyMaterial,
    NonceSource,
    OsNonceSource,
    RequestUri,
    TokenSigner,
    WalletClaims,
    generate_jwt,
    generate_wallet_jwt,
};

pub use error::{CdpAuthError, Result};

// Re-export commonly used types from http
pub use http::{
    AuthHeaders,
    ClientOptions,
    RequestAuthenticator,
    get_auth_headers,
    get_websocket_auth_headers,
    requires_wallet_auth,
};

// Re-export all types
pub use types::*;
