/*
[INPUT]:  Nonce source capability
[OUTPUT]: Token signer shared by the API-key and wallet builders
[POS]:    Auth layer - entry point for request authentication tokens
[UPDATE]: When adding injected capabilities (clock, randomness)
*/

use crate::auth::nonce::{NonceSource, OsNonceSource};

/// Stateless token signer
///
/// Builds API-key tokens (`generate_jwt`) and wallet proof tokens
/// (`generate_wallet_jwt`). Holds only its nonce source, so one signer can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct TokenSigner<N = OsNonceSource> {
    pub(crate) nonces: N,
}

impl TokenSigner {
    /// Create a signer backed by the operating system CSPRNG
    pub fn new() -> Self {
        Self {
            nonces: OsNonceSource,
        }
    }
}

impl<N: NonceSource> TokenSigner<N> {
    /// Create a signer with a custom nonce source
    pub fn with_nonce_source(nonces: N) -> Self {
        Self { nonces }
    }

    pub fn nonce_source(&self) -> &N {
        &self.nonces
    }
}
