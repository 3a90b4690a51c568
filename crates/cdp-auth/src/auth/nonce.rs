/*
[INPUT]:  Operating system CSPRNG or fixed test bytes
[OUTPUT]: 16-byte nonces with hex rendering
[POS]:    Auth layer - replay-resistance values for every token
[UPDATE]: When changing nonce length or randomness source
*/

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{CdpAuthError, Result};

/// Length of every token nonce in bytes
pub const NONCE_LEN: usize = 16;

/// Single-use random value embedded in a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    pub fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }

    /// Lowercase hex, 32 characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Source of token nonces
///
/// Implementations must be safe to share between threads; every call must
/// return an unpredictable value in production.
pub trait NonceSource: Send + Sync {
    fn generate(&self) -> Result<Nonce>;
}

/// Nonce source backed by the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsNonceSource;

impl NonceSource for OsNonceSource {
    fn generate(&self) -> Result<Nonce> {
        let mut bytes = [0u8; NONCE_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CdpAuthError::Nonce(e.to_string()))?;
        Ok(Nonce(bytes))
    }
}

/// Nonce source returning the same bytes on every call, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedNonceSource {
    nonce: Nonce,
}

impl FixedNonceSource {
    pub fn new(bytes: [u8; NONCE_LEN]) -> Self {
        Self {
            nonce: Nonce(bytes),
        }
    }
}

impl NonceSource for FixedNonceSource {
    fn generate(&self) -> Result<Nonce> {
        Ok(self.nonce)
    }
}
