/*
[INPUT]:  Error sources (input validation, key decoding, signing, config)
[OUTPUT]: Structured error types with descriptive messages
[POS]:    Error handling layer - unified error type for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for CDP request authentication
#[derive(Error, Debug)]
pub enum CdpAuthError {
    /// A required identifier or secret was empty
    #[error("{0}")]
    MissingField(&'static str),

    /// Method, host and path were only partially provided
    #[error(
        "either all request details (method, host, path) must be provided, or all must be empty for JWTs intended for websocket connections"
    )]
    MalformedRequestCoordinates,

    /// Base64, PEM or DER decoding of a secret failed
    #[error("{message}")]
    KeyDecode { message: String },

    /// The decoded key is not of the expected algorithm family
    #[error("private key is not an ECDSA key")]
    KeyTypeMismatch,

    /// The secret matches neither supported key encoding
    #[error("invalid key format - must be either PEM EC key or base64 Ed25519 key")]
    UnrecognizedKeyFormat,

    /// The signature operation rejected the key or message
    #[error("could not sign token: {0}")]
    Signing(String),

    /// The secure random source failed
    #[error("failed to generate nonce: {0}")]
    Nonce(String),

    /// Serialization of token segments failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An outgoing request body could not be bound into a wallet token
    #[error("failed to parse request body: {0}")]
    InvalidRequestBody(String),

    /// A token could not be used as an HTTP header value
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CdpAuthError {
    pub(crate) fn key_decode(context: &str, err: impl std::fmt::Display) -> Self {
        CdpAuthError::KeyDecode {
            message: format!("{context}: {err}"),
        }
    }

    /// Check if the error was caused by unusable key material
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            CdpAuthError::KeyDecode { .. }
                | CdpAuthError::KeyTypeMismatch
                | CdpAuthError::UnrecognizedKeyFormat
        )
    }

    /// Check if the error was caused by caller-supplied request inputs
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CdpAuthError::MissingField(_)
                | CdpAuthError::MalformedRequestCoordinates
                | CdpAuthError::InvalidRequestBody(_)
        )
    }
}

impl From<config::ConfigError> for CdpAuthError {
    fn from(err: config::ConfigError) -> Self {
        CdpAuthError::Config(err.to_string())
    }
}

/// Result type alias for CDP auth operations
pub type Result<T> = std::result::Result<T, CdpAuthError>;
