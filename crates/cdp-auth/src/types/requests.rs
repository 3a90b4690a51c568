/*
[INPUT]:  Key material and outgoing request coordinates from the caller
[OUTPUT]: Typed Rust request structs consumed by the token builders
[POS]:    Data layer - inputs for token generation and header assembly
[UPDATE]: When token options or header options change
*/

use std::fmt;

use serde_json::{Map, Value};

/// Options for an API-key bearer token
///
/// `request_method`, `request_host` and `request_path` must be all set (REST)
/// or all empty (WebSocket).
#[derive(Clone, Default, PartialEq)]
pub struct SigningRequest {
    /// API key id, e.g. `organizations/{org}/apiKeys/{id}`
    pub key_id: String,
    /// PEM EC private key or base64 Ed25519 keypair
    pub key_secret: String,
    pub request_method: String,
    pub request_host: String,
    pub request_path: String,
    /// Lifetime in seconds, 0 selects the default of 120
    pub expires_in: u64,
    /// Audience claim, empty selects `["cdp_service"]`
    pub audience: Vec<String>,
}

impl SigningRequest {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            ..Self::default()
        }
    }

    /// Bind the token to a single REST request
    pub fn with_request(
        mut self,
        method: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.request_method = method.into();
        self.request_host = host.into();
        self.request_path = path.into();
        self
    }

    pub fn with_expires_in(mut self, seconds: u64) -> Self {
        self.expires_in = seconds;
        self
    }

    pub fn with_audience(mut self, audience: Vec<String>) -> Self {
        self.audience = audience;
        self
    }
}

impl fmt::Debug for SigningRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningRequest")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .field("request_method", &self.request_method)
            .field("request_host", &self.request_host)
            .field("request_path", &self.request_path)
            .field("expires_in", &self.expires_in)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Options for a wallet proof token
#[derive(Clone, Default, PartialEq)]
pub struct WalletSigningRequest {
    /// Base64 PKCS8 DER encoded EC private key
    pub wallet_secret: String,
    pub request_method: String,
    pub request_host: String,
    pub request_path: String,
    /// Parsed JSON request body, omitted from the token when empty
    pub request_data: Map<String, Value>,
}

impl WalletSigningRequest {
    pub fn new(
        wallet_secret: impl Into<String>,
        method: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            wallet_secret: wallet_secret.into(),
            request_method: method.into(),
            request_host: host.into(),
            request_path: path.into(),
            request_data: Map::new(),
        }
    }

    pub fn with_request_data(mut self, data: Map<String, Value>) -> Self {
        self.request_data = data;
        self
    }
}

impl fmt::Debug for WalletSigningRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSigningRequest")
            .field("wallet_secret", &"<redacted>")
            .field("request_method", &self.request_method)
            .field("request_host", &self.request_host)
            .field("request_path", &self.request_path)
            .field("request_data", &self.request_data)
            .finish()
    }
}

/// Options for assembling the full header set of one REST request
#[derive(Clone, Default)]
pub struct AuthHeadersRequest {
    pub api_key_id: String,
    pub api_key_secret: String,
    pub request_method: String,
    pub request_host: String,
    pub request_path: String,
    pub request_body: Option<Map<String, Value>>,
    pub wallet_secret: Option<String>,
    pub source: Option<String>,
    pub source_version: Option<String>,
    pub expires_in: Option<u64>,
    pub audience: Vec<String>,
}

/// Options for the headers of a WebSocket handshake
#[derive(Clone, Default)]
pub struct WebSocketAuthRequest {
    pub api_key_id: String,
    pub api_key_secret: String,
    pub source: Option<String>,
    pub source_version: Option<String>,
    pub expires_in: Option<u64>,
    pub audience: Vec<String>,
}

impl fmt::Debug for AuthHeadersRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHeadersRequest")
            .field("api_key_id", &self.api_key_id)
            .field("api_key_secret", &"<redacted>")
            .field("request_method", &self.request_method)
            .field("request_host", &self.request_host)
            .field("request_path", &self.request_path)
            .field("request_body", &self.request_body)
            .field(
                "wallet_secret",
                &self.wallet_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("source", &self.source)
            .field("source_version", &self.source_version)
            .field("expires_in", &self.expires_in)
            .field("audience", &self.audience)
            .finish()
    }
}

impl fmt::Debug for WebSocketAuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSocketAuthRequest")
            .field("api_key_id", &self.api_key_id)
            .field("api_key_secret", &"<redacted>")
            .field("source", &self.source)
            .field("source_version", &self.source_version)
            .field("expires_in", &self.expires_in)
            .field("audience", &self.audience)
            .finish()
    }
}
