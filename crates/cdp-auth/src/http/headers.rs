/*
[INPUT]:  API credentials, request coordinates, optional body and wallet secret
[OUTPUT]: Authorization, X-Wallet-Auth and correlation headers for one request
[POS]:    HTTP layer - header assembly for REST and WebSocket requests
[UPDATE]: When header names or wallet auth routing rules change
*/

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::auth::{NonceSource, TokenSigner};
use crate::error::{CdpAuthError, Result};
use crate::types::{AuthHeadersRequest, SigningRequest, WalletSigningRequest, WebSocketAuthRequest};

/// Header carrying the wallet proof token
pub const WALLET_AUTH_HEADER: &str = "X-Wallet-Auth";

/// Header carrying SDK correlation data
pub const CORRELATION_CONTEXT_HEADER: &str = "Correlation-Context";

pub const JSON_CONTENT_TYPE: &str = "application/json";

const SDK_LANGUAGE: &str = "rust";
const DEFAULT_SOURCE: &str = "sdk-auth";

/// Authentication headers for a single outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// `Bearer <token>`
    pub authorization: String,
    pub content_type: String,
    pub wallet_auth: Option<String>,
    pub correlation_context: String,
}

impl AuthHeaders {
    /// Header name and value pairs, in insertion order
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("Authorization", self.authorization.as_str()),
            ("Content-Type", self.content_type.as_str()),
        ];
        if let Some(wallet_auth) = &self.wallet_auth {
            pairs.push((WALLET_AUTH_HEADER, wallet_auth.as_str()));
        }
        pairs.push((CORRELATION_CONTEXT_HEADER, self.correlation_context.as_str()));
        pairs
    }

    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&self.authorization)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(&self.content_type)?);
        if let Some(wallet_auth) = &self.wallet_auth {
            headers.insert(
                HeaderName::from_static("x-wallet-auth"),
                HeaderValue::from_str(wallet_auth)?,
            );
        }
        headers.insert(
            HeaderName::from_static("correlation-context"),
            HeaderValue::from_str(&self.correlation_context)?,
        );
        Ok(headers)
    }
}

/// Whether a request mutates accounts and so needs a wallet proof token
///
/// `method` is matched exactly, so callers pass it upper-cased.
pub fn requires_wallet_auth(method: &str, path: &str) -> bool {
    path.contains("/accounts") && matches!(method, "POST" | "DELETE")
}

/// Render the `Correlation-Context` header value
pub fn correlation_context(source: Option<&str>, source_version: Option<&str>) -> String {
    let mut context = format!(
        "sdk_version={},sdk_language={SDK_LANGUAGE},source={}",
        env!("CARGO_PKG_VERSION"),
        source.unwrap_or(DEFAULT_SOURCE)
    );
    if let Some(version) = source_version {
        context.push_str(",source_version=");
        context.push_str(version);
    }
    context
}

impl<N: NonceSource> TokenSigner<N> {
    /// Build the full header set for a REST request
    pub fn auth_headers(&self, request: &AuthHeadersRequest) -> Result<AuthHeaders> {
        let signing_request = SigningRequest::new(
            request.api_key_id.as_str(),
            request.api_key_secret.as_str(),
        )
        .with_request(
            request.request_method.as_str(),
            request.request_host.as_str(),
            request.request_path.as_str(),
        )
        .with_expires_in(request.expires_in.unwrap_or_default())
        .with_audience(request.audience.clone());
        let jwt = self.generate_jwt(&signing_request)?;

        let wallet_auth = if requires_wallet_auth(&request.request_method, &request.request_path)
        {
            let wallet_secret = request
                .wallet_secret
                .as_deref()
                .filter(|secret| !secret.is_empty())
                .ok_or(CdpAuthError::MissingField(
                    "wallet secret not configured; set CDP_WALLET_SECRET or pass it in the client options",
                ))?;
            let wallet_request = WalletSigningRequest::new(
                wallet_secret,
                request.request_method.as_str(),
                request.request_host.as_str(),
                request.request_path.as_str(),
            )
            .with_request_data(request.request_body.clone().unwrap_or_default());
            Some(self.generate_wallet_jwt(&wallet_request)?)
        } else {
            None
        };

        Ok(AuthHeaders {
            authorization: format!("Bearer {jwt}"),
            content_type: JSON_CONTENT_TYPE.to_string(),
            wallet_auth,
            correlation_context: correlation_context(
                request.source.as_deref(),
                request.source_version.as_deref(),
            ),
        })
    }

    /// Build the headers for a WebSocket handshake
    ///
    /// The bearer token carries no `uris` claim and no wallet proof is attached.
    pub fn websocket_auth_headers(&self, request: &WebSocketAuthRequest) -> Result<AuthHeaders> {
        let signing_request = SigningRequest::new(
            request.api_key_id.as_str(),
            request.api_key_secret.as_str(),
        )
        .with_expires_in(request.expires_in.unwrap_or_default())
        .with_audience(request.audience.clone());
        let jwt = self.generate_jwt(&signing_request)?;

        Ok(AuthHeaders {
            authorization: format!("Bearer {jwt}"),
            content_type: JSON_CONTENT_TYPE.to_string(),
            wallet_auth: None,
            correlation_context: correlation_context(
                request.source.as_deref(),
                request.source_version.as_deref(),
            ),
        })
    }
}

/// Build REST request headers using the operating system CSPRNG
pub fn get_auth_headers(request: &AuthHeadersRequest) -> Result<AuthHeaders> {
    TokenSigner::new().auth_headers(request)
}

/// Build WebSocket handshake headers using the operating system CSPRNG
pub fn get_websocket_auth_headers(request: &WebSocketAuthRequest) -> Result<AuthHeaders> {
    TokenSigner::new().websocket_auth_headers(request)
}
