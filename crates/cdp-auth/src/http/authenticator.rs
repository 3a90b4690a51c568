/*
[INPUT]:  Built reqwest requests and client options
[OUTPUT]: Requests carrying bearer and wallet proof headers
[POS]:    HTTP layer - per-request header injection for authenticated endpoints
[UPDATE]: When changing which requests get wallet proofs or how bodies are read
*/

use reqwest::Request;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use url::Url;

use crate::auth::{NonceSource, OsNonceSource, TokenSigner};
use crate::error::{CdpAuthError, Result};
use crate::http::client::ClientOptions;
use crate::http::headers::requires_wallet_auth;
use crate::types::AuthHeadersRequest;

/// Attaches authentication headers to outgoing requests
#[derive(Debug, Clone)]
pub struct RequestAuthenticator<N = OsNonceSource> {
    options: ClientOptions,
    signer: TokenSigner<N>,
}

impl RequestAuthenticator {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            options,
            signer: TokenSigner::new(),
        }
    }
}

impl<N: NonceSource> RequestAuthenticator<N> {
    pub fn with_signer(options: ClientOptions, signer: TokenSigner<N>) -> Self {
        Self { options, signer }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Insert `Authorization`, `Content-Type`, `Correlation-Context` and, for
    /// account mutations, `X-Wallet-Auth`
    ///
    /// On error the request headers are left unchanged. With
    /// `ClientOptions::debugging` set, every authenticated request is logged
    /// at info level.
    pub fn authenticate(&self, request: &mut Request) -> Result<()> {
        let method = request.method().as_str().to_ascii_uppercase();
        let host = request_host(request.url());
        let path = request.url().path().to_string();

        let request_body = if requires_wallet_auth(&method, &path) {
            Some(read_json_body(request).inspect_err(|e| {
                warn!(method = %method, path = %path, error = %e, "cannot bind request body");
            })?)
        } else {
            None
        };

        let headers_request = AuthHeadersRequest {
            api_key_id: self.options.api_key_id.clone(),
            api_key_secret: self.options.api_key_secret.clone(),
            request_method: method.clone(),
            request_host: host,
            request_path: path.clone(),
            request_body,
            wallet_secret: self.options.wallet_secret.clone(),
            source: self.options.source.clone(),
            source_version: self.options.source_version.clone(),
            expires_in: self.options.expires_in,
            audience: Vec::new(),
        };
        let headers = self.signer.auth_headers(&headers_request)?.to_header_map()?;

        let wallet_auth = headers.contains_key("x-wallet-auth");
        for (name, value) in headers.iter() {
            request.headers_mut().insert(name.clone(), value.clone());
        }
        if self.options.debugging {
            info!(method = %method, url = %request.url(), wallet_auth, "authenticated request");
        } else {
            debug!(method = %method, path = %path, wallet_auth, "authenticated request");
        }
        Ok(())
    }
}

/// Host as sent in the request line, with the port when it is not the default
fn request_host(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

fn read_json_body(request: &Request) -> Result<Map<String, Value>> {
    let Some(body) = request.body() else {
        return Ok(Map::new());
    };
    let bytes = body.as_bytes().ok_or_else(|| {
        CdpAuthError::InvalidRequestBody("streaming bodies cannot be bound to a wallet token".into())
    })?;
    if bytes.is_empty() {
        return Ok(Map::new());
    }
    serde_json::from_slice(bytes).map_err(|e| CdpAuthError::InvalidRequestBody(e.to_string()))
}
