/*
[INPUT]:  API key id/secret and optional request coordinates
[OUTPUT]: ES256 or EdDSA bearer tokens for REST and WebSocket requests
[POS]:    Auth layer - API-key token builder
[UPDATE]: When claim layout, validation order or header fields change
*/

use chrono::Utc;
use tracing::debug;

use crate::auth::claims::{ClaimSet, RequestUri};
use crate::auth::key::KeyMaterial;
use crate::auth::nonce::NonceSource;
use crate::auth::signer::TokenSigner;
use crate::auth::token::{self, Header};
use crate::error::{CdpAuthError, Result};
use crate::types::SigningRequest;

impl<N: NonceSource> TokenSigner<N> {
    /// Generate a bearer token proving possession of an API key
    ///
    /// With all request coordinates empty the token carries no `uris` claim
    /// and is suitable for WebSocket connections.
    pub fn generate_jwt(&self, request: &SigningRequest) -> Result<String> {
        if request.key_id.is_empty() {
            return Err(CdpAuthError::MissingField("key name is required"));
        }
        if request.key_secret.is_empty() {
            return Err(CdpAuthError::MissingField("private key is required"));
        }

        let uri = RequestUri::from_parts(
            &request.request_method,
            &request.request_host,
            &request.request_path,
        )?;
        let bound = uri.is_some();

        let nonce = self.nonces.generate()?;
        let claims = ClaimSet::new(
            &request.key_id,
            &request.audience,
            uri,
            request.expires_in,
            Utc::now(),
        );

        let key = KeyMaterial::parse(&request.key_secret)?;
        let header = Header::new(key.algorithm())
            .with_key_id(request.key_id.as_str())
            .with_nonce(nonce.to_hex());

        let jwt = token::encode(&header, &claims, &key)?;
        debug!(
            key_id = %request.key_id,
            algorithm = %header.alg,
            uri_bound = bound,
            "generated api key jwt"
        );
        Ok(jwt)
    }
}

/// Generate an API-key token using the operating system CSPRNG
pub fn generate_jwt(request: &SigningRequest) -> Result<String> {
    TokenSigner::new().generate_jwt(request)
}
