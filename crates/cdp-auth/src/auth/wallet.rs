/*
[INPUT]:  Wallet secret, request coordinates and parsed request body
[OUTPUT]: ES256 wallet proof tokens bound to one request
[POS]:    Auth layer - wallet proof token builder (X-Wallet-Auth)
[UPDATE]: When wallet claim layout or secret encoding changes
*/

use chrono::Utc;
use tracing::debug;

use crate::auth::claims::{RequestUri, WalletClaims};
use crate::auth::key::{KeyMaterial, parse_wallet_secret};
use crate::auth::nonce::NonceSource;
use crate::auth::signer::TokenSigner;
use crate::auth::token::{self, Header};
use crate::error::{CdpAuthError, Result};
use crate::types::{Algorithm, WalletSigningRequest};

impl<N: NonceSource> TokenSigner<N> {
    /// Generate a wallet proof token for a single request
    ///
    /// The request coordinates are always bound; callers are expected to pass
    /// the method, host and path of the request being sent.
    pub fn generate_wallet_jwt(&self, request: &WalletSigningRequest) -> Result<String> {
        if request.wallet_secret.is_empty() {
            return Err(CdpAuthError::MissingField("wallet secret is not defined"));
        }

        let uri = RequestUri::new(
            &request.request_method,
            &request.request_host,
            &request.request_path,
        );
        let key = KeyMaterial::EllipticCurve(parse_wallet_secret(&request.wallet_secret)?);

        let nonce = self.nonces.generate()?;
        let claims = WalletClaims::new(uri, &request.request_data, nonce.to_hex(), Utc::now());

        let jwt = token::encode(&Header::new(Algorithm::Es256), &claims, &key)?;
        debug!(
            method = %request.request_method,
            path = %request.request_path,
            has_body = claims.req.is_some(),
            "generated wallet jwt"
        );
        Ok(jwt)
    }
}

/// Generate a wallet proof token using the operating system CSPRNG
pub fn generate_wallet_jwt(request: &WalletSigningRequest) -> Result<String> {
    TokenSigner::new().generate_wallet_jwt(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::nonce::FixedNonceSource;
    use base64::{
        Engine as _,
        engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    };
    use p256::pkcs8::EncodePrivateKey;
    use rand::rngs::OsRng;
    use serde_json::json;

    fn wallet_secret() -> String {
        let der = p256::SecretKey::random(&mut OsRng).to_pkcs8_der().unwrap();
        STANDARD.encode(der.as_bytes())
    }

    fn segment(token: &str, index: usize) -> serde_json::Value {
        let part = token.split('.').nth(index).unwrap();
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(part).unwrap()).unwrap()
    }

    #[test]
    fn test_missing_secret() {
        let request = WalletSigningRequest::new("", "POST", "h", "/accounts");
        let err = generate_wallet_jwt(&request).unwrap_err();
        assert_eq!(err.to_string(), "wallet secret is not defined");
    }

    #[test]
    fn test_jti_from_nonce_source() {
        let signer = TokenSigner::with_nonce_source(FixedNonceSource::new([0xa5; 16]));
        let request = WalletSigningRequest::new(wallet_secret(), "POST", "h", "/accounts");
        let jwt = signer.generate_wallet_jwt(&request).unwrap();

        let header = segment(&jwt, 0);
        assert_eq!(header, json!({"alg": "ES256", "typ": "JWT"}));

        let payload = segment(&jwt, 1);
        assert_eq!(payload["jti"], "a5".repeat(16));
        assert_eq!(payload["uris"], json!(["POST h/accounts"]));
        assert_eq!(payload["iat"], payload["nbf"]);
        assert!(payload.get("exp").is_none());
    }

    #[test]
    fn test_non_ec_pkcs8_is_type_mismatch() {
        // PKCS8 wrapper around an Ed25519 key (OID 1.3.101.112)
        let mut der = vec![
            0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22,
            0x04, 0x20,
        ];
        der.extend([7u8; 32]);
        let request = WalletSigningRequest::new(STANDARD.encode(der), "POST", "h", "/accounts");

        assert!(matches!(
            generate_wallet_jwt(&request),
            Err(CdpAuthError::KeyTypeMismatch)
        ));
    }
}
