/*
[INPUT]:  Token header, serializable claims and a parsed signing key
[OUTPUT]: Compact `header.payload.signature` token strings
[POS]:    Auth layer - JWS compact serialization for both token builders
[UPDATE]: When changing header fields or signature encoding
*/

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use ed25519_dalek::Signer as _;
use serde::{Deserialize, Serialize};

use crate::auth::key::KeyMaterial;
use crate::error::{CdpAuthError, Result};
use crate::types::Algorithm;

/// Token media type
pub const TOKEN_TYPE: &str = "JWT";

/// Protected header of a compact token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: Algorithm,
    pub typ: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

impl Header {
    pub fn new(alg: Algorithm) -> Self {
        Self {
            alg,
            typ: TOKEN_TYPE.to_string(),
            kid: None,
            nonce: None,
        }
    }

    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String> {
    Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(value)?))
}

/// Serialize and sign a token
///
/// The header algorithm must match the key family.
pub fn encode<C: Serialize>(header: &Header, claims: &C, key: &KeyMaterial) -> Result<String> {
    if header.alg != key.algorithm() {
        return Err(CdpAuthError::Signing(format!(
            "header algorithm {} does not match {} key",
            header.alg,
            key.algorithm()
        )));
    }

    let signing_input = format!("{}.{}", encode_segment(header)?, encode_segment(claims)?);
    let signature = sign(signing_input.as_bytes(), key)?;
    Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature)))
}

fn sign(message: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    match key {
        KeyMaterial::EllipticCurve(secret) => {
            let signing_key = p256::ecdsa::SigningKey::from(secret);
            let signature: p256::ecdsa::Signature = signing_key
                .try_sign(message)
                .map_err(|e| CdpAuthError::Signing(e.to_string()))?;
            Ok(signature.to_bytes().to_vec())
        }
        KeyMaterial::Edwards(signing_key) => {
            let signature: ed25519_dalek::Signature = signing_key
                .try_sign(message)
                .map_err(|e| CdpAuthError::Signing(e.to_string()))?;
            Ok(signature.to_bytes().to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::Verifier as _;
    use rand::rngs::OsRng;
    use serde_json::json;

    fn decode_segment(segment: &str) -> serde_json::Value {
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment).unwrap()).unwrap()
    }

    #[test]
    fn test_header_fields() {
        let header = Header::new(Algorithm::Es256)
            .with_key_id("k1")
            .with_nonce("00ff");
        let json = serde_json::to_value(&header).unwrap();
        assert_eq!(json, json!({"alg": "ES256", "typ": "JWT", "kid": "k1", "nonce": "00ff"}));

        let json = serde_json::to_value(Header::new(Algorithm::Es256)).unwrap();
        assert_eq!(json, json!({"alg": "ES256", "typ": "JWT"}));
    }

    #[test]
    fn test_es256_signature_verifies() {
        let secret = p256::SecretKey::random(&mut OsRng);
        let verifying_key = p256::ecdsa::VerifyingKey::from(&p256::ecdsa::SigningKey::from(&secret));
        let key = KeyMaterial::EllipticCurve(secret);

        let token = encode(&Header::new(Algorithm::Es256), &json!({"sub": "k1"}), &key).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(decode_segment(parts[1]), json!({"sub": "k1"}));

        let signature_bytes = URL_SAFE_NO_PAD.decode(parts[2]).unwrap();
        assert_eq!(signature_bytes.len(), 64);
        let signature = p256::ecdsa::Signature::from_slice(&signature_bytes).unwrap();
        let signing_input = format!("{}.{}", parts[0], parts[1]);
        assert!(verifying_key.verify(signing_input.as_bytes(), &signature).is_ok());
    }

    #[test]
    fn test_eddsa_signature_verifies() {
        let signing_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let verifying_key = signing_key.verifying_key();
        let key = KeyMaterial::Edwards(signing_key);

        let token = encode(&Header::new(Algorithm::EdDsa), &json!({"sub": "k1"}), &key).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let signature_bytes: [u8; 64] = URL_SAFE_NO_PAD.decode(parts[2]).unwrap().try_into().unwrap();
        let signature = ed25519_dalek::Signature::from_bytes(&signature_bytes);
        let signing_input = format!("{}.{}", parts[0], parts[1]);
        assert!(verifying_key.verify(signing_input.as_bytes(), &signature).is_ok());
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let key = KeyMaterial::Edwards(ed25519_dalek::SigningKey::generate(&mut OsRng));
        let err = encode(&Header::new(Algorithm::Es256), &json!({}), &key).unwrap_err();
        assert!(matches!(err, CdpAuthError::Signing(_)));
    }
}
