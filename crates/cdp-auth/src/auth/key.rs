/*
[INPUT]:  Opaque API key secrets and wallet secrets
[OUTPUT]: Parsed signing keys tagged by algorithm family
[POS]:    Auth layer - key material classification before signing
[UPDATE]: When supporting new key encodings or curves
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use ed25519_dalek::SigningKey as Ed25519SigningKey;
use p256::SecretKey;
use p256::elliptic_curve::ALGORITHM_OID as EC_PUBLIC_KEY_OID;
use p256::pkcs8::{DecodePrivateKey, PrivateKeyInfo};

use crate::error::{CdpAuthError, Result};
use crate::types::Algorithm;

/// Raw length of a base64 decoded Ed25519 secret: seed followed by public key
pub const ED25519_KEYPAIR_LEN: usize = 64;

/// API key secret after classification
#[derive(Clone)]
pub enum KeyMaterial {
    /// SEC1 PEM encoded P-256 key
    EllipticCurve(SecretKey),
    /// Base64 encoded Ed25519 keypair
    Edwards(Ed25519SigningKey),
}

impl KeyMaterial {
    /// Classify and parse an API key secret
    ///
    /// The PEM form is tried first, then the 64-byte base64 form.
    pub fn parse(secret: &str) -> Result<Self> {
        if let Some(key) = parse_ec_pem(secret) {
            return Ok(KeyMaterial::EllipticCurve(key));
        }
        if let Some(bytes) = decode_ed25519_keypair(secret) {
            let key = Ed25519SigningKey::from_keypair_bytes(&bytes)
                .map_err(|e| CdpAuthError::key_decode("invalid Ed25519 keypair", e))?;
            return Ok(KeyMaterial::Edwards(key));
        }
        Err(CdpAuthError::UnrecognizedKeyFormat)
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            KeyMaterial::EllipticCurve(_) => Algorithm::Es256,
            KeyMaterial::Edwards(_) => Algorithm::EdDsa,
        }
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyMaterial::EllipticCurve(_) => f.write_str("KeyMaterial::EllipticCurve(..)"),
            KeyMaterial::Edwards(_) => f.write_str("KeyMaterial::Edwards(..)"),
        }
    }
}

fn parse_ec_pem(secret: &str) -> Option<SecretKey> {
    SecretKey::from_sec1_pem(secret.trim()).ok()
}

/// Drop the CR and LF bytes that wrapped or file-read base64 secrets carry
fn strip_line_breaks(secret: &str) -> String {
    secret.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

fn decode_ed25519_keypair(secret: &str) -> Option<[u8; ED25519_KEYPAIR_LEN]> {
    let decoded = BASE64.decode(strip_line_breaks(secret)).ok()?;
    decoded.try_into().ok()
}

/// Parse a wallet secret: base64 of a PKCS8 DER wrapped P-256 key
pub fn parse_wallet_secret(secret: &str) -> Result<SecretKey> {
    let der = BASE64
        .decode(strip_line_breaks(secret))
        .map_err(|e| CdpAuthError::key_decode("failed to decode wallet secret", e))?;

    let info = PrivateKeyInfo::try_from(der.as_slice())
        .map_err(|e| CdpAuthError::key_decode("could not create the EC key", e))?;
    if info.algorithm.oid != EC_PUBLIC_KEY_OID {
        return Err(CdpAuthError::KeyTypeMismatch);
    }

    // Other curves are valid ECDSA keys but cannot produce ES256 signatures.
    SecretKey::from_pkcs8_der(&der)
        .map_err(|e| CdpAuthError::Signing(format!("wallet key is not a P-256 key: {e}")))
}
