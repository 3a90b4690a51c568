/*
[INPUT]:  Test key generation and token decoding requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for cdp-auth tests

use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use ed25519_dalek::Verifier as _;
use p256::pkcs8::{EncodePrivateKey, LineEnding};
use rand::rngs::OsRng;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Fresh SEC1 PEM encoded P-256 key and its verifying key
#[allow(dead_code)]
pub fn ec_key_secret() -> (String, p256::ecdsa::VerifyingKey) {
    let secret = p256::SecretKey::random(&mut OsRng);
    let pem = secret.to_sec1_pem(LineEnding::LF).unwrap().to_string();
    (pem, verifying_key(&secret))
}

/// Fresh base64 Ed25519 keypair (seed followed by public key)
#[allow(dead_code)]
pub fn ed25519_key_secret() -> (String, ed25519_dalek::VerifyingKey) {
    let signing_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
    (
        STANDARD.encode(signing_key.to_keypair_bytes()),
        signing_key.verifying_key(),
    )
}

/// Fresh base64 PKCS8 DER wallet secret and its verifying key
#[allow(dead_code)]
pub fn wallet_secret() -> (String, p256::ecdsa::VerifyingKey) {
    let secret = p256::SecretKey::random(&mut OsRng);
    let der = secret.to_pkcs8_der().unwrap();
    (STANDARD.encode(der.as_bytes()), verifying_key(&secret))
}

fn verifying_key(secret: &p256::SecretKey) -> p256::ecdsa::VerifyingKey {
    p256::ecdsa::VerifyingKey::from(&p256::ecdsa::SigningKey::from(secret))
}

/// Decoded JSON of the header (0) or payload (1) segment
#[allow(dead_code)]
pub fn decode_segment(token: &str, index: usize) -> serde_json::Value {
    let segment = token.split('.').nth(index).unwrap();
    serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment).unwrap()).unwrap()
}

fn split_signature(token: &str) -> (&str, Vec<u8>) {
    let (signing_input, signature) = token.rsplit_once('.').unwrap();
    (signing_input, URL_SAFE_NO_PAD.decode(signature).unwrap())
}

#[allow(dead_code)]
pub fn verify_es256(token: &str, key: &p256::ecdsa::VerifyingKey) -> bool {
    let (signing_input, signature) = split_signature(token);
    let signature = p256::ecdsa::Signature::from_slice(&signature).unwrap();
    key.verify(signing_input.as_bytes(), &signature).is_ok()
}

#[allow(dead_code)]
pub fn verify_eddsa(token: &str, key: &ed25519_dalek::VerifyingKey) -> bool {
    let (signing_input, signature) = split_signature(token);
    let signature = ed25519_dalek::Signature::from_slice(&signature).unwrap();
    key.verify(signing_input.as_bytes(), &signature).is_ok()
}
