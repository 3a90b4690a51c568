/*
[INPUT]:  JOSE algorithm names
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for token headers
[UPDATE]: When a new signing algorithm is supported
*/

use serde::{Deserialize, Serialize};

/// Signature algorithm tag carried in the token header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// ECDSA over P-256 with SHA-256
    #[serde(rename = "ES256")]
    Es256,
    /// Ed25519
    #[serde(rename = "EdDSA")]
    EdDsa,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Es256 => "ES256",
            Algorithm::EdDsa => "EdDSA",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_serialization() {
        assert_eq!(serde_json::to_string(&Algorithm::Es256).unwrap(), r#""ES256""#);
        assert_eq!(serde_json::to_string(&Algorithm::EdDsa).unwrap(), r#""EdDSA""#);
        let parsed: Algorithm = serde_json::from_str(r#""EdDSA""#).unwrap();
        assert_eq!(parsed, Algorithm::EdDsa);
        assert_eq!(Algorithm::Es256.to_string(), "ES256");
    }
}
