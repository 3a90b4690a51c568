/*
[INPUT]:  Subject id, audience, optional request URI, lifetime and issue time
[OUTPUT]: Registered claim sets for API-key and wallet tokens
[POS]:    Auth layer - claim construction shared by both token builders
[UPDATE]: When claim names, defaults or issuer change
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CdpAuthError, Result};

/// Issuer of every API-key token
pub const ISSUER: &str = "cdp";

/// Audience used when the caller supplies none
pub const DEFAULT_AUDIENCE: &str = "cdp_service";

/// Token lifetime in seconds used when the caller supplies zero
pub const DEFAULT_EXPIRES_IN: u64 = 120;

/// Request binding rendered as `"<METHOD> <HOST><PATH>"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestUri(String);

impl RequestUri {
    pub fn new(method: &str, host: &str, path: &str) -> Self {
        Self(format!("{method} {host}{path}"))
    }

    /// Validate an all-or-nothing coordinate triple
    ///
    /// Returns `None` when all three are empty, which is the WebSocket form.
    pub fn from_parts(method: &str, host: &str, path: &str) -> Result<Option<Self>> {
        match (method.is_empty(), host.is_empty(), path.is_empty()) {
            (false, false, false) => Ok(Some(Self::new(method, host, path))),
            (true, true, true) => Ok(None),
            _ => Err(CdpAuthError::MalformedRequestCoordinates),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Claims of an API-key bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    pub sub: String,
    pub iss: String,
    pub aud: Vec<String>,
    pub nbf: i64,
    pub iat: i64,
    pub exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uris: Option<Vec<RequestUri>>,
}

impl ClaimSet {
    pub fn new(
        subject: &str,
        audience: &[String],
        uri: Option<RequestUri>,
        expires_in: u64,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let expires_in = if expires_in == 0 {
            DEFAULT_EXPIRES_IN
        } else {
            expires_in
        };
        let aud = if audience.is_empty() {
            vec![DEFAULT_AUDIENCE.to_string()]
        } else {
            audience.to_vec()
        };
        let now = issued_at.timestamp();

        Self {
            sub: subject.to_string(),
            iss: ISSUER.to_string(),
            aud,
            nbf: now,
            iat: now,
            exp: now.saturating_add_unsigned(expires_in),
            uris: uri.map(|uri| vec![uri]),
        }
    }
}

/// Claims of a wallet proof token
///
/// Carries no `exp`; the token is bound to one request by `uris` and `req`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletClaims {
    pub uris: Vec<RequestUri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req: Option<Map<String, Value>>,
    pub nbf: i64,
    pub iat: i64,
    pub jti: String,
}

impl WalletClaims {
    pub fn new(
        uri: RequestUri,
        request_data: &Map<String, Value>,
        jti: String,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let now = issued_at.timestamp();
        Self {
            uris: vec![uri],
            req: (!request_data.is_empty()).then(|| request_data.clone()),
            nbf: now,
            iat: now,
            jti,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let claims = ClaimSet::new("k1", &[], None, 0, fixed_time());

        assert_eq!(claims.iss, "cdp");
        assert_eq!(claims.sub, "k1");
        assert_eq!(claims.aud, vec!["cdp_service".to_string()]);
        assert_eq!(claims.iat, claims.nbf);
        assert_eq!(claims.exp - claims.nbf, 120);
        assert!(claims.uris.is_none());
    }

    #[test]
    fn test_custom_audience_and_expiry() {
        let audience = vec!["a".to_string(), "b".to_string()];
        let claims = ClaimSet::new("k1", &audience, None, 300, fixed_time());

        assert_eq!(claims.aud, audience);
        assert_eq!(claims.iat, fixed_time().timestamp());
        assert_eq!(claims.exp, fixed_time().timestamp() + 300);
    }

    #[test]
    fn test_uris_omitted_when_absent() {
        let claims = ClaimSet::new("k1", &[], None, 0, fixed_time());
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("uris").is_none());

        let uri = RequestUri::new("GET", "api.example.com", "/v1/x");
        let claims = ClaimSet::new("k1", &[], Some(uri), 0, fixed_time());
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["uris"], serde_json::json!(["GET api.example.com/v1/x"]));
    }

    #[test]
    fn test_request_uri_all_or_nothing() {
        assert_eq!(
            RequestUri::from_parts("POST", "h", "/p").unwrap().unwrap().as_str(),
            "POST h/p"
        );
        assert!(RequestUri::from_parts("", "", "").unwrap().is_none());
        assert!(matches!(
            RequestUri::from_parts("GET", "", "/p"),
            Err(CdpAuthError::MalformedRequestCoordinates)
        ));
    }

    #[test]
    fn test_wallet_claims_req_only_when_non_empty() {
        let uri = RequestUri::new("POST", "h", "/accounts");
        let claims = WalletClaims::new(uri.clone(), &Map::new(), "ab".into(), fixed_time());
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("req").is_none());
        assert!(json.get("exp").is_none());
        assert_eq!(json["jti"], "ab");

        let mut data = Map::new();
        data.insert("name".into(), Value::from("My Account"));
        let claims = WalletClaims::new(uri, &data, "ab".into(), fixed_time());
        assert_eq!(claims.req, Some(data));
    }
}
