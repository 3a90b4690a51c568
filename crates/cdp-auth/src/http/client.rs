/*
[INPUT]:  API credentials, wallet secret and token options (code or CDP_* env)
[OUTPUT]: Validated client options for request authentication
[POS]:    HTTP layer - configuration consumed by the request authenticator
[UPDATE]: When adding configuration keys or changing defaults
*/

use std::fmt;

use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CdpAuthError, Result};

/// Default platform API base path
pub const DEFAULT_BASE_PATH: &str = "https://api.cdp.coinbase.com/platform";

/// Prefix of the environment variables read by [`ClientOptions::from_env`]
pub const ENV_PREFIX: &str = "CDP";

/// Credentials and token options for authenticated requests
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientOptions {
    #[serde(alias = "api_key_name")]
    pub api_key_id: String,
    pub api_key_secret: String,
    #[serde(default)]
    pub wallet_secret: Option<String>,
    #[serde(default = "default_base_path", alias = "api_url")]
    pub base_path: String,
    /// Bearer token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_version: Option<String>,
    #[serde(default)]
    pub debugging: bool,
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

impl ClientOptions {
    pub fn new(api_key_id: impl Into<String>, api_key_secret: impl Into<String>) -> Self {
        Self {
            api_key_id: api_key_id.into(),
            api_key_secret: api_key_secret.into(),
            wallet_secret: None,
            base_path: default_base_path(),
            expires_in: None,
            source: None,
            source_version: None,
            debugging: false,
        }
    }

    pub fn with_wallet_secret(mut self, wallet_secret: impl Into<String>) -> Self {
        self.wallet_secret = Some(wallet_secret.into());
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_expires_in(mut self, seconds: u64) -> Self {
        self.expires_in = Some(seconds);
        self
    }

    /// Log every authenticated request at info level
    pub fn with_debugging(mut self, debugging: bool) -> Self {
        self.debugging = debugging;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>, version: Option<String>) -> Self {
        self.source = Some(source.into());
        self.source_version = version;
        self
    }

    /// Load options from `CDP_*` environment variables
    ///
    /// `CDP_API_KEY_ID` (or `CDP_API_KEY_NAME`) and `CDP_API_KEY_SECRET` are
    /// required.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn from_environment(environment: Environment) -> Result<Self> {
        let options: Self = Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        options.validate()?;
        Ok(options)
    }

    /// Check required credentials and the base path
    pub fn validate(&self) -> Result<()> {
        if self.api_key_id.is_empty() {
            return Err(CdpAuthError::Config("api_key_id is required".to_string()));
        }
        if self.api_key_secret.is_empty() {
            return Err(CdpAuthError::Config("api_key_secret is required".to_string()));
        }
        self.base_url()?;
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_path)
            .map_err(|e| CdpAuthError::Config(format!("invalid base path {}: {e}", self.base_path)))
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_key_id", &self.api_key_id)
            .field("api_key_secret", &"<redacted>")
            .field(
                "wallet_secret",
                &self.wallet_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("base_path", &self.base_path)
            .field("expires_in", &self.expires_in)
            .field("source", &self.source)
            .field("source_version", &self.source_version)
            .field("debugging", &self.debugging)
            .finish()
    }
}
