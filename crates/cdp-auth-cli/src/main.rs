/*
[INPUT]:  CLI arguments, YAML configuration file or CDP_* environment
[OUTPUT]: Bearer tokens, wallet proof tokens or header sets on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or output formats
*/

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cdp_auth::{
    AuthHeadersRequest,
    ClientOptions,
    SigningRequest,
    TokenSigner,
    WalletSigningRequest,
};

#[derive(Parser, Debug)]
#[command(name = "cdp-auth", version, about = "Generate CDP API authentication tokens")]
struct Cli {
    /// YAML file with client options; CDP_* environment variables otherwise
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an API-key bearer token; omit the request flags for a WebSocket token
    Jwt {
        #[command(flatten)]
        request: OptionalRequestArgs,
        #[arg(long = "expires-in", value_name = "SECONDS")]
        expires_in: Option<u64>,
        #[arg(long = "audience", value_name = "AUD")]
        audience: Vec<String>,
    },
    /// Print a wallet proof token for one request
    WalletJwt {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long = "body", value_name = "JSON")]
        body: Option<String>,
    },
    /// Print every authentication header for one request
    Headers {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long = "body", value_name = "JSON")]
        body: Option<String>,
    },
}

#[derive(Args, Debug)]
struct RequestArgs {
    #[arg(long = "method", value_name = "METHOD")]
    method: String,
    #[arg(long = "host", value_name = "HOST")]
    host: String,
    #[arg(long = "path", value_name = "PATH")]
    path: String,
}

#[derive(Args, Debug)]
struct OptionalRequestArgs {
    #[arg(long = "method", value_name = "METHOD")]
    method: Option<String>,
    #[arg(long = "host", value_name = "HOST")]
    host: Option<String>,
    #[arg(long = "path", value_name = "PATH")]
    path: Option<String>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let options = load_options(args.config_path.as_deref())?;
    info!(api_key_id = %options.api_key_id, "client options loaded");
    let signer = TokenSigner::new();

    match args.command {
        Command::Jwt {
            request,
            expires_in,
            audience,
        } => {
            let signing_request = SigningRequest::new(
                options.api_key_id.as_str(),
                options.api_key_secret.as_str(),
            )
            .with_request(
                request.method.unwrap_or_default().to_ascii_uppercase(),
                request.host.unwrap_or_default(),
                request.path.unwrap_or_default(),
            )
            .with_expires_in(expires_in.or(options.expires_in).unwrap_or_default())
            .with_audience(audience);
            let jwt = signer
                .generate_jwt(&signing_request)
                .context("generate api key jwt")?;
            println!("{jwt}");
        }
        Command::WalletJwt { request, body } => {
            let wallet_secret = options
                .wallet_secret
                .clone()
                .context("wallet secret is not configured")?;
            let wallet_request = WalletSigningRequest::new(
                wallet_secret,
                request.method.to_ascii_uppercase(),
                request.host,
                request.path,
            )
            .with_request_data(parse_body(body.as_deref())?);
            let jwt = signer
                .generate_wallet_jwt(&wallet_request)
                .context("generate wallet jwt")?;
            println!("{jwt}");
        }
        Command::Headers { request, body } => {
            let headers_request = AuthHeadersRequest {
                api_key_id: options.api_key_id.clone(),
                api_key_secret: options.api_key_secret.clone(),
                request_method: request.method.to_ascii_uppercase(),
                request_host: request.host,
                request_path: request.path,
                request_body: Some(parse_body(body.as_deref())?),
                wallet_secret: options.wallet_secret.clone(),
                source: options.source.clone(),
                source_version: options.source_version.clone(),
                expires_in: options.expires_in,
                audience: Vec::new(),
            };
            let headers = signer
                .auth_headers(&headers_request)
                .context("generate auth headers")?;
            for (name, value) in headers.pairs() {
                println!("{name}: {value}");
            }
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_options(path: Option<&Path>) -> Result<ClientOptions> {
    let Some(path) = path else {
        return ClientOptions::from_env().context("load client options from environment");
    };
    debug!(config_path = %path.display(), "reading client options");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let options: ClientOptions = serde_yaml::from_str(&content).context("parse config file")?;
    options.validate().context("validate config file")?;
    Ok(options)
}

fn parse_body(body: Option<&str>) -> Result<Map<String, Value>> {
    let Some(body) = body.filter(|body| !body.trim().is_empty()) else {
        return Ok(Map::new());
    };
    match serde_json::from_str::<Value>(body).context("parse --body as JSON")? {
        Value::Object(map) => Ok(map),
        _ => bail!("--body must be a JSON object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body() {
        assert!(parse_body(None).unwrap().is_empty());
        assert!(parse_body(Some("  ")).unwrap().is_empty());
        assert_eq!(parse_body(Some(r#"{"name":"A"}"#)).unwrap()["name"], "A");
        assert!(parse_body(Some("[1]")).is_err());
    }

    #[test]
    fn test_cli_parses_websocket_jwt() {
        let cli = Cli::try_parse_from(["cdp-auth", "jwt", "--expires-in", "60"]).unwrap();
        match cli.command {
            Command::Jwt {
                request,
                expires_in,
                ..
            } => {
                assert!(request.method.is_none());
                assert_eq!(expires_in, Some(60));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
