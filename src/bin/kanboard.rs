//! Kanboard CLI
//!
//! Calls a single Kanboard procedure and prints the JSON result.
//!
//! ```text
//! kanboard --url http://localhost/jsonrpc.php --username jsonrpc --password TOKEN \
//!     create_project name="My project" owner_id=1
//! ```

use anyhow::{Context, Result, bail};
use clap::Parser;
use clap::builder::BoolishValueParser;
use kanboard::{ClientConfig, KanboardClient, Params};
use serde_json::Value;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kanboard", version, about = "Call Kanboard JSON-RPC procedures")]
struct Cli {
    /// JSON-RPC endpoint
    #[arg(long, env = "KANBOARD_URL")]
    url: String,

    #[arg(long, env = "KANBOARD_USERNAME")]
    username: String,

    /// API token or user password
    #[arg(long, env = "KANBOARD_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long, env = "KANBOARD_AUTH_HEADER")]
    auth_header: Option<String>,

    /// PEM file with additional trusted CA certificates
    #[arg(long, env = "KANBOARD_CAFILE")]
    cafile: Option<PathBuf>,

    /// Disable certificate and hostname verification
    #[arg(long, env = "KANBOARD_INSECURE", value_parser = BoolishValueParser::new())]
    insecure: bool,

    #[arg(long, env = "KANBOARD_IGNORE_HOSTNAME_VERIFICATION", value_parser = BoolishValueParser::new())]
    ignore_hostname_verification: bool,

    #[arg(long, env = "KANBOARD_USER_AGENT")]
    user_agent: Option<String>,

    #[arg(long, env = "KANBOARD_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[arg(long, env = "KANBOARD_RETRIES", default_value_t = 0)]
    retries: usize,

    /// Procedure name, camelCase or snake_case
    procedure: String,

    /// Named parameters as key=value; values are parsed as JSON when possible
    params: Vec<String>,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.url, &self.username, &self.password)
            .with_insecure(self.insecure)
            .with_ignore_hostname_verification(self.ignore_hostname_verification)
            .with_retries(self.retries);

        if let Some(header) = &self.auth_header {
            config = config.with_auth_header(header);
        }
        if let Some(path) = &self.cafile {
            config = config.with_cafile(path);
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn parse_param(arg: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = arg.split_once('=') else {
        bail!("Invalid parameter '{arg}', expected key=value");
    };
    if key.is_empty() {
        bail!("Invalid parameter '{arg}', key is empty");
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw));
    Ok((key.to_string(), value))
}

fn parse_params(args: &[String]) -> Result<Params> {
    args.iter().map(|arg| parse_param(arg)).collect()
}

async fn run(cli: Cli) -> Result<()> {
    let params = parse_params(&cli.params)?;
    let config = cli.client_config();
    let client = KanboardClient::new(config).context("Failed to create client")?;

    let result = client
        .call(&cli.procedure, params)
        .await
        .with_context(|| format!("Procedure '{}' failed", cli.procedure))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{e:#}");
        process::exit(1);
    }
}
