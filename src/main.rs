use std::path::PathBuf;

use clap::Parser;

use ebay_auth::cli::output::{is_tty, print_error, print_report};
use ebay_auth::config::types::{DEFAULT_ENV_FILE, DEFAULT_TIMEOUT_SECS};
use ebay_auth::config::{timeout_from_secs, Credentials, Provider, Settings};
use ebay_auth::oauth::FlowState;
use ebay_auth::{AuthError, AuthorizationReport, SystemBrowser};

#[derive(Parser)]
#[command(
    name = "ebay-auth",
    version,
    about = "Obtain an eBay user access token and refresh token via the OAuth consent flow"
)]
struct Cli {
    /// Env file holding the app credentials; tokens are written back here
    #[arg(long, env = "EBAY_AUTH_ENV_FILE", default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Use the eBay sandbox instead of production
    #[arg(long)]
    sandbox: bool,

    /// Only print the consent URL, do not launch a browser
    #[arg(long)]
    no_browser: bool,

    /// Token request timeout in seconds (0 waits indefinitely)
    #[arg(long, env = "EBAY_AUTH_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Print the full token endpoint response, secrets included
    #[arg(long)]
    show_response: bool,

    /// Override the consent endpoint
    #[arg(long)]
    authorize_endpoint: Option<String>,

    /// Override the token endpoint
    #[arg(long)]
    token_endpoint: Option<String>,
}

impl Cli {
    fn into_settings(self) -> Settings {
        let mut provider = if self.sandbox {
            Provider::sandbox()
        } else {
            Provider::production()
        };
        if let Some(url) = self.authorize_endpoint {
            provider.authorize_endpoint = url;
        }
        if let Some(url) = self.token_endpoint {
            provider.token_endpoint = url;
        }
        Settings {
            provider,
            env_file: self.env_file,
            timeout: timeout_from_secs(self.timeout_secs),
            open_browser: !self.no_browser,
            show_response: self.show_response,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("EBAY_AUTH_LOG_LEVEL")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Cli::parse().into_settings();
    FlowState::Init.log();

    match run(&settings).await {
        Ok(report) => {
            print_report(&report, &settings, is_tty());
            if report.persisted.is_err() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            FlowState::Failed.log();
            tracing::debug!(
                "error code: {} (token endpoint contacted: {})",
                e.code(),
                !e.is_pre_network()
            );
            print_error(&e, &settings);
            std::process::exit(1);
        }
    }
}

async fn run(settings: &Settings) -> Result<AuthorizationReport, AuthError> {
    let credentials = Credentials::load(&settings.provider, &settings.env_file)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    ebay_auth::run_authorization(settings, &credentials, &SystemBrowser, &mut input).await
}
