use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::config::{set_keys, Credentials, Settings};
use crate::error::AuthError;
use crate::oauth::consent::{build_consent_url, Browser};
use crate::oauth::redirect::{read_redirect, AuthorizationCode};
use crate::oauth::token::{exchange_code, TokenExchange};

/// Progress of a single authorization run. Any failure ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Init,
    ConfigLoaded,
    ConsentOpened,
    CodeReceived,
    TokenExchanged,
    Persisted,
    Failed,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowState::Init => "INIT",
            FlowState::ConfigLoaded => "CONFIG_LOADED",
            FlowState::ConsentOpened => "CONSENT_OPENED",
            FlowState::CodeReceived => "CODE_RECEIVED",
            FlowState::TokenExchanged => "TOKEN_EXCHANGED",
            FlowState::Persisted => "PERSISTED",
            FlowState::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// What a completed token exchange produced.
#[derive(Debug)]
pub struct AuthorizationReport {
    pub exchange: TokenExchange,
    /// Path written on success, or why nothing was written.
    pub persisted: Result<PathBuf, AuthError>,
    pub obtained_at: DateTime<Local>,
}

impl FlowState {
    pub fn log(self) {
        tracing::debug!("auth flow -> {self}");
    }
}

impl AuthorizationReport {
    pub fn state(&self) -> FlowState {
        if self.persisted.is_ok() {
            FlowState::Persisted
        } else {
            FlowState::Failed
        }
    }
}

/// Print the consent URL and try to open it. A browser failure is not fatal.
pub fn open_consent(
    settings: &Settings,
    credentials: &Credentials,
    browser: &dyn Browser,
) -> String {
    let url = build_consent_url(&settings.provider, credentials);
    if settings.open_browser {
        match browser.open(&url) {
            Ok(()) => println!("Opening the browser. Please grant consent in the browser."),
            Err(e) => tracing::warn!("Could not open browser automatically: {e}"),
        }
    }
    println!("If the browser does not open, please manually navigate to: {url}");
    url
}

/// Ask the user for the redirect URL and pull the code out of it.
pub fn prompt_for_code<R: BufRead>(input: &mut R) -> Result<AuthorizationCode, AuthError> {
    print!(
        "After granting consent, eBay will redirect you. Paste the entire redirect URL here: "
    );
    std::io::stdout().flush()?;
    read_redirect(input)
}

/// Write both tokens into the env file, leaving every other entry alone.
pub fn persist_tokens(
    settings: &Settings,
    exchange: &TokenExchange,
) -> Result<PathBuf, AuthError> {
    let path = settings.env_file.clone();
    let Some((access, refresh)) = exchange.response.token_pair() else {
        return Err(AuthError::IncompleteTokenResponse { path });
    };

    let provider = &settings.provider;
    let access_key = provider.access_token_key();
    let refresh_key = provider.refresh_token_key();
    match set_keys(
        &path,
        &[(access_key.as_str(), access), (refresh_key.as_str(), refresh)],
    ) {
        Ok(()) => Ok(path),
        Err(source) => Err(AuthError::Persistence { path, source }),
    }
}

/// Run consent, code entry, token exchange and persistence in order.
///
/// Errors before and during the exchange abort the run. Persistence
/// problems are carried in the report so the summary can still be shown.
pub async fn run_authorization<R: BufRead>(
    settings: &Settings,
    credentials: &Credentials,
    browser: &dyn Browser,
    input: &mut R,
) -> Result<AuthorizationReport, AuthError> {
    FlowState::ConfigLoaded.log();

    open_consent(settings, credentials, browser);
    FlowState::ConsentOpened.log();

    let code = prompt_for_code(input)?;
    FlowState::CodeReceived.log();

    let obtained_at = Local::now();
    let exchange = exchange_code(
        &settings.provider.token_endpoint,
        credentials,
        &code,
        settings.timeout,
    )
    .await?;
    FlowState::TokenExchanged.log();

    let persisted = persist_tokens(settings, &exchange);
    let report = AuthorizationReport {
        exchange,
        persisted,
        obtained_at,
    };
    report.state().log();
    Ok(report)
}
