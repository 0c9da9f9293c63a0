use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing required credentials: {}", .missing.join(", "))]
    ConfigurationMissing { missing: Vec<String> },

    #[error("Error in env file {}: {detail}", path.display())]
    EnvFile { path: PathBuf, detail: String },

    #[error("eBay returned an error: {}", denial_detail(.error, .description.as_deref(), .query))]
    AuthorizationDenied {
        error: String,
        description: Option<String>,
        query: String,
    },

    #[error("{}", format_code_missing(.query))]
    AuthorizationCodeMissing { query: String },

    #[error("Error parsing the redirect URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Token endpoint returned HTTP {status}\nResponse content: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("Unexpected token response: {detail}\nResponse content: {body}")]
    UnexpectedResponse { detail: String, body: String },

    #[error("Could not retrieve access_token or refresh_token. {} not updated.", path.display())]
    IncompleteTokenResponse { path: PathBuf },

    #[error("Failed to update {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

fn denial_detail<'a>(error: &'a str, description: Option<&'a str>, query: &'a str) -> &'a str {
    match description {
        Some(desc) if !desc.is_empty() => desc,
        _ if !error.is_empty() => error,
        _ => query,
    }
}

fn format_code_missing(query: &str) -> String {
    if query.is_empty() {
        "'code' not found in the redirect URL".to_string()
    } else {
        format!("'code' not found in the redirect URL (query: {query})")
    }
}

impl AuthError {
    /// Stable error code string, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::ConfigurationMissing { .. } => "configuration_missing",
            AuthError::EnvFile { .. } => "env_file_error",
            AuthError::AuthorizationDenied { .. } => "authorization_denied",
            AuthError::AuthorizationCodeMissing { .. } => "authorization_missing",
            AuthError::UrlParse(_) => "url_parse_failure",
            AuthError::HttpStatus { .. } => "http_status_error",
            AuthError::Network { .. } => "network_error",
            AuthError::UnexpectedResponse { .. } => "unexpected_response",
            AuthError::IncompleteTokenResponse { .. } => "incomplete_token_response",
            AuthError::Persistence { .. } => "persistence_failure",
            AuthError::IoError(_) => "io_error",
        }
    }

    /// True for failures that happen before the token endpoint is contacted.
    pub fn is_pre_network(&self) -> bool {
        matches!(
            self,
            AuthError::ConfigurationMissing { .. }
                | AuthError::EnvFile { .. }
                | AuthError::AuthorizationDenied { .. }
                | AuthError::AuthorizationCodeMissing { .. }
                | AuthError::UrlParse(_)
        )
    }
}
