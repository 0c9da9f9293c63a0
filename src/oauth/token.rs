use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::Credentials;
use crate::error::AuthError;
use crate::oauth::redirect::AuthorizationCode;

/// Token endpoint response. Fields are only checked for presence; values of
/// unexpected JSON types are kept as-is rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<serde_json::Value>,
    #[serde(default)]
    pub refresh_token: Option<serde_json::Value>,
    #[serde(default)]
    pub expires_in: Option<serde_json::Value>,
    #[serde(default)]
    pub refresh_token_expires_in: Option<serde_json::Value>,
    #[serde(default)]
    pub token_type: Option<serde_json::Value>,
}

impl TokenResponse {
    /// Both tokens, if the response carried non-empty strings for each.
    pub fn token_pair(&self) -> Option<(&str, &str)> {
        let access = non_empty_str(self.access_token.as_ref())?;
        let refresh = non_empty_str(self.refresh_token.as_ref())?;
        Some((access, refresh))
    }
}

fn non_empty_str(value: Option<&serde_json::Value>) -> Option<&str> {
    value?.as_str().filter(|t| !t.is_empty())
}

/// Parsed response plus the raw JSON it came from.
#[derive(Debug, Clone)]
pub struct TokenExchange {
    pub response: TokenResponse,
    pub raw: serde_json::Value,
}

/// `Authorization` header value for HTTP Basic auth with the app credentials.
pub fn basic_authorization(credentials: &Credentials) -> String {
    format!("Basic {}", STANDARD.encode(credentials.basic_pair()))
}

/// Exchange an authorization code for an access/refresh token pair.
pub async fn exchange_code(
    token_endpoint: &str,
    credentials: &Credentials,
    code: &AuthorizationCode,
    timeout: Option<Duration>,
) -> Result<TokenExchange, AuthError> {
    let network_err = |source: reqwest::Error| AuthError::Network {
        endpoint: token_endpoint.to_string(),
        source,
    };

    let mut builder = reqwest::Client::builder();
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    let client = builder.build().map_err(network_err)?;

    tracing::debug!("POST {token_endpoint} (timeout: {timeout:?})");
    let resp = client
        .post(token_endpoint)
        .header(reqwest::header::AUTHORIZATION, basic_authorization(credentials))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("redirect_uri", credentials.redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(network_err)?;

    let status = resp.status();
    let body = resp.text().await.map_err(network_err)?;
    tracing::debug!("Token endpoint answered {status} ({} bytes)", body.len());

    if status.is_client_error() || status.is_server_error() {
        return Err(AuthError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    parse_token_body(&body)
}

fn parse_token_body(body: &str) -> Result<TokenExchange, AuthError> {
    let unexpected = |detail: String| AuthError::UnexpectedResponse {
        detail,
        body: body.to_string(),
    };

    let raw: serde_json::Value =
        serde_json::from_str(body).map_err(|e| unexpected(format!("invalid JSON: {e}")))?;
    if !raw.is_object() {
        return Err(unexpected("expected a JSON object".to_string()));
    }
    let response: TokenResponse = serde_json::from_value(raw.clone())
        .map_err(|e| unexpected(format!("unexpected field type: {e}")))?;

    Ok(TokenExchange { response, raw })
}
