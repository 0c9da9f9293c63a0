use std::io::BufRead;

use url::Url;

use crate::error::AuthError;

/// Single-use authorization code pulled from the redirect URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read one line from `reader` and extract the authorization code from it.
pub fn read_redirect<R: BufRead>(reader: &mut R) -> Result<AuthorizationCode, AuthError> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    parse_redirect(&line)
}

/// Extract `code` from a pasted redirect URL.
///
/// Blank parameter values are treated as absent. Without a code, the
/// provider's `error`/`error_description` are surfaced instead.
pub fn parse_redirect(input: &str) -> Result<AuthorizationCode, AuthError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AuthError::AuthorizationCodeMissing {
            query: String::new(),
        });
    }

    let url = Url::parse(input)?;
    let query = url.query().unwrap_or_default().to_string();
    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, v)| k == name && !v.is_empty())
            .map(|(_, v)| v.into_owned())
    };

    if let Some(code) = param("code") {
        tracing::debug!("Authorization code received ({} chars)", code.len());
        return Ok(AuthorizationCode(code));
    }

    match param("error") {
        Some(error) => Err(AuthError::AuthorizationDenied {
            error,
            description: param("error_description"),
            query,
        }),
        None => Err(AuthError::AuthorizationCodeMissing { query }),
    }
}
