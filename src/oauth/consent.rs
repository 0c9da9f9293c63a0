use crate::config::{Credentials, Provider};

/// Opens URLs for the user. Swapped out in tests.
pub trait Browser {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Launches the host's default browser.
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        webbrowser::open(url)
    }
}

/// Build the consent page URL.
///
/// Parameter values are concatenated as-is, without percent-encoding, which
/// is what eBay's RuName-based redirect expects. Values containing query
/// delimiters would corrupt the URL, so those are flagged with a warning.
pub fn build_consent_url(provider: &Provider, credentials: &Credentials) -> String {
    let scope = provider.scopes.join(" ");
    for (name, value) in [
        ("client_id", credentials.client_id.as_str()),
        ("redirect_uri", credentials.redirect_uri.as_str()),
    ] {
        if has_query_delimiters(value) {
            tracing::warn!(
                "{name} contains characters that are not escaped in the consent URL; the URL may be malformed"
            );
        }
    }

    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}",
        provider.authorize_endpoint, credentials.client_id, credentials.redirect_uri, scope
    )
}

fn has_query_delimiters(value: &str) -> bool {
    value
        .chars()
        .any(|c| matches!(c, '&' | '=' | '#' | '?') || c.is_whitespace())
}
