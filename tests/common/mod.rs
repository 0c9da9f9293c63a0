pub mod http_mock;

use std::path::PathBuf;

use ebay_auth::{Browser, Credentials, Provider, Settings};

pub const CLIENT_ID: &str = "TestApp-PRD-0001";
pub const CLIENT_SECRET: &str = "PRD-secret-0001";
pub const REDIRECT_URI: &str = "Test_RuName";
/// `Basic base64("TestApp-PRD-0001:PRD-secret-0001")`
pub const BASIC_AUTH: &str = "Basic VGVzdEFwcC1QUkQtMDAwMTpQUkQtc2VjcmV0LTAwMDE=";

#[allow(dead_code)]
pub fn credentials() -> Credentials {
    Credentials {
        client_id: CLIENT_ID.into(),
        client_secret: CLIENT_SECRET.into(),
        redirect_uri: REDIRECT_URI.into(),
    }
}

/// Browser stand-in that never launches anything.
#[allow(dead_code)]
pub struct NoopBrowser;

impl Browser for NoopBrowser {
    fn open(&self, _url: &str) -> std::io::Result<()> {
        Ok(())
    }
}

/// Settings pointed at a mock token endpoint and a scratch env file.
#[allow(dead_code)]
pub fn settings_for(token_endpoint: &str, env_file: PathBuf) -> Settings {
    Settings {
        provider: Provider {
            token_endpoint: token_endpoint.to_string(),
            ..Provider::production()
        },
        env_file,
        open_browser: false,
        ..Settings::default()
    }
}

/// Create a temp directory holding a `.env` with `content`.
pub fn temp_env_dir(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
