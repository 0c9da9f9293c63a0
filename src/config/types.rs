use std::path::PathBuf;
use std::time::Duration;

use super::provider::Provider;

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Run-wide settings, built once at startup and passed by reference to each step.
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: Provider,
    /// Where credentials are read from and tokens are written to.
    pub env_file: PathBuf,
    /// Token request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub open_browser: bool,
    pub show_response: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            open_browser: true,
            show_response: false,
        }
    }
}

/// Map a `--timeout-secs` value to a timeout; zero disables it.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
