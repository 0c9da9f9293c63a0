use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::AuthError;

use super::provider::Provider;

/// Application credentials issued by the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    /// eBay calls this the RuName; it is not a real URI.
    pub redirect_uri: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl Credentials {
    /// Load credentials from the process environment, falling back to `env_file`.
    ///
    /// A process variable that is set wins over the file entry, even when it is
    /// empty, and an empty value then counts as missing. A missing env file is
    /// fine; a malformed one is an error.
    pub fn load(provider: &Provider, env_file: &Path) -> Result<Self, AuthError> {
        let file_vars = read_env_file(env_file)?;
        Self::from_lookup(provider, |key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_vars.get(key).cloned())
        })
    }

    /// Build credentials from an arbitrary key lookup. Empty values count as missing.
    pub fn from_lookup<F>(provider: &Provider, lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let keys = provider.credential_keys();
        let values: Vec<Option<String>> = keys
            .iter()
            .map(|k| lookup(k).filter(|v| !v.is_empty()))
            .collect();

        let missing: Vec<String> = keys
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| k.clone())
            .collect();
        if !missing.is_empty() {
            return Err(AuthError::ConfigurationMissing { missing });
        }

        let mut values = values.into_iter().flatten();
        match (values.next(), values.next(), values.next()) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Ok(Self {
                client_id,
                client_secret,
                redirect_uri,
            }),
            _ => Err(AuthError::ConfigurationMissing {
                missing: keys.to_vec(),
            }),
        }
    }

    /// Value for the `Authorization` header's Basic credentials, before encoding.
    pub fn basic_pair(&self) -> String {
        format!("{}:{}", self.client_id, self.client_secret)
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, AuthError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            tracing::debug!("No env file at {}", path.display());
            return Ok(HashMap::new());
        }
        Err(e) => {
            return Err(AuthError::EnvFile {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })
        }
    };

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| AuthError::EnvFile {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        vars.insert(key, value);
    }
    tracing::debug!("Read {} entries from {}", vars.len(), path.display());
    Ok(vars)
}

/// Multi-line diagnostic shown when credentials are missing.
pub fn missing_credentials_help(provider: &Provider, env_file: &Path) -> String {
    let mut help = format!(
        "Please ensure they are set in {} or in the environment as follows:",
        env_file.display()
    );
    for key in provider.credential_keys() {
        let placeholder = key.trim_start_matches(&format!("{}_", provider.name));
        help.push_str(&format!("\n{key}=YOUR_ACTUAL_{placeholder}"));
    }
    help
}
