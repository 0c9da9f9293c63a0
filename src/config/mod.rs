pub mod credentials;
pub mod env_file;
pub mod provider;
pub mod types;

pub use credentials::{missing_credentials_help, Credentials};
pub use env_file::set_keys;
pub use provider::Provider;
pub use types::{timeout_from_secs, Settings};
