pub mod cli;
pub mod config;
pub mod error;
pub mod oauth;

pub use config::{Credentials, Provider, Settings};
pub use error::AuthError;
pub use oauth::{run_authorization, AuthorizationReport, Browser, SystemBrowser};
