pub mod consent;
pub mod flow;
pub mod redirect;
pub mod token;

pub use consent::{build_consent_url, Browser, SystemBrowser};
pub use flow::{persist_tokens, run_authorization, AuthorizationReport, FlowState};
pub use redirect::{parse_redirect, read_redirect, AuthorizationCode};
pub use token::{basic_authorization, exchange_code, TokenExchange, TokenResponse};
