pub const PRODUCTION_AUTHORIZE_ENDPOINT: &str = "https://auth.ebay.com/oauth2/authorize";
pub const PRODUCTION_TOKEN_ENDPOINT: &str = "https://api.ebay.com/identity/v1/oauth2/token";
pub const SANDBOX_AUTHORIZE_ENDPOINT: &str = "https://auth.sandbox.ebay.com/oauth2/authorize";
pub const SANDBOX_TOKEN_ENDPOINT: &str = "https://api.sandbox.ebay.com/identity/v1/oauth2/token";

/// Scopes requested on the consent page. Sandbox accepts the same scope URIs.
pub const DEFAULT_SCOPES: [&str; 3] = [
    "https://api.ebay.com/oauth/api_scope",
    "https://api.ebay.com/oauth/api_scope/sell.inventory",
    "https://api.ebay.com/oauth/api_scope/commerce.identity.readonly",
];

/// Identity provider endpoints plus the prefix used for every env key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub name: String,
    pub authorize_endpoint: String,
    pub token_endpoint: String,
    pub scopes: Vec<String>,
}

impl Provider {
    pub fn production() -> Self {
        Self {
            name: "EBAY".into(),
            authorize_endpoint: PRODUCTION_AUTHORIZE_ENDPOINT.into(),
            token_endpoint: PRODUCTION_TOKEN_ENDPOINT.into(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn sandbox() -> Self {
        Self {
            authorize_endpoint: SANDBOX_AUTHORIZE_ENDPOINT.into(),
            token_endpoint: SANDBOX_TOKEN_ENDPOINT.into(),
            ..Self::production()
        }
    }

    /// Env key for this provider, e.g. `EBAY_CLIENT_ID`.
    pub fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.name, suffix)
    }

    pub fn client_id_key(&self) -> String {
        self.key("CLIENT_ID")
    }

    pub fn client_secret_key(&self) -> String {
        self.key("CLIENT_SECRET")
    }

    pub fn redirect_uri_key(&self) -> String {
        self.key("REDIRECT_URI")
    }

    pub fn access_token_key(&self) -> String {
        self.key("OAUTH_TOKEN")
    }

    pub fn refresh_token_key(&self) -> String {
        self.key("REFRESH_TOKEN")
    }

    /// The three credential keys, in the order they are reported.
    pub fn credential_keys(&self) -> [String; 3] {
        [
            self.client_id_key(),
            self.client_secret_key(),
            self.redirect_uri_key(),
        ]
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::production()
    }
}
