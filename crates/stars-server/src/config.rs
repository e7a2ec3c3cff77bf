//! Server Configuration

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is empty")]
    Missing(&'static str),

    #[error("URL must be an https:// address, got {0}")]
    InsecureUrl(String),
}

/// Runtime configuration read from the environment
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Bot token
    pub token: String,

    /// Public HTTPS base URL (Web App and webhook)
    pub webapp_url: String,

    /// Secret Telegram echoes in every webhook request
    pub webhook_secret: String,

    /// Listen address
    pub bind_addr: String,

    /// Bot API base URL
    pub telegram_api_url: Option<String>,

    /// `tracing_subscriber::EnvFilter` directives
    pub log_filter: String,
}

impl ServerConfig {
    pub const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:8080";

    pub const DEFAULT_LOG_FILTER: &'static str = "info,tower_http=debug";

    /// Path prefix the webhook is served under
    pub const WEBHOOK_PREFIX: &'static str = "/bots/";

    /// Read `TOKEN`, `URL`, `WEBHOOK_SECRET`, `BIND_ADDR`, `TELEGRAM_API_URL`
    /// and `RUST_LOG`. Call after `dotenvy::dotenv()` so `.env` values apply.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let token = required("TOKEN")?;
        let webapp_url = required("URL")?;
        let webhook_secret = required("WEBHOOK_SECRET")?;

        // Telegram refuses plain-http webhooks and Web App URLs
        if !webapp_url.starts_with("https://") {
            return Err(ConfigError::InsecureUrl(webapp_url));
        }

        Ok(Self {
            token,
            webapp_url: webapp_url.trim_end_matches('/').to_string(),
            webhook_secret,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| Self::DEFAULT_BIND_ADDR.into()),
            telegram_api_url: lookup("TELEGRAM_API_URL").filter(|v| !v.is_empty()),
            log_filter: lookup("RUST_LOG")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| Self::DEFAULT_LOG_FILTER.into()),
        })
    }

    /// Full webhook URL registered with Telegram
    pub fn webhook_url(&self) -> String {
        format!("{}{}{}", self.webapp_url, Self::WEBHOOK_PREFIX, self.token)
    }
}
