use std::time::Duration;

/// Upstream provider configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Bearer token for the upstream jobs API.
    pub api_key: String,
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Whole-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// TCP connect timeout in seconds (default: `10`).
    pub connect_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("HTTP client could not be built: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub const DEFAULT_BASE_URL: &str = "https://api.kie.ai";

impl ProviderConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                         | Default              |
    /// |---------------------------------|----------------------|
    /// | `KIE_AI_API_KEY`                | required             |
    /// | `KIE_AI_BASE_URL`               | `https://api.kie.ai` |
    /// | `PROVIDER_REQUEST_TIMEOUT_SECS` | `30`                 |
    /// | `PROVIDER_CONNECT_TIMEOUT_SECS` | `10`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("KIE_AI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing("KIE_AI_API_KEY"))?;

        let base_url =
            std::env::var("KIE_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let request_timeout_secs = env_u64("PROVIDER_REQUEST_TIMEOUT_SECS", 30)?;
        let connect_timeout_secs = env_u64("PROVIDER_CONNECT_TIMEOUT_SECS", 10)?;

        Self::new(api_key, &base_url).map(|cfg| Self {
            request_timeout_secs,
            connect_timeout_secs,
            ..cfg
        })
    }

    /// Build a configuration with default timeouts.
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: api_key.into(),
            base_url: normalize_base_url(base_url)?,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::Invalid {
        name: "KIE_AI_BASE_URL",
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            name: "KIE_AI_BASE_URL",
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.to_string())
}

fn env_u64(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("'{raw}' is not a whole number of seconds"),
        }),
        Err(_) => Ok(default),
    }
}
