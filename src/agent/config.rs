//! Agent server configuration parsed from environment variables.

/// Address used when neither the widget nor the environment names one.
pub const FALLBACK_BASE_URL: &str = "http://localhost:4111";

/// Agent selected when the widget does not name one.
pub const DEFAULT_AGENT_ENDPOINT: &str = "resumeAgent";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Process-level agent defaults, injected into each widget at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentConfig {
    /// Configured default server address (`AGENT_BASE_URL`), if any.
    pub base_url: Option<String>,
}

impl AgentConfig {
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: Some(base_url.into()) }
    }

    /// Build typed agent config from environment variables.
    ///
    /// Optional:
    /// - `AGENT_BASE_URL`: default agent server address
    ///
    /// # Errors
    ///
    /// Returns an error if `AGENT_BASE_URL` is set but is not an
    /// `http`/`https` URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = match std::env::var("AGENT_BASE_URL") {
            Ok(raw) if !raw.trim().is_empty() => Some(validate_base_url(raw.trim())?),
            _ => None,
        };
        Ok(Self { base_url })
    }

    /// Resolve the server address: widget override, then this config's
    /// default, then [`FALLBACK_BASE_URL`].
    #[must_use]
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> String {
        override_url
            .filter(|url| !url.trim().is_empty())
            .or(self.base_url.as_deref())
            .unwrap_or(FALLBACK_BASE_URL)
            .trim()
            .trim_end_matches('/')
            .to_string()
    }
}

/// Check that `raw` is an absolute `http`/`https` URL.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] for unparsable URLs or other
/// schemes.
pub fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = reqwest::Url::parse(raw)
        .map_err(|e| ConfigError::InvalidBaseUrl { url: raw.to_string(), reason: e.to_string() })?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(ConfigError::InvalidBaseUrl { url: raw.to_string(), reason: format!("unsupported scheme '{other}'") }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
