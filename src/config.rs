//! Service configuration.
//!
//! Plain structs with `Default` and a `validate()` pass. Nothing here reads
//! files; the NocoDB section can be loaded from the process environment.

use crate::validation::ValidationConfig;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the NocoDB base URL.
pub const ENV_NOCODB_URL: &str = "NOCODB_URL";
/// Environment variable holding the NocoDB API token.
pub const ENV_NOCODB_TOKEN: &str = "NOCODB_TOKEN";
/// Environment variable holding the NocoDB base id.
pub const ENV_NOCODB_BASE: &str = "NOCODB_BASE";
/// Optional request timeout in whole seconds.
pub const ENV_NOCODB_TIMEOUT_SECS: &str = "NOCODB_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing configuration value: {key}")]
    Missing { key: String },

    #[error("Invalid configuration value for {key}: {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Top-level configuration for a content service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    /// Prepended to a content type name to form its document collection.
    /// Empty means the content type name is the collection.
    pub documents_collection_prefix: String,
    pub validation: ValidationConfig,
    /// External table source; `None` disables schema sync.
    pub nocodb: Option<NocoDbConfig>,
}

impl ServerConfig {
    /// Document collection for a content type.
    pub fn collection_for(&self, content_type: &str) -> String {
        format!("{}{}", self.documents_collection_prefix, content_type)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self
            .documents_collection_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::invalid(
                "documents_collection_prefix",
                "only ASCII letters, digits and '_' are allowed",
            ));
        }

        if let Some(nocodb) = &self.nocodb {
            nocodb.validate()?;
        }

        Ok(())
    }
}

/// Connection settings for the NocoDB metadata API.
#[derive(Clone, PartialEq, Eq)]
pub struct NocoDbConfig {
    pub base_url: String,
    pub token: String,
    pub base_id: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for NocoDbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NocoDbConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("base_id", &self.base_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl NocoDbConfig {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        base_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            base_id: base_id.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from `NOCODB_URL`, `NOCODB_TOKEN`, `NOCODB_BASE` and the optional
    /// `NOCODB_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::missing(key))
        };

        let mut config = Self::new(
            required(ENV_NOCODB_URL)?,
            required(ENV_NOCODB_TOKEN)?,
            required(ENV_NOCODB_BASE)?,
        );

        if let Some(raw) = lookup(ENV_NOCODB_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::invalid(ENV_NOCODB_TIMEOUT_SECS, format!("'{}' is not a number of seconds", raw))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::missing("nocodb.base_url"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::invalid(
                "nocodb.base_url",
                "must start with http:// or https://",
            ));
        }
        if self.token.is_empty() {
            return Err(ConfigError::missing("nocodb.token"));
        }
        if self.base_id.is_empty() {
            return Err(ConfigError::missing("nocodb.base_id"));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::invalid("nocodb.timeout", "must be greater than zero"));
        }
        Ok(())
    }

    /// Table listing endpoint for the configured base.
    pub fn tables_url(&self) -> String {
        format!(
            "{}/api/v2/meta/bases/{}/tables",
            self.base_url.trim_end_matches('/'),
            self.base_id
        )
    }
}
