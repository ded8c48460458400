//! Session configuration.

use serde::Deserialize;
use thiserror::Error;

/// Default local storage key for the user's team.
pub const DEFAULT_STORAGE_KEY: &str = "howzat11_team";

/// Default query parameter carrying a share token.
pub const DEFAULT_SHARE_PARAM: &str = "team";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse session config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("validation error for field `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
}

/// Names of the two external channels a session reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Local storage key holding the saved team
    pub storage_key: String,

    /// Query parameter holding a shared team token
    pub share_param: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            share_param: DEFAULT_SHARE_PARAM.to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "storage_key",
                message: "must not be empty".to_string(),
            });
        }
        if self.share_param.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "share_param",
                message: "must not be empty".to_string(),
            });
        }
        if self.share_param.contains(['&', '=', '?', '#']) {
            return Err(ConfigError::Validation {
                field: "share_param",
                message: format!("`{}` cannot be used as a query key", self.share_param),
            });
        }
        Ok(())
    }
}
