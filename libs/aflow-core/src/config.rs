use figment::{providers::Env, Figment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sign::Credential;

/// Environment variables read by [`AflowConfig::from_env`].
const ENV_KEYS: &[&str] = &[
    "aiflow_domain",
    "app_name",
    "app_cn_name",
    "app_id",
    "app_secret",
    "enterprise_code",
    "timeout",
    "service_domain",
];

/// Process-wide SDK configuration, read-only after initialization.
///
/// Sourced from the environment (`AIFLOW_DOMAIN`, `APP_NAME`, `APP_CN_NAME`,
/// `APP_ID`, `APP_SECRET`, `ENTERPRISE_CODE`, `TIMEOUT`, `SERVICE_DOMAIN`);
/// unset variables fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AflowConfig {
    /// Base URL of the AFlow registry/API.
    #[serde(default = "default_domain")]
    pub aiflow_domain: String,
    /// Application name reported during registration.
    #[serde(default)]
    pub app_name: String,
    /// Application display name reported during registration.
    #[serde(default)]
    pub app_cn_name: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub app_secret: String,
    #[serde(default)]
    pub enterprise_code: String,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Externally reachable domain of the host service.
    #[serde(default)]
    pub service_domain: String,
}

impl Default for AflowConfig {
    fn default() -> Self {
        Self {
            aiflow_domain: default_domain(),
            app_name: String::new(),
            app_cn_name: String::new(),
            app_id: String::new(),
            app_secret: String::new(),
            enterprise_code: String::new(),
            timeout: default_timeout(),
            service_domain: String::new(),
        }
    }
}

fn default_domain() -> String {
    "https://api.aiflow.fan".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl AflowConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: AflowConfig = Figment::new()
            .merge(Env::raw().only(ENV_KEYS))
            .extract()
            .map_err(ConfigError::Extract)?;
        Ok(config)
    }

    /// Registry base URL with surrounding whitespace and trailing slashes removed.
    pub fn base_domain(&self) -> String {
        self.aiflow_domain.trim().trim_end_matches('/').to_string()
    }

    /// The signing credential tuple derived from this configuration.
    pub fn credential(&self) -> Credential {
        Credential {
            app_id: self.app_id.clone(),
            app_secret: self.app_secret.clone(),
            enterprise_code: self.enterprise_code.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to extract configuration from environment")]
    Extract(#[source] figment::Error),
}
