//! Content store configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::ports::validate_identifier;

/// Which content store adapter to use
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgREST over HTTP (Supabase)
    #[default]
    Postgrest,
    /// Direct PostgreSQL connection
    Postgres,
    /// In-process rows, optionally loaded from a JSON fixture file
    Memory,
}

/// Content store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Adapter selection
    #[serde(default)]
    pub backend: StoreBackend,

    /// Project URL (postgrest) or connection URL (postgres)
    #[serde(default)]
    pub url: String,

    /// Public API key sent as `apikey` (postgrest)
    pub api_key: Option<Secret<String>>,

    /// Service-role key sent as bearer token when present (postgrest)
    pub service_role_key: Option<Secret<String>>,

    /// Table holding articles
    #[serde(default = "default_table")]
    pub table: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum pooled connections (postgres)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// JSON array of rows to seed the memory backend with
    pub fixtures_path: Option<PathBuf>,
}

impl StoreConfig {
    /// Request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Exposes the API key, empty if unset
    pub fn api_key(&self) -> &str {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .unwrap_or_default()
    }

    /// Validate store configuration
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        validate_identifier(&self.table).map_err(|_| ValidationError::InvalidTableName)?;
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidStoreTimeout);
        }

        match self.backend {
            StoreBackend::Postgrest => {
                if self.url.is_empty() {
                    return Err(ValidationError::MissingRequired("LONGFORM__STORE__URL"));
                }
                if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
                    return Err(ValidationError::InvalidStoreUrl);
                }
                if environment == Environment::Production && !self.url.starts_with("https://") {
                    return Err(ValidationError::StoreUrlMustBeHttps);
                }
                if self.api_key().is_empty() {
                    return Err(ValidationError::MissingRequired("LONGFORM__STORE__API_KEY"));
                }
            }
            StoreBackend::Postgres => {
                if self.url.is_empty() {
                    return Err(ValidationError::MissingRequired("LONGFORM__STORE__URL"));
                }
                if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
                    return Err(ValidationError::InvalidStoreUrl);
                }
                if self.max_connections == 0 || self.max_connections > 100 {
                    return Err(ValidationError::InvalidPoolSize);
                }
            }
            StoreBackend::Memory => {
                if let Some(path) = &self.fixtures_path {
                    if !path.is_file() {
                        return Err(ValidationError::FixturesNotFound(
                            path.display().to_string(),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: String::new(),
            api_key: None,
            service_role_key: None,
            table: default_table(),
            timeout_secs: default_timeout(),
            max_connections: default_max_connections(),
            fixtures_path: None,
        }
    }
}

fn default_table() -> String {
    "articles".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_connections() -> u32 {
    5
}
