//! Runtime configuration.
//!
//! Everything comes from the process environment (plus `.env` when present).
//! Keys use the `LONGFORM` prefix with `__` between levels, so
//! `LONGFORM__STORE__URL` fills `store.url`. Projects that already export
//! `SUPABASE_URL`, `SUPABASE_API_KEY` and `SUPABASE_SERVICE_ROLE` can keep
//! them; they seed the store section and the prefixed keys override them.

mod error;
mod render;
mod server;
mod store;

pub use error::{ConfigError, ValidationError};
pub use render::RenderConfig;
pub use server::{Environment, ServerConfig};
pub use store::{StoreBackend, StoreConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "LONGFORM";

const SUPABASE_FALLBACKS: [(&str, &str); 3] = [
    ("SUPABASE_URL", "store.url"),
    ("SUPABASE_API_KEY", "store.api_key"),
    ("SUPABASE_SERVICE_ROLE", "store.service_role_key"),
];

/// The `server`, `store` and `render` sections. Every field has a default,
/// so an empty environment loads and only [`AppConfig::validate`] decides
/// whether the result is usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub render: RenderConfig,
}

impl AppConfig {
    /// Reads `.env`, the Supabase fallbacks and `LONGFORM__*` variables.
    ///
    /// Fails only when a value cannot be converted to its field type (for
    /// example `LONGFORM__RENDER__FRESHNESS=sometimes`).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let builder = SUPABASE_FALLBACKS.iter().try_fold(
            config::Config::builder(),
            |builder, (var, key)| match std::env::var(var) {
                Ok(value) => builder.set_default(*key, value),
                Err(_) => Ok(builder),
            },
        )?;

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.store.validate(self.server.environment)
    }
}
