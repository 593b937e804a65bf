//! Configuration errors.

use thiserror::Error;

/// Failure to read the environment into [`super::AppConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read configuration: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// A loaded value this service cannot run with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set for the selected store backend")]
    MissingRequired(&'static str),

    #[error("Listen host must be an IP address, got {0:?}")]
    InvalidListenAddress(String),

    #[error("Listen port must not be 0")]
    InvalidPort,

    #[error("Request timeout must be 1..=120 seconds, got {0}")]
    InvalidRequestTimeout(u64),

    #[error("Store URL has the wrong scheme for the selected backend")]
    InvalidStoreUrl,

    #[error("Store URL must use https in production")]
    StoreUrlMustBeHttps,

    #[error("Store table is not a plain identifier")]
    InvalidTableName,

    #[error("Store timeout must be 1..=120 seconds")]
    InvalidStoreTimeout,

    #[error("Store pool size must be 1..=100")]
    InvalidPoolSize,

    #[error("Fixture file {0} does not exist")]
    FixturesNotFound(String),
}
