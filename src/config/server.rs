//! Listener, logging and middleware settings for the HTTP server.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Deployment profile. Production logs JSON and requires TLS to the store.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// `server.*` settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// IP address to listen on.
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Upper bound on a whole request, store round trip included.
    pub request_timeout_secs: u64,
    /// Comma-separated origins allowed to read the API. Unset allows any.
    pub cors_origins: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,longform=debug,tower_http=info,sqlx=warn".to_string(),
            request_timeout_secs: 15,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ValidationError::InvalidListenAddress(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Configured CORS origins, trimmed, blanks skipped.
    pub fn allowed_origins(&self) -> impl Iterator<Item = &str> + '_ {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidRequestTimeout(self.request_timeout_secs));
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert!(config.log_level.contains("longform=debug"));
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"environment": "production", "port": 9000}"#).unwrap();
        assert!(config.is_production());
        assert_eq!(config.port, 9000);
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let result = serde_json::from_str::<ServerConfig>(r#"{"environment": "staging"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn ipv6_loopback_is_a_valid_host() {
        let config = ServerConfig {
            host: "::1".to_string(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:3000");
    }

    #[test]
    fn hostnames_are_not_listen_addresses() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidListenAddress("localhost".to_string()))
        );
    }

    #[test]
    fn origins_are_trimmed_and_blanks_skipped() {
        let config = ServerConfig {
            cors_origins: Some(" https://blog.example.com,,http://localhost:5173 ".to_string()),
            ..Default::default()
        };
        let origins: Vec<_> = config.allowed_origins().collect();
        assert_eq!(origins, ["https://blog.example.com", "http://localhost:5173"]);
        assert_eq!(ServerConfig::default().allowed_origins().count(), 0);
    }

    #[test]
    fn request_timeout_bounds() {
        for (secs, ok) in [(0, false), (1, true), (120, true), (121, false)] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "timeout {}", secs);
        }
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }
}
