//! Render configuration

use serde::Deserialize;

use crate::application::FreshnessPolicy;

/// Document rendering options
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// `always-fresh` or `max-age=<seconds>`
    #[serde(default)]
    pub freshness: FreshnessPolicy,

    /// Highlight fenced code blocks
    #[serde(default = "default_true")]
    pub highlight: bool,

    /// Typeset math to MathML
    #[serde(default = "default_true")]
    pub math: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            freshness: FreshnessPolicy::default(),
            highlight: true,
            math: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.freshness, FreshnessPolicy::AlwaysFresh);
        assert!(config.highlight);
        assert!(config.math);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"freshness": "max-age=120", "math": false}"#).unwrap();
        assert_eq!(config.freshness, FreshnessPolicy::MaxAge(120));
        assert!(config.highlight);
        assert!(!config.math);
    }
}
