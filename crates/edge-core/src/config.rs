//! Revalidation configuration.

use serde::{Deserialize, Serialize};

/// Prefix marking a cache tag as derived from a route path.
pub const IMPLICIT_TAG_PREFIX: &str = "_N_T_";

/// Longest path (in UTF-16 code units) that may be turned into an implicit tag.
pub const SOFT_TAG_MAX_LENGTH: usize = 1024;

/// Error raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid revalidate config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("soft_tag_max_length must be greater than zero")]
    ZeroMaxLength,
}

/// Configuration for path and tag revalidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevalidateConfig {
    /// Prefix prepended to paths to build implicit tags.
    #[serde(default = "default_implicit_tag_prefix")]
    pub implicit_tag_prefix: String,
    /// Paths longer than this are skipped with a warning.
    #[serde(default = "default_soft_tag_max_length")]
    pub soft_tag_max_length: usize,
}

fn default_implicit_tag_prefix() -> String {
    IMPLICIT_TAG_PREFIX.to_string()
}

fn default_soft_tag_max_length() -> usize {
    SOFT_TAG_MAX_LENGTH
}

impl Default for RevalidateConfig {
    fn default() -> Self {
        Self {
            implicit_tag_prefix: default_implicit_tag_prefix(),
            soft_tag_max_length: default_soft_tag_max_length(),
        }
    }
}

impl RevalidateConfig {
    /// Create a configuration with the platform defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the implicit tag prefix.
    pub fn with_implicit_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.implicit_tag_prefix = prefix.into();
        self
    }

    /// Set the soft tag max length.
    pub fn with_soft_tag_max_length(mut self, max: usize) -> Self {
        self.soft_tag_max_length = max;
        self
    }

    /// Parse a configuration from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        if config.soft_tag_max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        Ok(config)
    }

    /// Build the implicit tag for a path (no length check).
    pub fn implicit_tag(&self, path: &str) -> String {
        format!("{}{}", self.implicit_tag_prefix, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RevalidateConfig::default();

        assert_eq!(config.implicit_tag_prefix, "_N_T_");
        assert_eq!(config.soft_tag_max_length, 1024);
    }

    #[test]
    fn test_config_builder_chain() {
        let config = RevalidateConfig::new()
            .with_implicit_tag_prefix("P:")
            .with_soft_tag_max_length(16);

        assert_eq!(config.implicit_tag_prefix, "P:");
        assert_eq!(config.soft_tag_max_length, 16);
    }

    #[test]
    fn test_config_from_toml_partial() {
        let config = RevalidateConfig::from_toml_str("soft_tag_max_length = 64").unwrap();

        assert_eq!(config.soft_tag_max_length, 64);
        assert_eq!(config.implicit_tag_prefix, IMPLICIT_TAG_PREFIX);
    }

    #[test]
    fn test_config_from_toml_empty() {
        let config = RevalidateConfig::from_toml_str("").unwrap();
        assert_eq!(config, RevalidateConfig::default());
    }

    #[test]
    fn test_config_from_toml_rejects_zero_length() {
        let err = RevalidateConfig::from_toml_str("soft_tag_max_length = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroMaxLength));
    }

    #[test]
    fn test_config_from_toml_invalid() {
        let err = RevalidateConfig::from_toml_str("implicit_tag_prefix = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_implicit_tag() {
        let config = RevalidateConfig::default();
        assert_eq!(config.implicit_tag("/blog"), "_N_T_/blog");
    }
}
