//! Configuration for the catalog tool.

use std::path::PathBuf;

/// Registry prefix used when none is configured.
pub const DEFAULT_REGISTRY: &str = "eu.gcr.io/gitpod-core-dev/build";

/// Tag applied to images without a pinned version when none is configured.
pub const DEFAULT_TAG: &str = "latest";

/// Catalog tool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Substitute table file. `None` uses the built-in table.
    pub table_path: Option<PathBuf>,

    /// Registry prefix for composed image references.
    pub registry: String,

    /// Tag for images that are not pinned.
    pub default_tag: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Empty values count as unset.
        let lookup = |key: &str| lookup(key).filter(|s| !s.is_empty());

        let table_path = lookup("WSP_IDE_TABLE").map(PathBuf::from);

        let registry = lookup("WSP_IMAGE_REGISTRY").unwrap_or_else(|| DEFAULT_REGISTRY.to_string());

        let default_tag = lookup("WSP_IMAGE_TAG").unwrap_or_else(|| DEFAULT_TAG.to_string());

        let log_level = lookup("WSP_LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        Self {
            table_path,
            registry,
            default_tag,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.table_path, None);
        assert_eq!(config.registry, DEFAULT_REGISTRY);
        assert_eq!(config.default_tag, DEFAULT_TAG);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("WSP_IDE_TABLE", "/etc/wsp/ides.toml"),
            ("WSP_IMAGE_REGISTRY", "registry.example.com"),
            ("WSP_IMAGE_TAG", "main-42"),
            ("WSP_LOG_LEVEL", "debug"),
        ]);
        assert_eq!(config.table_path, Some(PathBuf::from("/etc/wsp/ides.toml")));
        assert_eq!(config.registry, "registry.example.com");
        assert_eq!(config.default_tag, "main-42");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("WSP_IDE_TABLE", ""),
            ("WSP_IMAGE_REGISTRY", ""),
            ("WSP_IMAGE_TAG", ""),
            ("WSP_LOG_LEVEL", ""),
        ]);
        assert_eq!(config, config_from(&[]));
    }

    #[test]
    fn test_empty_tag_still_composes_a_reference() {
        let config = config_from(&[("WSP_IMAGE_TAG", "")]);
        let reference = wsp_ide_images::IdeImageTable::builtin()
            .image_reference("goland", &config.registry, &config.default_tag)
            .unwrap();
        assert_eq!(
            reference.to_string(),
            format!("{}/ide/goland:{}", DEFAULT_REGISTRY, DEFAULT_TAG)
        );
    }
}
