use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;

/// Limits applied by the rule builder and by validation of untrusted input.
///
/// Every field has a default, so a config file only needs the keys it overrides:
///
/// ```toml
/// max_depth = 4
/// suggestion_limit = 12
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Deepest group nesting the builder offers to create.
    pub max_depth: usize,
    /// Extra group levels tolerated when reading conditions authored elsewhere.
    pub depth_tolerance: usize,
    /// Maximum number of path suggestions returned per query.
    pub suggestion_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            depth_tolerance: 1,
            suggestion_limit: 8,
        }
    }
}

impl EditorConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_depth_tolerance(mut self, depth_tolerance: usize) -> Self {
        self.depth_tolerance = depth_tolerance;
        self
    }

    pub fn with_suggestion_limit(mut self, suggestion_limit: usize) -> Self {
        self.suggestion_limit = suggestion_limit;
        self
    }

    /// The number of nested group levels accepted when checking JSON shape.
    pub fn validation_depth(&self) -> usize {
        self.max_depth.saturating_add(self.depth_tolerance)
    }

    /// Parses and checks a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Loads a config from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_depth",
                message: "must allow at least one group level".to_string(),
            });
        }
        if self.suggestion_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "suggestion_limit",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builder_limits() {
        let config = EditorConfig::default();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.validation_depth(), 4);
        assert_eq!(config.suggestion_limit, 8);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EditorConfig::from_toml_str("max_depth = 5").unwrap();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.depth_tolerance, 1);
        assert_eq!(config.suggestion_limit, 8);
    }

    #[test]
    fn test_rejects_zero_suggestion_limit() {
        let err = EditorConfig::from_toml_str("suggestion_limit = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "suggestion_limit",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = EditorConfig::from_toml_str("max_dept = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_loads_sample_config_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/editor.toml");
        let config = EditorConfig::from_file(path).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EditorConfig::from_file("data/does-not-exist.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert_eq!(path, "data/does-not-exist.toml"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
