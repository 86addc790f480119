//! Runtime configuration for the command-line tools
//!
//! Stored as YAML in the application data directory.
//! Default location: `{app_data_dir}/runtime.yaml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::default_payload_path;

/// Root runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// JSON settings payload handed to the loader
    pub payload_path: PathBuf,
    /// Template used when neither the command line nor the payload
    /// provides one
    pub preview_template: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            payload_path: default_payload_path(),
            preview_template: String::from("%artist% - %title%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert!(config.payload_path.ends_with("config.json"));
        assert_eq!(config.preview_template, "%artist% - %title%");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: RuntimeConfig =
            serde_yaml::from_str("preview_template: \"%title%\"\n").unwrap();
        assert_eq!(config.preview_template, "%title%");
        assert_eq!(config.payload_path, default_payload_path());
    }
}
