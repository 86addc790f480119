//! Generic configuration I/O utilities
//!
//! YAML loading and saving for the runtime configuration of the
//! command-line tools. The host's JSON settings payload goes through
//! [`super::load`] instead.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;

/// Load a YAML config file, falling back to `T::default()`
///
/// A missing file is expected on first run and logged at info level. A file
/// that can't be read or parsed is logged as a warning.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match read_yaml(path) {
        Ok(Some(config)) => {
            log::info!("load_config: Loaded {:?}", path);
            config
        }
        Ok(None) => {
            log::info!("load_config: {:?} not found, using defaults", path);
            T::default()
        }
        Err(e) => {
            log::warn!("load_config: {:#}, using defaults", e);
            T::default()
        }
    }
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {:?}", path)),
    };

    serde_yaml::from_str(&contents)
        .map(Some)
        .with_context(|| format!("Failed to parse {:?}", path))
}

/// Write a config as YAML, creating missing parent directories
///
/// The value is serialized before anything touches the filesystem.
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {:?}", path))?;

    log::info!("save_config: Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config: RuntimeConfig = load_config(Path::new("/nonexistent/path/runtime.yaml"));
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_load_invalid_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runtime.yaml");
        std::fs::write(&path, "preview_template: [unclosed").unwrap();

        let config: RuntimeConfig = load_config(&path);
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("runtime.yaml");

        let config = RuntimeConfig {
            payload_path: dir.path().join("config.json"),
            preview_template: String::from("%album% - %title%"),
        };

        save_config(&config, &path).unwrap();
        let loaded: RuntimeConfig = load_config(&path);

        assert_eq!(loaded, config);
    }
}
