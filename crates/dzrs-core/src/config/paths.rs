//! Standard locations for Dzrs data files

use std::path::PathBuf;

/// Directory name used under the platform data directory
pub const APP_DIR_NAME: &str = "Dzrs";

/// Get the application data directory
///
/// Returns the platform data directory joined with `Dzrs`:
/// - Linux: `$XDG_DATA_HOME/Dzrs` or `~/.local/share/Dzrs`
/// - macOS: `~/Library/Application Support/Dzrs`
/// - Windows: `%APPDATA%\Dzrs`
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Path of the JSON payload the host persists the settings to
///
/// Returns: `{app_data_dir}/config.json`
pub fn default_payload_path() -> PathBuf {
    app_data_dir().join("config.json")
}

/// Path of the runtime configuration for the command-line tools
///
/// Returns: `{app_data_dir}/runtime.yaml`
pub fn default_runtime_config_path() -> PathBuf {
    app_data_dir().join("runtime.yaml")
}
