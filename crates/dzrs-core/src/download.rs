//! Download and browse path construction
//!
//! Builds the destination path for a rendered filename and the directory
//! the host should reveal in the OS file browser. Nothing here writes,
//! moves or opens files.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{keys, AppConfig};

/// Extension of downloaded tracks
pub const DOWNLOAD_EXTENSION: &str = "flac";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DownloadError {
    /// `download_path` is not configured
    #[error("No download directory configured")]
    MissingDownloadPath,

    /// Target exists and overwriting is disabled
    #[error("File {0:?} already exists")]
    AlreadyExists(PathBuf),
}

/// Destination of a download for a rendered filename
///
/// Returns `<download_path>/<filename>.flac`. Fails if the download
/// directory is not configured, or if the file exists and
/// `overwrite_downloads` is not enabled.
pub fn download_target(config: &AppConfig, filename: &str) -> Result<PathBuf, DownloadError> {
    let dir = config
        .string(keys::DOWNLOAD_PATH)
        .filter(|dir| !dir.is_empty())
        .ok_or(DownloadError::MissingDownloadPath)?;

    let target = Path::new(dir).join(format!("{}.{}", filename, DOWNLOAD_EXTENSION));

    if target.exists() && !config.flag(keys::OVERWRITE_DOWNLOADS) {
        log::warn!("download_target: {:?} exists and overwrite is off", target);
        return Err(DownloadError::AlreadyExists(target));
    }

    Ok(target)
}

/// Directory to reveal in the file browser for `path`
///
/// Directories are revealed as they are, files reveal their parent.
pub fn reveal_target(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

/// Directory shown by the directory view
///
/// Uses `directory_view_path`, falling back to `download_path`.
pub fn directory_view_path(config: &AppConfig) -> Option<PathBuf> {
    [keys::DIRECTORY_VIEW_PATH, keys::DOWNLOAD_PATH]
        .iter()
        .filter_map(|key| config.string(key))
        .find(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(dir: &Path) -> AppConfig {
        let mut config = AppConfig::new();
        config.set(keys::DOWNLOAD_PATH, dir.to_string_lossy().to_string());
        config
    }

    #[test]
    fn test_target_in_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = download_target(&config_for(dir.path()), "Daft Punk - Aerodynamic").unwrap();
        assert_eq!(target, dir.path().join("Daft Punk - Aerodynamic.flac"));
    }

    #[test]
    fn test_missing_download_path() {
        assert_eq!(
            download_target(&AppConfig::new(), "x"),
            Err(DownloadError::MissingDownloadPath)
        );

        let mut config = AppConfig::new();
        config.set(keys::DOWNLOAD_PATH, "");
        assert_eq!(download_target(&config, "x"), Err(DownloadError::MissingDownloadPath));
    }

    #[test]
    fn test_existing_file_respects_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("Track.flac");
        std::fs::write(&existing, b"").unwrap();

        let mut config = config_for(dir.path());
        assert_eq!(
            download_target(&config, "Track"),
            Err(DownloadError::AlreadyExists(existing.clone()))
        );

        config.set(keys::OVERWRITE_DOWNLOADS, true);
        assert_eq!(download_target(&config, "Track"), Ok(existing));
    }

    #[test]
    fn test_reveal_target() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(reveal_target(dir.path()), dir.path());

        let file = dir.path().join("Track.flac");
        assert_eq!(reveal_target(&file), dir.path());
        assert_eq!(reveal_target(Path::new("Track.flac")), Path::new("Track.flac"));
    }

    #[test]
    fn test_directory_view_fallback() {
        let mut config = AppConfig::new();
        assert_eq!(directory_view_path(&config), None);

        config.set(keys::DOWNLOAD_PATH, "/music/downloads");
        assert_eq!(directory_view_path(&config), Some(PathBuf::from("/music/downloads")));

        config.set(keys::DIRECTORY_VIEW_PATH, "/music/library");
        assert_eq!(directory_view_path(&config), Some(PathBuf::from("/music/library")));
    }
}
