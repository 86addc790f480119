//! Directory view rows
//!
//! [`DirEntryRecord`] is the row shape of the directory view, built from a
//! file's path and metadata. [`DirEntryField`] names its columns the same way
//! [`crate::track::TrackField`] does for the download view. Nothing here
//! writes to the filesystem.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// A file shown in the directory view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirEntryRecord {
    pub path: PathBuf,
    pub filename: String,
    /// Size in bytes
    pub size: u64,
    /// Extension without the dot, empty if there is none
    pub extension: String,
    /// Tagging status reported by the host, e.g. "Tagged"
    pub tag_status: Option<String>,
}

impl DirEntryRecord {
    /// Build a row from a path and its already fetched metadata
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        let text = |s: Option<&std::ffi::OsStr>| {
            s.map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
        };

        Self {
            path: path.to_path_buf(),
            filename: text(path.file_name()),
            size: metadata.len(),
            extension: text(path.extension()),
            tag_status: None,
        }
    }

    /// Build a row for the file at `path`
    ///
    /// Fails if the metadata can't be read or the path is not a file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to read metadata of {:?}", path))?;
        if !metadata.is_file() {
            anyhow::bail!("{:?} is not a file", path);
        }
        Ok(Self::from_metadata(path, &metadata))
    }

    pub fn with_tag_status(mut self, status: impl Into<String>) -> Self {
        self.tag_status = Some(status.into());
        self
    }
}

/// List the files directly inside `dir`, sorted by filename
///
/// Subdirectories and entries whose metadata can't be read are skipped.
pub fn list_dir(dir: &Path) -> Result<Vec<DirEntryRecord>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {:?}", dir))?;

    let mut records: Vec<_> = entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            match entry.metadata() {
                Ok(metadata) if metadata.is_file() => {
                    Some(DirEntryRecord::from_metadata(&path, &metadata))
                }
                Ok(_) => None,
                Err(e) => {
                    log::debug!("list_dir: Skipping {:?}: {}", path, e);
                    None
                }
            }
        })
        .collect();

    records.sort_by(|a, b| a.filename.cmp(&b.filename));
    log::debug!("list_dir: {} files in {:?}", records.len(), dir);
    Ok(records)
}

/// Format bytes as a human-readable size (GB, MB, KB or B)
pub fn format_bytes(bytes: u64) -> String {
    const GB: u64 = 1_000_000_000;
    const MB: u64 = 1_000_000;
    const KB: u64 = 1_000;

    if bytes >= GB {
        format!("{:.1}GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0}KB", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Columns of a [`DirEntryRecord`], in directory-view order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirEntryField {
    Filename,
    Size,
    Extension,
    TagStatus,
}

impl DirEntryField {
    pub const ALL: [DirEntryField; 4] = [
        DirEntryField::Filename,
        DirEntryField::Size,
        DirEntryField::Extension,
        DirEntryField::TagStatus,
    ];

    /// Stable column key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Filename => "filename",
            Self::Size => "size",
            Self::Extension => "extension",
            Self::TagStatus => "tagStatus",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }

    /// Cell text for this column
    pub fn format(&self, record: &DirEntryRecord) -> String {
        match self {
            Self::Filename => record.filename.clone(),
            Self::Size => format_bytes(record.size),
            Self::Extension => record.extension.clone(),
            Self::TagStatus => record.tag_status.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("One More Time.flac");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let record = DirEntryRecord::from_path(&path).unwrap();
        assert_eq!(record.path, path);
        assert_eq!(record.filename, "One More Time.flac");
        assert_eq!(record.size, 2048);
        assert_eq!(record.extension, "flac");
        assert_eq!(record.tag_status, None);

        assert!(DirEntryRecord::from_path(dir.path()).is_err());
        assert!(DirEntryRecord::from_path(&dir.path().join("missing.flac")).is_err());
    }

    #[test]
    fn test_list_dir_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.flac"), b"bb").unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"a").unwrap();
        std::fs::write(dir.path().join("README"), b"").unwrap();
        std::fs::create_dir(dir.path().join("covers")).unwrap();

        let records = list_dir(dir.path()).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["README", "a.mp3", "b.flac"]);
        assert_eq!(records[0].extension, "");

        assert!(list_dir(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512B");
        assert_eq!(format_bytes(2_048), "2KB");
        assert_eq!(format_bytes(31_500_000), "31.5MB");
        assert_eq!(format_bytes(1_200_000_000), "1.2GB");
    }

    #[test]
    fn test_field_format() {
        let record = DirEntryRecord {
            path: PathBuf::from("/music/Aerodynamic.flac"),
            filename: "Aerodynamic.flac".into(),
            size: 31_500_000,
            extension: "flac".into(),
            tag_status: None,
        };
        assert_eq!(DirEntryField::Filename.format(&record), "Aerodynamic.flac");
        assert_eq!(DirEntryField::Size.format(&record), "31.5MB");
        assert_eq!(DirEntryField::Extension.format(&record), "flac");
        assert_eq!(DirEntryField::TagStatus.format(&record), "");

        let record = record.with_tag_status("Tagged");
        assert_eq!(DirEntryField::TagStatus.format(&record), "Tagged");
    }

    #[test]
    fn test_key_lookup() {
        for field in DirEntryField::ALL {
            assert_eq!(DirEntryField::from_key(field.key()), Some(field));
        }
        assert_eq!(DirEntryField::from_key("title"), None);
    }
}
