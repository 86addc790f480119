//! Column schemas for the download and directory views
//!
//! Both views have a fixed column order. Some columns are pinned (always
//! shown, not configurable); the others are gated by a boolean config key.
//! A gated column does not copy the flag: [`ColumnDescriptor::enabled`]
//! reads the shared config every time, so toggling the key in a settings
//! screen is reflected without rebuilding the schema.
//!
//! ## Usage
//!
//! ```ignore
//! let columns = build_columns(&config);
//! for column in columns.visible_download() {
//!     println!("{} ({:?})", column.label(), column.width());
//! }
//! ```

use crate::config::{keys, SharedConfig};
use crate::files::DirEntryField;
use crate::track::TrackField;

/// Whether a column is pinned or follows a config key
#[derive(Debug, Clone)]
enum ColumnBinding {
    Pinned,
    Gated {
        config_key: &'static str,
        config: SharedConfig,
    },
}

/// A column of one of the views
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    key: &'static str,
    label: &'static str,
    width: Option<u16>,
    binding: ColumnBinding,
}

impl ColumnDescriptor {
    fn pinned(key: &'static str, label: &'static str, width: Option<u16>) -> Self {
        Self {
            key,
            label,
            width,
            binding: ColumnBinding::Pinned,
        }
    }

    fn gated(
        key: &'static str,
        label: &'static str,
        width: Option<u16>,
        config_key: &'static str,
        config: &SharedConfig,
    ) -> Self {
        Self {
            key,
            label,
            width,
            binding: ColumnBinding::Gated {
                config_key,
                config: config.clone(),
            },
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Relative width in percent of the table, if the view sizes columns
    pub fn width(&self) -> Option<u16> {
        self.width
    }

    /// Config key gating this column, `None` for pinned columns
    pub fn config_key(&self) -> Option<&'static str> {
        match &self.binding {
            ColumnBinding::Pinned => None,
            ColumnBinding::Gated { config_key, .. } => Some(*config_key),
        }
    }

    /// Check if the column can not be toggled
    pub fn readonly(&self) -> bool {
        matches!(self.binding, ColumnBinding::Pinned)
    }

    /// Current visibility
    ///
    /// Pinned columns are always enabled. Gated columns read their key from
    /// the shared config; a missing key means disabled.
    pub fn enabled(&self) -> bool {
        match &self.binding {
            ColumnBinding::Pinned => true,
            ColumnBinding::Gated { config_key, config } => config.flag(config_key),
        }
    }

    /// Toggle a gated column by writing its config key
    ///
    /// Returns `false` without changing anything for pinned columns.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        match &self.binding {
            ColumnBinding::Pinned => {
                log::debug!("set_enabled: Column '{}' is pinned", self.key);
                false
            }
            ColumnBinding::Gated { config_key, config } => {
                config.set(*config_key, enabled);
                true
            }
        }
    }

    /// Track field shown by this column (download view only)
    pub fn track_field(&self) -> Option<TrackField> {
        TrackField::from_key(self.key)
    }

    /// Directory entry field shown by this column (directory view only)
    pub fn dir_field(&self) -> Option<DirEntryField> {
        DirEntryField::from_key(self.key)
    }
}

/// Column schemas for both views
#[derive(Debug, Clone)]
pub struct ColumnSet {
    pub download: Vec<ColumnDescriptor>,
    pub dir_view: Vec<ColumnDescriptor>,
}

impl ColumnSet {
    /// Enabled download columns in display order
    pub fn visible_download(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.download.iter().filter(|c| c.enabled())
    }

    /// Enabled directory columns in display order
    pub fn visible_dir_view(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.dir_view.iter().filter(|c| c.enabled())
    }

    /// Find a column of either view by its config key
    pub fn by_config_key(&self, config_key: &str) -> Option<&ColumnDescriptor> {
        self.download
            .iter()
            .chain(self.dir_view.iter())
            .find(|c| c.config_key() == Some(config_key))
    }
}

/// Build both column schemas bound to the shared config
///
/// Descriptors keep a handle to `config`, so later writes to it (including
/// through [`ColumnDescriptor::set_enabled`]) change what
/// [`ColumnSet::visible_download`] and [`ColumnSet::visible_dir_view`] yield.
///
/// # Arguments
/// * `config` - Shared configuration the gated columns read their key from
///
/// # Example
///
/// ```ignore
/// let columns = build_columns(&config);
/// config.set("filter_download_genre", true);
/// assert!(columns.visible_download().any(|c| c.key() == "genre"));
/// ```
pub fn build_columns(config: &SharedConfig) -> ColumnSet {
    ColumnSet {
        download: download_columns(config),
        dir_view: dir_view_columns(config),
    }
}

fn download_columns(config: &SharedConfig) -> Vec<ColumnDescriptor> {
    TrackField::ALL
        .iter()
        .map(|&field| {
            let key = field.key();
            let gated = |label, width, config_key| {
                ColumnDescriptor::gated(key, label, Some(width), config_key, config)
            };
            match field {
                TrackField::Title => ColumnDescriptor::pinned(key, "Title", Some(20)),
                TrackField::Album => ColumnDescriptor::pinned(key, "Album", Some(15)),
                TrackField::Artist => ColumnDescriptor::pinned(key, "Artist", Some(15)),
                TrackField::Genre => gated("Genre", 10, keys::FILTER_DOWNLOAD_GENRE),
                TrackField::Duration => ColumnDescriptor::pinned(key, "Duration", Some(6)),
                TrackField::Date => gated("Date", 10, keys::FILTER_DOWNLOAD_DATE),
                TrackField::Composer => gated("Composer", 8, keys::FILTER_DOWNLOAD_COMPOSER),
                TrackField::Isrc => gated("Isrc", 8, keys::FILTER_DOWNLOAD_ISRC),
                TrackField::Copyright => gated("Copyright", 15, keys::FILTER_DOWNLOAD_COPYRIGHT),
                TrackField::BitDepth => gated("Bit Depth", 5, keys::FILTER_DOWNLOAD_BITDEPTH),
                TrackField::SamplingRate => {
                    gated("Sampling", 8, keys::FILTER_DOWNLOAD_SAMPLINGRATE)
                }
            }
        })
        .collect()
}

fn dir_view_columns(config: &SharedConfig) -> Vec<ColumnDescriptor> {
    DirEntryField::ALL
        .iter()
        .map(|&field| {
            let key = field.key();
            match field {
                DirEntryField::Filename => ColumnDescriptor::pinned(key, "Filename", None),
                DirEntryField::Size => ColumnDescriptor::pinned(key, "Size", None),
                DirEntryField::Extension => ColumnDescriptor::gated(
                    key,
                    "Extension",
                    None,
                    keys::FILTER_DIRVIEW_EXTENSION,
                    config,
                ),
                DirEntryField::TagStatus => ColumnDescriptor::pinned(key, "Status", None),
            }
        })
        .collect()
}
