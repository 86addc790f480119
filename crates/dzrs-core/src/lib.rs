//! Dzrs Core - Configuration, column schema and filename templating
//!
//! This library holds the data-transformation kernel of the Dzrs downloader:
//!
//! 1. **Config**: Load the host's flat settings payload into typed values
//!    and share it as the single source of configuration truth.
//!
//! 2. **Columns**: Column schemas of the download and directory views, with
//!    visibility live-bound to the configuration.
//!
//! 3. **Templates**: Render filenames from `%placeholder%` templates and
//!    track metadata, stripping characters filesystems reject.
//!
//! 4. **Bus**: Shared UI state cells and a synchronous event channel.

pub mod bus;
pub mod columns;
pub mod config;
pub mod download;
pub mod files;
pub mod search;
pub mod startup;
pub mod template;
pub mod track;

pub use columns::{build_columns, ColumnDescriptor, ColumnSet};
pub use config::{load, AppConfig, ConfigParseError, ConfigValue, SharedConfig};
pub use files::{DirEntryField, DirEntryRecord};
pub use template::{render, FilenameTemplate, TemplateError};
pub use track::{TrackField, TrackRecord};
