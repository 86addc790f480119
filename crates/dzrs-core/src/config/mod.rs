//! Configuration for Dzrs
//!
//! This module provides:
//!
//! - The typed config loader for the host's flat JSON settings payload
//! - [`SharedConfig`], the single live source of configuration truth
//! - Generic YAML runtime config loading/saving for the command-line tools
//! - Standard data paths
//!
//! # Usage
//!
//! ```ignore
//! use dzrs_core::config::{load, SharedConfig};
//!
//! let config = SharedConfig::new(load(&payload)?);
//! if config.flag("filter_download_isrc") {
//!     // ...
//! }
//! ```

mod error;
mod io;
mod loader;
mod paths;
mod runtime;
mod shared;
mod value;

pub use error::{ConfigParseError, ConfigResult};
pub use io::{load_config, save_config};
pub use loader::load;
pub use paths::{app_data_dir, default_payload_path, default_runtime_config_path, APP_DIR_NAME};
pub use runtime::RuntimeConfig;
pub use shared::SharedConfig;
pub use value::{AppConfig, ConfigValue};

/// Persisted key names shared with the host
pub mod keys {
    pub const FILTER_DOWNLOAD_GENRE: &str = "filter_download_genre";
    pub const FILTER_DOWNLOAD_DATE: &str = "filter_download_date";
    pub const FILTER_DOWNLOAD_COMPOSER: &str = "filter_download_composer";
    pub const FILTER_DOWNLOAD_ISRC: &str = "filter_download_isrc";
    pub const FILTER_DOWNLOAD_COPYRIGHT: &str = "filter_download_copyright";
    pub const FILTER_DOWNLOAD_BITDEPTH: &str = "filter_download_bitdepth";
    pub const FILTER_DOWNLOAD_SAMPLINGRATE: &str = "filter_download_samplingrate";
    pub const FILTER_DIRVIEW_EXTENSION: &str = "filter_dirview_extension";

    pub const DOWNLOAD_PATH: &str = "download_path";
    pub const FILE_TEMPLATE: &str = "file_template";
    pub const OVERWRITE_DOWNLOADS: &str = "overwrite_downloads";
    pub const DIRECTORY_VIEW_PATH: &str = "directory_view_path";
}
