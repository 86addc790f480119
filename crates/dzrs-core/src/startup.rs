//! Startup phase
//!
//! The host supplies the settings payload and the default track object
//! through asynchronous calls. [`bootstrap`] awaits each of them exactly
//! once and builds the [`AppContext`] every other component is created
//! from. Nothing should read configuration before this phase completes.
//!
//! ```ignore
//! let context = bootstrap(&bridge).await?;
//! let columns = &context.columns;
//! ```

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::bus::{AppEvent, StateBus};
use crate::columns::{build_columns, ColumnSet};
use crate::config::{load, ConfigResult, ConfigValue, SharedConfig};
use crate::track::TrackRecord;

/// Calls the host exposes to the core
#[allow(async_fn_in_trait)]
pub trait HostBridge {
    /// Flat JSON object of persisted settings, values string-encoded
    async fn config_values(&self) -> Result<String>;

    /// JSON of a default track object used to pre-fill forms
    async fn default_track_object(&self) -> Result<String>;
}

/// Everything built during startup
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: SharedConfig,
    pub columns: ColumnSet,
    pub bus: StateBus,
    /// Default track object exactly as the host sent it
    pub default_track: String,
}

impl AppContext {
    /// Build a context from an already loaded payload
    pub fn from_payload(payload: &str, default_track: String) -> ConfigResult<Self> {
        let config = SharedConfig::new(load(payload)?);
        let columns = build_columns(&config);
        Ok(Self {
            config,
            columns,
            bus: StateBus::new(),
            default_track,
        })
    }

    /// Change a setting and publish [`AppEvent::ConfigChanged`]
    pub fn update_config(&self, key: &str, value: impl Into<ConfigValue>) {
        let value = value.into();
        self.config.set(key, value.clone());
        self.bus.publish(&AppEvent::ConfigChanged {
            key: key.to_string(),
            value,
        });
    }

    /// Default track parsed into a record, empty if it is not valid JSON
    pub fn default_track_record(&self) -> TrackRecord {
        TrackRecord::from_json(&self.default_track).unwrap_or_else(|e| {
            log::debug!("default_track_record: Unusable default track: {}", e);
            TrackRecord::default()
        })
    }
}

/// Run the startup phase
///
/// A failed settings fetch falls back to an empty payload (empty config);
/// a failed default-track fetch falls back to the serialized default
/// record. A payload that is present but malformed stops startup.
///
/// # Arguments
/// * `bridge` - Host calls providing the settings payload and default track
///
/// # Errors
/// Returns [`crate::config::ConfigParseError`] if the payload is not a flat
/// JSON object.
///
/// # Example
///
/// ```ignore
/// let context = bootstrap(&FileBridge::new(default_payload_path())).await?;
/// context.bus.set_active_page(Page::Download);
/// ```
pub async fn bootstrap<B: HostBridge>(bridge: &B) -> ConfigResult<AppContext> {
    log::info!("bootstrap: Fetching configuration from host");
    let payload = match bridge.config_values().await {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("bootstrap: Failed to fetch config values: {:#}, using empty config", e);
            String::new()
        }
    };

    let default_track = match bridge.default_track_object().await {
        Ok(track) => track,
        Err(e) => {
            log::warn!("bootstrap: Failed to fetch default track: {:#}", e);
            serde_json::to_string(&TrackRecord::default()).unwrap_or_else(|_| String::from("{}"))
        }
    };

    let context = AppContext::from_payload(&payload, default_track)?;
    log::info!(
        "bootstrap: Ready with {} config entries",
        context.config.with(|c| c.len())
    );
    Ok(context)
}

/// Host bridge backed by a payload file on disk
#[derive(Debug, Clone)]
pub struct FileBridge {
    payload_path: PathBuf,
}

impl FileBridge {
    pub fn new(payload_path: impl Into<PathBuf>) -> Self {
        Self {
            payload_path: payload_path.into(),
        }
    }
}

impl HostBridge for FileBridge {
    async fn config_values(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.payload_path)
            .await
            .with_context(|| format!("Failed to read config payload: {:?}", self.payload_path))
    }

    async fn default_track_object(&self) -> Result<String> {
        serde_json::to_string(&TrackRecord::default()).context("Failed to serialize default track")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::AppEvent;
    use std::sync::{Arc, Mutex};

    struct StaticBridge {
        config: Option<&'static str>,
        track: Option<&'static str>,
    }

    impl HostBridge for StaticBridge {
        async fn config_values(&self) -> Result<String> {
            self.config
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("host unavailable"))
        }

        async fn default_track_object(&self) -> Result<String> {
            self.track
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("host unavailable"))
        }
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_bootstrap_builds_context() {
        let bridge = StaticBridge {
            config: Some(r#"{"filter_download_genre": "true", "download_path": "/music"}"#),
            track: Some(r#"{"title": "", "artist": ""}"#),
        };
        let context = block_on(bootstrap(&bridge)).unwrap();

        assert!(context.config.flag("filter_download_genre"));
        assert_eq!(context.default_track, r#"{"title": "", "artist": ""}"#);
        let genre = context.columns.by_config_key("filter_download_genre").unwrap();
        assert!(genre.enabled());
    }

    #[test]
    fn test_bootstrap_falls_back_when_host_fails() {
        let bridge = StaticBridge {
            config: None,
            track: None,
        };
        let context = block_on(bootstrap(&bridge)).unwrap();

        assert_eq!(context.config.with(|c| c.len()), 0);
        assert_eq!(context.default_track_record(), TrackRecord::default());
        assert!(context.columns.visible_download().all(|c| c.readonly()));
    }

    #[test]
    fn test_default_track_survives_bad_numeric_field() {
        let track = String::from(r#"{"title": "Keep Me", "duration": -1, "bitDepth": "24"}"#);
        let context = AppContext::from_payload("", track).unwrap();

        let record = context.default_track_record();
        assert_eq!(record.title.as_deref(), Some("Keep Me"));
        assert_eq!(record.duration, None);
        assert_eq!(record.bit_depth, Some(24));
    }

    #[test]
    fn test_bootstrap_rejects_malformed_payload() {
        let bridge = StaticBridge {
            config: Some("{not json"),
            track: Some("{}"),
        };
        assert!(block_on(bootstrap(&bridge)).is_err());
    }

    #[test]
    fn test_update_config_reaches_columns_and_subscribers() {
        let context = AppContext::from_payload("", String::from("{}")).unwrap();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_in_callback = Arc::clone(&changes);
        context.bus.subscribe(AppEvent::CONFIG_CHANGED, move |event| {
            if let AppEvent::ConfigChanged { key, .. } = event {
                changes_in_callback.lock().unwrap().push(key.clone());
            }
        });

        context.update_config("filter_dirview_extension", true);

        let extension = context.columns.by_config_key("filter_dirview_extension").unwrap();
        assert!(extension.enabled());
        assert_eq!(*changes.lock().unwrap(), vec!["filter_dirview_extension"]);
    }

    #[test]
    fn test_file_bridge() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"file_template": "%title%"}"#).unwrap();

        let context = block_on(bootstrap(&FileBridge::new(&path))).unwrap();
        assert_eq!(context.config.string("file_template").as_deref(), Some("%title%"));

        // Missing file is a failed fetch, not a parse error
        let missing = FileBridge::new(dir.path().join("missing.json"));
        let context = block_on(bootstrap(&missing)).unwrap();
        assert_eq!(context.config.with(|c| c.len()), 0);
    }
}
