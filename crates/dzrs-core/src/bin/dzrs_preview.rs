//! Filename preview tool
//!
//! Loads the settings payload the way the application does at startup and
//! prints the filename a track would be downloaded to.
//!
//! ## Command line
//!
//! ```text
//! dzrs-preview [--runtime <runtime.yaml>] [--template <template>] [<track.json>]
//! ```
//!
//! The template is taken from `--template`, then the `file_template`
//! setting, then `preview_template` of the runtime config.

use anyhow::{Context, Result};
use std::path::PathBuf;

use dzrs_core::config::{self, keys, RuntimeConfig};
use dzrs_core::download;
use dzrs_core::startup::{bootstrap, FileBridge};
use dzrs_core::{FilenameTemplate, TrackRecord};

#[derive(Debug, Default)]
struct Args {
    runtime: Option<PathBuf>,
    template: Option<String>,
    track: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--runtime" => {
                args.runtime = Some(iter.next().context("--runtime needs a path")?.into());
            }
            "--template" => {
                args.template = Some(iter.next().context("--template needs a value")?);
            }
            _ if arg.starts_with("--") => anyhow::bail!("Unknown flag: {}", arg),
            _ => args.track = Some(arg.into()),
        }
    }

    Ok(args)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = parse_args()?;

    let runtime_path = args
        .runtime
        .clone()
        .unwrap_or_else(config::default_runtime_config_path);
    let runtime: RuntimeConfig = config::load_config(&runtime_path);

    let bridge = FileBridge::new(&runtime.payload_path);
    let context = tokio::runtime::Runtime::new()
        .context("Failed to start runtime")?
        .block_on(bootstrap(&bridge))
        .with_context(|| format!("Invalid settings payload in {:?}", runtime.payload_path))?;

    let record = match &args.track {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read track file: {:?}", path))?;
            TrackRecord::from_json(&json)
                .with_context(|| format!("Failed to parse track file: {:?}", path))?
        }
        None => context.default_track_record(),
    };

    let settings = context.config.snapshot();
    let template = match args.template {
        Some(template) => FilenameTemplate::new(template),
        None if settings.contains_key(keys::FILE_TEMPLATE) => {
            FilenameTemplate::from_config(&settings, keys::FILE_TEMPLATE)?
        }
        None => FilenameTemplate::new(runtime.preview_template.clone()),
    };

    let filename = template.render(&record);
    println!("Template: {}", template.as_str());
    println!("Filename: {}", filename);

    match download::download_target(&settings, &filename) {
        Ok(target) => println!("Target:   {}", target.display()),
        Err(e) => println!("Target:   unavailable ({})", e),
    }

    let download: Vec<_> = context.columns.visible_download().map(|c| c.label()).collect();
    let dir_view: Vec<_> = context.columns.visible_dir_view().map(|c| c.label()).collect();
    println!("Download columns:  {}", download.join(", "));
    println!("Directory columns: {}", dir_view.join(", "));

    Ok(())
}
