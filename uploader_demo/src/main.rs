//! Headless driver for the uploader core: replays a JSON list of intents
//! against in-memory platform adapters and prints each outcome followed by
//! the final view.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uploader_core::{mount_headless, DispatchOutcome, NativeInput, UploaderConfig, UploaderIntent};

const SAMPLE_SCRIPT: &str = r#"[
    {"type": "Pick", "data": {"files": [
        {"name": "beach.png", "size_bytes": 1572864, "media_type": "image/png",
         "last_modified": "2024-06-01T09:30:00Z", "raw_handle": 1},
        {"name": "forest.jpg", "size_bytes": 3250585, "media_type": "image/jpeg",
         "last_modified": "2024-06-02T17:05:00Z", "raw_handle": 2}
    ]}},
    {"type": "DragEnter", "data": {"has_files": true}},
    {"type": "DragOver"},
    {"type": "Drop", "data": {"files": [
        {"name": "image.png", "size_bytes": 20480, "media_type": "image/png",
         "last_modified": "2024-06-03T08:00:00Z", "raw_handle": 3},
        {"name": "document.pdf", "size_bytes": 40960, "media_type": "application/pdf",
         "last_modified": "2024-06-03T08:01:00Z", "raw_handle": 4}
    ]}},
    {"type": "DismissRejection"}
]"#;

#[derive(Serialize)]
struct Step<'a> {
    step: usize,
    intent: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<DispatchOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();

    let config = UploaderConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    info!(accept = %config.picker.accept, strict_sync = config.sync.strict, "Configuration loaded");

    let script = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read intent script {}", path))?,
        None => {
            info!("No script given, replaying the built-in sample");
            SAMPLE_SCRIPT.to_string()
        }
    };

    let intents: Vec<UploaderIntent> =
        serde_json::from_str(&script).context("Intent script is not a JSON list of intents")?;

    let (mut uploader, input, _surface, _previews) = mount_headless(config)?;

    for (index, intent) in intents.into_iter().enumerate() {
        let name = intent_name(&intent);
        let step = match uploader.dispatch(intent) {
            Ok(outcome) => Step { step: index + 1, intent: name, outcome: Some(outcome), error: None },
            Err(e) => {
                warn!(step = index + 1, intent = name, "Intent failed: {}", e);
                Step { step: index + 1, intent: name, outcome: None, error: Some(e.to_string()) }
            }
        };
        println!("{}", serde_json::to_string(&step)?);
    }

    let view = uploader.view();
    println!("{}", view.to_json()?);
    info!(items = view.items.len(), native_files = input.files().len(), "Replay finished");

    uploader.unmount();
    Ok(())
}

fn intent_name(intent: &UploaderIntent) -> &'static str {
    match intent {
        UploaderIntent::Pick { .. } => "pick",
        UploaderIntent::DragEnter { .. } => "drag_enter",
        UploaderIntent::DragOver => "drag_over",
        UploaderIntent::DragLeave => "drag_leave",
        UploaderIntent::DragCancel => "drag_cancel",
        UploaderIntent::Drop { .. } => "drop",
        UploaderIntent::Delete { .. } => "delete",
        UploaderIntent::Reset => "reset",
        UploaderIntent::DismissRejection => "dismiss_rejection",
        UploaderIntent::PreviewLoaded { .. } => "preview_loaded",
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!(
                "{}={},uploader_core={}",
                env!("CARGO_CRATE_NAME").replace('-', "_"),
                default_level,
                default_level
            ).into()
        });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
