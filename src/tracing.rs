//! Debug tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=gridpaint::grid=debug` - module-level filtering
//! - `RUST_LOG=grid=debug` - state diffs logged after each message
//!
//! # Log Files
//!
//! Logs are written to `~/.config/gridpaint/logs/gridpaint.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::AppModel;

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "gridpaint.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of document/mode state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct GridSummary {
    pub defined: Option<(usize, usize)>,
    pub painted: usize,
    pub anchors: usize,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub mode: &'static str,
    pub zoom_percent: u32,
}

impl GridSummary {
    pub fn from_model(model: &AppModel) -> Self {
        let store = &model.document.store;
        Self {
            defined: store.geometry().map(|g| (g.rows(), g.cols())),
            painted: store.grid().painted_count(),
            anchors: store.grid().anchor_count(),
            undo_depth: model.document.history.undo_depth(),
            redo_depth: model.document.history.redo_depth(),
            mode: model.mode.mode().label(),
            zoom_percent: model.view.zoom_percent(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &GridSummary) -> Option<String> {
        let mut changes = Vec::new();
        if self.defined != other.defined {
            changes.push(format!("matrix: {:?} → {:?}", self.defined, other.defined));
        }
        if self.painted != other.painted {
            changes.push(format!("painted: {} → {}", self.painted, other.painted));
        }
        if self.anchors != other.anchors {
            changes.push(format!("anchors: {} → {}", self.anchors, other.anchors));
        }
        if (self.undo_depth, self.redo_depth) != (other.undo_depth, other.redo_depth) {
            changes.push(format!(
                "history: {}/{} → {}/{}",
                self.undo_depth, self.redo_depth, other.undo_depth, other.redo_depth
            ));
        }
        if self.mode != other.mode {
            changes.push(format!("mode: {} → {}", self.mode, other.mode));
        }
        if self.zoom_percent != other.zoom_percent {
            changes.push(format!(
                "zoom: {}% → {}%",
                self.zoom_percent, other.zoom_percent
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
