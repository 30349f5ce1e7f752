//! Application model - the complete state of the annotation tool
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod document;
pub mod form;
pub mod ui;

pub use document::Document;
pub use form::{FormField, GridForm};
pub use ui::UiState;

use crate::config::AppConfig;
use crate::grid::Color;
use crate::mode::{ModeState, PendingSelection};
use crate::viewport::ViewState;

const APP_NAME: &str = "gridpaint";

/// The complete application model
#[derive(Debug, Clone)]
pub struct AppModel {
    /// Matrix, history and image
    pub document: Document,
    /// Zoom, pan and device scale
    pub view: ViewState,
    /// Active mode and in-progress selection
    pub mode: ModeState,
    /// Matrix definition fields
    pub form: GridForm,
    /// Colour used by paint, fill and submatrix
    pub selected_color: Color,
    /// UI state (status line, readout)
    pub ui: UiState,
    /// Persisted configuration
    pub config: AppConfig,
    /// Window dimensions in physical pixels
    pub window_size: (u32, u32),
}

impl AppModel {
    /// Create a model for a physical window size and device scale
    pub fn new(window_width: u32, window_height: u32, scale_factor: f64, config: AppConfig) -> Self {
        let scale = config.device_scale.unwrap_or(scale_factor);
        let view =
            ViewState::new(window_width, window_height, scale).with_limits(config.zoom_limits());

        Self {
            document: Document::with_max_undo_steps(config.max_undo_steps),
            view,
            mode: ModeState::new(),
            form: GridForm::new(),
            selected_color: config.default_color,
            ui: UiState::with_status("Open an image (Ctrl+O) or import a project (Ctrl+I)"),
            config,
            window_size: (window_width, window_height),
        }
    }

    /// Track a new physical window size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
        self.view.resize(width, height);
    }

    /// Track a new window scale factor, unless the config pins one
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if self.config.device_scale.is_some() {
            return;
        }
        let (width, height) = self.window_size;
        self.view.set_device_scale(scale_factor, width, height);
    }

    /// Palette colour for a 1-based slot
    pub fn palette_color(&self, slot: usize) -> Option<Color> {
        slot.checked_sub(1)
            .and_then(|idx| self.config.palette.get(idx))
            .copied()
    }

    /// Fit the loaded image (or the matrix, when there is no image) into the window
    pub fn fit_to_window(&mut self) -> bool {
        if let Some(image) = &self.document.image {
            self.view.fit(image.width as f64, image.height as f64);
            return true;
        }
        if let Some(geometry) = self.document.store.geometry() {
            let br = geometry.bottom_right();
            self.view.fit(br.x.max(1.0), br.y.max(1.0));
            return true;
        }
        false
    }

    /// Text for the status part of the title
    pub fn status_text(&self) -> String {
        if let PendingSelection::AwaitingColor { start, end } = self.mode.pending() {
            return format!(
                "Colour for {} to {}? 1-9 picks, Enter uses {}, Esc cancels",
                start.key(),
                end.key(),
                self.selected_color
            );
        }
        if let Some(summary) = self.form.focused_summary() {
            return summary;
        }
        match self.mode.pending() {
            PendingSelection::AutoCornerAwaitingBottomRight => {
                "Click the bottom-right corner".to_string()
            }
            PendingSelection::SubmatrixStart(start) => {
                format!("Start {} - click the end cell", start.key())
            }
            _ => self.ui.status_message.clone(),
        }
    }

    /// Window title: app name, mode, zoom and status
    pub fn window_title(&self) -> String {
        let status = self.status_text();
        let head = format!(
            "{} - {} {} - {}%",
            APP_NAME,
            self.mode.mode().label(),
            self.selected_color,
            self.view.zoom_percent()
        );
        if status.is_empty() {
            head
        } else {
            format!("{} - {}", head, status)
        }
    }
}
