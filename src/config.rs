//! Application configuration persistence
//!
//! Stores user preferences in `~/.config/gridpaint/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::Color;
use crate::viewport::{ZoomLimits, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Zoom change per zoom-in/zoom-out step
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Colours selectable with the 1-9 keys
    pub palette: Vec<Color>,
    /// Colour selected at startup
    pub default_color: Color,
    /// Opacity of painted cells over the image (0.0 - 1.0)
    pub cell_alpha: f64,
    pub grid_line_color: Color,
    pub grid_line_alpha: f64,
    /// Cap on undo steps; unset keeps the full history back to the last definition
    pub max_undo_steps: Option<usize>,
    /// Override the window's device pixel ratio
    pub device_scale: Option<f64>,
}

fn default_palette() -> Vec<Color> {
    [
        (0xff, 0x00, 0x00),
        (0x00, 0xff, 0x00),
        (0x00, 0x00, 0xff),
        (0xff, 0xff, 0x00),
        (0xff, 0x00, 0xff),
        (0x00, 0xff, 0xff),
        (0xff, 0x80, 0x00),
        (0xff, 0xff, 0xff),
        (0x00, 0x00, 0x00),
    ]
    .into_iter()
    .map(|(r, g, b)| Color::rgb(r, g, b))
    .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            zoom_step: ZOOM_STEP,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            palette: default_palette(),
            default_color: Color::RED,
            cell_alpha: 0.6,
            grid_line_color: Color::BLACK,
            grid_line_alpha: 0.8,
            max_undo_steps: None,
            device_scale: None,
        }
    }
}

impl AppConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<AppConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Repair out-of-range values instead of rejecting the whole file
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            self.min_zoom = defaults.min_zoom;
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            tracing::warn!("max_zoom {} is invalid, using default", self.max_zoom);
            self.max_zoom = defaults.max_zoom.max(self.min_zoom);
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            self.zoom_step = defaults.zoom_step;
        }
        if self.palette.is_empty() {
            self.palette = defaults.palette;
        }
        self.palette.truncate(9);
        self.cell_alpha = self.cell_alpha.clamp(0.0, 1.0);
        self.grid_line_alpha = self.grid_line_alpha.clamp(0.0, 1.0);
        self.max_undo_steps = self.max_undo_steps.map(|n| n.max(1));
        self.device_scale = self.device_scale.filter(|s| s.is_finite() && *s > 0.0);
        self
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min: self.min_zoom,
            max: self.max_zoom,
            step: self.zoom_step,
        }
    }
}
