//! Command-line argument parsing
//!
//! Supports:
//! - Opening an image at startup
//! - Importing a saved project
//! - Pre-filling (and drawing) the matrix definition

use clap::Parser;
use std::path::PathBuf;

use crate::geometry::Point;
use crate::model::GridForm;

/// Annotate images with a painted cell matrix
#[derive(Parser, Debug)]
#[command(name = "gridpaint", version, about = "Annotate images with a painted cell matrix")]
pub struct CliArgs {
    /// Image to open
    #[arg(value_name = "IMAGE", conflicts_with = "project")]
    pub image: Option<PathBuf>,

    /// Project JSON to import
    #[arg(long, value_name = "FILE")]
    pub project: Option<PathBuf>,

    /// Matrix top-left corner in image pixels
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub top_left: Option<Point>,

    /// Matrix bottom-right corner in image pixels
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub bottom_right: Option<Point>,

    /// Number of matrix rows
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Number of matrix columns
    #[arg(long, value_name = "N")]
    pub cols: Option<usize>,
}

/// What to load when the window opens
#[derive(Debug, Clone, PartialEq)]
pub enum StartupMode {
    /// Start with nothing loaded
    Empty,
    /// Load an image
    Image(PathBuf),
    /// Import a project file
    Project(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub mode: StartupMode,
    /// Initial contents of the matrix form
    pub form: GridForm,
    /// Draw the matrix as soon as the window is ready
    pub define_grid: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("invalid X in '{}'", s))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("invalid Y in '{}'", s))?;
    Ok(Point::new(x, y))
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let mode = match (self.image, self.project) {
            (Some(_), Some(_)) => {
                return Err("Cannot open an image and a project at the same time".to_string())
            }
            (Some(image), None) => StartupMode::Image(image),
            (None, Some(project)) => StartupMode::Project(project),
            (None, None) => StartupMode::Empty,
        };

        let mut form = GridForm::new();
        if let Some(point) = self.top_left {
            form.top_left_x = point.x.to_string();
            form.top_left_y = point.y.to_string();
        }
        if let Some(point) = self.bottom_right {
            form.bottom_right_x = point.x.to_string();
            form.bottom_right_y = point.y.to_string();
        }
        if let Some(rows) = self.rows {
            form.rows = rows.to_string();
        }
        if let Some(cols) = self.cols {
            form.cols = cols.to_string();
        }

        let define_grid = form.is_complete();
        if define_grid {
            form.parse().map_err(|e| e.user_message())?;
        }
        if define_grid && matches!(mode, StartupMode::Project(_)) {
            return Err("--project already defines the matrix".to_string());
        }

        Ok(StartupConfig {
            mode,
            form,
            define_grid,
        })
    }
}
