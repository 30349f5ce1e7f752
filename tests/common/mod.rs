//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use gridpaint::config::AppConfig;
use gridpaint::geometry::{CellAddr, GridGeometry, Point};
use gridpaint::grid::{Color, GridStore};
use gridpaint::messages::{GridMsg, Msg};
use gridpaint::model::AppModel;
use gridpaint::update::update;

pub const GREEN: Color = Color::rgb(0, 255, 0);
pub const BLUE: Color = Color::rgb(0, 0, 255);

pub fn addr(row: usize, col: usize) -> CellAddr {
    CellAddr::new(row, col)
}

/// Geometry from `(0, 0)` to `(width, height)`
pub fn geometry(width: f64, height: f64, rows: usize, cols: usize) -> GridGeometry {
    GridGeometry::new(Point::ORIGIN, Point::new(width, height), rows, cols).unwrap()
}

/// A store with a defined matrix from `(0, 0)` to `(width, height)`
pub fn test_store(width: f64, height: f64, rows: usize, cols: usize) -> GridStore {
    let mut store = GridStore::new();
    store.define_grid(geometry(width, height, rows, cols)).unwrap();
    store
}

/// An 800x600 model at device scale 1 with default config
pub fn test_model() -> AppModel {
    AppModel::new(800, 600, 1.0, AppConfig::default())
}

/// A model with a matrix drawn through the form, as the user would.
///
/// The view is reset to identity so physical pointer coordinates equal
/// world coordinates.
pub fn model_with_grid(width: f64, height: f64, rows: usize, cols: usize) -> AppModel {
    let mut model = test_model();
    model.form.set_top_left(Point::ORIGIN);
    model.form.set_bottom_right(Point::new(width, height));
    model.form.rows = rows.to_string();
    model.form.cols = cols.to_string();
    update(&mut model, Msg::Grid(GridMsg::DefineFromForm));
    assert!(model.document.is_defined(), "form should define a matrix");

    model.view.zoom = 1.0;
    model.view.pan = Point::ORIGIN;
    model
}

/// Press and release at a physical point
pub fn click(model: &mut AppModel, x: f64, y: f64) {
    update(model, Msg::press(x, y));
    update(model, Msg::release());
}
