//! Pointer routing by interaction mode
//!
//! Pointer positions arrive in physical surface pixels and are mapped to
//! world coordinates through the view before any hit test.

use crate::commands::Cmd;
use crate::geometry::{CellAddr, Point};
use crate::grid::Cell;
use crate::messages::PointerMsg;
use crate::mode::{Mode, PendingSelection};
use crate::model::AppModel;

pub fn update_pointer(model: &mut AppModel, msg: PointerMsg) -> Option<Cmd> {
    match msg {
        PointerMsg::Pressed(physical) => {
            let world = model.view.screen_to_world(physical);
            model.form.focused = None;
            press(model, world)
        }
        PointerMsg::Moved(physical) => {
            if !model.mode.stroke_active() {
                return None;
            }
            let world = model.view.screen_to_world(physical);
            apply_stroke(model, world).then_some(Cmd::Redraw)
        }
        PointerMsg::Released => {
            model.mode.end_stroke();
            None
        }
    }
}

fn press(model: &mut AppModel, world: Point) -> Option<Cmd> {
    match model.mode.mode() {
        Mode::Coordinate => {
            let text = format!("X: {}, Y: {}", readout_coord(world.x), readout_coord(world.y));
            model.ui.set_readout(text.clone());
            Some(Cmd::CopyToClipboard { text })
        }

        Mode::Paint | Mode::Erase => {
            model.mode.begin_stroke();
            apply_stroke(model, world);
            Some(Cmd::Redraw)
        }

        Mode::Fill => {
            let cell = hit(model, world)?;
            let color = model.selected_color;
            match model.document.fill(cell, color) {
                Ok(0) => model.ui.set_status("Region already has that colour"),
                Ok(count) => model
                    .ui
                    .set_status(format!("Filled {} cells with {}", count, color)),
                Err(e) => tracing::debug!(error = %e, "fill ignored"),
            }
            Some(Cmd::Redraw)
        }

        Mode::AutoCorner => {
            if model.mode.pending() == PendingSelection::AutoCornerAwaitingBottomRight {
                model.form.set_bottom_right(world);
                model.mode.enter(Mode::Coordinate);
                model.ui.set_status(format!(
                    "Corners ({}, {}) to ({}, {}) - press Enter to draw",
                    model.form.top_left_x,
                    model.form.top_left_y,
                    model.form.bottom_right_x,
                    model.form.bottom_right_y
                ));
            } else {
                model.form.set_top_left(world);
                model
                    .mode
                    .set_pending(PendingSelection::AutoCornerAwaitingBottomRight);
            }
            Some(Cmd::Redraw)
        }

        Mode::Submatrix => {
            let cell = hit(model, world)?;
            match model.mode.pending() {
                PendingSelection::SubmatrixStart(start) => {
                    model
                        .mode
                        .set_pending(PendingSelection::AwaitingColor { start, end: cell });
                }
                _ => model.mode.set_pending(PendingSelection::SubmatrixStart(cell)),
            }
            Some(Cmd::Redraw)
        }
    }
}

/// Cell under a world point; a miss is not an error
fn hit(model: &AppModel, world: Point) -> Option<CellAddr> {
    let cell = model.document.store.cell_at_point(world);
    if cell.is_none() {
        tracing::trace!(x = world.x, y = world.y, "pointer missed the matrix");
    }
    cell
}

/// Whole-pixel readout value; values that round to zero print as `0`
fn readout_coord(value: f64) -> i64 {
    value.round() as i64
}

/// Paint or erase the cell under `world` as part of the current stroke.
/// The first cell the stroke actually changes takes the stroke's only snapshot.
fn apply_stroke(model: &mut AppModel, world: Point) -> bool {
    let Some(cell) = hit(model, world) else {
        return false;
    };
    let Some(before) = model.document.store.cell(cell) else {
        return false;
    };
    let after = match model.mode.mode() {
        Mode::Paint => before.recolored(model.selected_color),
        Mode::Erase => Cell::Empty,
        _ => return false,
    };
    if after == before {
        return false;
    }

    if model.mode.take_stroke_snapshot() {
        model.document.record();
    }

    let result = match after {
        Cell::Empty => model.document.store.erase(cell),
        _ => model.document.store.paint(cell, model.selected_color),
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "stroke ignored");
        return false;
    }
    true
}
