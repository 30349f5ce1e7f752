//! Mode switching and colour prompt handlers

use crate::commands::Cmd;
use crate::grid::Color;
use crate::messages::ModeMsg;
use crate::mode::{Mode, PendingSelection};
use crate::model::AppModel;

pub fn update_mode(model: &mut AppModel, msg: ModeMsg) -> Option<Cmd> {
    match msg {
        ModeMsg::Toggle(mode) => {
            model.mode.toggle(mode);
            model.form.focused = None;
            let hint = match model.mode.mode() {
                Mode::Coordinate => "Click to read coordinates",
                Mode::Paint => "Click or drag to paint cells",
                Mode::Erase => "Click or drag to erase cells",
                Mode::Fill => "Click a cell to flood fill",
                Mode::AutoCorner => "Click the top-left corner",
                Mode::Submatrix => "Click the start cell",
            };
            model.ui.set_status(hint);
            Some(Cmd::Redraw)
        }

        ModeMsg::Cancel => {
            if model.mode.is_prompting() {
                model.ui.set_status("Submatrix cancelled");
            } else {
                model.ui.set_status("");
            }
            model.form.focused = None;
            model.mode.enter(Mode::Coordinate);
            Some(Cmd::Redraw)
        }

        ModeMsg::SelectPaletteColor(slot) => {
            let color = model.palette_color(slot)?;
            model.selected_color = color;
            if model.mode.is_prompting() {
                resolve_prompt(model, color);
            } else {
                model.ui.set_status(format!("Colour {}", color));
            }
            Some(Cmd::Redraw)
        }

        ModeMsg::AcceptPrompt => {
            if !model.mode.is_prompting() {
                return None;
            }
            let color = model.selected_color;
            resolve_prompt(model, color);
            Some(Cmd::Redraw)
        }
    }
}

/// Answer the submatrix colour prompt: one snapshot, then the region paint.
/// The mode stays Submatrix, ready for the next selection.
fn resolve_prompt(model: &mut AppModel, color: Color) {
    let PendingSelection::AwaitingColor { start, end } = model.mode.pending() else {
        return;
    };
    model.mode.clear_pending();
    match model.document.paint_region(start, end, color) {
        Ok(()) => model.ui.set_status(format!(
            "Filled {} to {} with {}",
            start.key(),
            end.key(),
            color
        )),
        Err(e) => {
            // The matrix was redefined underneath the selection
            tracing::debug!(error = %e, "submatrix no longer fits");
        }
    }
}
