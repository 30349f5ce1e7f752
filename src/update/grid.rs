//! Matrix definition and history message handlers

use crate::commands::Cmd;
use crate::messages::GridMsg;
use crate::model::AppModel;

/// Handle matrix definition, form editing and undo/redo
pub fn update_grid(model: &mut AppModel, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::DefineFromForm => {
            model.form.focused = None;
            define_from_form(model);
            Some(Cmd::Redraw)
        }

        GridMsg::AdjustRows(delta) => {
            if model.form.adjust_rows(delta) {
                redefine_after_adjust(model);
            }
            Some(Cmd::Redraw)
        }

        GridMsg::AdjustCols(delta) => {
            if model.form.adjust_cols(delta) {
                redefine_after_adjust(model);
            }
            Some(Cmd::Redraw)
        }

        GridMsg::FocusNextField => {
            model.form.focus_next();
            Some(Cmd::Redraw)
        }

        GridMsg::FocusField(field) => {
            model.form.focused = field;
            Some(Cmd::Redraw)
        }

        GridMsg::FieldInput(ch) => model.form.insert_char(ch).then_some(Cmd::Redraw),

        GridMsg::FieldBackspace => model.form.backspace().then_some(Cmd::Redraw),

        GridMsg::Undo => {
            model.mode.end_stroke();
            if model.document.undo() {
                model.ui.set_status(format!(
                    "Undo ({} more)",
                    model.document.history.undo_depth()
                ));
            } else {
                model.ui.set_status("Nothing to undo");
            }
            Some(Cmd::Redraw)
        }

        GridMsg::Redo => {
            model.mode.end_stroke();
            if model.document.redo() {
                model.ui.set_status(format!(
                    "Redo ({} more)",
                    model.document.history.redo_depth()
                ));
            } else {
                model.ui.set_status("Nothing to redo");
            }
            Some(Cmd::Redraw)
        }
    }
}

/// Validate the form and establish a new matrix. Invalid input leaves the
/// current matrix untouched.
pub(crate) fn define_from_form(model: &mut AppModel) -> bool {
    let geometry = match model.form.parse() {
        Ok(geometry) => geometry,
        Err(e) => {
            tracing::debug!(error = %e, "matrix form rejected");
            model.ui.set_status(e.user_message());
            return false;
        }
    };

    if let Err(e) = model.document.define_grid(geometry) {
        model.ui.set_status(e.user_message());
        return false;
    }

    // Old cell addresses mean nothing in the new matrix
    model.mode.clear_pending();
    model.mode.end_stroke();

    if model.document.image.is_none() {
        model.fit_to_window();
    }
    model.ui.set_status(format!(
        "Matrix {} x {} drawn",
        geometry.rows(),
        geometry.cols()
    ));
    true
}

fn redefine_after_adjust(model: &mut AppModel) {
    if model.form.is_complete() {
        define_from_form(model);
    } else {
        model
            .ui
            .set_status(format!("Rows: {}, Cols: {}", model.form.rows, model.form.cols));
    }
}
