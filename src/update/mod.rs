//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod grid;
mod mode;
mod pointer;
mod view;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::GridSummary;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use grid::update_grid;
pub use mode::update_mode;
pub use pointer::update_pointer;
pub use view::update_view;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    // The colour prompt is modal: pointer input waits until it is answered
    if model.mode.is_prompting() && matches!(msg, Msg::Pointer(_)) {
        return None;
    }

    match msg {
        Msg::Grid(m) => grid::update_grid(model, m),
        Msg::View(m) => view::update_view(model, m),
        Msg::Mode(m) => mode::update_mode(model, m),
        Msg::Pointer(m) => pointer::update_pointer(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after document state and logs diffs for debugging.
/// Pointer motion is too frequent to log unless it changed something.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::PointerMsg;

    let is_noisy = matches!(&msg, Msg::Pointer(PointerMsg::Moved(_)));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = GridSummary::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = GridSummary::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "grid", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Grid::Undo`
/// - `Mode::Toggle(Paint)`
/// - `App::Resize(1920, 1080)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::AppMsg;

    match msg {
        Msg::Grid(m) => format!("Grid::{:?}", m),
        Msg::View(m) => format!("View::{:?}", m),
        Msg::Mode(m) => format!("Mode::{:?}", m),
        Msg::Pointer(m) => format!("Pointer::{:?}", m),
        // Image and project payloads are too large to print
        Msg::App(AppMsg::ImageLoaded { path, result }) => {
            format!("App::ImageLoaded({}, ok={})", path.display(), result.is_ok())
        }
        Msg::App(AppMsg::ProjectLoaded { path, result }) => {
            format!("App::ProjectLoaded({}, ok={})", path.display(), result.is_ok())
        }
        Msg::App(m) => format!("App::{:?}", m),
    }
}
