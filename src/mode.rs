//! Interaction modes
//!
//! Exactly one mode is active. Coordinate is the idle default. Switching
//! modes always discards any half-finished multi-click selection.

use crate::geometry::CellAddr;

/// Pointer interaction mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Report world coordinates and copy them to the clipboard
    #[default]
    Coordinate,
    /// Paint the cell under the pointer, continuing while dragged
    Paint,
    /// Erase the cell under the pointer, continuing while dragged
    Erase,
    /// Flood fill from the clicked cell
    Fill,
    /// Two clicks pick the matrix corners
    AutoCorner,
    /// Two clicks pick a rectangular submatrix, then a colour
    Submatrix,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Coordinate => "Coordinates",
            Mode::Paint => "Paint",
            Mode::Erase => "Erase",
            Mode::Fill => "Fill",
            Mode::AutoCorner => "Pick corners",
            Mode::Submatrix => "Submatrix",
        }
    }

    /// Whether a held button keeps applying the mode to cells under the pointer
    pub fn is_stroke(&self) -> bool {
        matches!(self, Mode::Paint | Mode::Erase)
    }
}

/// Progress of a multi-click interaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PendingSelection {
    #[default]
    None,
    /// Top-left corner recorded, waiting for bottom-right
    AutoCornerAwaitingBottomRight,
    /// First submatrix corner recorded
    SubmatrixStart(CellAddr),
    /// Both corners recorded; modal colour prompt is open
    AwaitingColor { start: CellAddr, end: CellAddr },
}

/// The current mode plus any in-progress selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeState {
    mode: Mode,
    pending: PendingSelection,
    /// A paint/erase stroke is in progress (button held)
    stroke_active: bool,
    /// The current stroke has already taken its undo snapshot
    stroke_recorded: bool,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending(&self) -> PendingSelection {
        self.pending
    }

    /// Enter `mode`, clearing any pending selection
    pub fn enter(&mut self, mode: Mode) {
        if mode != self.mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "mode change");
        }
        self.mode = mode;
        self.pending = PendingSelection::None;
        self.end_stroke();
    }

    /// Toggle button semantics: pressing the active mode's control returns to
    /// Coordinate, any other mode is entered directly
    pub fn toggle(&mut self, mode: Mode) {
        if self.mode == mode {
            self.enter(Mode::Coordinate);
        } else {
            self.enter(mode);
        }
    }

    pub fn set_pending(&mut self, pending: PendingSelection) {
        self.pending = pending;
    }

    pub fn clear_pending(&mut self) {
        self.pending = PendingSelection::None;
    }

    /// A modal colour prompt blocks all pointer input until resolved
    pub fn is_prompting(&self) -> bool {
        matches!(self.pending, PendingSelection::AwaitingColor { .. })
    }

    pub fn begin_stroke(&mut self) {
        self.stroke_active = self.mode.is_stroke();
        self.stroke_recorded = false;
    }

    pub fn end_stroke(&mut self) {
        self.stroke_active = false;
        self.stroke_recorded = false;
    }

    pub fn stroke_active(&self) -> bool {
        self.stroke_active
    }

    /// Whether the stroke still needs its snapshot. Marks it taken.
    pub fn take_stroke_snapshot(&mut self) -> bool {
        let needed = self.stroke_active && !self.stroke_recorded;
        self.stroke_recorded |= self.stroke_active;
        needed
    }
}
