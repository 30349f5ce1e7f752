//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::error::AnnotateError;
use crate::geometry::Point;
use crate::image::ImageState;
use crate::mode::Mode;
use crate::model::FormField;

/// Matrix definition, form editing and history
#[derive(Debug, Clone)]
pub enum GridMsg {
    /// Draw the matrix from the form fields (Enter)
    DefineFromForm,
    /// Change the row count and redraw the matrix (Shift+Up/Down)
    AdjustRows(i64),
    /// Change the column count and redraw the matrix (Shift+Right/Left)
    AdjustCols(i64),
    /// Cycle keyboard focus through the form fields (Tab)
    FocusNextField,
    /// Focus a field, or clear focus with `None`
    FocusField(Option<FormField>),
    /// Type a character into the focused field
    FieldInput(char),
    /// Delete the last character of the focused field
    FieldBackspace,
    /// Undo the last grid mutation (Ctrl+Z)
    Undo,
    /// Redo the last undone mutation (Ctrl+Y)
    Redo,
}

/// Zoom, pan and surface changes
#[derive(Debug, Clone)]
pub enum ViewMsg {
    /// Zoom in one step around the viewport centre
    ZoomIn,
    /// Zoom out one step around the viewport centre
    ZoomOut,
    /// Fit the image into the window (Ctrl+0)
    Fit,
    /// Begin a pan gesture at a physical pointer position
    StartPan(Point),
    /// Continue a pan gesture
    UpdatePan(Point),
    /// Finish a pan gesture
    EndPan,
}

/// Mode switching and colour selection
#[derive(Debug, Clone)]
pub enum ModeMsg {
    /// Toggle a mode button; toggling the active mode returns to Coordinate
    Toggle(Mode),
    /// Abandon any pending selection and return to Coordinate (Escape)
    Cancel,
    /// Select a palette colour (1-9); answers an open colour prompt
    SelectPaletteColor(usize),
    /// Accept the colour prompt with the selected colour (Enter)
    AcceptPrompt,
}

/// Primary-button pointer input at physical surface coordinates
#[derive(Debug, Clone)]
pub enum PointerMsg {
    Pressed(Point),
    Moved(Point),
    Released,
}

/// App messages (file I/O, clipboard, window)
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Window resized (physical pixels)
    Resize(u32, u32),
    /// Display scale factor changed (e.g., moving between monitors)
    ScaleFactorChanged(f64),

    /// User requested the open-image dialog (Ctrl+O)
    OpenImage,
    /// Open-image dialog returned a path (or None if cancelled)
    OpenImageDialogResult { path: Option<PathBuf> },
    /// Image read and decode finished
    ImageLoaded {
        path: PathBuf,
        result: Result<ImageState, AnnotateError>,
    },

    /// User requested export (Ctrl+S)
    ExportProject,
    /// Export dialog returned a path (or None if cancelled)
    ExportDialogResult { path: Option<PathBuf> },
    /// Project write finished
    ExportCompleted {
        path: PathBuf,
        result: Result<(), String>,
    },

    /// User requested import (Ctrl+I)
    ImportProject,
    /// Import dialog returned a path (or None if cancelled)
    ImportDialogResult { path: Option<PathBuf> },
    /// Project file read finished
    ProjectLoaded {
        path: PathBuf,
        result: Result<String, String>,
    },

    /// Clipboard write finished for a coordinate readout
    ClipboardResult {
        text: String,
        result: Result<(), AnnotateError>,
    },

    /// Quit the application
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Matrix definition and history
    Grid(GridMsg),
    /// Zoom and pan
    View(ViewMsg),
    /// Interaction mode
    Mode(ModeMsg),
    /// Pointer input routed by the active mode
    Pointer(PointerMsg),
    /// App messages (file I/O, window)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn resize(width: u32, height: u32) -> Self {
        Msg::App(AppMsg::Resize(width, height))
    }

    pub fn press(x: f64, y: f64) -> Self {
        Msg::Pointer(PointerMsg::Pressed(Point::new(x, y)))
    }

    pub fn drag(x: f64, y: f64) -> Self {
        Msg::Pointer(PointerMsg::Moved(Point::new(x, y)))
    }

    pub fn release() -> Self {
        Msg::Pointer(PointerMsg::Released)
    }

    pub fn toggle(mode: Mode) -> Self {
        Msg::Mode(ModeMsg::Toggle(mode))
    }
}
