//! Error taxonomy for grid annotation operations
//!
//! Library operations return `Result<_, AnnotateError>`. The runtime surfaces
//! `user_message()` in the window title; `CellOutOfRange` is swallowed by the
//! pointer handlers (the click simply missed the grid).

/// Errors raised by the geometry, grid, image and import/export layers
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotateError {
    /// Non-positive rows/cols, inverted or degenerate corners, non-numeric input
    InvalidGeometry(String),
    /// A cell address outside the current grid
    CellOutOfRange { row: usize, col: usize },
    /// The image bytes could not be decoded
    ImageDecodeFailure(String),
    /// The system clipboard rejected the write
    ClipboardWriteFailure(String),
    /// Malformed project JSON or missing required fields
    ImportParseFailure(String),
}

impl AnnotateError {
    /// Get a user-facing message for the status line
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidGeometry(reason) => {
                format!("Please enter valid points and dimensions ({})", reason)
            }
            Self::CellOutOfRange { row, col } => format!("Cell {}-{} is outside the matrix", row, col),
            Self::ImageDecodeFailure(msg) => format!("Could not load image: {}", msg),
            Self::ClipboardWriteFailure(msg) => format!("Clipboard unavailable: {}", msg),
            Self::ImportParseFailure(msg) => format!("Import failed: {}", msg),
        }
    }
}

impl std::fmt::Display for AnnotateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGeometry(reason) => write!(f, "invalid geometry: {}", reason),
            Self::CellOutOfRange { row, col } => write!(f, "cell ({}, {}) out of range", row, col),
            Self::ImageDecodeFailure(msg) => write!(f, "image decode failure: {}", msg),
            Self::ClipboardWriteFailure(msg) => write!(f, "clipboard write failure: {}", msg),
            Self::ImportParseFailure(msg) => write!(f, "import parse failure: {}", msg),
        }
    }
}

impl std::error::Error for AnnotateError {}

pub type Result<T> = std::result::Result<T, AnnotateError>;
