//! UI state - status line, coordinate readout and pending I/O flags

/// UI state shown in the window title
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Message displayed in the status line
    pub status_message: String,
    /// Last coordinate readout (`X: 12, Y: 34`), without the copy suffix
    pub readout: Option<String>,
    /// Whether the readout was confirmed as copied to the clipboard
    pub copied: bool,
    /// Whether an image or project is currently being loaded
    pub is_loading: bool,
    /// Whether a project is currently being saved
    pub is_saving: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a UI state with an initial status message
    pub fn with_status(message: impl Into<String>) -> Self {
        Self {
            status_message: message.into(),
            ..Self::default()
        }
    }

    /// Set the status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Show a new coordinate readout, pending clipboard confirmation
    pub fn set_readout(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.status_message = text.clone();
        self.readout = Some(text);
        self.copied = false;
    }

    /// Mark the readout as copied if it still matches `text`
    pub fn confirm_copied(&mut self, text: &str) {
        if self.readout.as_deref() == Some(text) {
            self.copied = true;
            self.status_message = format!("{} (Copied!)", text);
        }
    }

    /// Check if the UI is busy (loading or saving).
    /// New file requests are ignored while busy.
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_saving
    }
}
