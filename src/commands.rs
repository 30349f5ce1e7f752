//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

/// Commands returned by update functions
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Request a full redraw
    Redraw,
    /// Write text to the system clipboard
    /// Sends Msg::App(ClipboardResult) when done
    CopyToClipboard { text: String },

    // File dialogs
    /// Show native open dialog filtered to images
    ShowOpenImageDialog,
    /// Show native open dialog filtered to project JSON
    ShowImportDialog,
    /// Show native save dialog for a project file
    ShowExportDialog {
        /// Suggested file path (for pre-filling name/directory)
        suggested: Option<PathBuf>,
    },

    // File I/O (runs off the event loop)
    /// Read and decode an image
    LoadImage { path: PathBuf },
    /// Read a project file
    LoadProject { path: PathBuf },
    /// Write a project file
    SaveProject { path: PathBuf, content: String },

    /// Request application exit
    Quit,
}

impl Cmd {
    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::Redraw => true,
            // The readout goes into the title before the copy is confirmed
            Cmd::CopyToClipboard { .. } => true,
            // Dialogs don't need immediate redraw - they'll trigger messages when done
            Cmd::ShowOpenImageDialog => false,
            Cmd::ShowImportDialog => false,
            Cmd::ShowExportDialog { .. } => false,
            // Loading/saving status is shown straight away
            Cmd::LoadImage { .. } => true,
            Cmd::LoadProject { .. } => true,
            Cmd::SaveProject { .. } => true,
            // Quit doesn't need redraw - app is exiting
            Cmd::Quit => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_commands_redraw_but_dialogs_do_not() {
        assert!(Cmd::Redraw.needs_redraw());
        assert!(Cmd::LoadImage {
            path: PathBuf::from("scan.png")
        }
        .needs_redraw());
        assert!(!Cmd::ShowImportDialog.needs_redraw());
        assert!(!Cmd::ShowExportDialog { suggested: None }.needs_redraw());
        assert!(!Cmd::Quit.needs_redraw());
    }
}
