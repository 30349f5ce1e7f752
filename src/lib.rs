//! gridpaint - annotate images with a painted cell matrix
//!
//! This crate provides the core types and logic for the annotation tool,
//! implementing the Elm Architecture pattern. The binary owns the window,
//! event loop and side effects.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod history;
pub mod image;
pub mod messages;
pub mod mode;
pub mod model;
pub mod tracing;
pub mod update;
pub mod view;
pub mod viewport;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::AppConfig;
pub use error::{AnnotateError, Result};
pub use messages::Msg;
pub use model::AppModel;
