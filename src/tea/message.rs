/// Message type for the interactive mode
///
/// Terminal events and the results of executed commands all arrive here and
/// are handled by the update function.

use crate::extract::Field;
use crate::input::InputOrigin;
use crossterm::event::KeyEvent;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard input
    Key(KeyEvent),

    /// Bracketed paste that is not a file path
    Paste(String),

    /// A file was dragged onto the terminal
    FileDropped(PathBuf),

    /// Periodic tick carrying the current time
    Tick(Instant),

    /// Text finished loading from somewhere other than the keyboard
    Loaded { origin: InputOrigin, content: String },

    /// Loading failed; `error` is ready for display
    LoadFailed { origin: InputOrigin, error: String },

    /// A field was placed on the clipboard
    Copied { field: Field, at: Instant },

    /// The clipboard refused the copy
    CopyFailed { field: Field, error: String },
}
