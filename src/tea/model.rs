/// Interactive-mode state
///
/// Everything the screen shows is derived from this structure.

use crate::config::Config;
use crate::extract::{Extraction, Extractor, Field, Status};
use crate::input::InputOrigin;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Model {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Editable JSON text
    pub input: InputBuffer,

    /// Where the current input text came from
    pub origin: InputOrigin,

    /// Latest successful extraction
    pub extraction: Option<Extraction>,

    /// Status line; `None` until the first action
    pub status: Option<Status>,

    /// "Copied!" badge, shown until it expires
    pub copied: Option<CopiedBadge>,

    /// A load command is in flight
    pub loading: bool,

    pub extractor: Extractor,
    pub badge_duration: Duration,
}

/// Confirmation shown on a result pane after a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopiedBadge {
    pub field: Field,
    pub at: Instant,
}

impl Model {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            input: InputBuffer::default(),
            origin: InputOrigin::Typed,
            extraction: None,
            status: None,
            copied: None,
            loading: false,
            extractor: Extractor::from_config(config),
            badge_duration: config.copy_badge_duration(),
        }
    }

    /// Display text for a field, if it was extracted
    pub fn value(&self, field: Field) -> Option<&str> {
        self.extraction
            .as_ref()
            .and_then(|e| e.get(field))
            .map(|m| m.value.as_str())
    }

    pub fn is_copied(&self, field: Field) -> bool {
        self.copied.map(|badge| badge.field == field).unwrap_or(false)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Multi-line text buffer with a cursor
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        self.text.insert_str(self.cursor, &normalized);
        self.cursor += normalized.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    /// Start of the current line
    pub fn move_home(&mut self) {
        self.cursor = self.text[..self.cursor].rfind('\n').map(|i| i + 1).unwrap_or(0);
    }

    /// End of the current line
    pub fn move_end(&mut self) {
        self.cursor = self.text[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.text.len());
    }

    /// Zero-based (line, column) of the cursor, column counted in chars
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let column = match before.rfind('\n') {
            Some(i) => before[i + 1..].chars().count(),
            None => before.chars().count(),
        };
        (line, column)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}
