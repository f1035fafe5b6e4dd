//! Caller-owned symptom text buffer.
//!
//! Written by direct text edits, body-area quick select, and the voice
//! session's transcript append. One writer at a time by convention; nothing
//! here locks.

use std::fmt;

/// Quick-select body areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyArea {
    Head,
    Chest,
    Abdomen,
}

impl BodyArea {
    pub const ALL: [BodyArea; 3] = [BodyArea::Head, BodyArea::Chest, BodyArea::Abdomen];

    /// Name used in the appended phrase.
    pub fn name(self) -> &'static str {
        match self {
            BodyArea::Head => "Head",
            BodyArea::Chest => "Chest",
            BodyArea::Abdomen => "Stomach",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomBuffer {
    text: String,
}

impl SymptomBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Replace the whole buffer (free-text edit).
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Append a speech transcript, space-joined when the buffer is non-empty.
    pub fn append_transcript(&mut self, transcript: &str) {
        self.join(" ", transcript);
    }

    /// Append "<Area> pain", comma-joined when the buffer is non-empty.
    pub fn add_body_area(&mut self, area: BodyArea) {
        let phrase = format!("{} pain", area.name());
        self.join(", ", &phrase);
    }

    fn join(&mut self, separator: &str, fragment: &str) {
        if !self.text.is_empty() {
            self.text.push_str(separator);
        }
        self.text.push_str(fragment);
    }
}

impl fmt::Display for SymptomBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
