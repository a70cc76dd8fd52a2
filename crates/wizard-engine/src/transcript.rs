use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    Bot,
    User,
}

/// One chat line. The timestamp is for display only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    pub author: Author,
    pub text: String,
    pub at: DateTime<Local>,
}

impl TranscriptEntry {
    pub fn timestamp(&self) -> String {
        self.at.format("%H:%M").to_string()
    }
}

/// Append-only conversation log for a single run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.push(Author::Bot, text.into());
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Author::User, text.into());
    }

    fn push(&mut self, author: Author, text: String) {
        self.entries.push(TranscriptEntry {
            author,
            text,
            at: Local::now(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
