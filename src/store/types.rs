//! Notebook document model.
//!
//! A [`Document`] is an ordered list of [`Topic`]s. Each topic owns its notes in
//! insertion order and at most one [`ExternalReference`].

use serde::{Deserialize, Serialize};

/// Timestamp format for notes: `DD.MM.YYYY HH:MM:SS`.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Current local time formatted with [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// A single note. Never modified after it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    pub timestamp: String,
}

/// Title/URL pair attached to a topic by a lookup. Write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub notes: Vec<Note>,
    pub reference: Option<ExternalReference>,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: Vec::new(),
            reference: None,
        }
    }
}

/// The whole persisted notebook. Topic order is first-creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub topics: Vec<Topic>,
}

impl Document {
    /// Exact, case-sensitive lookup by topic name.
    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    pub fn topic_mut(&mut self, name: &str) -> Option<&mut Topic> {
        self.topics.iter_mut().find(|t| t.name == name)
    }

    /// Find the topic, creating it at the end if this is the first note for it.
    pub fn topic_or_insert(&mut self, name: &str) -> &mut Topic {
        let idx = match self.topics.iter().position(|t| t.name == name) {
            Some(idx) => idx,
            None => {
                self.topics.push(Topic::new(name));
                self.topics.len() - 1
            }
        };
        &mut self.topics[idx]
    }

    pub fn note_count(&self) -> usize {
        self.topics.iter().map(|t| t.notes.len()).sum()
    }

    pub fn reference_count(&self) -> usize {
        self.topics.iter().filter(|t| t.reference.is_some()).count()
    }
}
