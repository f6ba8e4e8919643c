//! Document store: the notebook held in memory behind one lock and written
//! through to a single XML file on every mutation.
//!
//! [`NoteStore`] is the only owner of the file. Every operation, read or write,
//! takes the same mutex for its whole duration, so calls are totally ordered.
//! A mutation is applied to a copy of the document, the copy is rendered and
//! written (temp file + rename), and only then does it replace the in-memory
//! state.

pub mod codec;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use types::{Document, ExternalReference, Note, Topic};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("topic '{0}' not found")]
    TopicNotFound(String),

    #[error("topic '{0}' already has an external reference")]
    ReferenceExists(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{field} contains {ch:?}, which XML documents cannot hold")]
    InvalidCharacter { field: &'static str, ch: char },

    #[error("malformed notebook document: {0}")]
    Parse(String),

    #[error("document lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub struct NoteStore {
    path: PathBuf,
    document: Mutex<Document>,
}

impl NoteStore {
    /// Open (or create) the notebook document at `path`.
    ///
    /// A missing file is created immediately as an empty `<notes/>` document.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let document = if path.exists() {
            let xml = std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
            codec::parse(&xml)?
        } else {
            let document = Document::default();
            write_document(&path, &document)?;
            tracing::info!(path = %path.display(), "created empty notebook document");
            document
        };

        tracing::info!(
            path = %path.display(),
            topics = document.topics.len(),
            notes = document.note_count(),
            "notebook document loaded"
        );

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a note to `topic`, creating the topic on first use.
    ///
    /// `timestamp` defaults to the current local time.
    pub fn add_note(
        &self,
        topic: &str,
        text: &str,
        timestamp: Option<&str>,
    ) -> Result<Note, StoreError> {
        codec::check_xml_chars("topic", topic)?;
        codec::check_xml_chars("text", text)?;
        if let Some(timestamp) = timestamp {
            codec::check_xml_chars("timestamp", timestamp)?;
        }

        let note = Note {
            text: text.to_string(),
            timestamp: timestamp.map_or_else(types::now_timestamp, str::to_string),
        };

        self.mutate(|doc| {
            doc.topic_or_insert(topic).notes.push(note.clone());
            Ok(())
        })?;

        tracing::debug!(topic, timestamp = %note.timestamp, "note added");
        Ok(note)
    }

    /// Notes for an exact topic-name match, in insertion order. Empty when the
    /// topic does not exist.
    pub fn notes_by_topic(&self, topic: &str) -> Result<Vec<Note>, StoreError> {
        let doc = self.lock()?;
        Ok(doc.topic(topic).map(|t| t.notes.clone()).unwrap_or_default())
    }

    /// Attach a title/URL reference to an existing topic. A topic keeps the
    /// first reference it is given.
    pub fn attach_reference(&self, topic: &str, title: &str, url: &str) -> Result<(), StoreError> {
        codec::check_xml_chars("topic", topic)?;
        codec::check_xml_chars("title", title)?;
        codec::check_xml_chars("url", url)?;

        self.mutate(|doc| {
            let entry = doc
                .topic_mut(topic)
                .ok_or_else(|| StoreError::TopicNotFound(topic.to_string()))?;
            if entry.reference.is_some() {
                return Err(StoreError::ReferenceExists(topic.to_string()));
            }
            entry.reference = Some(ExternalReference {
                title: title.to_string(),
                url: url.to_string(),
            });
            Ok(())
        })?;

        tracing::debug!(topic, title, url, "external reference attached");
        Ok(())
    }

    pub fn topic(&self, name: &str) -> Result<Option<Topic>, StoreError> {
        Ok(self.lock()?.topic(name).cloned())
    }

    pub fn snapshot(&self) -> Result<Document, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Document>, StoreError> {
        self.document.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Apply `f` to a copy of the document, persist the copy, then publish it.
    fn mutate<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Document) -> Result<(), StoreError>,
    {
        let mut doc = self.lock()?;
        let mut next = doc.clone();
        f(&mut next)?;
        write_document(&self.path, &next)?;
        *doc = next;
        Ok(())
    }
}

/// Render the whole document and replace the file atomically.
fn write_document(path: &Path, document: &Document) -> Result<(), StoreError> {
    let xml = codec::render(document);
    let tmp = tmp_path(path);

    std::fs::write(&tmp, xml.as_bytes()).map_err(|e| StoreError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

/// `<file>.tmp` next to the document, keeping the full file name.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
