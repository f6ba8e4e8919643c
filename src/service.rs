//! The remote-procedure surface shared by every transport.
//!
//! Store failures stop here: they are logged and collapsed to `false` or an
//! empty list. Lookup failures are the one fault that reaches the caller.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinError;

use crate::config::NotebookConfig;
use crate::lookup::{LookupError, WikipediaClient};
use crate::store::types::Note;
use crate::store::{NoteStore, StoreError};

#[derive(Clone)]
pub struct NotebookService {
    store: Arc<NoteStore>,
    lookup: Arc<WikipediaClient>,
}

impl NotebookService {
    pub fn new(store: Arc<NoteStore>, lookup: Arc<WikipediaClient>) -> Self {
        Self { store, lookup }
    }

    /// Open the configured document and build the lookup client.
    pub fn from_config(config: &NotebookConfig) -> anyhow::Result<Self> {
        let path = config.resolved_store_path();
        let store = NoteStore::open(&path)?;
        let lookup = WikipediaClient::new(&config.lookup)?;
        Ok(Self::new(Arc::new(store), Arc::new(lookup)))
    }

    pub fn store(&self) -> &Arc<NoteStore> {
        &self.store
    }

    pub async fn add_note(&self, topic: String, text: String, timestamp: Option<String>) -> bool {
        tracing::info!(topic = %topic, text_len = text.len(), "add_note called");

        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || {
            store.add_note(&topic, &text, timestamp.as_deref())
        })
        .await;

        match flatten(result) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(error = %e, "error adding note");
                false
            }
        }
    }

    pub async fn get_notes_by_topic(&self, topic: String) -> Vec<Note> {
        tracing::info!(topic = %topic, "get_notes_by_topic called");

        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || store.notes_by_topic(&topic)).await;

        flatten(result).unwrap_or_else(|e| {
            tracing::error!(error = %e, "error retrieving notes");
            Vec::new()
        })
    }

    /// Attach a reference to an existing topic. Policy rejections and I/O
    /// failures both report `false`.
    pub async fn attach_external_reference(&self, topic: String, title: String, url: String) -> bool {
        let store = Arc::clone(&self.store);
        let result =
            tokio::task::spawn_blocking(move || store.attach_reference(&topic, &title, &url)).await;

        match flatten(result) {
            Ok(()) => true,
            Err(CallError::Store(
                e @ (StoreError::TopicNotFound(_)
                | StoreError::ReferenceExists(_)
                | StoreError::InvalidCharacter { .. }),
            )) => {
                tracing::warn!(reason = %e, "external reference rejected");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "error attaching external reference");
                false
            }
        }
    }

    /// Look `term` up and attach the first hit to the topic of the same name.
    pub async fn lookup_wikipedia(&self, term: String) -> Result<bool, LookupError> {
        tracing::info!(term = %term, "lookup_wikipedia called");

        // The network call runs outside the document lock.
        let hit = self.lookup.lookup(&term).await?;
        Ok(self.attach_external_reference(term, hit.title, hit.url).await)
    }
}

#[derive(Debug, Error)]
enum CallError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("store task failed: {0}")]
    Join(#[from] JoinError),
}

fn flatten<T>(result: Result<Result<T, StoreError>, JoinError>) -> Result<T, CallError> {
    Ok(result??)
}
