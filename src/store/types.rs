//! Error type for the note store.

use crate::notes::NoteId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving, or addressing notes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document exists but is not a JSON array of `{name, colors}` objects.
    #[error("note store {} is corrupt: {source}", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A position outside the current list was requested.
    #[error("note index {index} is out of range (store holds {len} notes)")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("no note with id {0}")]
    NoteNotFound(NoteId),

    /// Neither an index nor a unique id prefix.
    #[error("no note matches '{0}'")]
    UnknownReference(String),

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::CorruptStore { .. })
    }
}
