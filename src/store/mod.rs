//! Note persistence.
//!
//! Keeps the ordered list of notes in memory and mirrors it to a JSON document
//! after every mutation. Writes go through a temp file and an atomic rename,
//! guarded by an advisory lock, with the previous document rotated to a backup.

mod note_store;
mod options;
mod storage;
mod types;

pub use note_store::NoteStore;
pub use options::{DEFAULT_NOTES_FILE, StoreOptions, options_from_config};
pub use types::StoreError;

#[cfg(test)]
mod tests;
