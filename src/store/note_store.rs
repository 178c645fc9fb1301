use super::options::StoreOptions;
use super::storage;
use super::types::StoreError;
use crate::notes::{Note, NoteId};
use log::{debug, warn};

/// Ordered notes kept in sync with their JSON document.
///
/// Insertion order is display order. Every mutation saves the full list; if the
/// save fails the mutation is undone so memory never drifts from disk.
#[derive(Debug)]
pub struct NoteStore {
    options: StoreOptions,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Creates an empty store without touching the disk.
    pub fn new(options: StoreOptions) -> Self {
        Self {
            options,
            notes: Vec::new(),
        }
    }

    /// Creates a store and loads the document.
    pub fn open(options: StoreOptions) -> Result<Self, StoreError> {
        let mut store = Self::new(options);
        store.load()?;
        Ok(store)
    }

    /// Like [`NoteStore::open`], but a corrupt document yields an empty store
    /// together with the error so the caller can warn about it. The corrupt file
    /// is left on disk; the next save rotates it to the backup path.
    pub fn open_or_recover(options: StoreOptions) -> Result<(Self, Option<StoreError>), StoreError> {
        let mut store = Self::new(options);
        let loaded = store.load().map(|_| ());
        match loaded {
            Ok(()) => Ok((store, None)),
            Err(err) if err.is_corrupt() => {
                warn!("{}; starting with an empty note list", err);
                Ok((store, Some(err)))
            }
            Err(err) => Err(err),
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Re-reads the document. A missing document loads as an empty list. On
    /// error the in-memory list is left unchanged.
    pub fn load(&mut self) -> Result<&[Note], StoreError> {
        self.notes = storage::read_notes(&self.options)?.unwrap_or_default();
        Ok(&self.notes)
    }

    /// Writes the full list, replacing the document.
    pub fn save(&self) -> Result<(), StoreError> {
        storage::write_notes(&self.notes, &self.options)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Current display position of the note with `id`.
    pub fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    /// Maps a user-supplied (possibly negative) index to a valid position.
    pub fn resolve_index(&self, index: i64) -> Result<usize, StoreError> {
        usize::try_from(index)
            .ok()
            .filter(|&position| position < self.notes.len())
            .ok_or(StoreError::IndexOutOfRange {
                index,
                len: self.notes.len(),
            })
    }

    /// Finds a note by full id or by a unique id prefix.
    pub fn find_by_id_prefix(&self, prefix: &str) -> Option<NoteId> {
        let mut matches = self.notes.iter().filter(|note| note.id.matches_prefix(prefix));
        match (matches.next(), matches.next()) {
            (Some(note), None) => Some(note.id),
            _ => None,
        }
    }

    pub fn append(&mut self, note: Note) -> Result<NoteId, StoreError> {
        let id = note.id;
        debug!("Appending note '{}' ({})", note.name, id);
        self.notes.push(note);
        if let Err(err) = self.save() {
            self.notes.pop();
            return Err(err);
        }
        Ok(id)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Note, StoreError> {
        self.check_index(index)?;
        let removed = self.notes.remove(index);
        debug!("Removing note '{}' at {}", removed.name, index);
        if let Err(err) = self.save() {
            self.notes.insert(index, removed);
            return Err(err);
        }
        Ok(removed)
    }

    pub fn rename_at(&mut self, index: usize, new_name: &str) -> Result<(), StoreError> {
        self.check_index(index)?;
        let previous = std::mem::replace(&mut self.notes[index].name, new_name.to_string());
        debug!("Renaming note '{}' -> '{}'", previous, new_name);
        if let Err(err) = self.save() {
            self.notes[index].name = previous;
            return Err(err);
        }
        Ok(())
    }

    pub fn remove(&mut self, id: NoteId) -> Result<Note, StoreError> {
        let index = self.position(id).ok_or(StoreError::NoteNotFound(id))?;
        self.remove_at(index)
    }

    pub fn rename(&mut self, id: NoteId, new_name: &str) -> Result<(), StoreError> {
        let index = self.position(id).ok_or(StoreError::NoteNotFound(id))?;
        self.rename_at(index, new_name)
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.notes.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: self.notes.len(),
            })
        }
    }
}
