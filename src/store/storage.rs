use super::options::{StoreOptions, with_suffix};
use super::types::StoreError;
use crate::notes::Note;
use fs2::FileExt;
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Read the document, returning `None` when it does not exist yet.
pub(crate) fn read_notes(options: &StoreOptions) -> Result<Option<Vec<Note>>, StoreError> {
    let path = &options.path;
    if !path.exists() {
        debug!("No note store at {}, starting empty", path.display());
        return Ok(None);
    }

    let bytes = with_lock(options, LockMode::Shared, || {
        fs::read(path).map_err(|err| StoreError::io("read note store", path, err))
    })?;

    let notes: Vec<Note> =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::CorruptStore {
            path: path.clone(),
            source,
        })?;

    info!("Loaded {} notes from {}", notes.len(), path.display());
    Ok(Some(notes))
}

/// Replace the document with `notes`.
pub(crate) fn write_notes(notes: &[Note], options: &StoreOptions) -> Result<(), StoreError> {
    if let Some(dir) = options.parent_dir() {
        fs::create_dir_all(dir)
            .map_err(|err| StoreError::io("create note store directory", dir, err))?;
    }

    let payload = serde_json::to_vec_pretty(notes).map_err(|err| {
        StoreError::io("serialise notes for", &options.path, err.into())
    })?;

    with_lock(options, LockMode::Exclusive, || {
        write_notes_inner(&payload, options)
    })?;

    info!(
        "Saved {} notes to {} ({} bytes)",
        notes.len(),
        options.path.display(),
        payload.len()
    );
    Ok(())
}

fn write_notes_inner(payload: &[u8], options: &StoreOptions) -> Result<(), StoreError> {
    let path = &options.path;
    let backup_path = options.backup_file_path();

    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .map_err(|err| StoreError::io("open temporary note store", &tmp_path, err))?;
        tmp_file
            .write_all(payload)
            .and_then(|_| tmp_file.sync_all())
            .map_err(|err| {
                fs::remove_file(&tmp_path).ok();
                StoreError::io("write temporary note store", &tmp_path, err)
            })?;
    }

    if path.exists() && options.backup_retention > 0 {
        if backup_path.exists() {
            fs::remove_file(&backup_path).ok();
        }
        // Copy so the live document stays in place until the rename.
        fs::copy(path, &backup_path).map_err(|err| {
            fs::remove_file(&tmp_path).ok();
            StoreError::io("back up note store to", &backup_path, err)
        })?;
    }

    fs::rename(&tmp_path, path).map_err(|err| {
        fs::remove_file(&tmp_path).ok();
        StoreError::io("replace note store", path, err)
    })
}

#[derive(Clone, Copy)]
enum LockMode {
    Shared,
    Exclusive,
}

fn with_lock<T>(
    options: &StoreOptions,
    mode: LockMode,
    work: impl FnOnce() -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    if !options.lock {
        return work();
    }

    let lock_path = options.lock_file_path();
    let lock_file = open_lock_file(&lock_path)?;
    let locked = match mode {
        LockMode::Shared => lock_file.lock_shared(),
        LockMode::Exclusive => lock_file.lock_exclusive(),
    };
    locked.map_err(|err| StoreError::io("lock note store", &lock_path, err))?;

    let result = work();

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock note store {}: {}",
            lock_path.display(),
            err
        )
    });

    result
}

fn open_lock_file(lock_path: &Path) -> Result<File, StoreError> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|err| StoreError::io("open note store lock file", lock_path, err))
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = with_suffix(target, ".tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = with_suffix(target, &format!(".tmp{}", counter));
    }
    candidate
}
