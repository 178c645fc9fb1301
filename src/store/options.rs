use crate::config::StorageConfig;
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File name used when no other location is configured.
pub const DEFAULT_NOTES_FILE: &str = "notes_data.json";

/// Runtime options for the note store, derived from configuration.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// JSON document holding all notes.
    pub path: PathBuf,
    /// Number of previous documents to keep (0 or 1).
    pub backup_retention: usize,
    /// Take an advisory lock around reads and writes.
    pub lock: bool,
}

impl StoreOptions {
    /// Creates options with sensible defaults. Intended mainly for tests.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_retention: 1,
            lock: true,
        }
    }

    pub fn backup_file_path(&self) -> PathBuf {
        with_suffix(&self.path, ".bak")
    }

    pub fn lock_file_path(&self) -> PathBuf {
        with_suffix(&self.path, ".lock")
    }

    /// Directory containing the document, if the path has one.
    pub fn parent_dir(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }
}

/// Build store options from configuration, letting `override_path` win over
/// the configured file.
pub fn options_from_config(cfg: &StorageConfig, override_path: Option<&Path>) -> StoreOptions {
    let path = match override_path {
        Some(path) => path.to_path_buf(),
        None => expand_tilde(&cfg.notes_file),
    };
    debug!("Note store resolved to {}", path.display());

    let mut options = StoreOptions::new(path);
    options.backup_retention = cfg.backup_retention;
    options.lock = cfg.lock;
    options
}

pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
