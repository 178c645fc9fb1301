//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where and how notes are persisted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// JSON document holding the notes. Relative paths resolve against the
    /// working directory; `~/` expands to the home directory.
    #[serde(default = "default_notes_file")]
    pub notes_file: String,

    /// Keep the previous document as `<notes_file>.bak` (0 = off, 1 = on)
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,

    /// Take an advisory lock on `<notes_file>.lock` while reading or writing
    #[serde(default = "default_lock")]
    pub lock: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            notes_file: default_notes_file(),
            backup_retention: default_backup_retention(),
            lock: default_lock(),
        }
    }
}

/// External color picker settings.
///
/// The picker runs as a blocking child process and reports its choice by
/// writing a single `#RRGGBB` value to the handoff file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PickerConfig {
    /// Program followed by its arguments. Empty runs the built-in
    /// `chromanote pick` helper.
    #[serde(default)]
    pub command: Vec<String>,

    /// Handoff file path. Empty uses `selected_color.txt` next to the executable.
    #[serde(default)]
    pub handoff_file: String,
}

/// Terminal rendering preferences.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DisplayConfig {
    /// Swatches shown per row in the note list (valid range: 1 - 20)
    #[serde(default = "default_list_swatches")]
    pub list_swatches: usize,

    /// Render swatches with 24-bit ANSI colors
    #[serde(default = "default_ansi_colors")]
    pub ansi_colors: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            list_swatches: default_list_swatches(),
            ansi_colors: default_ansi_colors(),
        }
    }
}

fn default_notes_file() -> String {
    crate::store::DEFAULT_NOTES_FILE.to_string()
}

fn default_backup_retention() -> usize {
    1
}

fn default_lock() -> bool {
    true
}

fn default_list_swatches() -> usize {
    5
}

fn default_ansi_colors() -> bool {
    true
}
