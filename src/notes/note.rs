//! Note record and its stable identifier.

use super::color::HexColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix that marks a note reference as an id rather than a list index.
pub const ID_MARKER: char = '@';

/// Opaque identifier assigned to a note when it is created.
///
/// Identity never depends on list position; positions are display order only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short form used in listings, e.g. `@3f2504e0`. The marker keeps
    /// all-digit ids from reading as list positions.
    pub fn short(&self) -> String {
        format!("{}{}", ID_MARKER, &self.0.simple().to_string()[..8])
    }

    /// True if the hyphen-less or hyphenated form of this id starts with `prefix`.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.to_ascii_lowercase();
        !prefix.is_empty()
            && (self.0.simple().to_string().starts_with(&prefix)
                || self.0.hyphenated().to_string().starts_with(&prefix))
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A named, ordered collection of colors.
///
/// Duplicate colors are allowed. Documents written before ids existed carry
/// only `name` and `colors`; such entries get a fresh id when loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub id: NoteId,
    pub name: String,
    pub colors: Vec<HexColor>,
}

impl Note {
    pub fn new(name: impl Into<String>, colors: Vec<HexColor>) -> Self {
        Self {
            id: NoteId::new(),
            name: name.into(),
            colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_entry_without_id_gets_one() {
        let note: Note =
            serde_json::from_str(r##"{"name": "Sunset", "colors": ["#FF8800", "#FF8800"]}"##)
                .unwrap();
        assert_eq!(note.name, "Sunset");
        assert_eq!(note.colors.len(), 2);
        assert_eq!(note.colors[0], note.colors[1]);
    }

    #[test]
    fn id_prefix_matching() {
        let id: NoteId = "3f2504e0-4f89-41d3-9a0c-0305e82c3301".parse().unwrap();
        assert_eq!(id.short(), "@3f2504e0");
        assert!(id.matches_prefix("3F2504"));
        assert!(id.matches_prefix("3f2504e0-4f"));
        assert!(!id.matches_prefix("4f"));
        assert!(!id.matches_prefix(""));
    }
}
