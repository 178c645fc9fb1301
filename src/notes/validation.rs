//! User-correctable input errors.

use thiserror::Error;

/// Errors raised while validating user input for a note.
///
/// All variants are recoverable: the caller reports them and lets the user try
/// again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid color code '{0}' (expected #RRGGBB, e.g. #FF0000)")]
    InvalidHexFormat(String),

    #[error("note name must not be empty")]
    EmptyName,

    #[error("a note needs at least one color")]
    NoColors,

    #[error("the note editor has already been closed")]
    EditorClosed,
}
