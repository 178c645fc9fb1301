//! Note domain types.
//!
//! A note is a named, ordered list of `#RRGGBB` colors. This module holds the
//! color type, the note record with its stable identifier, and the editor
//! state machine used to assemble a new note from user input.

pub mod color;
pub mod editor;
pub mod note;
pub mod validation;

pub use color::{HexColor, Swatch};
pub use editor::{EditorState, NoteEditor};
pub use note::{ID_MARKER, Note, NoteId};
pub use validation::ValidationError;
