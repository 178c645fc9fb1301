//! State machine for assembling one note.
//!
//! ```text
//! Empty ──add_color/set_name──▶ Collecting ──finalize──▶ Complete
//!   └──────────────┴──────────────cancel──────────────▶ Cancelled
//! ```

use super::color::HexColor;
use super::note::Note;
use super::validation::ValidationError;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Nothing entered yet.
    Empty,
    /// At least one color or a name has been entered.
    Collecting,
    /// `finalize` succeeded; the note has been handed out.
    Complete,
    /// The user abandoned the dialog; pending input was discarded.
    Cancelled,
}

/// Collects a name and colors for a new note.
#[derive(Debug, Clone)]
pub struct NoteEditor {
    state: EditorState,
    name: String,
    colors: Vec<HexColor>,
}

impl Default for NoteEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteEditor {
    pub fn new() -> Self {
        Self {
            state: EditorState::Empty,
            name: String::new(),
            colors: Vec::new(),
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[HexColor] {
        &self.colors
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Empty | EditorState::Collecting)
    }

    /// Validates `candidate` and appends it to the pending colors.
    pub fn add_color(&mut self, candidate: &str) -> Result<(), ValidationError> {
        self.ensure_open()?;
        let color = HexColor::parse(candidate)?;
        self.push_color(color)
    }

    /// Appends an already validated color.
    pub fn push_color(&mut self, color: HexColor) -> Result<(), ValidationError> {
        self.ensure_open()?;
        debug!("Editor: adding color {}", color);
        self.colors.push(color);
        self.state = EditorState::Collecting;
        Ok(())
    }

    /// Stores the name verbatim. An empty name is accepted here and rejected by
    /// [`NoteEditor::finalize`].
    pub fn set_name(&mut self, text: &str) -> Result<(), ValidationError> {
        self.ensure_open()?;
        self.name = text.to_string();
        self.state = EditorState::Collecting;
        Ok(())
    }

    /// Produces the note, or explains what is missing. The editor stays open on
    /// failure so the user can correct the input.
    pub fn finalize(&mut self) -> Result<Note, ValidationError> {
        self.ensure_open()?;
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.colors.is_empty() {
            return Err(ValidationError::NoColors);
        }
        self.state = EditorState::Complete;
        Ok(Note::new(
            std::mem::take(&mut self.name),
            std::mem::take(&mut self.colors),
        ))
    }

    pub fn cancel(&mut self) {
        self.name.clear();
        self.colors.clear();
        self.state = EditorState::Cancelled;
    }

    fn ensure_open(&self) -> Result<(), ValidationError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(ValidationError::EditorClosed)
        }
    }
}
