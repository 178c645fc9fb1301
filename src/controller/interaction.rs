//! The surface through which the controller talks to the user.

use crate::notes::{Note, NoteEditor, Swatch};
use std::collections::VecDeque;

/// One user action inside the add-note dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStep {
    SetName(String),
    AddColor(String),
    /// Run the external picker and add its color.
    PickColor,
    Confirm,
    Cancel,
}

/// Dialogs and messages the controller needs from a front end.
pub trait Interaction {
    /// Next action in the add-note dialog, given what has been entered so far.
    fn editor_step(&mut self, editor: &NoteEditor) -> EditorStep;

    /// New name for a note, or `None` if the user backed out.
    fn prompt_rename(&mut self, current: &str) -> Option<String>;

    /// Explicit confirmation before a note is deleted.
    fn confirm_delete(&mut self, note: &Note) -> bool;

    fn show_detail(&mut self, note: &Note);

    fn show_preview(&mut self, input: &str, swatch: &Swatch);

    /// Report a recoverable problem to the user.
    fn warn(&mut self, message: &str);
}

/// Pre-recorded answers, used for non-interactive commands and in tests.
///
/// When the recorded editor steps run out the dialog is cancelled. With
/// `stopping_on_warning` the first warning also cancels it, since a script
/// cannot retry the step that failed.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    pub steps: VecDeque<EditorStep>,
    pub stop_on_warning: bool,
    pub rename_to: Option<String>,
    pub confirm: bool,
    pub warnings: Vec<String>,
    pub shown: Vec<Note>,
    pub previews: Vec<Swatch>,
}

impl ScriptedInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_steps(steps: impl IntoIterator<Item = EditorStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn renaming_to(mut self, name: impl Into<String>) -> Self {
        self.rename_to = Some(name.into());
        self
    }

    pub fn confirming(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }

    pub fn stopping_on_warning(mut self) -> Self {
        self.stop_on_warning = true;
        self
    }
}

impl Interaction for ScriptedInteraction {
    fn editor_step(&mut self, _editor: &NoteEditor) -> EditorStep {
        if self.stop_on_warning && !self.warnings.is_empty() {
            return EditorStep::Cancel;
        }
        self.steps.pop_front().unwrap_or(EditorStep::Cancel)
    }

    fn prompt_rename(&mut self, _current: &str) -> Option<String> {
        self.rename_to.take()
    }

    fn confirm_delete(&mut self, _note: &Note) -> bool {
        self.confirm
    }

    fn show_detail(&mut self, note: &Note) {
        self.shown.push(note.clone());
    }

    fn show_preview(&mut self, _input: &str, swatch: &Swatch) {
        self.previews.push(swatch.clone());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
