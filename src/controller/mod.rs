//! Note management workflow.
//!
//! [`MainController`] maps each user intent to a handler. Handlers talk to the
//! user through [`Interaction`], persist through [`NoteStore`] and fetch picked
//! colors through a [`ColorSource`].

mod interaction;

pub use interaction::{EditorStep, Interaction, ScriptedInteraction};

use crate::handoff::ColorSource;
use crate::notes::{HexColor, ID_MARKER, Note, NoteEditor, NoteId, Swatch};
use crate::store::{NoteStore, StoreError};
use log::{debug, info, warn};

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddNote,
    PickColor,
    SetColorInput(String),
    Rename(NoteId),
    Delete(NoteId),
    ShowDetail(NoteId),
}

/// What a handled intent changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(NoteId),
    Cancelled,
    Renamed(NoteId),
    Unchanged,
    Deleted(Note),
    Kept,
    Shown(NoteId),
    ColorSelected(HexColor),
    NoSelection,
    PickerUnavailable,
    PreviewUpdated(Swatch),
}

pub struct MainController<S: ColorSource> {
    store: NoteStore,
    picker: S,
    color_input: String,
}

impl<S: ColorSource> MainController<S> {
    pub fn new(store: NoteStore, picker: S) -> Self {
        Self {
            store,
            picker,
            color_input: String::new(),
        }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Current text of the color input field.
    pub fn color_input(&self) -> &str {
        &self.color_input
    }

    pub fn preview(&self) -> Swatch {
        Swatch::for_input(&self.color_input)
    }

    /// Turns a user reference into a note id. `@` followed by an id prefix is
    /// always an id; otherwise integers (including negative ones) are
    /// positions and anything else is matched as an id prefix.
    pub fn resolve(&self, reference: &str) -> Result<NoteId, StoreError> {
        let reference = reference.trim();
        if let Some(prefix) = reference.strip_prefix(ID_MARKER) {
            return self
                .store
                .find_by_id_prefix(prefix)
                .ok_or_else(|| StoreError::UnknownReference(reference.to_string()));
        }
        if let Ok(index) = reference.parse::<i64>() {
            let position = self.store.resolve_index(index)?;
            return Ok(self.store.notes()[position].id);
        }
        self.store
            .find_by_id_prefix(reference)
            .ok_or_else(|| StoreError::UnknownReference(reference.to_string()))
    }

    /// Handles one intent. Input problems are reported through `ui`; store
    /// failures abort the operation and are returned.
    pub fn dispatch(
        &mut self,
        intent: Intent,
        ui: &mut dyn Interaction,
    ) -> Result<Outcome, StoreError> {
        debug!("Dispatching {:?}", intent);
        match intent {
            Intent::AddNote => self.add_note(ui),
            Intent::PickColor => Ok(self.pick_color(ui)),
            Intent::SetColorInput(text) => Ok(self.set_color_input(text, ui)),
            Intent::Rename(id) => self.rename(id, ui),
            Intent::Delete(id) => self.delete(id, ui),
            Intent::ShowDetail(id) => self.show_detail(id, ui),
        }
    }

    fn add_note(&mut self, ui: &mut dyn Interaction) -> Result<Outcome, StoreError> {
        let mut editor = NoteEditor::new();
        loop {
            let result = match ui.editor_step(&editor) {
                EditorStep::SetName(name) => editor.set_name(&name),
                EditorStep::AddColor(candidate) => editor.add_color(&candidate),
                EditorStep::PickColor => match self.request_color(ui) {
                    Outcome::ColorSelected(color) => editor.push_color(color),
                    _ => Ok(()),
                },
                EditorStep::Confirm => match editor.finalize() {
                    Ok(note) => {
                        let name = note.name.clone();
                        let id = self.store.append(note)?;
                        info!("Added note '{}' ({})", name, id);
                        return Ok(Outcome::Added(id));
                    }
                    Err(err) => Err(err),
                },
                EditorStep::Cancel => {
                    editor.cancel();
                    debug!("Add-note dialog cancelled");
                    return Ok(Outcome::Cancelled);
                }
            };

            if let Err(err) = result {
                ui.warn(&err.to_string());
            }
        }
    }

    fn pick_color(&mut self, ui: &mut dyn Interaction) -> Outcome {
        let outcome = self.request_color(ui);
        if let Outcome::ColorSelected(color) = &outcome {
            self.color_input = color.to_string();
            ui.show_preview(&self.color_input, &self.preview());
        }
        outcome
    }

    fn request_color(&self, ui: &mut dyn Interaction) -> Outcome {
        match self.picker.request_color() {
            Ok(Some(color)) => Outcome::ColorSelected(color),
            Ok(None) => Outcome::NoSelection,
            Err(err) if err.is_launch_failure() => {
                warn!("Color picker unavailable: {}", err);
                ui.warn(&format!("Color picker unavailable: {err}"));
                Outcome::PickerUnavailable
            }
            Err(err) => {
                warn!("Color handoff failed: {}", err);
                ui.warn(&err.to_string());
                Outcome::NoSelection
            }
        }
    }

    fn set_color_input(&mut self, text: String, ui: &mut dyn Interaction) -> Outcome {
        self.color_input = text;
        let swatch = self.preview();
        ui.show_preview(&self.color_input, &swatch);
        Outcome::PreviewUpdated(swatch)
    }

    fn rename(&mut self, id: NoteId, ui: &mut dyn Interaction) -> Result<Outcome, StoreError> {
        let current = self
            .store
            .get(id)
            .map(|note| note.name.clone())
            .ok_or(StoreError::NoteNotFound(id))?;

        match ui.prompt_rename(&current) {
            Some(new_name) if !new_name.is_empty() && new_name != current => {
                self.store.rename(id, &new_name)?;
                info!("Renamed note '{}' -> '{}'", current, new_name);
                Ok(Outcome::Renamed(id))
            }
            _ => Ok(Outcome::Unchanged),
        }
    }

    fn delete(&mut self, id: NoteId, ui: &mut dyn Interaction) -> Result<Outcome, StoreError> {
        let note = self.store.get(id).ok_or(StoreError::NoteNotFound(id))?;
        if !ui.confirm_delete(note) {
            return Ok(Outcome::Kept);
        }
        let removed = self.store.remove(id)?;
        info!("Deleted note '{}' ({})", removed.name, id);
        Ok(Outcome::Deleted(removed))
    }

    fn show_detail(&mut self, id: NoteId, ui: &mut dyn Interaction) -> Result<Outcome, StoreError> {
        let note = self.store.get(id).ok_or(StoreError::NoteNotFound(id))?;
        ui.show_detail(note);
        Ok(Outcome::Shown(id))
    }
}
