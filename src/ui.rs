//! Terminal rendering: note list, detail view, preview swatch, and prompts
use crate::config::DisplayConfig;
use crate::controller::{EditorStep, Interaction};
use crate::notes::{HexColor, Note, NoteEditor, Swatch};
use log::warn;
use std::io::{BufRead, Write};

// ============================================================================
// Layout Constants (not configurable)
// ============================================================================

/// Width of a swatch in list rows, in terminal cells
const LIST_SWATCH_WIDTH: usize = 2;
/// Width of a swatch in the detail view and preview, in terminal cells
const DETAIL_SWATCH_WIDTH: usize = 6;

const EDITOR_HELP: &str = "  name <text>   set the note name\n  \
                           #RRGGBB       add a color (or: color <code>)\n  \
                           pick          choose a color with the picker\n  \
                           done          save the note\n  \
                           cancel        discard the note";

/// Rendering options shared by all views.
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    pub ansi: bool,
    pub list_swatches: usize,
}

impl RenderStyle {
    pub fn from_config(display: &DisplayConfig) -> Self {
        Self {
            ansi: display.ansi_colors,
            list_swatches: display.list_swatches,
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

/// Colored block for `rgb`, or `fallback` text when ANSI output is off.
fn block(rgb: (u8, u8, u8), width: usize, fallback: &str, style: &RenderStyle) -> String {
    if style.ansi {
        let (r, g, b) = rgb;
        format!("\x1b[48;2;{r};{g};{b}m{}\x1b[0m", " ".repeat(width))
    } else {
        format!("[{fallback}]")
    }
}

/// Swatch for a stored color. Malformed codes loaded from disk render white.
pub fn color_swatch(color: &HexColor, width: usize, style: &RenderStyle) -> String {
    let rgb = color.rgb().unwrap_or((255, 255, 255));
    block(rgb, width, color.as_str(), style)
}

/// One row of the note list: `[index] name (N colors)` plus leading swatches.
pub fn format_list_item(index: usize, note: &Note, style: &RenderStyle) -> String {
    let mut line = format!(
        "[{}] {} ({} {})",
        index,
        note.name,
        note.colors.len(),
        if note.colors.len() == 1 { "color" } else { "colors" }
    );

    let shown = note.colors.len().min(style.list_swatches);
    if shown > 0 {
        line.push(' ');
        let swatches: Vec<String> = note.colors[..shown]
            .iter()
            .map(|color| color_swatch(color, LIST_SWATCH_WIDTH, style))
            .collect();
        line.push_str(&swatches.join(" "));
    }
    if note.colors.len() > shown {
        line.push_str(" ...");
    }
    line.push_str(&format!("  {}", note.id.short()));
    line
}

pub fn format_note_list(notes: &[Note], style: &RenderStyle) -> String {
    if notes.is_empty() {
        return "No notes yet.".to_string();
    }
    notes
        .iter()
        .enumerate()
        .map(|(index, note)| format_list_item(index, note, style))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read-only view of every color in a note.
pub fn format_detail(note: &Note, style: &RenderStyle) -> String {
    let mut out = format!(
        "Note: {}\nId: {}\nColors: {}",
        note.name,
        note.id,
        note.colors.len()
    );
    for color in &note.colors {
        out.push_str("\n  ");
        if style.ansi {
            out.push_str(&color_swatch(color, DETAIL_SWATCH_WIDTH, style));
            out.push(' ');
        }
        out.push_str(color.as_str());
    }
    out
}

pub fn format_preview(input: &str, swatch: &Swatch, style: &RenderStyle) -> String {
    let status = if swatch.is_valid() { "" } else { " (invalid)" };
    let label = if input.is_empty() { "(empty)" } else { input };
    if style.ansi {
        format!(
            "Preview: {} {}{}",
            block(swatch.rgb(), DETAIL_SWATCH_WIDTH, label, style),
            label,
            status
        )
    } else {
        format!("Preview: {}{}", label, status)
    }
}

fn format_editor_status(editor: &NoteEditor, style: &RenderStyle) -> String {
    let name = if editor.name().is_empty() {
        "(unnamed)"
    } else {
        editor.name()
    };
    let colors: Vec<String> = editor
        .colors()
        .iter()
        .map(|color| {
            if style.ansi {
                format!("{} {}", color_swatch(color, LIST_SWATCH_WIDTH, style), color)
            } else {
                color.to_string()
            }
        })
        .collect();
    format!(
        "Name: {} | Colors ({}): {}",
        name,
        colors.len(),
        colors.join(" ")
    )
}

/// What one line typed into the add-note dialog means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorInput {
    Step(EditorStep),
    Help,
    Blank,
}

pub fn parse_editor_line(line: &str) -> EditorInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return EditorInput::Blank;
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    let step = match command.to_ascii_lowercase().as_str() {
        "help" | "?" => return EditorInput::Help,
        "name" => EditorStep::SetName(rest.to_string()),
        "color" => EditorStep::AddColor(rest.to_string()),
        "pick" => EditorStep::PickColor,
        "done" | "ok" => EditorStep::Confirm,
        "cancel" | "quit" => EditorStep::Cancel,
        _ => EditorStep::AddColor(trimmed.to_string()),
    };
    EditorInput::Step(step)
}

/// Line-oriented front end over any reader/writer pair.
///
/// End of input behaves like closing a dialog: the pending action is
/// cancelled.
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
    style: RenderStyle,
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W, style: RenderStyle) -> Self {
        Self {
            input,
            output,
            style,
        }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `text` followed by a newline.
    pub fn say(&mut self, text: &str) {
        if let Err(err) = writeln!(self.output, "{}", text) {
            warn!("failed to write to terminal: {}", err);
        }
    }

    /// Prints `prompt` and reads one line without its line ending. `None` on
    /// end of input.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        if let Err(err) = write!(self.output, "{}", prompt).and_then(|_| self.output.flush()) {
            warn!("failed to write prompt: {}", err);
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                warn!("failed to read from terminal: {}", err);
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Interaction for TerminalUi<R, W> {
    fn editor_step(&mut self, editor: &NoteEditor) -> EditorStep {
        if editor.name().is_empty() && editor.colors().is_empty() {
            self.say("New note. Commands:");
            self.say(EDITOR_HELP);
        } else {
            let status = format_editor_status(editor, &self.style);
            self.say(&status);
        }

        loop {
            let Some(line) = self.read_line("note> ") else {
                return EditorStep::Cancel;
            };
            match parse_editor_line(&line) {
                EditorInput::Step(step) => return step,
                EditorInput::Help => self.say(EDITOR_HELP),
                EditorInput::Blank => {}
            }
        }
    }

    fn prompt_rename(&mut self, current: &str) -> Option<String> {
        self.read_line(&format!("New name for '{}': ", current))
    }

    fn confirm_delete(&mut self, note: &Note) -> bool {
        let prompt = format!("Delete note '{}'? [y/N]: ", note.name);
        matches!(
            self.read_line(&prompt)
                .map(|answer| answer.trim().to_ascii_lowercase())
                .as_deref(),
            Some("y" | "yes")
        )
    }

    fn show_detail(&mut self, note: &Note) {
        let detail = format_detail(note, &self.style);
        self.say(&detail);
    }

    fn show_preview(&mut self, input: &str, swatch: &Swatch) {
        let preview = format_preview(input, swatch, &self.style);
        self.say(&preview);
    }

    fn warn(&mut self, message: &str) {
        self.say(&format!("warning: {}", message));
    }
}
