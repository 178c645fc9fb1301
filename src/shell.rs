//! Interactive command loop.
//!
//! Reads commands line by line, turns them into controller intents and prints
//! the result. Store errors abort the current command only.

use crate::controller::{Intent, MainController, Outcome};
use crate::handoff::ColorSource;
use crate::store::StoreError;
use crate::ui::{TerminalUi, format_note_list};
use log::error;
use std::io::{BufRead, Write};

const SHELL_HELP: &str = "Commands:\n  \
                          list              show all notes\n  \
                          add               create a note\n  \
                          show <note>       show every color of a note\n  \
                          rename <note>     rename a note\n  \
                          delete <note>     delete a note (asks first)\n  \
                          pick              run the color picker\n  \
                          color <code>      set the color input and preview it\n  \
                          help              show this help\n  \
                          quit              leave\n\
                          <note> is a list index or @id (prefix).";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Add,
    Show(String),
    Rename(String),
    Delete(String),
    Pick,
    Color(String),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim().to_string()),
            None => (trimmed, String::new()),
        };

        match command.to_ascii_lowercase().as_str() {
            "" => ShellCommand::Empty,
            "list" | "ls" => ShellCommand::List,
            "add" | "new" => ShellCommand::Add,
            "show" if !rest.is_empty() => ShellCommand::Show(rest),
            "rename" if !rest.is_empty() => ShellCommand::Rename(rest),
            "delete" | "rm" if !rest.is_empty() => ShellCommand::Delete(rest),
            "pick" => ShellCommand::Pick,
            "color" => ShellCommand::Color(rest),
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            _ => ShellCommand::Unknown(trimmed.to_string()),
        }
    }
}

/// Runs until `quit` or end of input.
pub fn run_shell<S, R, W>(controller: &mut MainController<S>, ui: &mut TerminalUi<R, W>)
where
    S: ColorSource,
    R: BufRead,
    W: Write,
{
    ui.say("chromanote shell. Type 'help' for commands.");
    let list = format_note_list(controller.store().notes(), ui.style());
    ui.say(&list);

    while let Some(line) = ui.read_line("> ") {
        let command = ShellCommand::parse(&line);
        if command == ShellCommand::Quit {
            break;
        }
        if let Err(err) = run_command(controller, ui, command) {
            error!("{}", err);
            ui.say(&format!("error: {}", err));
        }
    }
}

fn run_command<S, R, W>(
    controller: &mut MainController<S>,
    ui: &mut TerminalUi<R, W>,
    command: ShellCommand,
) -> Result<(), StoreError>
where
    S: ColorSource,
    R: BufRead,
    W: Write,
{
    let intent = match command {
        ShellCommand::List => {
            let list = format_note_list(controller.store().notes(), ui.style());
            ui.say(&list);
            return Ok(());
        }
        ShellCommand::Help => {
            ui.say(SHELL_HELP);
            return Ok(());
        }
        ShellCommand::Unknown(text) => {
            ui.say(&format!("unknown command '{}'; type 'help'", text));
            return Ok(());
        }
        ShellCommand::Empty | ShellCommand::Quit => return Ok(()),
        ShellCommand::Add => Intent::AddNote,
        ShellCommand::Pick => Intent::PickColor,
        ShellCommand::Color(text) => Intent::SetColorInput(text),
        ShellCommand::Show(reference) => Intent::ShowDetail(controller.resolve(&reference)?),
        ShellCommand::Rename(reference) => Intent::Rename(controller.resolve(&reference)?),
        ShellCommand::Delete(reference) => Intent::Delete(controller.resolve(&reference)?),
    };

    match controller.dispatch(intent, ui)? {
        Outcome::Added(id) => ui.say(&format!("Added note {}", id.short())),
        Outcome::Renamed(_) => ui.say("Renamed."),
        Outcome::Deleted(note) => ui.say(&format!("Deleted '{}'.", note.name)),
        Outcome::Cancelled => ui.say("Cancelled."),
        Outcome::Kept => ui.say("Kept."),
        Outcome::NoSelection => ui.say("No color selected."),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handoff::HandoffError;
    use crate::notes::HexColor;
    use crate::store::{NoteStore, StoreOptions};
    use crate::ui::RenderStyle;
    use std::io::Cursor;

    struct NoPicker;

    impl ColorSource for NoPicker {
        fn request_color(&self) -> Result<Option<HexColor>, HandoffError> {
            Ok(None)
        }
    }

    fn run(script: &str, dir: &std::path::Path) -> (MainController<NoPicker>, String) {
        let store = NoteStore::open(StoreOptions::new(dir.join("notes_data.json"))).unwrap();
        let mut controller = MainController::new(store, NoPicker);
        let style = RenderStyle {
            ansi: false,
            list_swatches: 5,
        };
        let mut ui = TerminalUi::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), style);
        run_shell(&mut controller, &mut ui);
        let output = String::from_utf8(ui.into_output()).unwrap();
        (controller, output)
    }

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!(ShellCommand::parse("  ls "), ShellCommand::List);
        assert_eq!(ShellCommand::parse("show 2"), ShellCommand::Show("2".into()));
        assert_eq!(ShellCommand::parse("rm abc123"), ShellCommand::Delete("abc123".into()));
        assert_eq!(ShellCommand::parse("color #FF0000"), ShellCommand::Color("#FF0000".into()));
        assert_eq!(ShellCommand::parse("show"), ShellCommand::Unknown("show".into()));
        assert_eq!(ShellCommand::parse(""), ShellCommand::Empty);
        assert_eq!(ShellCommand::parse("EXIT"), ShellCommand::Quit);
    }

    #[test]
    fn full_session_adds_renames_and_deletes() {
        let temp = tempfile::tempdir().unwrap();
        let script = "add\nname Palette A\n#FF0000\nblue\n#00FF00\ndone\n\
                      list\nrename 0\nPalette B\nshow 0\ndelete 0\nn\nquit\n";
        let (controller, output) = run(script, temp.path());

        assert_eq!(controller.store().len(), 1);
        assert_eq!(controller.store().notes()[0].name, "Palette B");
        assert!(output.contains("warning: invalid color code 'blue'"));
        assert!(output.contains("[0] Palette A (2 colors) [#FF0000] [#00FF00]"));
        assert!(output.contains("Note: Palette B"));
        assert!(output.contains("Kept."));
    }

    #[test]
    fn bad_reference_reports_error_and_continues() {
        let temp = tempfile::tempdir().unwrap();
        let (_, output) = run("show 4\nshow -1\ncolor #12\nbogus\n", temp.path());
        assert!(output.contains("error: note index 4 is out of range"));
        assert!(output.contains("error: note index -1 is out of range"));
        assert!(output.contains("Preview: #12 (invalid)"));
        assert!(output.contains("unknown command 'bogus'"));
    }
}
