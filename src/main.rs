use anyhow::{Result, bail};
use chromanote::config::Config;
use chromanote::controller::{EditorStep, Intent, MainController, Outcome, ScriptedInteraction};
use chromanote::handoff::{ColorSource, handoff_from_config, resolve_handoff_path, write_selection};
use chromanote::notes::HexColor;
use chromanote::shell::run_shell;
use chromanote::store::{NoteStore, options_from_config};
use chromanote::ui::{RenderStyle, TerminalUi, format_note_list};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CHROMANOTE_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "chromanote")]
#[command(version = VERSION, about = "Manage named collections of colors")]
struct Cli {
    /// Config file to use instead of ~/.config/chromanote/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Note store to use (overrides storage.notes_file)
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Notes(NoteCommand),

    /// Act as the color picker: record one color in the handoff file
    Pick {
        /// Color code to hand off
        color: Option<String>,

        /// Color as 0-255 components
        #[arg(long, value_name = "R,G,B", conflicts_with = "color")]
        rgb: Option<String>,

        /// Handoff file (defaults to $CHROMANOTE_HANDOFF or the configured path)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Subcommands that work on the note store.
#[derive(Subcommand, Debug)]
enum NoteCommand {
    /// List all notes
    #[command(alias = "ls")]
    List,

    /// Show every color of a note
    Show {
        /// List index or @id prefix
        #[arg(allow_hyphen_values = true)]
        note: String,
    },

    /// Create a note (interactive unless --name or --color is given)
    Add {
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Color code, may be repeated
        #[arg(long = "color", short = 'c', value_name = "HEX")]
        colors: Vec<String>,
    },

    /// Rename a note (prompts when NAME is omitted)
    Rename {
        #[arg(allow_hyphen_values = true)]
        note: String,
        name: Option<String>,
    },

    /// Delete a note (asks for confirmation unless --yes)
    #[command(alias = "delete")]
    Rm {
        #[arg(allow_hyphen_values = true)]
        note: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Run the color picker and print the chosen color
    PickColor,

    /// Interactive session
    Shell,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        print_usage();
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut terminal = TerminalUi::new(
        stdin.lock(),
        stdout.lock(),
        RenderStyle::from_config(&config.display),
    );

    let command = match command {
        Command::Notes(command) => command,
        Command::Pick { color, rgb, output } => {
            let path = output.unwrap_or_else(|| resolve_handoff_path(&config.picker));
            let selection = match (color, rgb) {
                (Some(code), _) => Some(HexColor::parse(code.trim())?),
                (None, Some(triplet)) => Some(HexColor::from_rgb_triplet(&triplet)?),
                (None, None) => prompt_for_color(&mut terminal),
            };
            match selection {
                Some(color) => write_selection(&path, &color)?,
                None => {
                    log::info!("No color confirmed; leaving {} untouched", path.display())
                }
            }
            return Ok(());
        }
    };

    let options = options_from_config(&config.storage, cli.store.as_deref());
    let (store, recovered) = NoteStore::open_or_recover(options)?;
    if let Some(err) = recovered {
        eprintln!("warning: {err}; starting with an empty note list");
    }
    let mut controller = MainController::new(store, handoff_from_config(&config.picker));

    match command {
        NoteCommand::List => {
            let list = format_note_list(controller.store().notes(), terminal.style());
            terminal.say(&list);
        }
        NoteCommand::Show { note } => {
            let id = controller.resolve(&note)?;
            controller.dispatch(Intent::ShowDetail(id), &mut terminal)?;
        }
        NoteCommand::Add { name, colors } if name.is_some() || !colors.is_empty() => {
            let mut steps: Vec<EditorStep> = name.into_iter().map(EditorStep::SetName).collect();
            steps.extend(colors.into_iter().map(EditorStep::AddColor));
            steps.push(EditorStep::Confirm);
            let mut script = ScriptedInteraction::with_steps(steps).stopping_on_warning();

            match controller.dispatch(Intent::AddNote, &mut script)? {
                Outcome::Added(id) => terminal.say(&format!("Added note {}", id.short())),
                _ => {
                    for warning in &script.warnings {
                        eprintln!("error: {warning}");
                    }
                    bail!("note was not added");
                }
            }
        }
        NoteCommand::Add { .. } => {
            match controller.dispatch(Intent::AddNote, &mut terminal)? {
                Outcome::Added(id) => terminal.say(&format!("Added note {}", id.short())),
                _ => terminal.say("Cancelled."),
            }
        }
        NoteCommand::Rename { note, name } => {
            let id = controller.resolve(&note)?;
            let outcome = match name {
                Some(name) => {
                    let mut script = ScriptedInteraction::new().renaming_to(name);
                    controller.dispatch(Intent::Rename(id), &mut script)?
                }
                None => controller.dispatch(Intent::Rename(id), &mut terminal)?,
            };
            match outcome {
                Outcome::Renamed(_) => terminal.say("Renamed."),
                _ => terminal.say("Name unchanged."),
            }
        }
        NoteCommand::Rm { note, yes } => {
            let id = controller.resolve(&note)?;
            let outcome = if yes {
                let mut script = ScriptedInteraction::new().confirming(true);
                controller.dispatch(Intent::Delete(id), &mut script)?
            } else {
                controller.dispatch(Intent::Delete(id), &mut terminal)?
            };
            match outcome {
                Outcome::Deleted(removed) => terminal.say(&format!("Deleted '{}'.", removed.name)),
                _ => terminal.say("Kept."),
            }
        }
        NoteCommand::PickColor => pick_color(&mut controller, &mut terminal)?,
        NoteCommand::Shell => run_shell(&mut controller, &mut terminal),
    }

    Ok(())
}

fn pick_color<S, R, W>(
    controller: &mut MainController<S>,
    terminal: &mut TerminalUi<R, W>,
) -> Result<()>
where
    S: ColorSource,
    R: BufRead,
    W: Write,
{
    match controller.dispatch(Intent::PickColor, terminal)? {
        Outcome::ColorSelected(color) => terminal.say(color.as_str()),
        Outcome::PickerUnavailable => bail!("color picker unavailable"),
        _ => terminal.say("No color selected."),
    }
    Ok(())
}

/// Terminal picker: ask until a valid color or an empty answer.
fn prompt_for_color<R: BufRead, W: Write>(terminal: &mut TerminalUi<R, W>) -> Option<HexColor> {
    loop {
        let answer = terminal.read_line("Color (#RRGGBB or R,G,B; empty to cancel): ")?;
        let answer = answer.trim();
        if answer.is_empty() {
            return None;
        }
        let parsed = if answer.starts_with('#') {
            HexColor::parse(answer)
        } else {
            HexColor::from_rgb_triplet(answer)
        };
        match parsed {
            Ok(color) => return Some(color),
            Err(err) => terminal.say(&format!("warning: {}", err)),
        }
    }
}

fn print_usage() {
    println!("chromanote: Manage named collections of colors");
    println!();
    println!("Usage:");
    println!("  chromanote list                      List notes");
    println!("  chromanote add                       Create a note interactively");
    println!("  chromanote add -n NAME -c #RRGGBB    Create a note in one go");
    println!("  chromanote show NOTE                 Show every color of a note");
    println!("  chromanote rename NOTE [NAME]        Rename a note");
    println!("  chromanote rm NOTE [--yes]           Delete a note");
    println!("  chromanote pick-color                Run the color picker");
    println!("  chromanote shell                     Interactive session");
    println!("  chromanote --help                    Show help");
    println!();
    println!("NOTE is a list index (0-based) or @ followed by a note id prefix.");
    println!("Notes are stored in notes_data.json in the working directory by default.");
}
