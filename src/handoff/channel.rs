use super::options::HANDOFF_ENV;
use super::selection::take_selection;
use super::types::HandoffError;
use crate::notes::HexColor;
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Abstraction over where a picked color comes from. Mocked in tests.
pub trait ColorSource {
    /// Ask the user for a color. `Ok(None)` means no selection was made.
    fn request_color(&self) -> Result<Option<HexColor>, HandoffError>;
}

/// Program and arguments used to start the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl PickerCommand {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn display_name(&self) -> String {
        self.program.display().to_string()
    }
}

/// Runs the picker as a child process and reads its handoff file.
#[derive(Debug, Clone)]
pub struct ColorHandoff {
    command: PickerCommand,
    handoff_path: PathBuf,
}

impl ColorHandoff {
    pub fn new(command: PickerCommand, handoff_path: impl Into<PathBuf>) -> Self {
        Self {
            command,
            handoff_path: handoff_path.into(),
        }
    }

    pub fn command(&self) -> &PickerCommand {
        &self.command
    }

    pub fn handoff_path(&self) -> &Path {
        &self.handoff_path
    }

    fn discard_stale_selection(&self) -> Result<(), HandoffError> {
        match fs::remove_file(&self.handoff_path) {
            Ok(()) => {
                debug!(
                    "Removed stale handoff file {}",
                    self.handoff_path.display()
                );
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(HandoffError::io(
                "remove stale",
                &self.handoff_path,
                err,
            )),
        }
    }
}

impl ColorSource for ColorHandoff {
    /// Blocks until the picker exits. Stdio is inherited so terminal pickers
    /// can interact with the user.
    fn request_color(&self) -> Result<Option<HexColor>, HandoffError> {
        self.discard_stale_selection()?;

        let program = self.command.display_name();
        info!("Launching color picker {}", program);
        let status = Command::new(&self.command.program)
            .args(&self.command.args)
            .env(HANDOFF_ENV, &self.handoff_path)
            .status()
            .map_err(|source| HandoffError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(HandoffError::LaunchFailure { program, status });
        }

        take_selection(&self.handoff_path)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str) -> PickerCommand {
        PickerCommand::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn confirmed_selection_is_returned() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("selected_color.txt");
        let handoff = ColorHandoff::new(shell(r#"printf '#1a2B3c' > "$CHROMANOTE_HANDOFF""#), &path);

        let color = handoff.request_color().unwrap();
        assert_eq!(color.map(|c| c.as_str().to_string()), Some("#1a2B3c".to_string()));
        assert!(!path.exists());
    }

    #[test]
    fn closed_picker_means_no_selection() {
        let temp = tempfile::tempdir().unwrap();
        let handoff = ColorHandoff::new(shell("exit 0"), temp.path().join("selected_color.txt"));
        assert_eq!(handoff.request_color().unwrap(), None);
    }

    #[test]
    fn stale_file_is_not_mistaken_for_a_selection() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("selected_color.txt");
        fs::write(&path, "#000000").unwrap();
        let handoff = ColorHandoff::new(shell("exit 0"), &path);
        assert_eq!(handoff.request_color().unwrap(), None);
    }

    #[test]
    fn non_zero_exit_is_a_launch_failure() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("selected_color.txt");
        let handoff = ColorHandoff::new(
            shell(r#"printf '#FFFFFF' > "$CHROMANOTE_HANDOFF"; exit 3"#),
            &path,
        );
        let err = handoff.request_color().unwrap_err();
        assert!(matches!(err, HandoffError::LaunchFailure { .. }));
        assert!(err.is_launch_failure());
    }

    #[test]
    fn missing_program_is_a_launch_failure() {
        let temp = tempfile::tempdir().unwrap();
        let handoff = ColorHandoff::new(
            PickerCommand::new(temp.path().join("no-such-picker"), Vec::new()),
            temp.path().join("selected_color.txt"),
        );
        let err = handoff.request_color().unwrap_err();
        assert!(matches!(err, HandoffError::Spawn { .. }));
        assert!(err.is_launch_failure());
    }
}
