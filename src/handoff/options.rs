use super::channel::{ColorHandoff, PickerCommand};
use crate::config::PickerConfig;
use log::{debug, warn};
use std::env;
use std::path::PathBuf;

/// Environment variable through which the picker learns the handoff path.
pub const HANDOFF_ENV: &str = "CHROMANOTE_HANDOFF";

/// Handoff file name used when none is configured.
pub const DEFAULT_HANDOFF_FILE: &str = "selected_color.txt";

/// Build the handoff channel described by the configuration.
pub fn handoff_from_config(cfg: &PickerConfig) -> ColorHandoff {
    let command = match cfg.command.split_first() {
        Some((program, args)) => PickerCommand::new(program, args.to_vec()),
        None => builtin_picker(),
    };
    ColorHandoff::new(command, configured_handoff_path(cfg))
}

/// Path the picker side should write to: the `CHROMANOTE_HANDOFF` variable set
/// by a launching parent wins over the configuration.
pub fn resolve_handoff_path(cfg: &PickerConfig) -> PathBuf {
    match env::var_os(HANDOFF_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => configured_handoff_path(cfg),
    }
}

fn configured_handoff_path(cfg: &PickerConfig) -> PathBuf {
    if !cfg.handoff_file.trim().is_empty() {
        return PathBuf::from(cfg.handoff_file.trim());
    }

    let dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(env::temp_dir);
    let path = dir.join(DEFAULT_HANDOFF_FILE);
    debug!("Handoff file resolved to {}", path.display());
    path
}

fn builtin_picker() -> PickerCommand {
    match env::current_exe() {
        Ok(exe) => PickerCommand::new(exe, vec!["pick".to_string()]),
        Err(err) => {
            warn!(
                "Could not locate the running executable ({}); using 'chromanote' from PATH",
                err
            );
            PickerCommand::new("chromanote", vec!["pick".to_string()])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_command_and_path_are_used() {
        let cfg = PickerConfig {
            command: vec!["zenity".into(), "--color-selection".into()],
            handoff_file: " /tmp/picked.txt ".into(),
        };
        let handoff = handoff_from_config(&cfg);
        assert_eq!(handoff.command().display_name(), "zenity");
        assert_eq!(handoff.command().args, ["--color-selection"]);
        assert_eq!(handoff.handoff_path(), PathBuf::from("/tmp/picked.txt"));
    }

    #[test]
    fn default_picker_is_builtin_pick_mode() {
        let handoff = handoff_from_config(&PickerConfig::default());
        assert_eq!(handoff.command().args, ["pick"]);
        assert!(handoff.handoff_path().ends_with(DEFAULT_HANDOFF_FILE));
    }
}
