use super::types::HandoffError;
use crate::notes::HexColor;
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Picker side: record the confirmed color. No trailing newline is written.
pub fn write_selection(path: &Path, color: &HexColor) -> Result<(), HandoffError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|err| HandoffError::io("create directory for", path, err))?;
    }
    fs::write(path, color.as_str()).map_err(|err| HandoffError::io("write", path, err))?;
    info!("Wrote selection {} to {}", color, path.display());
    Ok(())
}

/// Parent side: consume the selection left by the picker.
///
/// Returns `Ok(None)` when no file exists (the picker was closed without
/// confirming). The file is deleted whenever it was read, even if its contents
/// turn out not to be a valid color.
pub fn take_selection(path: &Path) -> Result<Option<HexColor>, HandoffError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!("Color selection file not found; no color was selected");
            return Ok(None);
        }
        Err(err) => return Err(HandoffError::io("read", path, err)),
    };

    fs::remove_file(path).map_err(|err| HandoffError::io("remove", path, err))?;

    let contents = String::from_utf8_lossy(&bytes);
    let candidate = contents.trim();
    debug!("Picker handed off '{}'", candidate);
    Ok(Some(HexColor::parse(candidate)?))
}
