//! Color handoff between chromanote and an external picker process.
//!
//! The picker runs as a blocking child process. When the user confirms a
//! color, the picker writes it to a known handoff file; the parent reads the
//! file once the child has exited successfully and deletes it.

mod channel;
mod options;
mod selection;
mod types;

pub use channel::{ColorHandoff, ColorSource, PickerCommand};
pub use options::{DEFAULT_HANDOFF_FILE, HANDOFF_ENV, handoff_from_config, resolve_handoff_path};
pub use selection::{take_selection, write_selection};
pub use types::HandoffError;
