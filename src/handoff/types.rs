//! Error type for the color handoff.

use crate::notes::ValidationError;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while running the picker or consuming its selection.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("failed to start color picker '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("color picker '{program}' exited unsuccessfully ({status})")]
    LaunchFailure { program: String, status: ExitStatus },

    #[error("color picker returned an invalid selection: {0}")]
    InvalidSelection(#[from] ValidationError),

    #[error("failed to {action} handoff file {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HandoffError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        HandoffError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// True when the picker itself could not be run to completion.
    pub fn is_launch_failure(&self) -> bool {
        matches!(
            self,
            HandoffError::Spawn { .. } | HandoffError::LaunchFailure { .. }
        )
    }
}
