use thiserror::Error;

use crate::export::ExportError;
use crate::state::persistence::PersistenceError;

/// Failures the editing state machine can run into. None of them is fatal:
/// the event dispatcher turns each into a notice or a log line and the editor
/// keeps accepting input.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A gesture that the current tool cannot perform, e.g. drawing with no
    /// tool selected.
    #[error("{0}")]
    InvalidGesture(String),

    #[error("persistence failed: {0}")]
    PersistenceFailure(#[from] PersistenceError),

    #[error("persisted drawing is malformed: {0}")]
    MalformedPersistedData(String),

    #[error("export failed: {0}")]
    ExportFailure(#[from] ExportError),

    /// The dragged handle no longer maps onto a point of its path.
    #[error("handle {index} is out of range for a path of {len} points")]
    HandleIndexOutOfRange { index: usize, len: usize },
}

impl EditorError {
    pub fn invalid_gesture(message: impl Into<String>) -> Self {
        Self::InvalidGesture(message.into())
    }
}
