//! Error types for the timeline engine
//!
//! The engine itself never fails: stale references are no-ops. Errors only
//! arise at the crate boundary (decoding actions and projects, history
//! navigation, and calls made before the sequencer exists).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// An action could not be decoded from its wire representation
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Persisted project data is malformed
    #[error("Invalid project data: {0}")]
    InvalidProject(String),

    #[error("No undo history available")]
    NothingToUndo,

    #[error("No redo history available")]
    NothingToRedo,

    #[error("Sequencer not initialized")]
    NotInitialized,
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::InvalidProject(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
