//! Error taxonomy for the editor controller.
//!
//! None of these are fatal to the host: load failures degrade the registry
//! gate, storage failures fall back to a fixed default, and invalid
//! transitions are refused before they reach the state machine.

use thiserror::Error;

/// Errors surfaced by the editor state layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A library's metadata or assets did not arrive.
    #[error("library `{library}` failed to load: {reason}")]
    LoadFailure { library: String, reason: String },

    /// The persisted key-value store could not be read or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A transition was requested from a state that does not allow it.
    #[error("invalid transition: {0}")]
    InvalidTransition(&'static str),

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
