//! Error types for the engine.
//!
//! Command-level failures (unknown direction, missing item, fixed item)
//! are never errors — they render as replies and the session continues.
//! These types cover what can actually fail: session construction,
//! channel I/O, and the persisted guesser state.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur outside normal command handling.
#[derive(Debug, Error)]
pub enum EngineError {
    /// I/O failure on the session channel or a model state file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Persisted guesser state exists but cannot be parsed.
    #[error("invalid guesser model: {0}")]
    Model(#[from] serde_json::Error),

    /// World model error, e.g. a world with no start location.
    #[error(transparent)]
    Core(#[from] fw_core::FwError),
}
