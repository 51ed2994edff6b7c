//! Command resolution engine for Fernweh.
//!
//! Maps player input lines onto world mutations: a fixed verb
//! dispatcher handles recognized commands, and free-text input falls
//! back to a trained naive-Bayes intent guesser that pairs a known noun
//! with the most likely verb. Sessions are fully isolated — one world
//! and one player each — and run synchronously over any buffered line
//! channel.

/// Error types for the engine.
pub mod error;
/// The statistical intent guesser and its persisted model state.
pub mod guesser;
/// Command parsing and item resolution.
pub mod parser;
/// Session state, the verb dispatcher, and the session loop.
pub mod session;

/// Re-export error types.
pub use error::{EngineError, EngineResult};
/// Re-export the guesser.
pub use guesser::Guesser;
/// Re-export parsing entry points.
pub use parser::{Command, find_item, parse_command};
/// Re-export session types.
pub use session::{Outcome, Session};
