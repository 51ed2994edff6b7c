//! Line-oriented world-file loader for Fernweh.
//!
//! A world file declares locations and items in a flat, line-oriented
//! format:
//!
//! ```text
//! :Garage
//! You are in the garage.
//! E:Bedroom
//! W:Kitchen
//!
//! *knife
//! Kitchen
//! A sharp kitchen knife.
//! A:blade,cutter
//! ```
//!
//! `:Name` opens a location block (first line after it is the
//! description, every further line an `DIR:destination` exit).
//! `*Name` opens an item block (placement location, then description,
//! then `A:`/`F:`/`H:` tag lines for aliases, a fixed-message, and the
//! hidden flag). Blank lines and `#` comments are skipped.
//!
//! Loading is two-pass: blocks are scanned first, then exit
//! destinations and item placements are resolved against the full
//! location set, so mutually connected locations need no forward
//! declarations. Every failure surfaces as a [`Diagnostic`] with a byte
//! span into the source, renderable through ariadne.

/// Diagnostics with byte spans and their terminal rendering.
pub mod diagnostics;
/// The two-pass world-file parser.
pub mod parser;

/// Re-export diagnostic types.
pub use diagnostics::{Diagnostic, Severity, render_diagnostics};
/// Re-export the loader entry points.
pub use parser::{LoadResult, load_file, load_str};
