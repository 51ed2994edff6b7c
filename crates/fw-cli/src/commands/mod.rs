//! Subcommand implementations for the `fw` binary.

pub mod local;
pub mod selfcheck;
pub mod server;
pub mod train;

use std::path::Path;
use std::sync::Arc;

use fw_core::World;
use fw_engine::{EngineError, Guesser};
use fw_worldfile::{LoadResult, Severity, render_diagnostics};

/// Load a world file and print its diagnostics to stderr.
/// Returns the world only when loading produced no errors.
pub fn load_world(path: &Path) -> Result<World, String> {
    let result = fw_worldfile::load_file(path);
    print_diagnostics(path, &result);

    if result.has_errors() {
        Err(format!("failed to load {}", path.display()))
    } else {
        Ok(result.world)
    }
}

/// Print diagnostics to stderr using ariadne.
fn print_diagnostics(path: &Path, result: &LoadResult) {
    if result.diagnostics.is_empty() {
        return;
    }

    let source = std::fs::read_to_string(path).unwrap_or_default();
    let filename = path.display().to_string();
    eprint!(
        "{}",
        render_diagnostics(&source, &filename, &result.diagnostics)
    );

    let errors = result
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    if errors > 0 {
        eprintln!("  {} error{}", errors, if errors == 1 { "" } else { "s" });
    }
}

/// Load the persisted guesser model. A missing file disables the
/// fallback rather than failing the command; a present-but-broken
/// model is a real error.
pub fn load_guesser(path: &Path) -> Result<Option<Arc<Guesser>>, String> {
    match Guesser::load(path) {
        Ok(guesser) => Ok(Some(Arc::new(guesser))),
        Err(EngineError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!(
                "guesser model {} not found, fuzzy fallback disabled",
                path.display()
            );
            Ok(None)
        }
        Err(e) => Err(format!("cannot load guesser model {}: {e}", path.display())),
    }
}
