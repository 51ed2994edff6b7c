//! Persist the default-corpus guesser model.

use std::path::Path;

use fw_engine::Guesser;

pub fn run(output: &Path) -> Result<(), String> {
    let guesser = Guesser::with_default_corpus();
    guesser
        .save(output)
        .map_err(|e| format!("cannot write {}: {e}", output.display()))?;

    println!("  Wrote guesser model to {}", output.display());
    Ok(())
}
