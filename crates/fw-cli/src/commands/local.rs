//! Interactive local play over stdin/stdout.

use std::io::{self, BufRead, Write};
use std::path::Path;

use fw_engine::Session;

pub fn run(gamefile: &Path, guesser_path: &Path) -> Result<(), String> {
    let world = super::load_world(gamefile)?;
    let guesser = super::load_guesser(guesser_path)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    write!(stdout, "Player name?: ")
        .and_then(|()| stdout.flush())
        .map_err(|e| e.to_string())?;

    let mut name = String::new();
    stdin
        .lock()
        .read_line(&mut name)
        .map_err(|e| e.to_string())?;
    let name = name.trim_end_matches(['\r', '\n']);
    let name = if name.is_empty() { "No name" } else { name };

    let mut session = Session::new(world, name, guesser).map_err(|e| e.to_string())?;
    session
        .run(stdin.lock(), stdout)
        .map_err(|e| e.to_string())
}
