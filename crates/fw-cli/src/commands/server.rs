//! Concurrent TCP server: one isolated session per connection.
//!
//! The accept loop and every session run on their own OS threads.
//! Sessions are fully independent — each one loads its own world
//! instance, so no game state needs locking; only the trained guesser
//! is shared, read-only, behind an `Arc`.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use log::{error, info, warn};

use fw_engine::{Guesser, Session};

pub fn run(gamefile: &Path, host: &str, port: u16, guesser_path: &Path) -> Result<(), String> {
    // Fail fast on a broken world file before accepting anyone.
    super::load_world(gamefile)?;
    let guesser = super::load_guesser(guesser_path)?;

    let listener =
        TcpListener::bind((host, port)).map_err(|e| format!("cannot bind {host}:{port}: {e}"))?;
    info!("listening on {host}:{port}");

    let gamefile = gamefile.to_path_buf();
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => spawn_session(stream, gamefile.clone(), guesser.clone()),
            Err(e) => error!("accept error: {e}"),
        }
    }
    Ok(())
}

fn spawn_session(stream: TcpStream, gamefile: PathBuf, guesser: Option<Arc<Guesser>>) {
    let peer = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    info!("connection from {peer}");

    let spawned = thread::Builder::new()
        .name(format!("session-{peer}"))
        .spawn(move || match serve(stream, &gamefile, guesser) {
            Ok(()) => info!("session {peer} closed"),
            Err(e) => warn!("session {peer} ended with error: {e}"),
        });
    if let Err(e) = spawned {
        error!("cannot spawn session thread: {e}");
    }
}

fn serve(stream: TcpStream, gamefile: &Path, guesser: Option<Arc<Guesser>>) -> Result<(), String> {
    let mut writer = stream.try_clone().map_err(|e| e.to_string())?;
    let mut reader = BufReader::new(stream);

    writer
        .write_all(b"Player name?: ")
        .and_then(|()| writer.flush())
        .map_err(|e| e.to_string())?;

    let mut name = String::new();
    reader.read_line(&mut name).map_err(|e| e.to_string())?;
    let name = name.trim_end_matches(['\r', '\n']);
    let name = if name.is_empty() { "No name" } else { name };
    info!("player \"{name}\" joined");

    // Every connection plays in its own isolated world instance.
    let result = fw_worldfile::load_file(gamefile);
    if result.has_errors() {
        return Err(format!(
            "world file {} no longer loads",
            gamefile.display()
        ));
    }

    let mut session = Session::new(result.world, name, guesser).map_err(|e| e.to_string())?;
    session.run(reader, writer).map_err(|e| e.to_string())
}
