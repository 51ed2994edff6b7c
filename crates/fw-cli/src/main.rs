//! CLI frontend and network server for the Fernweh adventure engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fw",
    about = "Fernweh — a small text-adventure interpreter",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run self-checks against the built-in sample universe
    Test,

    /// Train the intent guesser from the built-in corpus and persist it
    Train {
        /// Output path for the model state
        #[arg(short, long, default_value = "commands.json")]
        output: PathBuf,
    },

    /// Play a game file interactively on this terminal
    Local {
        /// Path to the world file
        gamefile: PathBuf,

        /// Persisted guesser model; a missing file disables the fuzzy fallback
        #[arg(long, default_value = "commands.json")]
        guesser: PathBuf,
    },

    /// Serve a game file to concurrent TCP connections
    Server {
        /// Path to the world file
        gamefile: PathBuf,

        /// Address to bind
        host: String,

        /// Port to listen on
        port: u16,

        /// Persisted guesser model; a missing file disables the fuzzy fallback
        #[arg(long, default_value = "commands.json")]
        guesser: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Test => commands::selfcheck::run(),
        Commands::Train { output } => commands::train::run(&output),
        Commands::Local { gamefile, guesser } => commands::local::run(&gamefile, &guesser),
        Commands::Server {
            gamefile,
            host,
            port,
            guesser,
        } => commands::server::run(&gamefile, &host, port, &guesser),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
