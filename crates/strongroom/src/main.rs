// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strongroom - a small local password vault.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod session;
mod shell;
mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strongroom_config::StrongroomConfig;
use strongroom_core::StrongroomError;

use crate::session::Session;
use crate::terminal::TerminalCollaborator;

/// Strongroom - a small local password vault.
#[derive(Parser, Debug)]
#[command(name = "strongroom", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Save a credential for a website.
    Save {
        website: String,
        username: String,
        /// Password to store. Prompted for when omitted.
        #[arg(long, conflicts_with = "generate")]
        password: Option<String>,
        /// Store a freshly generated password.
        #[arg(long, short)]
        generate: bool,
    },
    /// Show the password saved for a website and username.
    Get { website: String, username: String },
    /// Write every credential to a plain text file.
    Export {
        /// Destination file. Asked for when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print a new random password.
    Generate,
    /// Launch an interactive shell.
    Shell,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => strongroom_config::load_and_validate_path(path),
        None => strongroom_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            strongroom_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.normalized_level());

    if let Err(e) = run(cli.command, config) {
        commands::report(&e);
        std::process::exit(1);
    }
}

fn run(command: Option<Commands>, config: StrongroomConfig) -> Result<(), StrongroomError> {
    let Some(command) = command else {
        println!("strongroom: use --help for available commands");
        return Ok(());
    };

    match command {
        Commands::Save {
            website,
            username,
            password,
            generate,
        } => {
            let mut session = unlocked(config)?;
            commands::save(&mut session, &website, &username, password, generate)
        }
        Commands::Get { website, username } => {
            let session = unlocked(config)?;
            commands::get(&session, &website, &username)
        }
        Commands::Export { output } => {
            let mut session = unlocked(config)?;
            commands::export_once(&mut session, &mut TerminalCollaborator::new(output))
        }
        Commands::Generate => {
            commands::generate(&Session::open(config));
            Ok(())
        }
        Commands::Shell => shell::run_shell(config),
    }
}

fn unlocked(config: StrongroomConfig) -> Result<Session, StrongroomError> {
    let mut session = Session::open(config);
    session.unlock()?;
    Ok(session)
}

/// Initialize the tracing subscriber with the configured log level.
///
/// `RUST_LOG` takes precedence. Logs go to stderr so they never mix with
/// printed passwords.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

fn default_directives(log_level: &str) -> String {
    format!("strongroom={log_level},warn")
}
