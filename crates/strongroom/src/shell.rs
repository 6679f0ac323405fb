// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `strongroom shell` command implementation.
//!
//! Launches an interactive REPL with colored prompt and readline history.
//! The vault is unlocked once at start; every command then shares the same
//! session, so a completed export stays disabled until something is saved.

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use strongroom_config::StrongroomConfig;
use strongroom_core::StrongroomError;

use crate::commands;
use crate::session::Session;
use crate::terminal::TerminalCollaborator;

/// A parsed shell line.
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Save {
        website: &'a str,
        username: &'a str,
        generate: bool,
    },
    Get {
        website: &'a str,
        username: &'a str,
    },
    Export,
    Generate,
    Help,
    Quit,
}

fn parse_line(line: &str) -> Result<ShellCommand<'_>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words[..] {
        ["save", website, username] => Ok(ShellCommand::Save {
            website,
            username,
            generate: false,
        }),
        ["save", website, username, "--generate" | "-g"] => Ok(ShellCommand::Save {
            website,
            username,
            generate: true,
        }),
        ["get", website, username] => Ok(ShellCommand::Get { website, username }),
        ["export"] => Ok(ShellCommand::Export),
        ["generate"] => Ok(ShellCommand::Generate),
        ["help"] => Ok(ShellCommand::Help),
        ["/quit" | "/exit"] => Ok(ShellCommand::Quit),
        ["save", ..] => Err("usage: save <website> <username> [--generate]".to_string()),
        ["get", ..] => Err("usage: get <website> <username>".to_string()),
        [other, ..] => Err(format!("unknown command `{other}`, type `help` for a list")),
        [] => Err(String::new()),
    }
}

fn print_help() {
    println!("  {}  save a credential", "save <website> <username> [--generate]".bold());
    println!("  {}               show a saved password", "get <website> <username>".bold());
    println!("  {}                                 write every credential to a text file", "export".bold());
    println!("  {}                               print a new random password", "generate".bold());
    println!("  {}                                  leave the shell", "/quit".bold());
}

/// Runs the `strongroom shell` interactive REPL.
pub fn run_shell(config: StrongroomConfig) -> Result<(), StrongroomError> {
    let mut session = Session::open(config);
    session.unlock()?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| StrongroomError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "strongroom shell".bold().green());
    println!("Type {} for commands, {} to exit.", "help".yellow(), "/quit".yellow());
    if !session.export_enabled() {
        println!("{}", "Export is available once something is saved.".dimmed());
    }
    println!();

    let prompt = format!("{}> ", "strongroom".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match parse_line(trimmed) {
                    Ok(command) => command,
                    Err(message) => {
                        eprintln!("{}", message.yellow());
                        continue;
                    }
                };

                let result = match command {
                    ShellCommand::Quit => break,
                    ShellCommand::Help => {
                        print_help();
                        Ok(())
                    }
                    ShellCommand::Save {
                        website,
                        username,
                        generate,
                    } => commands::save(&mut session, website, username, None, generate),
                    ShellCommand::Get { website, username } => {
                        commands::get(&session, website, username)
                    }
                    ShellCommand::Export => {
                        commands::export(&mut session, &mut TerminalCollaborator::new(None))
                    }
                    ShellCommand::Generate => {
                        commands::generate(&session);
                        Ok(())
                    }
                };

                if let Err(e) = result {
                    commands::report(&e);
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}
