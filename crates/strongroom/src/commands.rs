// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal output for the vault commands, shared by the CLI and the shell.

use colored::Colorize;
use secrecy::{ExposeSecret, SecretString};
use strongroom_core::StrongroomError;
use strongroom_vault::{ExportCollaborator, ExportOutcome, LookupOutcome, UpsertOutcome};

use crate::session::Session;
use crate::terminal;

/// `save`: store a credential, asking before an overwrite.
pub fn save(
    session: &mut Session,
    website: &str,
    username: &str,
    password: Option<String>,
    generate: bool,
) -> Result<(), StrongroomError> {
    let password = match password {
        Some(password) => SecretString::from(password),
        None if generate => {
            let password = session.generate();
            println!("Generated password: {}", password.expose_secret().bold());
            password
        }
        None => terminal::read_password("Password: ")?,
    };

    let outcome = session.save(website, username, &password, || {
        terminal::confirm(&format!(
            "{username} already has a password for {website}. Overwrite?"
        ))
    })?;

    match outcome {
        UpsertOutcome::Created | UpsertOutcome::Appended => {
            println!("{}", "Saved.".green());
        }
        UpsertOutcome::Overwritten => println!("{}", "Password replaced.".green()),
        UpsertOutcome::OverwriteConfirmRequired => {
            println!("{}", "Kept the existing password.".dimmed());
        }
    }
    Ok(())
}

/// `get`: print a stored password.
pub fn get(session: &Session, website: &str, username: &str) -> Result<(), StrongroomError> {
    match session.get(website, username)? {
        LookupOutcome::Found { password } => println!("{}", password.expose_secret()),
        LookupOutcome::NotFound => {
            println!("No details for {username} at {website}.");
            println!(
                "Save one with {}.",
                format!("save {website} {username}").yellow()
            );
        }
    }
    Ok(())
}

/// `export` in the shell: run the export pipeline if the gate allows it.
pub fn export<C>(session: &mut Session, collaborator: &mut C) -> Result<(), StrongroomError>
where
    C: ExportCollaborator + ?Sized,
{
    print_export_outcome(session.export(collaborator)?);
    Ok(())
}

/// `strongroom export`: run the export pipeline once, ungated.
pub fn export_once<C>(session: &mut Session, collaborator: &mut C) -> Result<(), StrongroomError>
where
    C: ExportCollaborator + ?Sized,
{
    print_export_outcome(session.export_once(collaborator)?);
    Ok(())
}

fn print_export_outcome(outcome: ExportOutcome) {
    match outcome {
        ExportOutcome::Written => {}
        ExportOutcome::Cancelled => println!("{}", "Export cancelled.".dimmed()),
        ExportOutcome::NoDestination => println!("{}", "Nothing exported.".dimmed()),
    }
}

/// `generate`: print a new random password.
pub fn generate(session: &Session) {
    println!("{}", session.generate().expose_secret());
}

/// Print an error to stderr. Expected conditions are shown as warnings.
pub fn report(err: &StrongroomError) {
    match err {
        StrongroomError::EmptyVault
        | StrongroomError::ExportDisabled
        | StrongroomError::BlankField { .. } => eprintln!("{}", err.to_string().yellow()),
        _ => eprintln!("{}: {}", "error".red(), error_message(err)),
    }
}

/// The text shown for an unexpected error.
fn error_message(err: &StrongroomError) -> String {
    if err.is_corruption() {
        format!("vault data is corrupt, nothing was changed: {err}")
    } else {
        err.to_string()
    }
}
