// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal prompts and the terminal side of an export.

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use colored::Colorize;
use secrecy::SecretString;
use strongroom_core::StrongroomError;
use strongroom_vault::prompt::master_key_from_env;
use strongroom_vault::{ExportCollaborator, ExportNotice};

/// Print `label` and read one line from stdin, without the line ending.
///
/// Returns `Ok(None)` at end of input.
pub fn read_line(label: &str) -> Result<Option<String>, StrongroomError> {
    eprint!("{label}");
    std::io::stderr().flush().map_err(StrongroomError::storage)?;

    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| StrongroomError::Internal(format!("failed to read input: {e}")))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Ask a yes/no question. Anything but `y`/`yes` is no.
pub fn confirm(question: &str) -> Result<bool, StrongroomError> {
    let answer = read_line(&format!("{question} [y/N] "))?;
    Ok(matches!(
        answer.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
        Some("y" | "yes")
    ))
}

/// Read a password without echo.
pub fn read_password(label: &str) -> Result<SecretString, StrongroomError> {
    let password = rpassword::prompt_password(label)
        .map_err(|e| StrongroomError::Internal(format!("failed to read password: {e}")))?;
    Ok(SecretString::from(password))
}

/// Export collaborator backed by the terminal.
///
/// After a mismatched key the user is asked whether to try again; declining
/// cancels the export. An empty key simply prompts again. With no destination given up front, the user is asked
/// for a path and an empty answer means no destination.
pub struct TerminalCollaborator {
    output: Option<PathBuf>,
    env_key: Option<SecretString>,
    confirm_retry: bool,
    written_to: Option<PathBuf>,
}

impl TerminalCollaborator {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self {
            output,
            env_key: master_key_from_env(),
            confirm_retry: false,
            written_to: None,
        }
    }
}

impl ExportCollaborator for TerminalCollaborator {
    fn warn_plaintext_exposure(&mut self) {
        eprintln!(
            "{} the export file will contain every saved password in plain text.",
            "warning:".yellow().bold()
        );
        eprintln!("Keep it somewhere safe and delete it when you are done.");
    }

    fn prompt_master_key(&mut self) -> Result<Option<SecretString>, StrongroomError> {
        if std::mem::take(&mut self.confirm_retry) && !confirm("Try again?")? {
            return Ok(None);
        }

        // The environment key gets exactly one attempt.
        if let Some(key) = self.env_key.take() {
            return Ok(Some(key));
        }
        if !std::io::stdin().is_terminal() {
            return Ok(None);
        }

        let key = rpassword::prompt_password("Master key: ")
            .map_err(|e| StrongroomError::Internal(format!("failed to read master key: {e}")))?;
        Ok(Some(SecretString::from(key)))
    }

    fn notify(&mut self, notice: ExportNotice) {
        match notice {
            ExportNotice::KeyRequired => {
                eprintln!("{}", StrongroomError::EmptyKey.to_string().yellow());
                self.confirm_retry = false;
            }
            ExportNotice::KeyMismatch => {
                eprintln!("{}", StrongroomError::KeyMismatch.to_string().yellow());
                self.confirm_retry = true;
            }
            ExportNotice::Completed => {
                let path = self
                    .written_to
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                println!("{} {}", "Export written to".green(), path.bold());
            }
        }
    }

    fn write_export(&mut self, blob: &str) -> Result<bool, StrongroomError> {
        let path = match self.output.take() {
            Some(path) => path,
            None => match read_line("Export to file (leave empty to abort): ")? {
                Some(answer) if !answer.trim().is_empty() => PathBuf::from(answer.trim()),
                _ => return Ok(false),
            },
        };

        std::fs::write(&path, blob).map_err(StrongroomError::storage)?;
        self.written_to = Some(path);
        Ok(true)
    }
}
