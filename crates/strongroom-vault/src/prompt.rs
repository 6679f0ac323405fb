// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master key acquisition via TTY prompt or STRONGROOM_MASTER_KEY environment variable.

use secrecy::SecretString;
use strongroom_core::StrongroomError;

/// The environment variable name for providing the master key.
pub const MASTER_KEY_ENV_VAR: &str = "STRONGROOM_MASTER_KEY";

/// Get the master key from the environment variable or an interactive TTY prompt.
///
/// Priority:
/// 1. `STRONGROOM_MASTER_KEY` environment variable (for scripts)
/// 2. Interactive TTY prompt via `rpassword`
///
/// Returns an error if neither source is available.
pub fn get_master_key() -> Result<SecretString, StrongroomError> {
    if let Some(key) = master_key_from_env() {
        return Ok(key);
    }

    match read_master_key_tty("Master key: ")? {
        Some(key) => Ok(key),
        None => Err(StrongroomError::Config(format!(
            "no master key provided. Set {MASTER_KEY_ENV_VAR} or run interactively."
        ))),
    }
}

/// The master key from `STRONGROOM_MASTER_KEY`, if set and non-empty.
pub fn master_key_from_env() -> Option<SecretString> {
    match std::env::var(MASTER_KEY_ENV_VAR) {
        Ok(key) if !key.is_empty() => Some(SecretString::from(key)),
        _ => None,
    }
}

/// Prompt for a master key on the terminal without echo.
///
/// Returns `Ok(None)` when stdin is not a terminal. An empty answer is
/// [`StrongroomError::EmptyKey`].
fn read_master_key_tty(label: &str) -> Result<Option<SecretString>, StrongroomError> {
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Ok(None);
    }

    eprint!("{label}");
    let key = rpassword::read_password()
        .map_err(|e| StrongroomError::Internal(format!("failed to read master key: {e}")))?;
    if key.is_empty() {
        return Err(StrongroomError::EmptyKey);
    }
    Ok(Some(SecretString::from(key)))
}
