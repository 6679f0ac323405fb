// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plaintext export of the whole vault.
//!
//! The pipeline owns the protocol (warn, re-authenticate, decode, render,
//! hand off) while everything user-facing goes through an
//! [`ExportCollaborator`]: prompts, notices and choosing where the file goes.

use secrecy::SecretString;
use strongroom_core::StrongroomError;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::guard::MasterKeyGuard;
use crate::store::{PlainVault, VaultStore};

/// Informational messages emitted during export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportNotice {
    /// An empty master key was entered; the prompt will be shown again.
    KeyRequired,
    /// The master key did not match; the prompt will be shown again.
    KeyMismatch,
    /// The export file was written.
    Completed,
}

/// How an export run ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The user cancelled the master key prompt. Nothing was written.
    Cancelled,
    /// The user did not choose a destination. Nothing was written.
    NoDestination,
    /// The export blob was handed to the collaborator and written.
    Written,
}

/// The user-facing side of an export.
pub trait ExportCollaborator {
    /// Tell the user the export will contain every password in plain text.
    fn warn_plaintext_exposure(&mut self);

    /// Ask for the master key. `Ok(None)` means the user cancelled.
    fn prompt_master_key(&mut self) -> Result<Option<SecretString>, StrongroomError>;

    /// Show an informational notice.
    fn notify(&mut self, notice: ExportNotice);

    /// Let the user pick a destination and write `blob` there.
    ///
    /// Returns `Ok(false)` if no destination was chosen.
    fn write_export(&mut self, blob: &str) -> Result<bool, StrongroomError>;
}

/// Render the decoded vault as export text.
///
/// One `website | username | password |` line per credential, websites in
/// stored order and usernames in index order.
pub fn render_export(vault: &PlainVault) -> String {
    let mut out = String::new();
    for (website, username, password) in vault.credentials() {
        out.push_str(website);
        out.push_str(" | ");
        out.push_str(username);
        out.push_str(" | ");
        out.push_str(password);
        out.push_str(" |\n");
    }
    out
}

/// Run one export.
///
/// Re-prompts on empty or mismatched keys without limit. A missing key record
/// ([`StrongroomError::NoVault`]) and an empty store
/// ([`StrongroomError::EmptyVault`]) end the run with an error.
pub fn run_export<C>(
    guard: &MasterKeyGuard,
    store: &VaultStore,
    collaborator: &mut C,
) -> Result<ExportOutcome, StrongroomError>
where
    C: ExportCollaborator + ?Sized,
{
    collaborator.warn_plaintext_exposure();

    loop {
        let Some(key) = collaborator.prompt_master_key()? else {
            info!("export cancelled at master key prompt");
            return Ok(ExportOutcome::Cancelled);
        };

        match guard.validate(&key) {
            Ok(()) => break,
            Err(StrongroomError::EmptyKey) => collaborator.notify(ExportNotice::KeyRequired),
            Err(StrongroomError::KeyMismatch) => collaborator.notify(ExportNotice::KeyMismatch),
            Err(e) => return Err(e),
        }
    }

    let vault = store.load_all()?;
    let blob = Zeroizing::new(render_export(&vault));
    debug!(sites = vault.len(), bytes = blob.len(), "export rendered");

    if !collaborator.write_export(&blob)? {
        info!("export aborted: no destination chosen");
        return Ok(ExportOutcome::NoDestination);
    }

    warn!(sites = vault.len(), "vault exported in plain text");
    collaborator.notify(ExportNotice::Completed);
    Ok(ExportOutcome::Written)
}

/// One-shot export availability for an interactive session.
///
/// Enabled at start only if a store exists, disabled after a successful
/// write, and enabled again whenever the store changes.
#[derive(Debug, Clone)]
pub struct ExportGate {
    enabled: bool,
}

impl ExportGate {
    /// Gate for a session over `store`.
    pub fn new(store: &VaultStore) -> Self {
        Self {
            enabled: store.exists(),
        }
    }

    /// Whether an export may be started.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Re-enable export after a successful save.
    pub fn note_store_changed(&mut self) {
        self.enabled = true;
    }

    /// Run [`run_export`] if the gate is open.
    pub fn run<C>(
        &mut self,
        guard: &MasterKeyGuard,
        store: &VaultStore,
        collaborator: &mut C,
    ) -> Result<ExportOutcome, StrongroomError>
    where
        C: ExportCollaborator + ?Sized,
    {
        if !self.enabled {
            return Err(StrongroomError::ExportDisabled);
        }

        let outcome = run_export(guard, store, collaborator)?;
        if outcome == ExportOutcome::Written {
            self.enabled = false;
        }
        Ok(outcome)
    }
}
