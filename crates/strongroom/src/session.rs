// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single run of the vault: one guard, one store and one export gate.
//!
//! Both the one-shot subcommands and the interactive shell drive the vault
//! through a `Session`, so unlocking and export gating behave the same way.

use colored::Colorize;
use secrecy::SecretString;
use strongroom_config::StrongroomConfig;
use strongroom_core::StrongroomError;
use strongroom_vault::prompt::{get_master_key, master_key_from_env};
use strongroom_vault::{
    ExportCollaborator, ExportGate, ExportOutcome, GuardState, LookupOutcome, MasterKeyGuard,
    SubmitOutcome, UpsertOutcome, VaultStore, generate_password, run_export,
};
use tracing::{debug, info};

pub struct Session {
    config: StrongroomConfig,
    guard: MasterKeyGuard,
    store: VaultStore,
    gate: ExportGate,
}

impl Session {
    pub fn open(config: StrongroomConfig) -> Self {
        let guard = MasterKeyGuard::from_config(&config);
        let store = VaultStore::from_config(&config);
        let gate = ExportGate::new(&store);
        debug!(
            key_file = %guard.path().display(),
            vault_file = %store.path().display(),
            export_enabled = gate.is_enabled(),
            "session opened"
        );
        Self {
            config,
            guard,
            store,
            gate,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.guard.state() == GuardState::Unlocked
    }

    pub fn export_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Unlock with an already acquired key.
    pub fn unlock_with(&mut self, key: &SecretString) -> Result<SubmitOutcome, StrongroomError> {
        let outcome = self.guard.submit(key)?;
        if outcome == SubmitOutcome::Created {
            println!(
                "{}",
                "Master key set. You will need it every time you open this vault.".green()
            );
        }
        Ok(outcome)
    }

    /// Unlock interactively, once per run.
    ///
    /// A key from `STRONGROOM_MASTER_KEY` gets a single attempt. On a terminal
    /// the prompt repeats until a matching key is entered.
    pub fn unlock(&mut self) -> Result<(), StrongroomError> {
        if self.is_unlocked() {
            return Ok(());
        }

        if self.guard.is_first_use() {
            println!("{}", "Welcome to strongroom.".bold().green());
            println!("Choose a master key. It cannot be changed later.\n");
        }

        // A key from the environment cannot change between attempts.
        let retry = master_key_from_env().is_none();

        loop {
            let key = match get_master_key() {
                Ok(key) => key,
                Err(e @ StrongroomError::EmptyKey) if retry => {
                    eprintln!("{}", e.to_string().yellow());
                    continue;
                }
                Err(e) => return Err(e),
            };

            match self.unlock_with(&key) {
                Ok(_) => return Ok(()),
                Err(e @ StrongroomError::KeyMismatch) if retry => {
                    eprintln!("{}", e.to_string().yellow());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Save a credential, asking `confirm` before replacing an existing password.
    pub fn save<F>(
        &mut self,
        website: &str,
        username: &str,
        password: &SecretString,
        confirm: F,
    ) -> Result<UpsertOutcome, StrongroomError>
    where
        F: FnOnce() -> Result<bool, StrongroomError>,
    {
        use secrecy::ExposeSecret;

        let plain = password.expose_secret();
        let mut outcome = self.store.upsert(website, username, plain)?;
        if outcome == UpsertOutcome::OverwriteConfirmRequired && confirm()? {
            outcome = self.store.confirm_overwrite(website, username, plain)?;
        }

        if outcome != UpsertOutcome::OverwriteConfirmRequired {
            self.gate.note_store_changed();
        }
        Ok(outcome)
    }

    pub fn get(&self, website: &str, username: &str) -> Result<LookupOutcome, StrongroomError> {
        self.store.lookup(website, username)
    }

    pub fn export<C>(&mut self, collaborator: &mut C) -> Result<ExportOutcome, StrongroomError>
    where
        C: ExportCollaborator + ?Sized,
    {
        let outcome = self.gate.run(&self.guard, &self.store, collaborator)?;
        info!(outcome = ?outcome, "export finished");
        Ok(outcome)
    }

    /// Export without consulting the gate.
    ///
    /// A one-shot run has no earlier export to repeat, so a missing vault is
    /// reported as [`StrongroomError::EmptyVault`].
    pub fn export_once<C>(&mut self, collaborator: &mut C) -> Result<ExportOutcome, StrongroomError>
    where
        C: ExportCollaborator + ?Sized,
    {
        let outcome = run_export(&self.guard, &self.store, collaborator)?;
        info!(outcome = ?outcome, "export finished");
        Ok(outcome)
    }

    pub fn generate(&self) -> SecretString {
        generate_password(&self.config.generator)
    }
}
