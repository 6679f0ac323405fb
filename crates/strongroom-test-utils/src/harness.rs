// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end vault tests.
//!
//! `TestVault` lays out a key file and a store file in a temporary directory
//! and wires a guard and a store to them, the same way the binary does from
//! configuration.

use secrecy::SecretString;
use strongroom_config::StrongroomConfig;
use strongroom_core::StrongroomError;
use strongroom_vault::{ExportGate, MasterKeyGuard, VaultStore};

/// Builder for creating test vaults with configurable options.
pub struct TestVaultBuilder {
    master_key: Option<String>,
    lowercase_identifiers: bool,
    credentials: Vec<(String, String, String)>,
}

impl TestVaultBuilder {
    fn new() -> Self {
        Self {
            master_key: None,
            lowercase_identifiers: true,
            credentials: Vec::new(),
        }
    }

    /// Create the key record with this master key during `build()`.
    pub fn with_master_key(mut self, key: &str) -> Self {
        self.master_key = Some(key.to_string());
        self
    }

    /// Toggle lowercase folding of websites and usernames.
    pub fn with_lowercase_identifiers(mut self, enabled: bool) -> Self {
        self.lowercase_identifiers = enabled;
        self
    }

    /// Save a credential during `build()`.
    pub fn with_credential(mut self, website: &str, username: &str, password: &str) -> Self {
        self.credentials
            .push((website.to_string(), username.to_string(), password.to_string()));
        self
    }

    /// Build the test vault.
    pub fn build(self) -> Result<TestVault, StrongroomError> {
        let temp_dir = tempfile::TempDir::new().map_err(StrongroomError::storage)?;

        let mut config = StrongroomConfig::default();
        config.storage.key_file = temp_dir.path().join("key_file.json").display().to_string();
        config.storage.vault_file = temp_dir.path().join("logins.json").display().to_string();
        config.entries.lowercase_identifiers = self.lowercase_identifiers;

        let mut guard = MasterKeyGuard::from_config(&config);
        if let Some(key) = self.master_key {
            guard.submit(&SecretString::from(key))?;
        }

        let store = VaultStore::from_config(&config);
        for (website, username, password) in &self.credentials {
            store.upsert(website, username, password)?;
        }
        tracing::debug!(credentials = self.credentials.len(), "test vault ready");

        Ok(TestVault {
            guard,
            store,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A guard and a store over a temporary data directory.
pub struct TestVault {
    /// Master-key guard for the temporary key file.
    pub guard: MasterKeyGuard,
    /// Store over the temporary vault file.
    pub store: VaultStore,
    /// Configuration pointing at the temporary files.
    pub config: StrongroomConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestVault {
    /// Create a new builder for configuring the test vault.
    pub fn builder() -> TestVaultBuilder {
        TestVaultBuilder::new()
    }

    /// A fresh export gate for a session over this vault.
    pub fn export_gate(&self) -> ExportGate {
        ExportGate::new(&self.store)
    }

    /// A guard that has not seen any key this run, as after a restart.
    pub fn reopened_guard(&self) -> MasterKeyGuard {
        MasterKeyGuard::from_config(&self.config)
    }

    /// Raw contents of the store file.
    pub fn vault_file_contents(&self) -> Option<String> {
        std::fs::read_to_string(self.store.path()).ok()
    }
}
