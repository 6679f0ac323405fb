// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master-key gatekeeping.
//!
//! A single encoded key record gates every privileged operation. The first
//! non-empty key ever submitted becomes the record; it is never rotated.
//!
//! Comparison is plain equality on encoded values and retries are unlimited.
//! Both are known limitations carried over unchanged.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strongroom_core::StrongroomError;
use tracing::{debug, info, warn};

use crate::codec::{self, EncodedValue};
use crate::persist;

/// Lifecycle of the guard within one program run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No key record is persisted.
    Uninitialized,
    /// A key record exists; nothing has been verified this run.
    Initialized,
    /// A key was verified (or created) this run.
    Unlocked,
}

/// Successful result of [`MasterKeyGuard::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No record existed; the submitted key is now the master key.
    Created,
    /// The submitted key matches the persisted record.
    Unlocked,
}

/// On-disk shape of the key file: `{"key": "<encoded>"}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct MasterKeyRecord {
    key: EncodedValue,
}

/// Validates submitted master keys against the persisted key record.
///
/// Debug output omits the record contents.
pub struct MasterKeyGuard {
    path: PathBuf,
    unlocked: bool,
}

impl std::fmt::Debug for MasterKeyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKeyGuard")
            .field("path", &self.path)
            .field("unlocked", &self.unlocked)
            .finish()
    }
}

impl MasterKeyGuard {
    /// Guard backed by the key file at `path`. Nothing is read until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            unlocked: false,
        }
    }

    /// Guard backed by the configured `storage.key_file`.
    pub fn from_config(config: &strongroom_config::StrongroomConfig) -> Self {
        Self::new(config.storage.key_path())
    }

    /// Path of the key record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if no key record has been persisted yet.
    pub fn is_first_use(&self) -> bool {
        !self.path.exists()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GuardState {
        if self.unlocked {
            GuardState::Unlocked
        } else if self.is_first_use() {
            GuardState::Uninitialized
        } else {
            GuardState::Initialized
        }
    }

    /// Submit a key to open the session.
    ///
    /// Creates the record on first use. Otherwise the encoded submission must
    /// equal the persisted record.
    pub fn submit(&mut self, plain_key: &SecretString) -> Result<SubmitOutcome, StrongroomError> {
        let submitted = encode_key(plain_key)?;

        let outcome = match self.load_record()? {
            None => {
                persist::write_json_atomic(&self.path, &MasterKeyRecord { key: submitted })?;
                info!(path = %self.path.display(), "master key record created");
                SubmitOutcome::Created
            }
            Some(record) if record.key == submitted => {
                debug!("master key accepted");
                SubmitOutcome::Unlocked
            }
            Some(_) => {
                warn!("master key rejected");
                return Err(StrongroomError::KeyMismatch);
            }
        };

        self.unlocked = true;
        Ok(outcome)
    }

    /// Re-check a key for a privileged operation such as export.
    ///
    /// Never creates a record and does not change the guard state.
    pub fn validate(&self, plain_key: &SecretString) -> Result<(), StrongroomError> {
        let submitted = encode_key(plain_key)?;

        match self.load_record()? {
            None => Err(StrongroomError::NoVault),
            Some(record) if record.key == submitted => Ok(()),
            Some(_) => {
                warn!("master key rejected during validation");
                Err(StrongroomError::KeyMismatch)
            }
        }
    }

    fn load_record(&self) -> Result<Option<MasterKeyRecord>, StrongroomError> {
        persist::read_json(&self.path)
    }
}

fn encode_key(plain_key: &SecretString) -> Result<EncodedValue, StrongroomError> {
    let plain = plain_key.expose_secret();
    if plain.is_empty() {
        return Err(StrongroomError::EmptyKey);
    }
    Ok(codec::encode(plain))
}
