// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Strongroom credential vault.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Field;

/// The primary error type used across the codec, guard, store and export pipeline.
///
/// Every variant except the storage ones is recoverable by the user and is meant
/// to be surfaced as a message. Lookup misses are not errors; see
/// `LookupOutcome::NotFound` in `strongroom-vault`.
#[derive(Debug, Error)]
pub enum StrongroomError {
    /// A master key submission was empty.
    #[error("a master key is required to continue")]
    EmptyKey,

    /// The submitted master key does not match the persisted key record.
    #[error("the master key does not match the one stored in this vault")]
    KeyMismatch,

    /// No master key record exists yet, so there is nothing to validate against.
    #[error("no vault has been set up yet -- submit a master key first")]
    NoVault,

    /// The credential store has not been created or holds no websites.
    #[error("the vault is empty -- save some details first")]
    EmptyVault,

    /// A required plaintext input was empty.
    #[error("{field} must not be blank")]
    BlankField { field: Field },

    /// A persisted token could not be decoded back to a character.
    #[error("cannot decode token `{token}`: {reason}")]
    Decode { token: String, reason: String },

    /// A persisted file exists but its contents are unusable.
    #[error("storage file {} is corrupt: {reason}", .path.display())]
    StorageCorruption { path: PathBuf, reason: String },

    /// I/O failure while reading or writing a persisted file.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Export was requested after it was disabled for this session.
    #[error("export is disabled until the vault changes")]
    ExportDisabled,

    /// Configuration or environment problems (missing key source, bad paths).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StrongroomError {
    /// Wrap an I/O error as [`StrongroomError::Storage`].
    pub fn storage(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage {
            source: Box::new(source),
        }
    }

    /// True for errors that mean the persisted data cannot be trusted.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::StorageCorruption { .. })
    }
}
