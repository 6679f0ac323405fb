// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Strongroom credential vault.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Strongroom configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StrongroomConfig {
    /// Where the key record and the credential store live.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// How website and username inputs are normalized.
    #[serde(default)]
    pub entries: EntriesConfig,

    /// Password generator composition.
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Persisted file locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the master key record (JSON object with a single `key` field).
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Path to the credential store (JSON object keyed by encoded website).
    #[serde(default = "default_vault_file")]
    pub vault_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_file: default_key_file(),
            vault_file: default_vault_file(),
        }
    }
}

impl StorageConfig {
    /// The key record path as a [`PathBuf`].
    pub fn key_path(&self) -> PathBuf {
        PathBuf::from(&self.key_file)
    }

    /// The credential store path as a [`PathBuf`].
    pub fn vault_path(&self) -> PathBuf {
        PathBuf::from(&self.vault_file)
    }
}

/// Directory holding both persisted files by default.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("strongroom"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_key_file() -> String {
    default_data_dir().join("key_file.json").display().to_string()
}

fn default_vault_file() -> String {
    default_data_dir().join("logins.json").display().to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// The level as a tracing directive: trimmed and lowercased.
    pub fn normalized_level(&self) -> String {
        self.level.trim().to_ascii_lowercase()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Entry normalization settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntriesConfig {
    /// Fold website and username to lowercase before encoding, so lookups are
    /// case-insensitive. Passwords are never folded.
    #[serde(default = "default_true")]
    pub lowercase_identifiers: bool,
}

impl Default for EntriesConfig {
    fn default() -> Self {
        Self {
            lowercase_identifiers: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Password generator configuration.
///
/// Each class contributes that many distinct characters; the result is shuffled.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Number of distinct ASCII letters (default: 6).
    #[serde(default = "default_letters")]
    pub letters: usize,

    /// Number of distinct decimal digits (default: 2).
    #[serde(default = "default_digits")]
    pub digits: usize,

    /// Number of distinct symbols (default: 2).
    #[serde(default = "default_symbols")]
    pub symbols: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            letters: default_letters(),
            digits: default_digits(),
            symbols: default_symbols(),
        }
    }
}

impl GeneratorConfig {
    /// Letter pool.
    pub const LETTERS: &'static str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    /// Digit pool.
    pub const DIGITS: &'static str = "0123456789";
    /// Symbol pool.
    pub const SYMBOLS: &'static str = "!#$%&()*+";

    /// Total length of a generated password, or `None` if it overflows `usize`.
    pub fn length(&self) -> Option<usize> {
        self.letters
            .checked_add(self.digits)
            .and_then(|n| n.checked_add(self.symbols))
    }
}

fn default_letters() -> usize {
    6
}

fn default_digits() -> usize {
    2
}

fn default_symbols() -> usize {
    2
}
