// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./strongroom.toml` > `~/.config/strongroom/strongroom.toml`
//! > `/etc/strongroom/strongroom.toml`, with environment variable overrides via
//! the `STRONGROOM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::StrongroomConfig;

/// File name looked up in each configuration directory.
pub const CONFIG_FILE_NAME: &str = "strongroom.toml";

/// System-wide configuration path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/strongroom/strongroom.toml";

/// Env var names under the `STRONGROOM_` prefix that are not configuration keys.
///
/// `STRONGROOM_MASTER_KEY` feeds the master-key prompt and must not trip
/// `deny_unknown_fields`.
const IGNORED_ENV_KEYS: &[&str] = &["master_key"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/strongroom/strongroom.toml` (system-wide)
/// 3. `~/.config/strongroom/strongroom.toml` (user XDG config)
/// 4. `./strongroom.toml` (local directory)
/// 5. `STRONGROOM_*` environment variables
pub fn load_config() -> Result<StrongroomConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<StrongroomConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StrongroomConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<StrongroomConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StrongroomConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(StrongroomConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// `~/.config/strongroom/strongroom.toml`, if a config directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("strongroom").join(CONFIG_FILE_NAME))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because field names contain
/// underscores: `STRONGROOM_STORAGE_VAULT_FILE` must map to `storage.vault_file`,
/// not `storage.vault.file`.
fn env_provider() -> Env {
    Env::prefixed("STRONGROOM_")
        .ignore(IGNORED_ENV_KEYS)
        .map(|key| {
            let mapped = key
                .as_str()
                .replacen("storage_", "storage.", 1)
                .replacen("logging_", "logging.", 1)
                .replacen("entries_", "entries.", 1)
                .replacen("generator_", "generator.", 1);
            mapped.into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_provider_maps_sections_and_skips_master_key() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("STRONGROOM_STORAGE_VAULT_FILE", "/tmp/jail/logins.json");
            jail.set_env("STRONGROOM_LOGGING_LEVEL", "debug");
            jail.set_env("STRONGROOM_MASTER_KEY", "not-a-config-key");

            let config: StrongroomConfig = Figment::new()
                .merge(Serialized::defaults(StrongroomConfig::default()))
                .merge(env_provider())
                .extract()?;

            assert_eq!(config.storage.vault_file, "/tmp/jail/logins.json");
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn env_provider_maps_generator_counts() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("STRONGROOM_GENERATOR_LETTERS", "10");
            jail.set_env("STRONGROOM_ENTRIES_LOWERCASE_IDENTIFIERS", "false");

            let config: StrongroomConfig = Figment::new()
                .merge(Serialized::defaults(StrongroomConfig::default()))
                .merge(env_provider())
                .extract()?;

            assert_eq!(config.generator.letters, 10);
            assert!(!config.entries.lowercase_identifiers);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_picked_up_from_working_directory() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                "[storage]\nkey_file = \"jail-key.json\"\n",
            )?;

            let config = load_config()?;
            assert_eq!(config.storage.key_file, "jail-key.json");
            Ok(())
        });
    }
}
