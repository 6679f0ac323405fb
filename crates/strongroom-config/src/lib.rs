// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Strongroom credential vault.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostic rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use strongroom_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("vault file: {}", config.storage.vault_file);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::StrongroomConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// On a Figment error, the TOML sources are re-read so diagnostics can point
/// at the offending line.
pub fn load_and_validate() -> Result<StrongroomConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from a specific TOML file (plus env vars) and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<StrongroomConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<StrongroomConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(loader::CONFIG_FILE_NAME));
    }
    if let Some(user) = loader::user_config_path() {
        candidates.push(user);
    }
    candidates.push(std::path::PathBuf::from(loader::SYSTEM_CONFIG_PATH));

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
