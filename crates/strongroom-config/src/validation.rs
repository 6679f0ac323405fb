// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty paths, distinct storage files, and generator counts that
//! fit their character pools.

use crate::diagnostic::ConfigError;
use crate::model::{GeneratorConfig, StrongroomConfig};

/// Log levels accepted by `logging.level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &StrongroomConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let key_file = config.storage.key_file.trim();
    let vault_file = config.storage.vault_file.trim();

    if key_file.is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.key_file must not be empty".to_string(),
        });
    }

    if vault_file.is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.vault_file must not be empty".to_string(),
        });
    }

    // Both records are owned by different components and rewritten whole.
    if !key_file.is_empty() && key_file == vault_file {
        errors.push(ConfigError::Validation {
            message: format!(
                "storage.key_file and storage.vault_file must differ, both are `{key_file}`"
            ),
        });
    }

    let level = config.logging.normalized_level();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    validate_generator(&config.generator, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_generator(generator: &GeneratorConfig, errors: &mut Vec<ConfigError>) {
    let pools = [
        ("letters", generator.letters, GeneratorConfig::LETTERS),
        ("digits", generator.digits, GeneratorConfig::DIGITS),
        ("symbols", generator.symbols, GeneratorConfig::SYMBOLS),
    ];
    for (name, count, pool) in pools {
        let available = pool.chars().count();
        if count > available {
            errors.push(ConfigError::Validation {
                message: format!(
                    "generator.{name} must be at most {available} (characters are not repeated), got {count}"
                ),
            });
        }
    }

    match generator.length() {
        Some(0) => errors.push(ConfigError::Validation {
            message: "generator must produce at least one character".to_string(),
        }),
        Some(_) => {}
        None => errors.push(ConfigError::Validation {
            message: "generator counts add up to more than a password can hold".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_with_every_error_reports_them_all() {
        let toml_str = r#"
[storage]
key_file = ""
vault_file = ""

[logging]
level = "loud"

[generator]
letters = 0
digits = 0
symbols = 0
"#;
        let config: StrongroomConfig = toml::from_str(toml_str).unwrap();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3, "expected several errors, got {errors:?}");
    }

    #[test]
    fn default_config_validates() {
        let config = StrongroomConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_vault_file_fails_validation() {
        let mut config = StrongroomConfig::default();
        config.storage.vault_file = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("vault_file"))));
    }

    #[test]
    fn shared_storage_path_fails_validation() {
        let mut config = StrongroomConfig::default();
        config.storage.key_file = "/tmp/same.json".to_string();
        config.storage.vault_file = "/tmp/same.json".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("must differ"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = StrongroomConfig::default();
        config.logging.level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("logging.level"))));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = StrongroomConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn accepted_log_level_is_normalized_for_tracing() {
        let mut config = StrongroomConfig::default();
        config.logging.level = " Info\t".to_string();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.logging.normalized_level(), "info");
    }

    #[test]
    fn oversized_generator_pool_fails_validation() {
        let mut config = StrongroomConfig::default();
        config.generator.digits = 11;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("generator.digits"))));
    }

    #[test]
    fn zero_length_generator_fails_validation() {
        let mut config = StrongroomConfig::default();
        config.generator.letters = 0;
        config.generator.digits = 0;
        config.generator.symbols = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn overflowing_generator_counts_are_reported() {
        let mut config = StrongroomConfig::default();
        config.generator.letters = usize::MAX;
        config.generator.digits = usize::MAX;
        config.generator.symbols = usize::MAX;
        assert_eq!(config.generator.length(), None);

        let errors = validate_config(&config).unwrap_err();
        // One per oversized pool plus the total.
        assert_eq!(errors.len(), 4);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("add up"))));
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = StrongroomConfig::default();
        config.storage.key_file = String::new();
        config.storage.vault_file = String::new();
        config.logging.level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
