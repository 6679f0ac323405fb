// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Strongroom configuration system.

use strongroom_config::diagnostic::{ConfigError, suggest_key};
use strongroom_config::model::StrongroomConfig;
use strongroom_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[storage]
key_file = "/tmp/strongroom/key_file.json"
vault_file = "/tmp/strongroom/logins.json"

[logging]
level = "debug"

[entries]
lowercase_identifiers = false

[generator]
letters = 8
digits = 3
symbols = 1
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.storage.key_file, "/tmp/strongroom/key_file.json");
    assert_eq!(config.storage.vault_file, "/tmp/strongroom/logins.json");
    assert_eq!(config.logging.level, "debug");
    assert!(!config.entries.lowercase_identifiers);
    assert_eq!(config.generator.letters, 8);
    assert_eq!(config.generator.digits, 3);
    assert_eq!(config.generator.symbols, 1);
    assert_eq!(config.generator.length(), Some(12));
}

/// Unknown field in [storage] section produces an error naming the bad key.
#[test]
fn unknown_field_in_storage_produces_error() {
    let toml = r#"
[storage]
vualt_file = "x.json"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("vualt_file"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown top-level section is rejected too.
#[test]
fn unknown_section_produces_error() {
    let err = load_config_from_str("[clipboard]\nclear_after = 10\n")
        .expect_err("unknown section should be rejected");
    assert!(format!("{err}").contains("clipboard"));
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert!(config.storage.key_file.ends_with("key_file.json"));
    assert!(config.storage.vault_file.ends_with("logins.json"));
    assert_eq!(config.logging.level, "info");
    assert!(config.entries.lowercase_identifiers);
    assert_eq!(config.generator.letters, 6);
    assert_eq!(config.generator.digits, 2);
    assert_eq!(config.generator.symbols, 2);
}

/// Default storage files live side by side in the same data directory.
#[test]
fn default_storage_files_share_a_directory() {
    let config = StrongroomConfig::default();
    assert_eq!(
        config.storage.key_path().parent(),
        config.storage.vault_path().parent()
    );
    assert_ne!(config.storage.key_path(), config.storage.vault_path());
}

/// Partial sections keep defaults for the fields they omit.
#[test]
fn partial_section_keeps_other_defaults() {
    let config = load_config_from_str("[generator]\nsymbols = 4\n").expect("should parse");
    assert_eq!(config.generator.symbols, 4);
    assert_eq!(config.generator.letters, 6);
}

/// Type mismatches are reported as InvalidType diagnostics.
#[test]
fn wrong_type_becomes_invalid_type_diagnostic() {
    let errors = load_and_validate_str("[generator]\nletters = \"six\"\n")
        .expect_err("string for usize should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("letters"))),
        "expected an InvalidType error, got: {errors:?}"
    );
}

/// Validation runs after a successful parse and reports semantic problems.
#[test]
fn validation_runs_after_parse() {
    let errors = load_and_validate_str("[logging]\nlevel = \"chatty\"\n")
        .expect_err("unknown log level should fail validation");
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

/// Huge generator counts are validation errors, never an arithmetic overflow.
#[test]
fn huge_generator_counts_fail_validation() {
    let toml = "[generator]\nletters = 9223372036854775807\ndigits = 9223372036854775807\nsymbols = 9223372036854775807\n";
    let errors = load_and_validate_str(toml).expect_err("huge counts should fail validation");
    assert!(
        errors
            .iter()
            .all(|e| matches!(e, ConfigError::Validation { .. })),
        "expected only validation errors, got: {errors:?}"
    );
    assert!(errors.iter().any(|e| e.to_string().contains("generator.letters")));
}

/// A config file on disk is loaded through the path entry point.
#[test]
fn load_from_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strongroom.toml");
    std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

    let config = load_and_validate_path(&path).expect("file config should load");
    assert_eq!(config.logging.level, "warn");
}

/// Unknown keys in a file on disk carry a source span pointing at the key.
#[test]
fn unknown_key_in_file_has_span() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strongroom.toml");
    std::fs::write(&path, "[entries]\nlowercase_identifers = true\n").unwrap();

    let errors = load_and_validate_path(&path).expect_err("typo should be rejected");
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "lowercase_identifers");
            assert_eq!(suggestion.as_deref(), Some("lowercase_identifiers"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn suggest_key_is_exported() {
    assert_eq!(
        suggest_key("levl", &["level"]),
        Some("level".to_string())
    );
}
