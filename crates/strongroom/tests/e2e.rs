// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the vault pipeline.
//!
//! Each test creates an isolated TestVault with its own temporary data
//! directory. Tests are independent and order-insensitive.

use secrecy::{ExposeSecret, SecretString};
use strongroom_core::StrongroomError;
use strongroom_test_utils::{ScriptedCollaborator, TestVault};
use strongroom_vault::{
    ExportNotice, ExportOutcome, GuardState, LookupOutcome, SubmitOutcome, UpsertOutcome,
    run_export,
};

fn key(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

fn found(vault: &TestVault, website: &str, username: &str) -> Option<String> {
    match vault.store.lookup(website, username).unwrap() {
        LookupOutcome::Found { password } => Some(password.expose_secret().to_string()),
        LookupOutcome::NotFound => None,
    }
}

// ---- Test 1: First run and unlock ----

#[test]
fn test_first_run_creates_key_and_restart_unlocks() {
    let vault = TestVault::builder().build().unwrap();
    let mut guard = vault.reopened_guard();
    assert_eq!(guard.state(), GuardState::Uninitialized);
    assert_eq!(guard.submit(&key("master")).unwrap(), SubmitOutcome::Created);

    let mut restarted = vault.reopened_guard();
    assert_eq!(restarted.state(), GuardState::Initialized);
    assert!(matches!(
        restarted.submit(&key("wrong")).unwrap_err(),
        StrongroomError::KeyMismatch
    ));
    assert_eq!(
        restarted.submit(&key("master")).unwrap(),
        SubmitOutcome::Unlocked
    );
}

// ---- Test 2: Save and find ----

#[test]
fn test_saved_credentials_are_found_case_insensitively() {
    let vault = TestVault::builder()
        .with_master_key("master")
        .with_credential("Example.com", "Alice", "S3cret!")
        .build()
        .unwrap();

    assert_eq!(
        found(&vault, "example.com", "alice").as_deref(),
        Some("S3cret!")
    );
    assert!(found(&vault, "example.com", "bob").is_none());
}

#[test]
fn test_case_sensitive_vault_keeps_identifiers_apart() {
    let vault = TestVault::builder()
        .with_lowercase_identifiers(false)
        .with_credential("Example.com", "Alice", "one")
        .build()
        .unwrap();

    assert_eq!(
        vault.store.upsert("example.com", "Alice", "two").unwrap(),
        UpsertOutcome::Created
    );
    assert_eq!(found(&vault, "Example.com", "Alice").as_deref(), Some("one"));
    assert_eq!(found(&vault, "example.com", "Alice").as_deref(), Some("two"));
}

#[test]
fn test_vault_file_never_holds_plaintext() {
    let vault = TestVault::builder()
        .with_credential("mail.example", "carol", "hunter2")
        .build()
        .unwrap();

    let contents = vault.vault_file_contents().unwrap();
    assert!(!contents.contains("carol"));
    assert!(!contents.contains("hunter2"));
    assert!(contents.starts_with("{\n    \""));
}

// ---- Test 3: Export protocol ----

#[test]
fn test_export_writes_every_credential() {
    let vault = TestVault::builder()
        .with_master_key("master")
        .with_credential("a.com", "bob", "pw1")
        .with_credential("a.com", "alice", "pw2")
        .with_credential("b.com", "bob", "pw3")
        .build()
        .unwrap();

    let mut collaborator = ScriptedCollaborator::new().with_keys(&["master"]);
    let outcome = run_export(&vault.guard, &vault.store, &mut collaborator).unwrap();

    assert_eq!(outcome, ExportOutcome::Written);
    assert_eq!(collaborator.warnings(), 1);
    let blob = &collaborator.written()[0];
    assert_eq!(blob.lines().count(), 3);
    assert!(blob.contains("a.com | bob | pw1 |\n"));
    assert!(blob.contains("a.com | alice | pw2 |\n"));
    assert!(blob.contains("b.com | bob | pw3 |\n"));
    assert!(blob.find("a.com | bob").unwrap() < blob.find("a.com | alice").unwrap());
}

#[test]
fn test_export_empty_key_reprompts() {
    let vault = TestVault::builder()
        .with_master_key("master")
        .with_credential("a.com", "bob", "pw1")
        .build()
        .unwrap();

    let mut collaborator = ScriptedCollaborator::new().with_keys(&["", "master"]);
    let outcome = run_export(&vault.guard, &vault.store, &mut collaborator).unwrap();

    assert_eq!(outcome, ExportOutcome::Written);
    assert_eq!(collaborator.prompts(), 2);
    assert_eq!(
        collaborator.notices(),
        &[ExportNotice::KeyRequired, ExportNotice::Completed]
    );
}

#[test]
fn test_export_mismatch_then_cancel_writes_nothing() {
    let vault = TestVault::builder()
        .with_master_key("master")
        .with_credential("a.com", "bob", "pw1")
        .build()
        .unwrap();

    let mut collaborator = ScriptedCollaborator::new();
    collaborator.push_key("nope");
    collaborator.push_cancel();
    let outcome = run_export(&vault.guard, &vault.store, &mut collaborator).unwrap();

    assert_eq!(outcome, ExportOutcome::Cancelled);
    assert_eq!(collaborator.notices(), &[ExportNotice::KeyMismatch]);
    assert!(collaborator.written().is_empty());
}

#[test]
fn test_export_without_destination_is_clean() {
    let vault = TestVault::builder()
        .with_master_key("master")
        .with_credential("a.com", "bob", "pw1")
        .build()
        .unwrap();

    let mut collaborator = ScriptedCollaborator::new()
        .with_keys(&["master"])
        .without_destination();
    let outcome = run_export(&vault.guard, &vault.store, &mut collaborator).unwrap();

    assert_eq!(outcome, ExportOutcome::NoDestination);
    assert!(collaborator.notices().is_empty());
}

#[test]
fn test_export_of_empty_vault_fails() {
    let vault = TestVault::builder()
        .with_master_key("master")
        .build()
        .unwrap();

    let mut collaborator = ScriptedCollaborator::new().with_keys(&["master"]);
    let err = run_export(&vault.guard, &vault.store, &mut collaborator).unwrap_err();
    assert!(matches!(err, StrongroomError::EmptyVault));
}

// ---- Test 4: One-shot export gate ----

#[test]
fn test_export_gate_is_one_shot_per_change() {
    let vault = TestVault::builder()
        .with_master_key("master")
        .with_credential("a.com", "bob", "pw1")
        .build()
        .unwrap();

    let mut gate = vault.export_gate();
    let mut collaborator = ScriptedCollaborator::new().with_keys(&["master", "master"]);

    assert_eq!(
        gate.run(&vault.guard, &vault.store, &mut collaborator).unwrap(),
        ExportOutcome::Written
    );
    assert!(matches!(
        gate.run(&vault.guard, &vault.store, &mut collaborator)
            .unwrap_err(),
        StrongroomError::ExportDisabled
    ));
    assert_eq!(collaborator.warnings(), 1);

    vault.store.upsert("c.com", "dave", "pw4").unwrap();
    gate.note_store_changed();
    assert_eq!(
        gate.run(&vault.guard, &vault.store, &mut collaborator).unwrap(),
        ExportOutcome::Written
    );
    assert_eq!(collaborator.written().len(), 2);
    assert!(collaborator.written()[1].contains("c.com | dave | pw4 |"));
}

#[test]
fn test_export_gate_closed_for_new_vault() {
    let vault = TestVault::builder()
        .with_master_key("master")
        .build()
        .unwrap();
    assert!(!vault.export_gate().is_enabled());
}

// ---- Test 5: Corruption surfaces ----

#[test]
fn test_tampered_vault_file_is_reported() {
    let vault = TestVault::builder()
        .with_credential("a.com", "bob", "pw1")
        .build()
        .unwrap();

    std::fs::write(vault.store.path(), "[1, 2, 3]").unwrap();
    let err = vault.store.load_all().unwrap_err();
    assert!(err.is_corruption());
}
