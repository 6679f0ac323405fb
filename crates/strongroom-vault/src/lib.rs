// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offset-encoded credential vault for Strongroom.
//!
//! Values at rest are obscured with a reversible per-character offset
//! transform ([`codec`]). A master key record gates access ([`guard`]),
//! credentials live in a website-keyed JSON store ([`store`]) and the whole
//! vault can be exported in plain text ([`export`]).

pub mod codec;
pub mod export;
pub mod generator;
pub mod guard;
pub mod persist;
pub mod prompt;
pub mod store;

pub use codec::{EncodedValue, SCRAMBLER, decode, decode_many, encode, encode_many};
pub use export::{
    ExportCollaborator, ExportGate, ExportNotice, ExportOutcome, render_export, run_export,
};
pub use generator::generate_password;
pub use guard::{GuardState, MasterKeyGuard, SubmitOutcome};
pub use prompt::{MASTER_KEY_ENV_VAR, get_master_key};
pub use store::{LookupOutcome, PlainSite, PlainVault, UpsertOutcome, VaultStore};
