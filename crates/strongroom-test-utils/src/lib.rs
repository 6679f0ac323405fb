// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Strongroom integration tests.
//!
//! Provides a throwaway vault and a scripted export collaborator for fast,
//! deterministic tests without a terminal.
//!
//! # Components
//!
//! - [`TestVault`] - Guard and store over a temporary data directory
//! - [`ScriptedCollaborator`] - Export collaborator with queued answers and captured output

pub mod harness;
pub mod mock_collaborator;

pub use harness::TestVault;
pub use mock_collaborator::ScriptedCollaborator;
