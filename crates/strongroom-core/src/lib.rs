// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Strongroom credential vault.
//!
//! Holds the error type and the few types shared by every other crate in the
//! workspace.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::StrongroomError;
pub use types::Field;
