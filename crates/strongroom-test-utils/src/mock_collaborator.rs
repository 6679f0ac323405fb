// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted export collaborator for deterministic testing.
//!
//! `ScriptedCollaborator` implements `ExportCollaborator` with queued master
//! key answers and captured notices and export output for assertion in tests.

use std::collections::VecDeque;

use secrecy::SecretString;
use strongroom_core::StrongroomError;
use strongroom_vault::{ExportCollaborator, ExportNotice};

/// A scripted export collaborator.
///
/// - **keys**: answers queued via `push_key()` / `push_cancel()` are returned by
///   `prompt_master_key()` in order; an exhausted queue cancels
/// - **output**: blobs passed to `write_export()` are captured when a
///   destination is configured
pub struct ScriptedCollaborator {
    keys: VecDeque<Option<String>>,
    destination: bool,
    warnings: usize,
    prompts: usize,
    notices: Vec<ExportNotice>,
    written: Vec<String>,
}

impl ScriptedCollaborator {
    /// Create a collaborator with no queued answers that accepts a destination.
    pub fn new() -> Self {
        Self {
            keys: VecDeque::new(),
            destination: true,
            warnings: 0,
            prompts: 0,
            notices: Vec::new(),
            written: Vec::new(),
        }
    }

    /// Queue master key answers in order.
    pub fn with_keys(mut self, keys: &[&str]) -> Self {
        self.keys.extend(keys.iter().map(|k| Some(k.to_string())));
        self
    }

    /// Decline to choose a destination when asked.
    pub fn without_destination(mut self) -> Self {
        self.destination = false;
        self
    }

    /// Queue one master key answer.
    pub fn push_key(&mut self, key: &str) {
        self.keys.push_back(Some(key.to_string()));
    }

    /// Queue a cancelled prompt.
    pub fn push_cancel(&mut self) {
        self.keys.push_back(None);
    }

    /// Number of plaintext-exposure warnings shown.
    pub fn warnings(&self) -> usize {
        self.warnings
    }

    /// Number of master key prompts shown.
    pub fn prompts(&self) -> usize {
        self.prompts
    }

    /// All notices received, in order.
    pub fn notices(&self) -> &[ExportNotice] {
        &self.notices
    }

    /// All export blobs written, in order.
    pub fn written(&self) -> &[String] {
        &self.written
    }
}

impl Default for ScriptedCollaborator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportCollaborator for ScriptedCollaborator {
    fn warn_plaintext_exposure(&mut self) {
        self.warnings += 1;
    }

    fn prompt_master_key(&mut self) -> Result<Option<SecretString>, StrongroomError> {
        self.prompts += 1;
        Ok(self.keys.pop_front().flatten().map(SecretString::from))
    }

    fn notify(&mut self, notice: ExportNotice) {
        self.notices.push(notice);
    }

    fn write_export(&mut self, blob: &str) -> Result<bool, StrongroomError> {
        if self.destination {
            self.written.push(blob.to_string());
        }
        Ok(self.destination)
    }
}
