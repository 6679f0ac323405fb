// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the vault crates and the binary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A plaintext input field, used to report which value failed a blank check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Website identifier of a credential.
    Website,
    /// Username of a credential.
    Username,
    /// Password of a credential.
    Password,
}
