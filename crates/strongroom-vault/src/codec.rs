// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reversible per-character offset transform.
//!
//! Every character is replaced by its code point plus [`SCRAMBLER`], written in
//! decimal, and the tokens are joined with single spaces. This obscures values
//! at rest; it is not encryption.

use std::fmt;

use serde::{Deserialize, Serialize};
use strongroom_core::StrongroomError;

/// Fixed offset added to every code point.
pub const SCRAMBLER: u32 = 5;

/// The encoded form of exactly one plaintext string.
///
/// Only this module knows how to produce or read the inner text. Equality is
/// exact string equality, which is what key comparison and lookups rely on.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedValue(String);

impl EncodedValue {
    /// The persisted text, e.g. `"104 110"` for `"ci"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EncodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodedValue").field(&"[REDACTED]").finish()
    }
}

/// Encode one plaintext string.
pub fn encode(plain: &str) -> EncodedValue {
    let tokens: Vec<String> = plain
        .chars()
        .map(|c| (u32::from(c) + SCRAMBLER).to_string())
        .collect();
    EncodedValue(tokens.join(" "))
}

/// Decode one encoded value.
///
/// Fails with [`StrongroomError::Decode`] on the first token that is not a
/// number or does not map back to a Unicode scalar value. Nothing is skipped:
/// a bad token means the persisted data is corrupt.
pub fn decode(encoded: &EncodedValue) -> Result<String, StrongroomError> {
    encoded.0.split_whitespace().map(decode_token).collect()
}

fn decode_token(token: &str) -> Result<char, StrongroomError> {
    let shifted: u32 = token.parse().map_err(|e| StrongroomError::Decode {
        token: token.to_string(),
        reason: format!("not a code point number: {e}"),
    })?;
    let code = shifted
        .checked_sub(SCRAMBLER)
        .ok_or_else(|| StrongroomError::Decode {
            token: token.to_string(),
            reason: format!("value is below the offset {SCRAMBLER}"),
        })?;
    char::from_u32(code).ok_or_else(|| StrongroomError::Decode {
        token: token.to_string(),
        reason: format!("{code:#x} is not a Unicode scalar value"),
    })
}

/// Encode several strings in one pass, preserving order.
///
/// Used so that website, username and password are encoded together.
pub fn encode_many<const N: usize>(plain: [&str; N]) -> [EncodedValue; N] {
    plain.map(encode)
}

/// Decode several values, preserving order. Stops at the first failure.
pub fn decode_many<'a, I>(encoded: I) -> Result<Vec<String>, StrongroomError>
where
    I: IntoIterator<Item = &'a EncodedValue>,
{
    encoded.into_iter().map(decode).collect()
}
