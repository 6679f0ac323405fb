// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random password generation.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use secrecy::SecretString;
use strongroom_config::model::GeneratorConfig;

/// Generate a password from the configured character mix.
///
/// Picks `letters`, `digits` and `symbols` characters without repetition
/// from their pools, then shuffles them together.
pub fn generate_password(config: &GeneratorConfig) -> SecretString {
    let mut rng = OsRng;
    let mut chars: Vec<char> = Vec::new();

    for (pool, count) in [
        (GeneratorConfig::LETTERS, config.letters),
        (GeneratorConfig::DIGITS, config.digits),
        (GeneratorConfig::SYMBOLS, config.symbols),
    ] {
        let pool: Vec<char> = pool.chars().collect();
        chars.extend(pool.choose_multiple(&mut rng, count));
    }

    chars.shuffle(&mut rng);
    SecretString::from(chars.into_iter().collect::<String>())
}
