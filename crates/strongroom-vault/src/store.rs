// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent website → credentials store.
//!
//! The store file maps an encoded website to two index-aligned sequences of
//! encoded usernames and encoded passwords:
//!
//! ```json
//! {
//!     "<encoded website>": {
//!         "username": ["<encoded>", "..."],
//!         "password": ["<encoded>", "..."]
//!     }
//! }
//! ```
//!
//! Every operation loads the whole file; every mutation writes the whole file
//! back. A username appears at most once per website. Websites keep the order
//! they have in the file, and new websites are added at the end.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strongroom_core::{Field, StrongroomError};
use tracing::{debug, info};
use zeroize::Zeroize;

use crate::codec::{self, EncodedValue};
use crate::persist;

/// Result of a save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The website was new; it now holds one credential.
    Created,
    /// A new username was appended to an existing website.
    Appended,
    /// The password of an existing username was replaced (confirmed overwrite).
    Overwritten,
    /// The username already exists for this website. Nothing was written;
    /// call [`VaultStore::confirm_overwrite`] to replace the password.
    OverwriteConfirmRequired,
}

/// Result of a lookup. A miss is a normal outcome, not an error.
#[derive(Debug)]
pub enum LookupOutcome {
    /// The decoded password for the requested website and username.
    Found { password: SecretString },
    /// No credential is stored for that website and username.
    NotFound,
}

/// Encoded credentials for one website, as persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct VaultEntry {
    #[serde(rename = "username")]
    usernames: Vec<EncodedValue>,
    #[serde(rename = "password")]
    passwords: Vec<EncodedValue>,
}

impl VaultEntry {
    fn single(username: EncodedValue, password: EncodedValue) -> Self {
        Self {
            usernames: vec![username],
            passwords: vec![password],
        }
    }

    fn position(&self, username: &EncodedValue) -> Option<usize> {
        self.usernames.iter().position(|u| u == username)
    }

    fn push(&mut self, username: EncodedValue, password: EncodedValue) {
        self.usernames.push(username);
        self.passwords.push(password);
    }
}

/// The persisted map, in file order.
#[derive(Debug, Default)]
struct StoredVault(Vec<(EncodedValue, VaultEntry)>);

impl StoredVault {
    fn get(&self, site: &EncodedValue) -> Option<&VaultEntry> {
        self.0.iter().find(|(s, _)| s == site).map(|(_, entry)| entry)
    }

    fn get_mut(&mut self, site: &EncodedValue) -> Option<&mut VaultEntry> {
        self.0
            .iter_mut()
            .find(|(s, _)| s == site)
            .map(|(_, entry)| entry)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = &(EncodedValue, VaultEntry)> {
        self.0.iter()
    }
}

impl Serialize for StoredVault {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(site, entry)| (site, entry)))
    }
}

impl<'de> Deserialize<'de> for StoredVault {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = StoredVault;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of encoded websites to credentials")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut vault = StoredVault(Vec::with_capacity(map.size_hint().unwrap_or(0)));
                while let Some((site, entry)) = map.next_entry::<EncodedValue, VaultEntry>()? {
                    if vault.get(&site).is_some() {
                        return Err(serde::de::Error::custom("website listed twice"));
                    }
                    vault.0.push((site, entry));
                }
                Ok(vault)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Decoded credentials of one website.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PlainSite {
    /// Decoded website identifier.
    pub website: String,
    /// Decoded usernames, index-aligned with `passwords`.
    pub usernames: Vec<String>,
    /// Decoded passwords, index-aligned with `usernames`.
    pub passwords: Vec<String>,
}

impl std::fmt::Debug for PlainSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlainSite")
            .field("website", &self.website)
            .field("usernames", &self.usernames)
            .field("passwords", &"[REDACTED]")
            .finish()
    }
}

impl Drop for PlainSite {
    fn drop(&mut self) {
        self.passwords.zeroize();
    }
}

/// The fully decoded vault, in stored order. Used only for export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainVault {
    /// Websites in the order they are held by the store.
    pub sites: Vec<PlainSite>,
}

impl PlainVault {
    /// Number of websites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// True if no website is stored.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Every `(website, username, password)` triple, website by website.
    pub fn credentials(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.sites.iter().flat_map(|site| {
            site.usernames
                .iter()
                .zip(&site.passwords)
                .map(move |(u, p)| (site.website.as_str(), u.as_str(), p.as_str()))
        })
    }
}

/// The credential store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct VaultStore {
    path: PathBuf,
    lowercase_identifiers: bool,
}

impl VaultStore {
    /// Store backed by `path`, matching websites and usernames exactly.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lowercase_identifiers: false,
        }
    }

    /// Store backed by the configured `storage.vault_file`, honoring
    /// `entries.lowercase_identifiers`.
    pub fn from_config(config: &strongroom_config::StrongroomConfig) -> Self {
        Self::new(config.storage.vault_path())
            .with_lowercase_identifiers(config.entries.lowercase_identifiers)
    }

    /// Fold websites and usernames to lowercase before encoding.
    pub fn with_lowercase_identifiers(mut self, enabled: bool) -> Self {
        self.lowercase_identifiers = enabled;
        self
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once anything has been saved.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Save a credential.
    ///
    /// A duplicate username is never overwritten here; the caller gets
    /// [`UpsertOutcome::OverwriteConfirmRequired`] and must confirm.
    pub fn upsert(
        &self,
        website: &str,
        username: &str,
        password: &str,
    ) -> Result<UpsertOutcome, StrongroomError> {
        self.save(website, username, password, false)
    }

    /// Save a credential, replacing the password if the username already
    /// exists for the website. This is the confirmed branch of [`Self::upsert`].
    pub fn confirm_overwrite(
        &self,
        website: &str,
        username: &str,
        password: &str,
    ) -> Result<UpsertOutcome, StrongroomError> {
        self.save(website, username, password, true)
    }

    /// Find the password stored for `website` and `username`.
    ///
    /// Only the matched password is decoded.
    pub fn lookup(&self, website: &str, username: &str) -> Result<LookupOutcome, StrongroomError> {
        require_filled(&[(Field::Website, website), (Field::Username, username)])?;
        let website = self.fold(website);
        let username = self.fold(username);
        let [site, user] = codec::encode_many([&*website, &*username]);

        let Some(vault) = self.load()? else {
            debug!("lookup on an empty vault");
            return Ok(LookupOutcome::NotFound);
        };

        let found = vault
            .get(&site)
            .and_then(|entry| entry.position(&user).map(|i| &entry.passwords[i]));

        match found {
            Some(encoded) => Ok(LookupOutcome::Found {
                password: SecretString::from(codec::decode(encoded)?),
            }),
            None => Ok(LookupOutcome::NotFound),
        }
    }

    /// Decode the whole store.
    ///
    /// Fails with [`StrongroomError::EmptyVault`] if nothing was ever saved.
    pub fn load_all(&self) -> Result<PlainVault, StrongroomError> {
        let vault = self.load()?.ok_or(StrongroomError::EmptyVault)?;
        if vault.is_empty() {
            return Err(StrongroomError::EmptyVault);
        }

        let sites = vault
            .iter()
            .map(|(site, entry)| {
                Ok(PlainSite {
                    website: codec::decode(site)?,
                    usernames: codec::decode_many(&entry.usernames)?,
                    passwords: codec::decode_many(&entry.passwords)?,
                })
            })
            .collect::<Result<Vec<_>, StrongroomError>>()?;

        debug!(sites = sites.len(), "vault decoded");
        Ok(PlainVault { sites })
    }

    fn save(
        &self,
        website: &str,
        username: &str,
        password: &str,
        overwrite: bool,
    ) -> Result<UpsertOutcome, StrongroomError> {
        require_filled(&[
            (Field::Website, website),
            (Field::Username, username),
            (Field::Password, password),
        ])?;
        let website = self.fold(website);
        let username = self.fold(username);
        let [site, user, pass] = codec::encode_many([&*website, &*username, password]);

        let mut vault = self.load()?.unwrap_or_default();

        let outcome = match vault.get_mut(&site) {
            None => {
                vault.0.push((site, VaultEntry::single(user, pass)));
                UpsertOutcome::Created
            }
            Some(entry) => match entry.position(&user) {
                Some(i) if overwrite => {
                    entry.passwords[i] = pass;
                    UpsertOutcome::Overwritten
                }
                Some(_) => return Ok(UpsertOutcome::OverwriteConfirmRequired),
                None => {
                    entry.push(user, pass);
                    UpsertOutcome::Appended
                }
            },
        };

        persist::write_json_atomic(&self.path, &vault)?;
        info!(outcome = ?outcome, sites = vault.len(), "credential saved");
        Ok(outcome)
    }

    fn load(&self) -> Result<Option<StoredVault>, StrongroomError> {
        let Some(vault) = persist::read_json::<StoredVault>(&self.path)? else {
            return Ok(None);
        };

        for (_, entry) in vault.iter() {
            if entry.usernames.len() != entry.passwords.len() {
                return Err(StrongroomError::StorageCorruption {
                    path: self.path.clone(),
                    reason: format!(
                        "entry has {} usernames but {} passwords",
                        entry.usernames.len(),
                        entry.passwords.len()
                    ),
                });
            }
        }
        Ok(Some(vault))
    }

    fn fold<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        if self.lowercase_identifiers {
            Cow::Owned(identifier.to_lowercase())
        } else {
            Cow::Borrowed(identifier)
        }
    }
}

/// Reject empty plaintext inputs, reporting the first blank field.
fn require_filled(fields: &[(Field, &str)]) -> Result<(), StrongroomError> {
    match fields.iter().find(|(_, value)| value.is_empty()) {
        Some((field, _)) => Err(StrongroomError::BlankField { field: *field }),
        None => Ok(()),
    }
}
