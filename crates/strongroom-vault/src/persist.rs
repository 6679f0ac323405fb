// SPDX-FileCopyrightText: 2026 Strongroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-file JSON persistence for the key record and the credential store.
//!
//! Records are always read fully and written fully. Writes go to a temporary
//! file in the target directory which is then renamed over the target, so a
//! crash mid-write leaves the previous version intact.

use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use strongroom_core::StrongroomError;
use tracing::debug;

/// Indentation used by every persisted file.
const INDENT: &[u8] = b"    ";

/// Read and parse a JSON record.
///
/// Returns `Ok(None)` when the file does not exist (first use). A file that
/// exists but cannot be parsed is a [`StrongroomError::StorageCorruption`].
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StrongroomError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(StrongroomError::StorageCorruption {
                path: path.to_path_buf(),
                reason: format!("not valid UTF-8: {e}"),
            });
        }
        Err(e) => return Err(StrongroomError::storage(e)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| StrongroomError::StorageCorruption {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Serialize `value` and atomically replace the file at `path`.
///
/// Missing parent directories are created.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StrongroomError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(StrongroomError::storage)?;

    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut ser)
        .map_err(|e| StrongroomError::Internal(format!("failed to serialize record: {e}")))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(StrongroomError::storage)?;
    tmp.write_all(&buf).map_err(StrongroomError::storage)?;
    tmp.as_file().sync_all().map_err(StrongroomError::storage)?;
    tmp.persist(path)
        .map_err(|e| StrongroomError::storage(e.error))?;

    debug!(path = %path.display(), bytes = buf.len(), "record written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn missing_file_is_first_use() {
        let dir = tempfile::tempdir().unwrap();
        let got: Option<BTreeMap<String, String>> =
            read_json(&dir.path().join("absent.json")).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn write_then_read_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("key_file.json");
        let mut record = BTreeMap::new();
        record.insert("key".to_string(), "102 103".to_string());

        write_json_atomic(&path, &record).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"key\": \"102 103\"\n}");
        let back: BTreeMap<String, String> = read_json(&path).unwrap().unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn rewrite_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logins.json");
        write_json_atomic(&path, &vec![1, 2, 3]).unwrap();
        write_json_atomic(&path, &vec![4]).unwrap();
        let back: Vec<i32> = read_json(&path).unwrap().unwrap();
        assert_eq!(back, vec![4]);
    }

    #[test]
    fn garbage_is_storage_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logins.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = read_json::<BTreeMap<String, String>>(&path).unwrap_err();
        assert!(matches!(err, StrongroomError::StorageCorruption { .. }));
        assert!(err.is_corruption());
    }

    #[test]
    fn leaves_no_temporary_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key_file.json");
        write_json_atomic(&path, &"x").unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
