// src/infrastructure/json_file.rs
//
// JSON file helpers shared by the file-backed repositories.
//
// RULES:
// - Writes go to a sibling temp file first, then rename over the target
// - A missing file is reported as `None`, never as an error
// - Parse failures surface as `AppError::Decode` with the file path

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Serialize `value` as pretty JSON and atomically replace `path`
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let data = serde_json::to_vec_pretty(value)?;
    let temp_path = path.with_extension("json.tmp");

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)?;
    log::info!("{} generated", path.display());
    Ok(())
}

/// Raw file contents, `None` if the file does not exist
pub fn read_optional(path: &Path) -> AppResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::Io(e)),
    }
}

/// Parse a JSON file, `None` if the file does not exist
pub fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
    let Some(bytes) = read_optional(path)? else {
        return Ok(None);
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| AppError::Decode(format!("{}: {}", path.display(), e)))
}

/// Delete a file; a file that is already gone counts as deleted
pub fn remove_if_exists(path: &Path) -> AppResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(AppError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tiers.json");
        let value = BTreeMap::from([("1".to_string(), "Gold".to_string())]);

        write_json_atomic(&path, &value).unwrap();

        let read: Option<BTreeMap<String, String>> = read_json(&path).unwrap();
        assert_eq!(read, Some(value));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let read: Option<Vec<String>> = read_json(&dir.path().join("absent.json")).unwrap();
        assert!(read.is_none());
    }

    #[test]
    fn test_malformed_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, b"{not json").unwrap();
        let result: AppResult<Option<Vec<String>>> = read_json(&path);
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("winners.json");
        fs::write(&path, b"{}").unwrap();
        assert!(remove_if_exists(&path).unwrap());
        assert!(!remove_if_exists(&path).unwrap());
    }
}
