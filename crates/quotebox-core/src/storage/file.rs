//! Directory-backed key-value storage
//!
//! Each key is stored as its own file, `<dir>/<key>.json`, holding the raw
//! string value. Uses atomic writes (write to temp file, then rename) so a
//! value is never left half-written.
//!
//! Durable storage lives in the data directory (`~/.local/share/quotebox/`);
//! session storage lives under the system temp directory.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{StorageError, StorageResult};
use super::KeyValueStorage;

/// Key-value storage persisted as one file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `dir`
    ///
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the storage directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the file path backing a key
    pub fn key_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.key_path(key)?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                Err(StorageError::PermissionDenied { path, source: e })
            }
            Err(e) => Err(StorageError::ReadError { path, source: e }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.key_path(key)?;
        atomic_write(key, &path, value.as_bytes())?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }
}

/// Keys become file names, so only a conservative character set is allowed
fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(key: &str, path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let write_temp = || -> io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()
    };

    if let Err(e) = write_temp() {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::from_io(e, key, temp_path));
    }

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
