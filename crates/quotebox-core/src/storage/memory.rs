//! In-memory key-value storage
//!
//! Used for tests and for sessions that should not outlive the process.
//! Clones share the same underlying map, the same way every page of an
//! origin sees the same browser storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::error::{StorageError, StorageResult};
use super::KeyValueStorage;

#[derive(Debug, Default)]
struct Inner {
    items: HashMap<String, String>,
    /// Maximum total bytes (keys + values), if limited
    quota: Option<usize>,
    /// Fail every read when set
    fail_reads: bool,
}

impl Inner {
    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// Shared in-memory storage with an optional byte quota
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStorage {
    /// Create an empty, unlimited storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty storage that rejects writes beyond `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        let storage = Self::new();
        storage.lock().quota = Some(quota);
        storage
    }

    /// Make every subsequent read fail (simulates an unavailable storage)
    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock can't leave the map half-updated
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let inner = self.lock();
        if inner.fail_reads {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("storage unavailable while reading '{}'", key),
            )));
        }
        Ok(inner.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut inner = self.lock();

        if let Some(quota) = inner.quota {
            let needed = inner.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }

        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
