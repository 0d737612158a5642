//! Quote persistence
//!
//! Moves the [`QuoteStore`] in and out of durable storage, and keeps the
//! "last viewed" index in session storage.
//!
//! Storage failures never reach the caller of [`QuotePersistence::load`] or
//! [`QuotePersistence::persist`]: they are logged and the in-memory store stays
//! authoritative. The `try_*` variants expose the underlying result.
//!
//! Keys:
//! - `quotes` (durable) - JSON array of `{text, category}` objects
//! - `lastViewedQuoteIndex` (session) - JSON integer

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::json_type_name;
use crate::models::Quote;
use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageResult};
use crate::store::QuoteStore;

/// Durable storage key for the quote collection
pub const QUOTES_KEY: &str = "quotes";

/// Session storage key for the last displayed index
pub const LAST_VIEWED_KEY: &str = "lastViewedQuoteIndex";

/// What `load` did with the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Store replaced by the stored collection of this many quotes
    Restored(usize),
    /// Nothing stored yet; the current store was written out
    SeededDefaults,
    /// Stored value was not a JSON array; store left untouched
    IgnoredMalformed,
}

/// Reads and writes quotes through a durable and a session storage
pub struct QuotePersistence {
    durable: Box<dyn KeyValueStorage>,
    session: Box<dyn KeyValueStorage>,
}

impl QuotePersistence {
    /// Create a persistence handler over the given storages
    pub fn new(
        durable: impl KeyValueStorage + 'static,
        session: impl KeyValueStorage + 'static,
    ) -> Self {
        Self {
            durable: Box::new(durable),
            session: Box::new(session),
        }
    }

    /// File-backed storages in the configured data and session directories
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            FileStorage::new(&config.data_dir),
            FileStorage::new(&config.session_dir),
        )
    }

    /// Fresh in-memory storages
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new(), MemoryStorage::new())
    }

    /// Get the durable storage
    pub fn durable(&self) -> &dyn KeyValueStorage {
        self.durable.as_ref()
    }

    /// Get the session storage
    pub fn session(&self) -> &dyn KeyValueStorage {
        self.session.as_ref()
    }

    /// Populate the store from durable storage
    ///
    /// Errors are logged and swallowed; on failure the store keeps whatever it
    /// held before (normally the built-in defaults).
    pub fn load(&mut self, store: &mut QuoteStore) -> Option<LoadOutcome> {
        match self.try_load(store) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(error = %e, "Failed to load quotes from storage");
                None
            }
        }
    }

    /// Populate the store from durable storage, reporting storage errors
    ///
    /// - absent or empty value: the current store is written out
    /// - JSON array: the store is replaced, element by element, without validation
    /// - anything else: the store is left untouched
    pub fn try_load(&mut self, store: &mut QuoteStore) -> StorageResult<LoadOutcome> {
        let stored = match self.durable.get_item(QUOTES_KEY)? {
            Some(s) if !s.is_empty() => s,
            _ => {
                self.try_persist(store)?;
                debug!(count = store.len(), "Seeded storage with current quotes");
                return Ok(LoadOutcome::SeededDefaults);
            }
        };

        let parsed: Value = match serde_json::from_str(&stored) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Stored quotes are not valid JSON, keeping current quotes");
                return Ok(LoadOutcome::IgnoredMalformed);
            }
        };

        match parsed {
            Value::Array(items) => {
                let quotes: Vec<Quote> = items.iter().map(Quote::from_stored).collect();
                let count = quotes.len();
                store.replace_all(quotes);
                debug!(count, "Restored quotes from storage");
                Ok(LoadOutcome::Restored(count))
            }
            other => {
                warn!(
                    found = json_type_name(&other),
                    "Stored quotes are not an array, keeping current quotes"
                );
                Ok(LoadOutcome::IgnoredMalformed)
            }
        }
    }

    /// Write the store to durable storage
    ///
    /// Returns whether the write succeeded. Failures (quota exceeded, disk
    /// errors) are logged; the in-memory store remains authoritative.
    pub fn persist(&mut self, store: &QuoteStore) -> bool {
        match self.try_persist(store) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    error = %e,
                    suggestion = e.recovery_suggestion(),
                    "Failed to save quotes to storage"
                );
                false
            }
        }
    }

    /// Write the store to durable storage, reporting errors
    pub fn try_persist(&mut self, store: &QuoteStore) -> StorageResult<()> {
        let json = serde_json::to_string(store.quotes())?;
        self.durable.set_item(QUOTES_KEY, &json)
    }

    /// Record the last displayed index in session storage (best-effort)
    pub fn save_last_viewed(&mut self, index: usize) -> bool {
        let value = Value::from(index).to_string();
        match self.session.set_item(LAST_VIEWED_KEY, &value) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Unable to save last viewed quote to session storage");
                false
            }
        }
    }

    /// Raw session value for the last displayed index
    ///
    /// Read errors are treated the same as a missing value.
    pub fn last_viewed_raw(&self) -> Option<String> {
        match self.session.get_item(LAST_VIEWED_KEY) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "Ignoring session storage read error");
                None
            }
        }
    }
}
