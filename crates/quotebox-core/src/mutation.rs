//! Adding quotes from the form

use tracing::debug;

use crate::error::{QuoteError, QuoteResult};
use crate::models::Quote;
use crate::persistence::QuotePersistence;
use crate::store::QuoteStore;

/// Message shown after a quote was added
pub const ADDED_MESSAGE: &str = "New quote added successfully!";

/// The two text inputs of the add-quote form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteForm {
    pub text: String,
    pub category: String,
}

impl QuoteForm {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Empty both inputs
    pub fn clear(&mut self) {
        self.text.clear();
        self.category.clear();
    }
}

/// Validate the form and append its quote
///
/// Both inputs are trimmed; if either ends up empty nothing changes and
/// [`QuoteError::MissingFields`] is returned. On success the quote is
/// appended, the store persisted and the form cleared.
pub fn add_quote(
    store: &mut QuoteStore,
    persistence: &mut QuotePersistence,
    form: &mut QuoteForm,
) -> QuoteResult<Quote> {
    let text = form.text.trim();
    let category = form.category.trim();

    if text.is_empty() || category.is_empty() {
        return Err(QuoteError::MissingFields);
    }

    let quote = Quote::new(text, category);
    store.push(quote.clone());
    persistence.persist(store);
    form.clear();

    debug!(count = store.len(), "Added quote");
    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::QUOTES_KEY;
    use crate::storage::{KeyValueStorage, MemoryStorage};
    use serde_json::Value;

    fn stored_len(storage: &MemoryStorage) -> usize {
        let raw = storage.get_item(QUOTES_KEY).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        value.as_array().unwrap().len()
    }

    #[test]
    fn test_add_quote_appends_and_persists() {
        let durable = MemoryStorage::new();
        let mut persistence = QuotePersistence::new(durable.clone(), MemoryStorage::new());
        let mut store = QuoteStore::new();
        let mut form = QuoteForm::new("Q", "C");

        let added = add_quote(&mut store, &mut persistence, &mut form).unwrap();

        assert_eq!(added, Quote::new("Q", "C"));
        assert_eq!(store.len(), 4);
        assert_eq!(stored_len(&durable), 4);
        assert_eq!(form, QuoteForm::default());
    }

    #[test]
    fn test_add_quote_trims_inputs() {
        let mut persistence = QuotePersistence::in_memory();
        let mut store = QuoteStore::empty();
        let mut form = QuoteForm::new("  Stay hungry.\n", "\tWisdom ");

        add_quote(&mut store, &mut persistence, &mut form).unwrap();

        assert_eq!(store.get(0), Some(&Quote::new("Stay hungry.", "Wisdom")));
    }

    #[test]
    fn test_add_quote_requires_both_fields() {
        let durable = MemoryStorage::new();
        let mut persistence = QuotePersistence::new(durable.clone(), MemoryStorage::new());
        let mut store = QuoteStore::new();

        for (text, category) in [("", "X"), ("X", ""), ("   ", "X"), ("X", " \n ")] {
            let mut form = QuoteForm::new(text, category);
            let err = add_quote(&mut store, &mut persistence, &mut form).unwrap_err();

            assert!(matches!(err, QuoteError::MissingFields));
            assert_eq!(store.len(), 3);
            // Inputs are left for the user to fix
            assert_eq!(form, QuoteForm::new(text, category));
        }
        assert!(durable.get_item(QUOTES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_add_quote_allows_duplicates() {
        let mut persistence = QuotePersistence::in_memory();
        let mut store = QuoteStore::empty();

        for _ in 0..2 {
            let mut form = QuoteForm::new("Same", "Same");
            add_quote(&mut store, &mut persistence, &mut form).unwrap();
        }
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_quote_survives_storage_failure() {
        let mut persistence =
            QuotePersistence::new(MemoryStorage::with_quota(8), MemoryStorage::new());
        let mut store = QuoteStore::new();
        let mut form = QuoteForm::new("Q", "C");

        // In-memory store stays authoritative
        assert!(add_quote(&mut store, &mut persistence, &mut form).is_ok());
        assert_eq!(store.len(), 4);
    }
}
