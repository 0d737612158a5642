//! In-memory quote collection
//!
//! `QuoteStore` is the single source of truth for the running session.
//! It is an owned value handed to each operation by reference; loading
//! and persisting it is the job of [`crate::persistence::QuotePersistence`].

use crate::models::{default_quotes, Quote};

/// Ordered collection of quotes
///
/// Order matters only for index-based addressing (the "last viewed" index).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

impl Default for QuoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteStore {
    /// Create a store holding the built-in default quotes
    pub fn new() -> Self {
        Self {
            quotes: default_quotes(),
        }
    }

    /// Create a store with no quotes at all
    pub fn empty() -> Self {
        Self { quotes: Vec::new() }
    }

    /// Create a store from existing quotes
    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Get the quote at an index
    pub fn get(&self, index: usize) -> Option<&Quote> {
        self.quotes.get(index)
    }

    /// All quotes in order
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Append a single quote
    pub fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// Append quotes after the existing ones, preserving their order
    pub fn extend(&mut self, quotes: impl IntoIterator<Item = Quote>) {
        self.quotes.extend(quotes);
    }

    /// Replace the whole collection
    pub fn replace_all(&mut self, quotes: Vec<Quote>) {
        self.quotes = quotes;
    }

    /// Remove every quote
    pub fn clear(&mut self) {
        self.quotes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_with_defaults() {
        let store = QuoteStore::new();
        assert_eq!(store.len(), 3);
        assert_eq!(store.quotes(), default_quotes().as_slice());
    }

    #[test]
    fn test_push_and_get() {
        let mut store = QuoteStore::empty();
        assert!(store.is_empty());
        assert!(store.get(0).is_none());

        store.push(Quote::new("Q", "C"));
        store.push(Quote::new("Q", "C"));

        // Duplicates are allowed
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1), Some(&Quote::new("Q", "C")));
    }

    #[test]
    fn test_extend_appends_in_order() {
        let mut store = QuoteStore::from_quotes(vec![Quote::new("A", "1")]);
        store.extend(vec![Quote::new("B", "2"), Quote::new("C", "3")]);

        let texts: Vec<_> = store.quotes().iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, ["A", "B", "C"]);
    }

    #[test]
    fn test_replace_all_and_clear() {
        let mut store = QuoteStore::new();
        store.replace_all(vec![Quote::new("A", "B")]);
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
    }
}
