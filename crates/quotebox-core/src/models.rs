//! Data models for Quotebox
//!
//! A quote is a text/category pair. It has no identifier beyond its
//! position in the collection, and duplicates are allowed.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// A single quotation
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Quote {
    /// The quotation itself
    pub text: String,
    /// Free-form category label
    pub category: String,
    /// Stored JSON this quote was read from, kept when it isn't a plain
    /// `{text, category}` object so it is written back unchanged
    #[serde(skip)]
    stored: Option<Value>,
}

impl Quote {
    /// Create a new quote
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            stored: None,
        }
    }

    /// Build a quote from an untrusted JSON value (import files)
    ///
    /// Returns `None` unless the value is an object whose `text` and
    /// `category` are both strings. Empty strings are accepted.
    pub fn from_import(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = object.get("text")?.as_str()?;
        let category = object.get("category")?.as_str()?;
        Some(Self::new(text, category))
    }

    /// Build a quote from a previously stored JSON value
    ///
    /// Stored data is trusted and never dropped or rewritten. For display a
    /// missing field reads as an empty string and a non-string field reads
    /// as its JSON text; serializing gives back the original value.
    pub fn from_stored(value: &Value) -> Self {
        let field = |name: &str| match value.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let mut quote = Self::new(field("text"), field("category"));
        if !is_plain(value) {
            quote.stored = Some(value.clone());
        }
        quote
    }
}

/// Exactly `{"text": string, "category": string}`
fn is_plain(value: &Value) -> bool {
    value.as_object().is_some_and(|object| {
        object.len() == 2
            && object.get("text").is_some_and(Value::is_string)
            && object.get("category").is_some_and(Value::is_string)
    })
}

impl Serialize for Quote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(stored) = &self.stored {
            return stored.serialize(serializer);
        }
        let mut state = serializer.serialize_struct("Quote", 2)?;
        state.serialize_field("text", &self.text)?;
        state.serialize_field("category", &self.category)?;
        state.end()
    }
}

/// The built-in quotes used when durable storage is empty
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The only way to do great work is to love what you do.",
            "Motivation",
        ),
        Quote::new("Success is not final, failure is not fatal.", "Inspiration"),
        Quote::new("Believe you can and you're halfway there.", "Confidence"),
    ]
}
