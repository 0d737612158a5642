//! User-facing errors
//!
//! Every failure a user can trigger from the widget is a `QuoteError`.
//! Storage failures are not in here: they are recovered and logged by the
//! persistence layer and never reach the user.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Broad class of a user-facing error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unusable input
    Validation,
    /// Import content is not a JSON array
    Format,
    /// Reading or writing a file failed
    Io,
}

/// Errors surfaced to the user
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Quote text or category empty after trimming
    #[error("quote text and category are both required")]
    MissingFields,

    /// Import requested without a file
    #[error("no file selected for import")]
    NoFileSelected,

    /// Import content parsed but held no usable quotes
    #[error("no valid quotes found in import ({skipped} entries skipped)")]
    NoValidQuotes { skipped: usize },

    /// Import content is not valid JSON
    #[error("invalid JSON in import: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    /// Import content is JSON but not an array
    #[error("imported JSON must be an array of quotes, found {found}")]
    NotAnArray { found: &'static str },

    /// The selected file could not be read
    #[error("failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The export file could not be written
    #[error("failed to export quotes to '{path}': {source}")]
    ExportFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl QuoteError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuoteError::MissingFields
            | QuoteError::NoFileSelected
            | QuoteError::NoValidQuotes { .. } => ErrorKind::Validation,
            QuoteError::InvalidFormat(_) | QuoteError::NotAnArray { .. } => ErrorKind::Format,
            QuoteError::ReadFailed { .. } | QuoteError::ExportFailed { .. } => ErrorKind::Io,
        }
    }

    /// Short notification text for the user
    pub fn user_message(&self) -> &'static str {
        match self {
            QuoteError::MissingFields => "Please enter both a quote and a category.",
            QuoteError::NoFileSelected => "No file selected.",
            QuoteError::NoValidQuotes { .. } => "No valid quotes found in file.",
            QuoteError::InvalidFormat(_) | QuoteError::NotAnArray { .. } => {
                "Import failed: invalid JSON format."
            }
            QuoteError::ReadFailed { .. } => "Import failed while reading the file.",
            QuoteError::ExportFailed { .. } => "Export failed. See logs for details.",
        }
    }
}

/// Result type for widget operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Name of a JSON value's type, for error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(QuoteError::MissingFields.kind(), ErrorKind::Validation);
        assert_eq!(QuoteError::NoFileSelected.kind(), ErrorKind::Validation);
        assert_eq!(
            QuoteError::NoValidQuotes { skipped: 2 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            QuoteError::NotAnArray { found: "an object" }.kind(),
            ErrorKind::Format
        );

        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert_eq!(QuoteError::from(parse_err).kind(), ErrorKind::Format);

        let read_err = QuoteError::ReadFailed {
            path: PathBuf::from("/tmp/quotes.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(read_err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            QuoteError::MissingFields.user_message(),
            "Please enter both a quote and a category."
        );
        assert_eq!(QuoteError::NoFileSelected.user_message(), "No file selected.");
        assert_eq!(
            QuoteError::NotAnArray { found: "a string" }.user_message(),
            "Import failed: invalid JSON format."
        );
    }

    #[test]
    fn test_display_includes_detail() {
        let err = QuoteError::NotAnArray { found: "an object" };
        assert!(err.to_string().contains("an object"));

        let err = QuoteError::NoValidQuotes { skipped: 3 };
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&serde_json::json!({})), "an object");
        assert_eq!(json_type_name(&serde_json::json!("x")), "a string");
        assert_eq!(json_type_name(&serde_json::json!([])), "an array");
    }
}
