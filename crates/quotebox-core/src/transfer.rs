//! Import and export of the quote collection
//!
//! ## Export
//!
//! The whole collection is written as pretty-printed JSON to a fixed file
//! name. The body is staged in a named temporary file next to the target and
//! then published with a rename; the temporary file is removed on every exit
//! path, including errors and panics, because it is owned by a drop guard.
//!
//! ## Import
//!
//! Importing is split in two so each half can be exercised on its own:
//!
//! 1. [`begin_import`] starts a non-blocking read of the selected file and
//!    returns a [`PendingImport`], a single-shot future that resolves exactly
//!    once with the file content or a read error.
//! 2. [`apply_import`] validates the content and merges the valid quotes.

use std::fs;
use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::error::{json_type_name, QuoteError, QuoteResult};
use crate::models::Quote;
use crate::persistence::QuotePersistence;
use crate::store::QuoteStore;

/// File name every export is written to
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Content type of the exported file
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

/// Message shown after a successful import
pub const IMPORTED_MESSAGE: &str = "Quotes imported successfully!";

/// A finished export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    /// Where the file was written
    pub path: PathBuf,
    pub file_name: &'static str,
    pub content_type: &'static str,
    /// Number of quotes in the file
    pub quote_count: usize,
}

/// Result of a successful import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Quotes appended to the store
    pub imported: usize,
    /// Array elements that were not valid quotes
    pub skipped: usize,
}

/// Serialize the collection the way it is exported
pub fn export_json(store: &QuoteStore) -> serde_json::Result<String> {
    serde_json::to_string_pretty(store.quotes())
}

/// Write the collection to `<dir>/quotes.json`
pub fn export_to_file(store: &QuoteStore, dir: &Path) -> QuoteResult<ExportArtifact> {
    let target = dir.join(EXPORT_FILE_NAME);

    match write_export(store, dir, &target) {
        Ok(()) => {
            info!(path = %target.display(), count = store.len(), "Exported quotes");
            Ok(ExportArtifact {
                path: target,
                file_name: EXPORT_FILE_NAME,
                content_type: EXPORT_CONTENT_TYPE,
                quote_count: store.len(),
            })
        }
        Err(source) => {
            error!(path = %target.display(), error = %source, "Failed to export quotes");
            Err(QuoteError::ExportFailed {
                path: target,
                source,
            })
        }
    }
}

fn write_export(store: &QuoteStore, dir: &Path, target: &Path) -> io::Result<()> {
    let body = export_json(store)?;

    fs::create_dir_all(dir)?;

    // Dropping the guard deletes the staged file unless it was persisted
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(body.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(target).map_err(|e| e.error)?;

    Ok(())
}

/// An in-flight read of an import file
///
/// Resolves once, with either the file content or
/// [`QuoteError::ReadFailed`]. There is no cancellation and no timeout.
#[derive(Debug)]
pub struct PendingImport {
    path: PathBuf,
    rx: oneshot::Receiver<io::Result<String>>,
}

impl PendingImport {
    /// The file being read
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Future for PendingImport {
    type Output = QuoteResult<String>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(Ok(content))) => Poll::Ready(Ok(content)),
            Poll::Ready(Ok(Err(source))) => Poll::Ready(Err(QuoteError::ReadFailed {
                path: this.path.clone(),
                source,
            })),
            Poll::Ready(Err(_)) => Poll::Ready(Err(QuoteError::ReadFailed {
                path: this.path.clone(),
                source: io::Error::new(io::ErrorKind::Interrupted, "file read ended early"),
            })),
        }
    }
}

/// Start reading the selected import file in the background
///
/// Fails straight away with [`QuoteError::NoFileSelected`] when no file is
/// given. Must be called from within a tokio runtime.
pub fn begin_import(file: Option<PathBuf>) -> QuoteResult<PendingImport> {
    let path = file.ok_or(QuoteError::NoFileSelected)?;
    let (tx, rx) = oneshot::channel();

    let read_path = path.clone();
    tokio::spawn(async move {
        // Decode leniently like a text read would; bad bytes surface as a format error
        let result = tokio::fs::read(&read_path)
            .await
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
        let _ = tx.send(result);
    });

    debug!(path = %path.display(), "Started import read");
    Ok(PendingImport { path, rx })
}

/// Validate import content and append its quotes
///
/// The content must be a JSON array, optionally preceded by a UTF-8 byte
/// order mark. Elements that aren't `{text, category}`
/// objects with string fields are skipped; if none are left the store is not
/// touched. Otherwise the quotes are appended in order and persisted.
pub fn apply_import(
    store: &mut QuoteStore,
    persistence: &mut QuotePersistence,
    content: &str,
) -> QuoteResult<ImportSummary> {
    // A leading byte order mark is not part of the JSON
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let parsed: Value = serde_json::from_str(content)?;

    let items = match parsed {
        Value::Array(items) => items,
        other => {
            return Err(QuoteError::NotAnArray {
                found: json_type_name(&other),
            })
        }
    };

    let quotes: Vec<Quote> = items.iter().filter_map(Quote::from_import).collect();
    let skipped = items.len() - quotes.len();

    if quotes.is_empty() {
        return Err(QuoteError::NoValidQuotes { skipped });
    }

    let imported = quotes.len();
    store.extend(quotes);
    persistence.persist(store);

    info!(imported, skipped, "Imported quotes");
    Ok(ImportSummary { imported, skipped })
}

/// Read the selected file and import it
pub async fn import_from_file(
    store: &mut QuoteStore,
    persistence: &mut QuotePersistence,
    file: Option<PathBuf>,
) -> QuoteResult<ImportSummary> {
    let content = begin_import(file)?.await?;
    apply_import(store, persistence, &content)
}
