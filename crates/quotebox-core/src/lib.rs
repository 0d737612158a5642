//! Quotebox Core Library
//!
//! This crate provides the core functionality for Quotebox, a local-first
//! quote collection: show a random quote, add quotes, and move the whole
//! collection in and out of JSON files.
//!
//! # Architecture
//!
//! - **QuoteStore**: in-memory collection, the source of truth for a session
//! - **KeyValueStorage**: durable storage for the collection, session storage
//!   for the last viewed quote
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut widget = Widget::open_with_config(&config, RecordingSurface::new());
//!
//! // Show a quote
//! widget.show_random();
//!
//! // Add a quote
//! widget.add_quote_from("Stay hungry.", "Wisdom")?;
//! ```
//!
//! # Modules
//!
//! - `widget`: Control handlers (main entry point)
//! - `models`: The quote record and built-in defaults
//! - `store`: In-memory quote collection
//! - `storage`: Key-value storage trait and implementations
//! - `persistence`: Loading and saving the collection
//! - `render`: Display surface and quote views
//! - `mutation`: The add-quote form
//! - `transfer`: JSON import and export
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod mutation;
pub mod persistence;
pub mod render;
pub mod storage;
pub mod store;
pub mod transfer;
pub mod widget;

pub use config::Config;
pub use error::{ErrorKind, QuoteError, QuoteResult};
pub use models::Quote;
pub use mutation::QuoteForm;
pub use persistence::{LoadOutcome, QuotePersistence};
pub use render::{DisplaySurface, QuoteView, RecordingSurface};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::QuoteStore;
pub use transfer::{ExportArtifact, ImportSummary, PendingImport};
pub use widget::Widget;
