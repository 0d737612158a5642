//! The quote widget
//!
//! `Widget` owns the quote store, its persistence, the display surface and
//! the add-quote form, and exposes one handler per control:
//!
//! | Control            | Handler                                   |
//! |--------------------|-------------------------------------------|
//! | show random        | [`Widget::show_random`]                   |
//! | add quote          | [`Widget::add_quote`]                     |
//! | export             | [`Widget::export_to_file`]                |
//! | import file select | [`Widget::begin_import`] + [`Widget::finish_import`] |
//!
//! ## Usage
//!
//! ```ignore
//! let mut widget = Widget::open_with_config(&config, RecordingSurface::new());
//! widget.show_random();
//! widget.form_mut().text = "Stay hungry.".into();
//! widget.form_mut().category = "Wisdom".into();
//! widget.add_quote()?;
//! ```

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::QuoteResult;
use crate::models::Quote;
use crate::mutation::{self, QuoteForm};
use crate::persistence::{LoadOutcome, QuotePersistence};
use crate::render::{self, DisplaySurface, RecordingSurface};
use crate::store::QuoteStore;
use crate::transfer::{self, ExportArtifact, ImportSummary, PendingImport};

/// Quote widget state and control handlers
pub struct Widget<D: DisplaySurface = RecordingSurface> {
    store: QuoteStore,
    persistence: QuotePersistence,
    display: D,
    form: QuoteForm,
    load_outcome: Option<LoadOutcome>,
}

impl<D: DisplaySurface> Widget<D> {
    /// Start the widget
    ///
    /// Begins with the default quotes, loads durable storage over them and
    /// redisplays the last viewed quote of this session if there is one.
    pub fn open(mut persistence: QuotePersistence, display: D) -> Self {
        let mut store = QuoteStore::new();
        let load_outcome = persistence.load(&mut store);
        debug!(?load_outcome, count = store.len(), "Opened quote widget");

        let mut widget = Self {
            store,
            persistence,
            display,
            form: QuoteForm::default(),
            load_outcome,
        };
        widget.restore_last_viewed();
        widget
    }

    /// Start the widget on the configured file storages
    pub fn open_with_config(config: &Config, display: D) -> Self {
        Self::open(QuotePersistence::from_config(config), display)
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn persistence(&self) -> &QuotePersistence {
        &self.persistence
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn form(&self) -> &QuoteForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut QuoteForm {
        &mut self.form
    }

    /// What happened when storage was loaded, `None` if it failed
    pub fn load_outcome(&self) -> Option<LoadOutcome> {
        self.load_outcome
    }

    /// Redisplay the quote recorded in session storage, if still valid
    pub fn restore_last_viewed(&mut self) -> bool {
        let stored = self.persistence.last_viewed_raw();
        render::show_at(&self.store, &mut self.display, stored.as_deref())
    }

    /// Show-random control
    pub fn show_random(&mut self) -> Option<usize> {
        self.show_random_with(&mut rand::thread_rng())
    }

    /// Show-random control with a caller-supplied random source
    pub fn show_random_with<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        render::show_random(&self.store, &mut self.persistence, &mut self.display, rng)
    }

    /// Add-quote control: consumes the current form inputs
    pub fn add_quote(&mut self) -> QuoteResult<Quote> {
        mutation::add_quote(&mut self.store, &mut self.persistence, &mut self.form)
    }

    /// Fill the form and submit it in one go
    pub fn add_quote_from(
        &mut self,
        text: impl Into<String>,
        category: impl Into<String>,
    ) -> QuoteResult<Quote> {
        self.form = QuoteForm::new(text, category);
        self.add_quote()
    }

    /// Export control
    pub fn export_to_file(&self, dir: &Path) -> QuoteResult<ExportArtifact> {
        transfer::export_to_file(&self.store, dir)
    }

    /// Import control, first half: start reading the selected file
    pub fn begin_import(&self, file: Option<PathBuf>) -> QuoteResult<PendingImport> {
        transfer::begin_import(file).inspect_err(|e| warn!(error = %e, "Import not started"))
    }

    /// Import control, second half: merge the read result into the store
    pub fn finish_import(&mut self, read: QuoteResult<String>) -> QuoteResult<ImportSummary> {
        let result = read.and_then(|content| {
            transfer::apply_import(&mut self.store, &mut self.persistence, &content)
        });
        if let Err(e) = &result {
            warn!(error = %e, "Failed to import quotes");
        }
        result
    }

    /// Import control, both halves
    pub async fn import_from_file(&mut self, file: Option<PathBuf>) -> QuoteResult<ImportSummary> {
        let pending = self.begin_import(file)?;
        let read = pending.await;
        self.finish_import(read)
    }
}
