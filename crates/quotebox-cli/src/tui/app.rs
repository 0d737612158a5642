//! Application state and logic

use std::path::PathBuf;
use std::time::{Duration, Instant};

use quotebox_core::mutation::ADDED_MESSAGE;
use quotebox_core::transfer::IMPORTED_MESSAGE;
use quotebox_core::{PendingImport, QuoteResult, QuoteView, Widget};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode, single-key controls
    Normal,
    /// Editing the add-quote form
    Form,
    /// Typing the path of a file to import
    ImportPath,
}

/// Which form input has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Category,
}

impl FormField {
    /// Move to the other field
    pub fn toggle(self) -> Self {
        match self {
            FormField::Text => FormField::Category,
            FormField::Category => FormField::Text,
        }
    }
}

/// Application state
pub struct App {
    /// Quote store, storage and form inputs
    pub widget: Widget,
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Focused form input
    pub form_field: FormField,
    /// Cursor position (in chars) within the focused input
    pub cursor: usize,
    /// Import path buffer
    pub import_input: String,
    /// Where exports are written
    pub export_dir: PathBuf,
    /// Import file read in progress
    pub pending_import: Option<PendingImport>,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Blocking notification, dismissed by any key
    pub error_message: Option<String>,
    /// Whether help overlay is visible
    pub show_help: bool,
}

impl App {
    pub fn new(widget: Widget, export_dir: PathBuf) -> Self {
        Self {
            widget,
            should_quit: false,
            input_mode: InputMode::Normal,
            form_field: FormField::Text,
            cursor: 0,
            import_input: String::new(),
            export_dir,
            pending_import: None,
            status_message: None,
            status_message_time: None,
            error_message: None,
            show_help: false,
        }
    }

    /// What the display pane shows
    pub fn current_view(&self) -> Option<&QuoteView> {
        self.widget.display().current()
    }

    /// Set a status message (auto-dismisses after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Whether an import file is still being read
    pub fn is_loading(&self) -> bool {
        self.pending_import.is_some()
    }

    pub fn show_random(&mut self) {
        self.status_message = None;
        self.widget.show_random();
    }

    /// Start editing the add-quote form, keeping whatever was typed before
    pub fn enter_form(&mut self) {
        self.input_mode = InputMode::Form;
        self.form_field = FormField::Text;
        self.cursor = self.active_input().chars().count();
    }

    /// Start typing an import path
    pub fn enter_import(&mut self) {
        if self.is_loading() {
            self.set_status("An import is already in progress");
            return;
        }
        self.input_mode = InputMode::ImportPath;
        self.import_input.clear();
        self.cursor = 0;
    }

    /// Back to normal mode
    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.cursor = 0;
    }

    /// Switch focus between the two form inputs
    pub fn next_field(&mut self) {
        self.form_field = self.form_field.toggle();
        self.cursor = self.active_input().chars().count();
    }

    /// The input currently being edited
    pub fn active_input(&self) -> &str {
        match self.input_mode {
            InputMode::Form => match self.form_field {
                FormField::Text => &self.widget.form().text,
                FormField::Category => &self.widget.form().category,
            },
            InputMode::ImportPath => &self.import_input,
            InputMode::Normal => "",
        }
    }

    fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.input_mode {
            InputMode::Form => {
                let form = self.widget.form_mut();
                Some(match self.form_field {
                    FormField::Text => &mut form.text,
                    FormField::Category => &mut form.category,
                })
            }
            InputMode::ImportPath => Some(&mut self.import_input),
            InputMode::Normal => None,
        }
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let cursor = self.cursor;
        if let Some(input) = self.active_input_mut() {
            let at = byte_offset(input, cursor);
            input.insert(at, c);
            self.cursor += 1;
        }
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor - 1;
        if let Some(input) = self.active_input_mut() {
            let at = byte_offset(input, cursor);
            input.remove(at);
            self.cursor = cursor;
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.active_input().chars().count() {
            self.cursor += 1;
        }
    }

    /// Submit the add-quote form
    ///
    /// On a validation failure the form stays open with its inputs intact.
    pub fn submit_form(&mut self) {
        match self.widget.add_quote() {
            Ok(_) => {
                self.exit_input_mode();
                self.set_status(ADDED_MESSAGE);
            }
            Err(e) => self.set_error(e.user_message()),
        }
    }

    /// Export control
    pub fn export(&mut self) {
        match self.widget.export_to_file(&self.export_dir) {
            Ok(artifact) => self.set_status(format!(
                "Exported {} quote(s) to {}",
                artifact.quote_count,
                artifact.path.display()
            )),
            Err(e) => self.set_error(e.user_message()),
        }
    }

    /// Submit the typed import path and start reading it
    pub fn submit_import(&mut self) {
        let trimmed = self.import_input.trim();
        let file = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
        self.exit_input_mode();

        match self.widget.begin_import(file) {
            Ok(pending) => self.pending_import = Some(pending),
            Err(e) => self.set_error(e.user_message()),
        }
    }

    /// Apply a finished import read
    pub fn finish_import(&mut self, read: QuoteResult<String>) {
        self.pending_import = None;
        match self.widget.finish_import(read) {
            Ok(summary) if summary.skipped > 0 => self.set_status(format!(
                "{} ({} invalid skipped)",
                IMPORTED_MESSAGE, summary.skipped
            )),
            Ok(_) => self.set_status(IMPORTED_MESSAGE),
            Err(e) => self.set_error(e.user_message()),
        }
    }
}

/// Byte index of the `chars`-th character, or the end of the string
fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotebox_core::{QuotePersistence, RecordingSurface};
    use tempfile::TempDir;

    fn test_app(export_dir: PathBuf) -> App {
        let widget = Widget::open(QuotePersistence::in_memory(), RecordingSurface::new());
        App::new(widget, export_dir)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn test_form_typing_and_submit() {
        let mut app = test_app(PathBuf::from("."));

        app.enter_form();
        type_str(&mut app, "Stay hungry.");
        app.next_field();
        type_str(&mut app, "Wisdom");
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.widget.store().len(), 4);
        assert_eq!(app.status_message.as_deref(), Some(ADDED_MESSAGE));
        assert_eq!(app.widget.form().text, "");
    }

    #[test]
    fn test_submit_incomplete_form_shows_error() {
        let mut app = test_app(PathBuf::from("."));

        app.enter_form();
        type_str(&mut app, "Only text");
        app.submit_form();

        assert_eq!(
            app.error_message.as_deref(),
            Some("Please enter both a quote and a category.")
        );
        assert_eq!(app.input_mode, InputMode::Form);
        assert_eq!(app.widget.form().text, "Only text");
        assert_eq!(app.widget.store().len(), 3);
    }

    #[test]
    fn test_cursor_editing_multibyte() {
        let mut app = test_app(PathBuf::from("."));

        app.enter_form();
        type_str(&mut app, "héllo");
        app.cursor_left();
        app.cursor_left();
        app.delete_char();
        app.insert_char('L');

        assert_eq!(app.widget.form().text, "héLlo");
        assert_eq!(app.cursor, 3);
    }

    #[test]
    fn test_form_keeps_inputs_after_cancel() {
        let mut app = test_app(PathBuf::from("."));

        app.enter_form();
        type_str(&mut app, "Draft");
        app.exit_input_mode();
        app.enter_form();

        assert_eq!(app.active_input(), "Draft");
        assert_eq!(app.cursor, 5);
    }

    #[test]
    fn test_show_random_fills_display() {
        let mut app = test_app(PathBuf::from("."));
        assert!(app.current_view().is_none());

        app.show_random();

        assert!(matches!(app.current_view(), Some(QuoteView::Quote { .. })));
    }

    #[test]
    fn test_export_sets_status() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = test_app(temp_dir.path().to_path_buf());

        app.export();

        assert!(!app.has_error());
        assert!(temp_dir.path().join("quotes.json").exists());
        assert!(app.status_message.unwrap().starts_with("Exported 3 quote(s)"));
    }

    #[test]
    fn test_export_failure_shows_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let mut app = test_app(blocker.join("out"));

        app.export();

        assert_eq!(
            app.error_message.as_deref(),
            Some("Export failed. See logs for details.")
        );
    }

    #[tokio::test]
    async fn test_empty_import_path() {
        let mut app = test_app(PathBuf::from("."));

        app.enter_import();
        type_str(&mut app, "   ");
        app.submit_import();

        assert!(!app.is_loading());
        assert_eq!(app.error_message.as_deref(), Some("No file selected."));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[tokio::test]
    async fn test_import_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("in.json");
        std::fs::write(
            &path,
            r#"[{"text":"A","category":"B"},{"text":"missing category"}]"#,
        )
        .unwrap();
        let mut app = test_app(temp_dir.path().to_path_buf());

        app.enter_import();
        type_str(&mut app, path.to_str().unwrap());
        app.submit_import();
        assert!(app.is_loading());

        let read = app.pending_import.as_mut().unwrap().await;
        app.finish_import(read);

        assert!(!app.is_loading());
        assert_eq!(app.widget.store().len(), 4);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Quotes imported successfully! (1 invalid skipped)")
        );
    }

    #[test]
    fn test_finish_import_invalid_json() {
        let mut app = test_app(PathBuf::from("."));

        app.finish_import(Ok("not json".to_string()));

        assert_eq!(
            app.error_message.as_deref(),
            Some("Import failed: invalid JSON format.")
        );
        assert_eq!(app.widget.store().len(), 3);
    }

    #[test]
    fn test_status_timeout() {
        let mut app = test_app(PathBuf::from("."));
        app.set_status("hello");
        app.status_message_time = Some(Instant::now() - Duration::from_secs(5));

        app.check_status_timeout();

        assert!(app.status_message.is_none());
    }
}
