//! Quotebox TUI
//!
//! Terminal user interface for the quote widget.
//!
//! ## Layout
//!
//! - Top: the displayed quote and its category
//! - Middle: the add-quote form (quote and category inputs)
//! - Bottom: status bar / import path prompt
//!
//! ## Controls
//!
//! - n or Space: Show a random quote
//! - a: Edit the add-quote form (Tab switches input, Enter submits, Esc leaves)
//! - x: Export all quotes to quotes.json
//! - i: Import quotes from a JSON file
//! - ?: Help
//! - q: Quit

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quotebox_core::{Config, QuoteResult, RecordingSurface, Widget};

use app::{App, InputMode};

/// Run the TUI application
pub async fn run(config: Config) -> Result<()> {
    // Initialize TUI logging (file-based, only if QUOTEBOX_LOG is set)
    init_tui_logging(&config);

    let widget = Widget::open_with_config(&config, RecordingSurface::new());
    let mut app = App::new(widget, config.export_dir.clone());

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Run app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Check for status message timeout
        app.check_status_timeout();

        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::select! {
            biased;

            // Import file read finished
            read = async {
                match app.pending_import.as_mut() {
                    Some(pending) => pending.await,
                    // Never resolves when nothing is being read
                    None => std::future::pending::<QuoteResult<String>>().await,
                }
            } => {
                app.finish_import(read);
            }

            // Poll for terminal events
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                // Check for terminal events (non-blocking)
                if event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        // Only handle key press events (not release)
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }

                        // If error modal is showing, any key dismisses it
                        if app.has_error() {
                            app.clear_error();
                            continue;
                        }

                        // If help is showing, any key dismisses it
                        if app.show_help {
                            app.show_help = false;
                            continue;
                        }

                        match app.input_mode {
                            InputMode::Normal => handle_normal_mode(app, key.code, key.modifiers),
                            InputMode::Form => handle_form_mode(app, key.code),
                            InputMode::ImportPath => handle_import_mode(app, key.code),
                        }
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('n') | KeyCode::Char(' ') => {
            app.show_random();
        }
        KeyCode::Char('a') => {
            app.enter_form();
        }
        KeyCode::Char('x') => {
            app.export();
        }
        KeyCode::Char('i') => {
            app.enter_import();
        }
        KeyCode::Char('?') => {
            app.toggle_help();
        }
        _ => {}
    }
}

/// Handle key events while editing the add-quote form
fn handle_form_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.exit_input_mode(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.next_field(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

/// Handle key events while typing an import path
fn handle_import_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.exit_input_mode(),
        KeyCode::Enter => app.submit_import(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

/// Log to a file while the TUI owns the terminal
fn init_tui_logging(config: &Config) {
    // Only log if QUOTEBOX_LOG is set
    let Ok(log_level) = std::env::var("QUOTEBOX_LOG") else {
        return;
    };

    let log_path = config.log_path();

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!("quotebox_core={},quotebox={}", log_level, log_level));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotebox_core::QuotePersistence;
    use std::path::PathBuf;

    fn test_app() -> App {
        let widget = Widget::open(QuotePersistence::in_memory(), RecordingSurface::new());
        App::new(widget, PathBuf::from("."))
    }

    #[test]
    fn test_normal_mode_keys() {
        let mut app = test_app();

        handle_normal_mode(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        assert!(app.current_view().is_some());

        handle_normal_mode(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(app.input_mode, InputMode::Form);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = test_app();
        handle_normal_mode(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_form_keys_add_quote() {
        let mut app = test_app();
        handle_normal_mode(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);

        for c in "Q".chars() {
            handle_form_mode(&mut app, KeyCode::Char(c));
        }
        handle_form_mode(&mut app, KeyCode::Tab);
        for c in "C".chars() {
            handle_form_mode(&mut app, KeyCode::Char(c));
        }
        handle_form_mode(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.widget.store().len(), 4);
    }

    #[test]
    fn test_letters_type_into_form() {
        let mut app = test_app();
        app.enter_form();

        // 'q' and 'n' are text here, not controls
        handle_form_mode(&mut app, KeyCode::Char('q'));
        handle_form_mode(&mut app, KeyCode::Char('n'));

        assert!(!app.should_quit);
        assert_eq!(app.widget.form().text, "qn");
    }

    #[test]
    fn test_escape_leaves_import_prompt() {
        let mut app = test_app();
        handle_normal_mode(&mut app, KeyCode::Char('i'), KeyModifiers::NONE);
        assert_eq!(app.input_mode, InputMode::ImportPath);

        handle_import_mode(&mut app, KeyCode::Esc);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.is_loading());
    }
}
