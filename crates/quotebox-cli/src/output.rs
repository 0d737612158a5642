//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use quotebox_core::{ExportArtifact, ImportSummary, Quote, QuoteView};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print what the display surface shows
    pub fn print_view(&self, view: &QuoteView) {
        match self.format {
            OutputFormat::Human => {
                println!("{}", view.text_line());
                if let Some(category) = view.category_line() {
                    println!("  {}", category);
                }
            }
            OutputFormat::Json => print_json(view),
            OutputFormat::Quiet => {
                if let QuoteView::Quote { text, .. } = view {
                    println!("{}", text);
                }
            }
        }
    }

    /// Print the whole collection
    pub fn print_quotes(&self, quotes: &[Quote]) {
        match self.format {
            OutputFormat::Human => {
                if quotes.is_empty() {
                    println!("No quotes found.");
                    return;
                }
                let width = quotes.len().to_string().len();
                for (index, quote) in quotes.iter().enumerate() {
                    println!(
                        "{:>width$} | {} | {}",
                        index,
                        truncate(&quote.category, 15),
                        truncate(&quote.text, 60),
                        width = width
                    );
                }
                println!("\n{} quote(s)", quotes.len());
            }
            OutputFormat::Json => print_json(&quotes),
            OutputFormat::Quiet => {
                for quote in quotes {
                    println!("{}", quote.text);
                }
            }
        }
    }

    /// Print the result of an export
    pub fn print_export(&self, artifact: &ExportArtifact) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "✓ Exported {} quote(s) to {}",
                    artifact.quote_count,
                    artifact.path.display()
                );
            }
            OutputFormat::Json => print_json(artifact),
            OutputFormat::Quiet => println!("{}", artifact.path.display()),
        }
    }

    /// Print the result of an import
    pub fn print_import(&self, summary: &ImportSummary, message: &str) {
        match self.format {
            OutputFormat::Human => {
                println!("✓ {}", message);
                if summary.skipped > 0 {
                    println!(
                        "  {} imported, {} invalid entr{} skipped",
                        summary.imported,
                        summary.skipped,
                        if summary.skipped == 1 { "y" } else { "ies" }
                    );
                } else {
                    println!("  {} imported", summary.imported);
                }
            }
            OutputFormat::Json => print_json(summary),
            OutputFormat::Quiet => println!("{}", summary.imported),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to format JSON output: {}", e),
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("ünïcödé quote", 8), "ünïcö...");
    }
}
