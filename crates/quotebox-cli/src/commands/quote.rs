//! Quote command handlers

use anyhow::Result;

use quotebox_core::mutation::ADDED_MESSAGE;
use quotebox_core::{QuoteView, Widget};

use super::user_error;
use crate::output::Output;

/// Show a random quote and remember it for this session
pub fn show(widget: &mut Widget, output: &Output) -> Result<()> {
    widget.show_random();
    print_current(widget, output);
    Ok(())
}

/// Show the quote last viewed in this session
pub fn last(widget: &Widget, output: &Output) -> Result<()> {
    match widget.display().current() {
        Some(view) => output.print_view(view),
        None => output.message("No quote viewed this session."),
    }
    Ok(())
}

/// Add a quote to the collection
pub fn add(widget: &mut Widget, text: String, category: String, output: &Output) -> Result<()> {
    let quote = widget.add_quote_from(text, category).map_err(user_error)?;

    if output.is_quiet() {
        return Ok(());
    }
    output.success(ADDED_MESSAGE);
    let index = widget.store().len() - 1;
    output.print_view(&QuoteView::Quote {
        index,
        text: quote.text,
        category: quote.category,
    });
    Ok(())
}

/// List every quote in the collection
pub fn list(widget: &Widget, output: &Output) -> Result<()> {
    output.print_quotes(widget.store().quotes());
    Ok(())
}

fn print_current(widget: &Widget, output: &Output) {
    if let Some(view) = widget.display().current() {
        output.print_view(view);
    }
}
