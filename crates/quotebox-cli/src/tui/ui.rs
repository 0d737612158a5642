//! UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, FormField, InputMode};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_quote_pane(frame, app, chunks[0]);
    draw_form_pane(frame, app, chunks[1]);

    match app.input_mode {
        InputMode::ImportPath => draw_import_input(frame, app, chunks[2]),
        InputMode::Normal | InputMode::Form => draw_status_bar(frame, app, chunks[2]),
    }

    if let Some(message) = &app.error_message {
        draw_error_modal(frame, message);
    } else if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the display surface (top)
fn draw_quote_pane(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Quotebox ({}) ", app.widget.store().len()))
        .borders(Borders::ALL);

    let content = match app.current_view() {
        Some(view) => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    view.text_line(),
                    Style::default().add_modifier(Modifier::ITALIC),
                )),
            ];
            if let Some(category) = view.category_line() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    category,
                    Style::default().fg(Color::Cyan),
                )));
            }
            lines
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Press n for a random quote",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ],
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Draw the add-quote form (middle)
fn draw_form_pane(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Form;
    let form = app.widget.form();

    let border_style = if editing {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let block = Block::default()
        .title(" Add quote ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let label_style = |field: FormField| {
        if editing && app.form_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(TEXT_LABEL, label_style(FormField::Text)),
            Span::raw(form.text.as_str()),
        ]),
        Line::from(vec![
            Span::styled(CATEGORY_LABEL, label_style(FormField::Category)),
            Span::raw(form.category.as_str()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);

    if editing {
        let (label, input, row) = match app.form_field {
            FormField::Text => (TEXT_LABEL, &form.text, 0),
            FormField::Category => (CATEGORY_LABEL, &form.category, 1),
        };
        let start = area.x + 1 + label.width() as u16;
        // Stay inside the right border
        let last = area.right().saturating_sub(2);
        let cursor_x = cursor_column(start, input, app.cursor, last);
        frame.set_cursor_position((cursor_x, area.y + 1 + row));
    }
}

const TEXT_LABEL: &str = "Quote:    ";
const CATEGORY_LABEL: &str = "Category: ";

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(pending) = &app.pending_import {
        format!("Reading {}...", pending.path().display())
    } else if let Some(msg) = &app.status_message {
        msg.clone()
    } else if app.input_mode == InputMode::Form {
        "Tab:switch input  Enter:add  Esc:back".to_string()
    } else {
        "n:random  a:add  x:export  i:import  ?:help  q:quit".to_string()
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Draw the import path prompt at the bottom
fn draw_import_input(frame: &mut Frame, app: &App, area: Rect) {
    let prefix = "Import file: ";

    let line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Yellow)),
        Span::raw(app.import_input.as_str()),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    // Position cursor
    let start = area.x + prefix.width() as u16;
    let last = area.right().saturating_sub(1);
    let cursor_x = cursor_column(start, &app.import_input, app.cursor, last);
    frame.set_cursor_position((cursor_x, area.y));
}

/// Screen column of a cursor `cursor` chars into `input`, clamped to `last`
fn cursor_column(start: u16, input: &str, cursor: usize, last: u16) -> u16 {
    let end = input
        .char_indices()
        .nth(cursor)
        .map_or(input.len(), |(i, _)| i);
    let offset = u16::try_from(input[..end].width()).unwrap_or(u16::MAX);
    start.saturating_add(offset).min(last)
}

/// Draw a blocking notification
fn draw_error_modal(frame: &mut Frame, message: &str) {
    let popup_area = centered_rect(frame.area(), 50, 5);

    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(frame.area(), 46, 16);

    // Clear the popup area
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("  n, Space    Show a random quote"),
        Line::from("  a           Add a quote"),
        Line::from("  x           Export to quotes.json"),
        Line::from("  i           Import from a JSON file"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from("Add quote form:"),
        Line::from("  Tab         Switch input"),
        Line::from("  Enter       Add quote"),
        Line::from("  Esc         Back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, popup_area);
}

/// Popup area centered in `area`, shrunk to fit
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}
