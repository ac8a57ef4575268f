/// Interactive-mode rendering
///
/// Pure function of the [`Model`]; the layout top to bottom is the input
/// pane, one pane per extracted field, the status line and the key hints.

use crate::extract::{Field, StatusLevel};
use crate::tea::Model;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const KEY_HINTS: [(&str, &str); 8] = [
    ("^R", "extract"),
    ("^E", "example"),
    ("^O", "open path"),
    ("^V", "paste"),
    ("^K", "copy key"),
    ("^L", "copy email"),
    ("^U", "clear"),
    ("Esc", "quit"),
];

/// Color for a status level
pub fn level_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Info => Color::Cyan,
        StatusLevel::Success => Color::Green,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    }
}

pub fn level_icon(level: StatusLevel) -> &'static str {
    match level {
        StatusLevel::Info => "ℹ",
        StatusLevel::Success => "✓",
        StatusLevel::Warning => "⚠",
        StatusLevel::Error => "✗",
    }
}

pub fn render(frame: &mut Frame, model: &Model) {
    let fields = model.extractor.fields();
    let mut constraints = vec![Constraint::Min(6)];
    for field in fields {
        constraints.push(match field {
            Field::PrivateKey => Constraint::Length(8),
            Field::ClientEmail => Constraint::Length(3),
        });
    }
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());

    render_input(frame, chunks[0], model);
    for (i, field) in fields.iter().enumerate() {
        render_field(frame, chunks[i + 1], model, *field);
    }
    render_status(frame, chunks[fields.len() + 1], model);
    render_hints(frame, chunks[fields.len() + 2]);
}

fn render_input(frame: &mut Frame, area: Rect, model: &Model) {
    let title = if model.loading {
        " JSON input (loading...) ".to_string()
    } else {
        format!(" JSON input ({}) ", model.origin)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);

    let (line, column) = model.input.cursor_position();
    let row_offset = line.saturating_sub(inner.height.saturating_sub(1) as usize);
    let col_offset = column.saturating_sub(inner.width.saturating_sub(1) as usize);

    let body = if model.input.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "Paste service-account JSON here, drop a file onto the terminal, or press ^E",
            Style::default().fg(Color::DarkGray),
        )))
    } else {
        Paragraph::new(model.input.text()).scroll((row_offset as u16, col_offset as u16))
    };
    frame.render_widget(body.block(block), area);

    if inner.width > 0 && inner.height > 0 {
        frame.set_cursor(
            inner.x + (column - col_offset) as u16,
            inner.y + (line - row_offset) as u16,
        );
    }
}

fn render_field(frame: &mut Frame, area: Rect, model: &Model, field: Field) {
    let mut title = vec![Span::raw(format!(" {} ", field.label()))];
    if model.is_copied(field) {
        title.push(Span::styled(
            "✓ Copied! ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }

    let (text, style) = match model.value(field) {
        Some(value) => (value.to_string(), Style::default()),
        None => ("—".to_string(), Style::default().fg(Color::DarkGray)),
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(Line::from(title)));
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame, area: Rect, model: &Model) {
    let line = match &model.status {
        Some(status) => Line::from(vec![
            Span::styled(
                format!("{} ", level_icon(status.level)),
                Style::default().fg(level_color(status.level)),
            ),
            Span::styled(status.text.clone(), Style::default().fg(level_color(status.level))),
        ]),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::with_capacity(KEY_HINTS.len() * 2);
    for (key, action) in KEY_HINTS {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::styled(format!(" {}  ", action), Style::default().fg(Color::Gray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
