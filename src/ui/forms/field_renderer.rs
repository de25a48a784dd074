//! Field rendering utilities for forms

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus the error line
pub const FIELD_HEIGHT: u16 = 4;

/// How a field should look
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldLook<'a> {
    pub is_active: bool,
    pub read_only: bool,
    /// Inline validation message under the input
    pub error: Option<&'a str>,
}

/// Draw a labelled single-line input with its inline error
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    look: FieldLook,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_color = if look.error.is_some() {
        Color::Red
    } else if look.is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let mut spans = if value.is_empty() {
        vec![Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else if look.read_only {
        vec![Span::styled(value.to_string(), Style::default().fg(Color::Gray))]
    } else {
        vec![Span::raw(value.to_string())]
    };
    if look.is_active && !look.read_only {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let title = if look.read_only {
        format!(" {label} (fixed) ")
    } else {
        format!(" {label} ")
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[0]);

    if let Some(error) = look.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {error}"),
                Style::default().fg(Color::Red),
            )),
            chunks[1],
        );
    }
}
