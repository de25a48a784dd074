//! Landing view for the role workspace after handoff

use crate::state::Destination;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, destination: Destination) {
    let block = Block::default()
        .title(format!(" {} ", destination.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Your business is verified.",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Welcome to the {}.", destination.label().to_lowercase()),
            Style::default().fg(Color::White),
        )),
    ];

    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
