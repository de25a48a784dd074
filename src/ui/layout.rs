//! Layout components (main area, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the main content and the one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar: transient message if any, key hints otherwise
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(message) = &app.state.status_message {
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let hints: &[(&str, &str)] = match app.state.current_view {
            View::Verification if app.state.document_prompt.is_some() => {
                &[("Enter", "attach"), ("Esc", "cancel")]
            }
            View::Verification => &[
                ("Tab", "next"),
                ("Shift+Tab", "prev"),
                ("Enter", "select"),
                (SUBMIT_SHORTCUT, "submit"),
                ("Esc", "leave"),
            ],
            View::Workspace(_) => &[("q", "quit")],
        };
        let mut spans = Vec::new();
        for (key, action) in hints {
            spans.push(Span::styled(format!(" {key}"), Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(
                format!(" {action} "),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), area);
}
