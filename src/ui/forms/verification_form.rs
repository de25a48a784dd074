//! Verification form rendering

use super::field_renderer::{draw_field, FieldLook, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::{COPY_LINK_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::forms::{FieldKey, FormRow, TextField, VerificationForm};
use crate::state::SubmissionState;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the verification form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let session = &app.state.session;
    let form = session.form();

    let block = Block::default()
        .title(format!(" {} ", session.role().title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Section: general
            Constraint::Length(FIELD_HEIGHT),  // Structure name
            Constraint::Length(FIELD_HEIGHT),  // Identifier
            Constraint::Length(1),             // Section: address
            Constraint::Length(FIELD_HEIGHT),  // Street
            Constraint::Length(FIELD_HEIGHT),  // Postal code + city
            Constraint::Length(1),             // Section: verification
            Constraint::Length(FIELD_HEIGHT),  // Document
            Constraint::Length(2),             // Help link
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),                // Remaining space
        ])
        .horizontal_margin(1)
        .split(inner);

    draw_section(frame, chunks[0], "General information");
    draw_text_field(frame, chunks[1], form, TextField::StructureName);
    draw_text_field(frame, chunks[2], form, TextField::BusinessIdentifier);

    draw_section(frame, chunks[3], "Address");
    draw_text_field(frame, chunks[4], form, TextField::StreetAddress);
    let postal_city = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[5]);
    draw_text_field(frame, postal_city[0], form, TextField::PostalCode);
    draw_field(
        frame,
        postal_city[1],
        "City",
        &form.snapshot().city,
        "",
        FieldLook {
            read_only: true,
            ..Default::default()
        },
    );

    draw_section(frame, chunks[6], "Verification");
    draw_document_row(frame, chunks[7], app);
    draw_help_link(frame, chunks[8], app);

    let state = session.controller().state();
    let label = match state {
        SubmissionState::Submitting => "Processing...".to_string(),
        SubmissionState::Succeeded => "Verified".to_string(),
        SubmissionState::Idle => format!("Submit verification ({SUBMIT_SHORTCUT})"),
    };
    let button_area = Rect {
        width: chunks[9].width.min(40),
        ..chunks[9]
    };
    render_button(
        frame,
        button_area,
        &label,
        form.active_row() == FormRow::Submit,
        state == SubmissionState::Idle,
    );
}

fn draw_section(frame: &mut Frame, area: Rect, title: &str) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        area,
    );
}

fn draw_text_field(frame: &mut Frame, area: Rect, form: &VerificationForm, field: TextField) {
    let error = form.errors().message(field.into());
    draw_field(
        frame,
        area,
        field.label(),
        form.value(field),
        field.placeholder(),
        FieldLook {
            is_active: form.active_row() == FormRow::Text(field),
            read_only: false,
            error: error.as_deref(),
        },
    );
}

/// Document row, or the path prompt while it is open
fn draw_document_row(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.state.session.form();
    let error = form.errors().message(FieldKey::DocumentProof);

    if let Some(prompt) = &app.state.document_prompt {
        draw_field(
            frame,
            area,
            "Document path (Enter attach, Esc cancel)",
            prompt,
            "/path/to/registry-extract.pdf",
            FieldLook {
                is_active: true,
                read_only: false,
                error: error.as_deref(),
            },
        );
        return;
    }

    let value = match form.document() {
        Some(document) => format!("✔ Proof attached: {}", document.name),
        None => String::new(),
    };
    draw_field(
        frame,
        area,
        "Business proof",
        &value,
        "Press Enter to attach a registry extract (PDF or image)",
        FieldLook {
            is_active: form.active_row() == FormRow::Document,
            read_only: false,
            error: error.as_deref(),
        },
    );
}

fn draw_help_link(frame: &mut Frame, area: Rect, app: &App) {
    let is_active = app.state.session.form().active_row() == FormRow::HelpLink;
    let style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::Green)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("? Need help? Consult the commercial registry", style),
            Span::styled(
                format!("  ({COPY_LINK_SHORTCUT} copies the link)"),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {}", app.help_url()),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
