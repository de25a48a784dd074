//! Confirmation dialog shown after a successful verification

use super::base::{render_dialog, DialogConfig};
use crate::state::{VerificationReceipt, CONFIRMATION_MESSAGE};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render the success confirmation; Enter continues to the workspace
pub fn render_confirm_dialog(frame: &mut Frame, receipt: &VerificationReceipt) {
    let message = format!(
        "{CONFIRMATION_MESSAGE}\n\nVerified at {}",
        receipt.verified_at.format("%Y-%m-%d %H:%M UTC")
    );
    let hint = vec![
        Span::raw("Press "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to continue"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Verification complete",
            title_color: Color::Green,
            border_color: Color::Green,
            message: &message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
