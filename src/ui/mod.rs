//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod workspace;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_error_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Verification => forms::draw_verification(frame, main_area, app),
        View::Workspace(destination) => workspace::draw(frame, main_area, destination),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Overlays, topmost last
    let controller = app.state.session.controller();
    if let Some(receipt) = controller.confirmation() {
        render_confirm_dialog(frame, receipt);
    } else if let Some(err) = controller.service_error() {
        render_error_dialog(
            frame,
            "Verification failed",
            &format!("{err}\n\nYour entries are kept. Submit again to retry."),
        );
    }

    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, "Error", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PrefillConfig, TuiConfig};
    use crate::state::forms::{DocumentHandle, TextField};
    use crate::state::{ActorRole, SubmitOutcome, VerificationReceipt};
    use crate::verification::SimulatedVerificationService;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 45);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app(role: ActorRole) -> App {
        let config = TuiConfig {
            actor_role: Some(role),
            prefill: PrefillConfig {
                structure_name: None,
                business_identifier: None,
                street_address: None,
                postal_code: None,
                document_path: None,
            },
            ..Default::default()
        };
        App::with_service(&config, Arc::new(SimulatedVerificationService::default()))
    }

    #[test]
    fn test_renders_role_title_and_city() {
        let screen = render(&app(ActorRole::Association));
        assert!(screen.contains("Association verification"));
        assert!(screen.contains("Genève"));
        assert!(screen.contains("CHE-XXX.XXX.XXX"));
    }

    #[test]
    fn test_renders_inline_errors_after_submit() {
        let mut app = app(ActorRole::Restaurant);
        app.submit();
        let screen = render(&app);
        assert!(screen.contains("name required"));
        assert!(screen.contains("postal code required"));
        assert!(screen.contains("proof document required"));
    }

    #[test]
    fn test_renders_busy_label_while_submitting() {
        let config = TuiConfig::default();
        let mut app = App::with_service(&config, Arc::new(SimulatedVerificationService::default()));
        app.state
            .session
            .attach_document(DocumentHandle::new("proof.pdf", "file:///proof.pdf"));
        assert!(matches!(app.state.session.submit(), SubmitOutcome::Dispatched(_)));

        let screen = render(&app);

        assert!(screen.contains("Processing..."));
        assert!(!screen.contains("Submit verification"));
    }

    #[test]
    fn test_renders_confirmation_after_success() {
        let mut app = app(ActorRole::Restaurant);
        let session = &mut app.state.session;
        for (field, value) in [
            (TextField::StructureName, "Ma Structure"),
            (TextField::BusinessIdentifier, "CHE-123.456.789"),
            (TextField::StreetAddress, "Rue de la Structure 1"),
            (TextField::PostalCode, "1200"),
        ] {
            session.set_field(field, value);
        }
        session.attach_document(DocumentHandle::new("proof.pdf", "file:///proof.pdf"));
        let SubmitOutcome::Dispatched(pending) = session.submit() else {
            panic!("expected dispatch");
        };
        session.resolve(
            pending.id(),
            Ok(VerificationReceipt {
                submission_id: pending.id(),
                actor_role: ActorRole::Restaurant,
                verified_at: Utc::now(),
            }),
        );

        let screen = render(&app);

        assert!(screen.contains("Verification complete"));
        assert!(screen.contains("Your request has been validated successfully."));
    }
}
