//! Application state and core logic

use crate::attachment::{DocumentAttachmentAdapter, PathAttachmentAdapter};
use crate::config::TuiConfig;
use crate::platform::SHORTCUT_MODIFIER;
use crate::state::forms::{Form, FormRow, FormSnapshot};
use crate::state::{AppState, Resolution, SubmitOutcome, VerificationSession, View};
use crate::verification::{
    dispatch, Completion, SimulatedVerificationService, VerificationService,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend deciding on submissions
    service: Arc<dyn VerificationService>,
    /// Turns typed paths into document handles
    attachment: PathAttachmentAdapter,
    /// Upper bound on one verification call
    timeout: Duration,
    /// Commercial registry help page
    help_url: String,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create an App backed by the simulated verification service
    pub fn new(config: &TuiConfig) -> Self {
        let mut service = SimulatedVerificationService::new(config.simulated_latency());
        if let Some(reason) = &config.simulated_failure {
            service = service.failing(reason.clone());
        }
        Self::with_service(config, Arc::new(service))
    }

    pub fn with_service(config: &TuiConfig, service: Arc<dyn VerificationService>) -> Self {
        let attachment = match &config.document_dir {
            Some(dir) => PathAttachmentAdapter::with_base_dir(dir),
            None => PathAttachmentAdapter::new(),
        };
        let initial = initial_snapshot(config, &attachment);
        let session = VerificationSession::new(config.role(), initial);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::new(session),
            service,
            attachment,
            timeout: config.verification_timeout(),
            help_url: config.registry_help_url().to_string(),
            completions_tx,
            completions_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// True while a verification call is in flight
    pub fn is_busy(&self) -> bool {
        self.state.session.controller().is_busy()
    }

    pub fn help_url(&self) -> &str {
        &self.help_url
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.current_view {
            View::Verification => self.handle_verification_key(key),
            View::Workspace(_) => self.handle_workspace_key(key),
        }
    }

    fn handle_verification_key(&mut self, key: KeyEvent) -> Result<()> {
        let controller = self.state.session.controller();
        let awaiting_ack = controller.confirmation().is_some();
        let has_service_error = controller.service_error().is_some();

        // Confirmation dialog (modal); Esc still leaves the screen
        if awaiting_ack {
            match key.code {
                KeyCode::Enter => self.acknowledge_confirmation(),
                KeyCode::Esc => self.exit_verification(),
                _ => {}
            }
            return Ok(());
        }

        // Service error banner (modal, dismissible)
        if has_service_error {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.session.dismiss_service_error();
            }
            return Ok(());
        }

        if self.state.document_prompt.is_some() {
            self.handle_document_prompt_key(key);
            return Ok(());
        }

        let active_row = self.state.session.form().active_row();
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.submit(),
            KeyCode::Char('l') if key.modifiers.contains(SHORTCUT_MODIFIER) => {
                self.copy_help_link()
            }
            KeyCode::Tab | KeyCode::Down => self.state.session.form_mut().next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.session.form_mut().prev_field(),
            KeyCode::Esc => self.exit_verification(),
            KeyCode::Enter => match active_row {
                FormRow::Text(_) => self.state.session.form_mut().next_field(),
                FormRow::Document => self.state.document_prompt = Some(String::new()),
                FormRow::HelpLink => self.copy_help_link(),
                FormRow::Submit => self.submit(),
            },
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.session.input_char(c)
            }
            KeyCode::Backspace => self.state.session.backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Keys while the document path prompt is open
    fn handle_document_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.document_prompt = None,
            KeyCode::Enter => {
                let input = self.state.document_prompt.take().unwrap_or_default();
                if self.state.session.request_document(&self.attachment, &input) {
                    self.state.status_message = Some("Document attached".to_string());
                } else if !input.trim().is_empty() {
                    self.state.status_message = Some("No document attached".to_string());
                }
            }
            KeyCode::Backspace => {
                if let Some(prompt) = self.state.document_prompt.as_mut() {
                    prompt.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(prompt) = self.state.document_prompt.as_mut() {
                    prompt.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_workspace_key(&mut self, key: KeyEvent) -> Result<()> {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            self.quit = true;
        }
        Ok(())
    }

    /// Validate and, when valid, send the snapshot for verification
    pub fn submit(&mut self) {
        match self.state.session.submit() {
            SubmitOutcome::Dispatched(pending) => {
                tracing::debug!(
                    submission_id = %pending.id(),
                    timeout = ?self.timeout,
                    "dispatching verification"
                );
                dispatch(
                    Arc::clone(&self.service),
                    pending.request,
                    self.timeout,
                    self.state.session.cancellation(),
                    self.completions_tx.clone(),
                );
                self.state.status_message = Some("Submitting verification...".to_string());
            }
            SubmitOutcome::Rejected(errors) => {
                self.state.status_message =
                    Some(format!("Please fix {} highlighted field(s)", errors.len()));
            }
            SubmitOutcome::Ignored => {}
        }
    }

    /// Apply every verification result that has arrived
    pub fn poll_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(completion);
        }
    }

    fn apply_completion(&mut self, completion: Completion) {
        let resolution = self
            .state
            .session
            .resolve(completion.submission_id, completion.result);
        if resolution == Resolution::Succeeded {
            self.state.status_message = None;
        }
    }

    fn acknowledge_confirmation(&mut self) {
        if let Some(destination) = self.state.session.acknowledge() {
            self.state.reset_navigation(destination);
        }
    }

    /// Leaving the screen: reset the session, then quit since there is
    /// nothing to go back to
    fn exit_verification(&mut self) {
        self.state.document_prompt = None;
        self.shutdown();
    }

    /// Cancel any in-flight call, return the session to Idle and quit
    pub fn shutdown(&mut self) {
        self.state.session.reset();
        self.quit = true;
    }

    fn copy_help_link(&mut self) {
        let url = self.help_url.clone();
        match self.copy_to_clipboard(&url) {
            Ok(()) => self.state.status_message = Some(format!("Copied {url}")),
            Err(err) => {
                tracing::warn!("clipboard unavailable: {err}");
                self.push_error(format!("Could not copy the registry link.\n{url}"));
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// Configured prefill, with the prefilled document resolved through the adapter
fn initial_snapshot(config: &TuiConfig, adapter: &dyn DocumentAttachmentAdapter) -> FormSnapshot {
    let mut snapshot = config.initial_snapshot();
    if let Some(path) = &config.prefill.document_path {
        match adapter.attach(path) {
            Ok(handle) => snapshot.document_proof = handle,
            Err(err) => tracing::warn!("prefilled document ignored: {err}"),
        }
    }
    snapshot
}
