//! Screen-scoped verification session

use super::app_state::{ActorRole, Destination};
use super::forms::{DocumentHandle, FormRow, FormSnapshot, TextField, VerificationForm};
use super::submission::{
    Resolution, SubmissionController, SubmissionId, SubmissionServiceError, SubmitOutcome,
    VerificationReceipt,
};
use crate::attachment::DocumentAttachmentAdapter;
use tokio_util::sync::CancellationToken;

/// Everything the verification screen owns while it is shown.
///
/// `reset` is the exit boundary: it restores the initial snapshot, returns
/// the controller to `Idle` and cancels whatever call is still running.
#[derive(Debug)]
pub struct VerificationSession {
    role: ActorRole,
    initial: FormSnapshot,
    form: VerificationForm,
    controller: SubmissionController,
    cancel: CancellationToken,
}

impl VerificationSession {
    pub fn new(role: ActorRole, initial: FormSnapshot) -> Self {
        Self {
            role,
            form: VerificationForm::new(initial.clone()),
            initial,
            controller: SubmissionController::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn role(&self) -> ActorRole {
        self.role
    }

    pub fn form(&self) -> &VerificationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut VerificationForm {
        &mut self.form
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    pub fn set_field(&mut self, field: TextField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    /// Append a character to the focused text field
    pub fn input_char(&mut self, c: char) {
        self.edit_focused(|value| value.push(c));
    }

    /// Remove the last character of the focused text field
    pub fn backspace(&mut self) {
        self.edit_focused(|value| {
            value.pop();
        });
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        if let FormRow::Text(field) = self.form.active_row() {
            let mut value = self.form.value(field).to_string();
            edit(&mut value);
            self.set_field(field, value);
        }
    }

    pub fn attach_document(&mut self, handle: DocumentHandle) {
        self.form.attach_document(handle);
    }

    /// Ask the adapter for a document. Cancellation and failures both leave
    /// the form as it was; returns whether a document was attached.
    pub fn request_document(
        &mut self,
        adapter: &dyn DocumentAttachmentAdapter,
        input: &str,
    ) -> bool {
        match adapter.attach(input) {
            Ok(Some(handle)) => {
                self.attach_document(handle);
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!("document attachment failed: {err}");
                false
            }
        }
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        self.controller.submit(&mut self.form, self.role)
    }

    pub fn resolve(
        &mut self,
        id: SubmissionId,
        result: Result<VerificationReceipt, SubmissionServiceError>,
    ) -> Resolution {
        self.controller.resolve(id, result)
    }

    pub fn acknowledge(&mut self) -> Option<Destination> {
        self.controller.acknowledge(self.role)
    }

    pub fn dismiss_service_error(&mut self) {
        self.controller.dismiss_service_error();
    }

    /// Token that fires when this session is reset
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    pub fn reset(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.controller.reset();
        self.form = VerificationForm::new(self.initial.clone());
        tracing::info!(role = %self.role, "verification session reset");
    }
}
