//! Submission lifecycle: idle, submitting, succeeded

use super::app_state::{destination_for, ActorRole, Destination};
use super::forms::{validate, FieldErrors, FormSnapshot, VerificationForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Shown to the user once the service accepts a submission
pub const CONFIRMATION_MESSAGE: &str = "Your request has been validated successfully.";

/// Identifies one dispatched submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

/// Payload handed to the verification service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub submission_id: SubmissionId,
    pub actor_role: ActorRole,
    /// Captured when `submit` ran; later edits never reach it
    pub snapshot: FormSnapshot,
}

/// Proof that the service accepted a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReceipt {
    pub submission_id: SubmissionId,
    pub actor_role: ActorRole,
    pub verified_at: DateTime<Utc>,
}

/// Failure of the verification call itself, never tied to a single field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionServiceError {
    #[error("verification was rejected: {reason}")]
    Rejected { reason: String },
    #[error("verification timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },
    #[error("verification service unavailable: {0}")]
    Unavailable(String),
}

/// A validated submission waiting for the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub request: VerificationRequest,
}

impl PendingSubmission {
    pub fn id(&self) -> SubmissionId {
        self.request.submission_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Snapshot was valid; the caller must run the request
    Dispatched(PendingSubmission),
    /// Snapshot was invalid; nothing was sent
    Rejected(FieldErrors),
    /// A submission is already in flight or awaiting acknowledgment
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Succeeded,
    Failed,
    /// Result for a submission that is no longer in flight
    Stale,
}

/// Drives a single submission attempt at a time
#[derive(Debug, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    in_flight: Option<SubmissionId>,
    confirmation: Option<VerificationReceipt>,
    service_error: Option<SubmissionServiceError>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    /// Receipt to confirm to the user while in `Succeeded`
    pub fn confirmation(&self) -> Option<&VerificationReceipt> {
        self.confirmation.as_ref()
    }

    pub fn service_error(&self) -> Option<&SubmissionServiceError> {
        self.service_error.as_ref()
    }

    pub fn dismiss_service_error(&mut self) {
        self.service_error = None;
    }

    /// Validate the form and, if it passes, move to `Submitting`.
    pub fn submit(&mut self, form: &mut VerificationForm, role: ActorRole) -> SubmitOutcome {
        if self.state != SubmissionState::Idle {
            tracing::debug!("submit ignored while {:?}", self.state);
            return SubmitOutcome::Ignored;
        }

        let errors = validate(form.snapshot());
        form.replace_errors(errors.clone());
        if !errors.is_empty() {
            let fields: Vec<&str> = errors.iter().map(|(key, _)| key.as_str()).collect();
            tracing::debug!(?fields, "submission blocked by {} field error(s)", errors.len());
            return SubmitOutcome::Rejected(errors);
        }

        let request = VerificationRequest {
            submission_id: SubmissionId::new(),
            actor_role: role,
            snapshot: form.snapshot().clone(),
        };
        self.state = SubmissionState::Submitting;
        self.in_flight = Some(request.submission_id);
        self.service_error = None;
        tracing::info!(
            submission_id = %request.submission_id,
            role = %role,
            "submitting verification"
        );

        SubmitOutcome::Dispatched(PendingSubmission { request })
    }

    /// Apply the service's answer for submission `id`
    pub fn resolve(
        &mut self,
        id: SubmissionId,
        result: Result<VerificationReceipt, SubmissionServiceError>,
    ) -> Resolution {
        if self.state != SubmissionState::Submitting || self.in_flight != Some(id) {
            tracing::debug!(submission_id = %id, "ignoring stale verification result");
            return Resolution::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(receipt) => {
                tracing::info!(submission_id = %id, "verification succeeded");
                self.state = SubmissionState::Succeeded;
                self.confirmation = Some(receipt);
                Resolution::Succeeded
            }
            Err(err) => {
                tracing::warn!(submission_id = %id, "verification failed: {err}");
                self.state = SubmissionState::Idle;
                self.service_error = Some(err);
                Resolution::Failed
            }
        }
    }

    /// Close the confirmation and hand off to the role's destination
    pub fn acknowledge(&mut self, role: ActorRole) -> Option<Destination> {
        if self.state != SubmissionState::Succeeded {
            return None;
        }
        self.state = SubmissionState::Idle;
        self.confirmation = None;
        let destination = destination_for(role);
        tracing::info!(role = %role, "handing off to {}", destination.label());
        Some(destination)
    }

    /// Force back to `Idle`, forgetting any in-flight submission
    pub fn reset(&mut self) {
        if let Some(id) = self.in_flight.take() {
            tracing::debug!(submission_id = %id, "abandoning in-flight submission");
        }
        self.state = SubmissionState::Idle;
        self.confirmation = None;
        self.service_error = None;
    }
}
