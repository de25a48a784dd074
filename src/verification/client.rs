//! Simulated verification backend
//!
//! Stands in for the real registry check: it waits a fixed delay and then
//! accepts the submission, or rejects it when configured to.

use super::traits::VerificationService;
use crate::state::{SubmissionServiceError, VerificationReceipt, VerificationRequest};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

/// Default simulated latency
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

/// Fixed-delay verification service
#[derive(Debug, Clone)]
pub struct SimulatedVerificationService {
    latency: Duration,
    failure: Option<String>,
}

impl SimulatedVerificationService {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failure: None,
        }
    }

    /// Reject every submission with `reason` after the delay
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }
}

impl Default for SimulatedVerificationService {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl VerificationService for SimulatedVerificationService {
    async fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationReceipt, SubmissionServiceError> {
        tracing::debug!(
            submission_id = %request.submission_id,
            "simulating verification for {}",
            request.snapshot.business_identifier
        );
        tokio::time::sleep(self.latency).await;

        if let Some(reason) = &self.failure {
            return Err(SubmissionServiceError::Rejected {
                reason: reason.clone(),
            });
        }

        Ok(VerificationReceipt {
            submission_id: request.submission_id,
            actor_role: request.actor_role,
            verified_at: Utc::now(),
        })
    }
}
