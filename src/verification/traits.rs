//! Trait abstraction for the verification backend to enable mocking in tests

use crate::state::{SubmissionServiceError, VerificationReceipt, VerificationRequest};
use async_trait::async_trait;

/// Backend that decides whether a validated submission is accepted
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Verify a submission; latency and retries are up to the implementation
    async fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationReceipt, SubmissionServiceError>;
}
