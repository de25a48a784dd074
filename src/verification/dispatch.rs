//! Runs a verification request off the UI task

use super::traits::VerificationService;
use crate::state::{
    SubmissionId, SubmissionServiceError, VerificationReceipt, VerificationRequest,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Default upper bound on one verification call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a finished verification call, tagged with its submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub submission_id: SubmissionId,
    pub result: Result<VerificationReceipt, SubmissionServiceError>,
}

/// Spawn the verification call.
///
/// The call races `timeout` and `cancel`. Expiry is reported as
/// [`SubmissionServiceError::Timeout`]; cancellation reports nothing.
pub fn dispatch(
    service: Arc<dyn VerificationService>,
    request: VerificationRequest,
    timeout: Duration,
    cancel: CancellationToken,
    tx: UnboundedSender<Completion>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let submission_id = request.submission_id;
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(%submission_id, "verification cancelled");
                return;
            }
            outcome = tokio::time::timeout(timeout, service.verify(request)) => match outcome {
                Ok(result) => result,
                Err(_) => Err(SubmissionServiceError::Timeout {
                    after_ms: timeout.as_millis() as u64,
                }),
            },
        };

        if tx.send(Completion { submission_id, result }).is_err() {
            tracing::debug!(%submission_id, "verification finished after receiver closed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FormSnapshot;
    use crate::state::ActorRole;
    use crate::verification::MockVerificationService;
    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::mpsc;

    /// Never answers
    struct HangingService;

    #[async_trait]
    impl VerificationService for HangingService {
        async fn verify(
            &self,
            _request: VerificationRequest,
        ) -> Result<VerificationReceipt, SubmissionServiceError> {
            std::future::pending().await
        }
    }

    fn request() -> VerificationRequest {
        VerificationRequest {
            submission_id: SubmissionId::new(),
            actor_role: ActorRole::Restaurant,
            snapshot: FormSnapshot::new("Genève"),
        }
    }

    #[tokio::test]
    async fn test_delivers_service_result() {
        let mut mock = MockVerificationService::new();
        mock.expect_verify().times(1).returning(|req| {
            Ok(VerificationReceipt {
                submission_id: req.submission_id,
                actor_role: req.actor_role,
                verified_at: Utc::now(),
            })
        });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let request = request();
        let id = request.submission_id;

        dispatch(Arc::new(mock), request, DEFAULT_TIMEOUT, CancellationToken::new(), tx)
            .await
            .unwrap();

        let completion = rx.recv().await.unwrap();
        assert_eq!(completion.submission_id, id);
        assert!(completion.result.is_ok());
    }

    #[tokio::test]
    async fn test_delivers_service_failure() {
        let mut mock = MockVerificationService::new();
        mock.expect_verify()
            .times(1)
            .returning(|_| Err(SubmissionServiceError::Unavailable("offline".to_string())));
        let (tx, mut rx) = mpsc::unbounded_channel();

        dispatch(Arc::new(mock), request(), DEFAULT_TIMEOUT, CancellationToken::new(), tx)
            .await
            .unwrap();

        let completion = rx.recv().await.unwrap();
        assert_eq!(
            completion.result,
            Err(SubmissionServiceError::Unavailable("offline".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_reported_as_service_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        dispatch(
            Arc::new(HangingService),
            request(),
            Duration::from_millis(500),
            CancellationToken::new(),
            tx,
        )
        .await
        .unwrap();

        let completion = rx.recv().await.unwrap();
        assert_eq!(
            completion.result,
            Err(SubmissionServiceError::Timeout { after_ms: 500 })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_sends_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let handle = dispatch(
            Arc::new(HangingService),
            request(),
            DEFAULT_TIMEOUT,
            cancel.clone(),
            tx,
        );
        cancel.cancel();
        handle.await.unwrap();

        assert!(rx.recv().await.is_none());
    }
}
