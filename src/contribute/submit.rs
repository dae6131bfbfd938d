//! Sending accepted ideas somewhere.
//!
//! There is no backend: [`SimulatedSink`] waits a moment and hands back a
//! receipt. Submissions run on a worker thread so the UI keeps drawing.

use super::{ContributionIdea, IdeaSubmission, ReviewStatus};
use chrono::Utc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),

    #[error("submission worker exited without a result")]
    WorkerExited,
}

/// Receiver of validated ideas
pub trait IdeaSink: Send + Sync {
    fn submit(&self, idea: IdeaSubmission) -> Result<ContributionIdea, SubmitError>;
}

/// Accepts everything after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedSink {
    delay: Duration,
}

impl SimulatedSink {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl IdeaSink for SimulatedSink {
    fn submit(&self, idea: IdeaSubmission) -> Result<ContributionIdea, SubmitError> {
        thread::sleep(self.delay);
        let submitted_at = Utc::now();
        let receipt = ContributionIdea {
            id: format!("idea-{}", submitted_at.timestamp_millis()),
            idea,
            submitted_at,
            status: ReviewStatus::Pending,
        };
        debug!(id = %receipt.id, "Simulated submission accepted");
        Ok(receipt)
    }
}

/// Progress of the contribution form's submit action
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting { since: Instant },
    Succeeded(ContributionIdea),
    Failed(String),
}

/// Handle to a submission running on a worker thread
pub struct PendingSubmission {
    rx: Receiver<Result<ContributionIdea, SubmitError>>,
}

impl PendingSubmission {
    pub fn spawn(sink: Arc<dyn IdeaSink>, idea: IdeaSubmission) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = sink.submit(idea);
            if let Err(e) = &result {
                warn!(error = %e, "Idea submission failed");
            }
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// Non-blocking check; `Some` once the worker has finished
    pub fn try_finish(&self) -> Option<Result<ContributionIdea, SubmitError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(SubmitError::WorkerExited)),
        }
    }

    pub fn wait(self) -> Result<ContributionIdea, SubmitError> {
        self.rx.recv().unwrap_or(Err(SubmitError::WorkerExited))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contribute::fixtures::valid_draft;

    struct RejectingSink;

    impl IdeaSink for RejectingSink {
        fn submit(&self, _idea: IdeaSubmission) -> Result<ContributionIdea, SubmitError> {
            Err(SubmitError::Rejected("closed for review".into()))
        }
    }

    #[test]
    fn test_simulated_sink_issues_pending_receipt() {
        let idea = valid_draft().finalize().unwrap();
        let receipt = SimulatedSink::new(Duration::ZERO).submit(idea.clone()).unwrap();
        assert!(receipt.id.starts_with("idea-"));
        assert_eq!(receipt.status, ReviewStatus::Pending);
        assert_eq!(receipt.idea, idea);
    }

    #[test]
    fn test_pending_submission_waits_for_worker() {
        let idea = valid_draft().finalize().unwrap();
        let sink = Arc::new(SimulatedSink::new(Duration::from_millis(10)));
        let pending = PendingSubmission::spawn(sink, idea);
        let receipt = pending.wait().unwrap();
        assert_eq!(receipt.status, ReviewStatus::Pending);
    }

    #[test]
    fn test_rejection_is_reported() {
        let idea = valid_draft().finalize().unwrap();
        let pending = PendingSubmission::spawn(Arc::new(RejectingSink), idea);
        assert!(matches!(pending.wait(), Err(SubmitError::Rejected(_))));
    }

    #[test]
    fn test_receipt_serializes_camel_case() {
        let idea = valid_draft().finalize().unwrap();
        let receipt = SimulatedSink::new(Duration::ZERO).submit(idea).unwrap();
        let json = simd_json::to_string(&receipt).unwrap();
        assert!(json.contains("\"submittedAt\""));
        assert!(json.contains("\"implementationLevel\":\"local\""));
        assert!(json.contains("\"status\":\"pending\""));
        assert!(!json.contains("\"region\""));
    }
}
