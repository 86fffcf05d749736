//! Submission lifecycle tracking
//!
//! One submission moves through `Idle -> Submitting -> {Succeeded, Failed}`
//! and never leaves a terminal state; a new run means a new [`Submission`].
//! A validation rejection settles the machine as `Failed` without ever
//! entering `Submitting`.

use crate::client::HedgeFundClient;
use crate::error::ClientError;
use fund_core::{AnalysisRequest, AnalysisResult};
use thiserror::Error;

/// Where a submission currently stands
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    /// Built but not yet started
    #[default]
    Idle,
    /// Validation passed; the request is on the wire
    Submitting,
    /// Terminal: the normalized result arrived
    Succeeded(AnalysisResult),
    /// Terminal: validation, transport, or the server rejected the run
    Failed(ClientError),
}

impl SubmissionState {
    /// Short label for logs and status lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Illegal lifecycle transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Attempted to settle a submission that was never started
    #[error("submission has not been started")]
    NotStarted,

    /// Attempted to start a submission that is already in flight
    #[error("submission is already in flight")]
    InFlight,

    /// Attempted to move a submission out of a terminal state
    #[error("submission has already settled")]
    Settled,
}

/// Tracks a single analysis submission through its lifecycle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Submission {
    state: SubmissionState,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// True once the submission has reached `Succeeded` or `Failed`
    pub fn is_settled(&self) -> bool {
        matches!(
            self.state,
            SubmissionState::Succeeded(_) | SubmissionState::Failed(_)
        )
    }

    /// Enter `Submitting`; only legal from `Idle`
    pub fn begin(&mut self) -> Result<(), TransitionError> {
        match self.state {
            SubmissionState::Idle => {
                self.state = SubmissionState::Submitting;
                Ok(())
            }
            SubmissionState::Submitting => Err(TransitionError::InFlight),
            _ => Err(TransitionError::Settled),
        }
    }

    /// Settle as `Succeeded`; only legal from `Submitting`
    pub fn succeed(&mut self, result: AnalysisResult) -> Result<(), TransitionError> {
        match self.state {
            SubmissionState::Submitting => {
                self.state = SubmissionState::Succeeded(result);
                Ok(())
            }
            SubmissionState::Idle => Err(TransitionError::NotStarted),
            _ => Err(TransitionError::Settled),
        }
    }

    /// Settle as `Failed`
    ///
    /// Legal from `Idle` too: a validation rejection fails the submission
    /// without it ever having been in flight.
    pub fn fail(&mut self, error: ClientError) -> Result<(), TransitionError> {
        match self.state {
            SubmissionState::Idle | SubmissionState::Submitting => {
                self.state = SubmissionState::Failed(error);
                Ok(())
            }
            _ => Err(TransitionError::Settled),
        }
    }

    /// Drive one request through the full lifecycle against a client
    pub async fn run(client: &HedgeFundClient, request: &AnalysisRequest) -> Self {
        let mut submission = Self::new();

        if let Err(err) = request.validate() {
            let _ = submission.fail(err.into());
            return submission;
        }

        let _ = submission.begin();
        match client.submit(request).await {
            Ok(result) => {
                let _ = submission.succeed(result);
            }
            Err(err) => {
                let _ = submission.fail(err);
            }
        }
        submission
    }
}
