//! The orchestrator's record of one generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ocgen_core::provider::ProviderKind;
use ocgen_core::task::{FailureDetail, PollOutcome, ProviderJobHandle, TaskStatus};
use ocgen_core::types::GenerationRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationJob {
    pub id: Uuid,
    /// Account that was charged for the job.
    pub owner: String,
    pub provider: ProviderKind,
    pub request: GenerationRequest,
    pub callback_target: String,
    pub handle: ProviderJobHandle,
    pub status: TaskStatus,
    /// Credits debited at submission.
    pub cost: u64,
    pub result_urls: Vec<String>,
    pub failure: Option<FailureDetail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Effect of applying one provider observation to a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Status did not change.
    Unchanged,
    /// Moved between non-terminal statuses.
    Progressed,
    Succeeded,
    Failed,
}

impl GenerationJob {
    /// A freshly submitted job.
    pub fn submitted(
        id: Uuid,
        owner: impl Into<String>,
        provider: ProviderKind,
        request: GenerationRequest,
        callback_target: impl Into<String>,
        handle: ProviderJobHandle,
        cost: u64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner: owner.into(),
            provider,
            request,
            callback_target: callback_target.into(),
            handle,
            status: TaskStatus::Submitted,
            cost,
            result_urls: Vec::new(),
            failure: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply a provider observation through the task state machine.
    pub fn apply(&mut self, outcome: PollOutcome) -> Transition {
        let next = self.status.next(outcome.status);
        if next == self.status {
            return Transition::Unchanged;
        }

        let now = Utc::now();
        self.status = next;
        self.updated_at = now;

        match next {
            TaskStatus::Succeeded => {
                self.result_urls = outcome.result_urls;
                self.completed_at = Some(now);
                Transition::Succeeded
            }
            TaskStatus::Failed => {
                self.failure = Some(outcome.failure.unwrap_or_default());
                self.completed_at = Some(now);
                Transition::Failed
            }
            TaskStatus::Submitted | TaskStatus::Running => Transition::Progressed,
        }
    }
}
