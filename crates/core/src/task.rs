//! Provider task lifecycle.
//!
//! ```text
//! Submitted -> Running -> Succeeded
//!          \           \-> Failed
//!           \-----------> Succeeded | Failed
//! ```
//!
//! `Succeeded` and `Failed` are terminal. Once a task reaches either, later
//! reports are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Submitted,
    Running,
    Succeeded,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Status after the provider reports `reported`.
    ///
    /// Terminal statuses never change, and a running task does not fall
    /// back to submitted when the provider reports it as queued again.
    pub fn next(self, reported: TaskStatus) -> TaskStatus {
        match (self, reported) {
            (current, _) if current.is_terminal() => current,
            (Self::Running, Self::Submitted) => Self::Running,
            (_, reported) => reported,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a provider's raw state string onto [`TaskStatus`].
///
/// Unknown states are treated as still running so that an unfamiliar
/// intermediate state never ends a job.
pub fn normalize_state(raw: &str) -> TaskStatus {
    match raw.trim().to_ascii_lowercase().as_str() {
        "success" | "succeeded" | "completed" => TaskStatus::Succeeded,
        "fail" | "failed" | "error" | "create_task_failed" | "generate_failed" => {
            TaskStatus::Failed
        }
        "waiting" | "queuing" | "queued" | "pending" => TaskStatus::Submitted,
        _ => TaskStatus::Running,
    }
}

/// Opaque identifier the provider assigned at submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderJobHandle(String);

impl ProviderJobHandle {
    pub fn new(provider_task_id: impl Into<String>) -> Result<Self, CoreError> {
        let id = provider_task_id.into();
        if id.trim().is_empty() {
            return Err(CoreError::Validation(
                "Provider task id must not be empty".into(),
            ));
        }
        Ok(Self(id))
    }

    pub fn provider_task_id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderJobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-reported failure, passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl FailureDetail {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.message.is_none()
    }
}

/// One observation of a provider task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOutcome {
    pub status: TaskStatus,
    /// Present only when `status` is `Succeeded`.
    #[serde(default)]
    pub result_urls: Vec<String>,
    /// Present only when `status` is `Failed`.
    #[serde(default)]
    pub failure: Option<FailureDetail>,
}

impl PollOutcome {
    pub fn in_progress(status: TaskStatus) -> Self {
        Self {
            status,
            result_urls: Vec::new(),
            failure: None,
        }
    }

    pub fn succeeded(result_urls: Vec<String>) -> Self {
        Self {
            status: TaskStatus::Succeeded,
            result_urls,
            failure: None,
        }
    }

    pub fn failed(failure: FailureDetail) -> Self {
        Self {
            status: TaskStatus::Failed,
            result_urls: Vec::new(),
            failure: Some(failure),
        }
    }
}
