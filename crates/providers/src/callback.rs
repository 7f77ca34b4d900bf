//! Provider webhook payloads.
//!
//! The provider pushes the same record shape that `recordInfo` returns to
//! the `callBackUrl` given at submission. The GPT image API pushes the older
//! `info.result_urls` shape, which the same record type reads. Parsing yields the task handle
//! and the outcome; applying it is the orchestrator's job.

use ocgen_core::task::{FailureDetail, PollOutcome, ProviderJobHandle};

use crate::envelope::{Envelope, RecordData};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackUpdate {
    pub handle: ProviderJobHandle,
    pub outcome: PollOutcome,
}

#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error("Callback body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Callback payload has no taskId")]
    MissingTaskId,

    #[error("Callback payload for task {task_id} is unusable: {detail}")]
    Unusable { task_id: String, detail: String },
}

/// Parse a raw webhook body.
pub fn parse_callback(body: &str) -> Result<CallbackUpdate, CallbackError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    let code = envelope.code;
    let message = envelope.message();

    let data: RecordData = envelope.decode_data()?.ok_or(CallbackError::MissingTaskId)?;
    let task_id = data
        .task_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .ok_or(CallbackError::MissingTaskId)?;
    let handle = ProviderJobHandle::new(task_id.clone()).map_err(|_| CallbackError::MissingTaskId)?;

    // A stateless payload with a non-success code reports a failure.
    let outcome = if data.state.is_none() && code != crate::envelope::SUCCESS_CODE {
        PollOutcome::failed(FailureDetail {
            code: Some(code.to_string()),
            message: Some(message),
        })
    } else {
        data.to_outcome()
            .map_err(|detail| CallbackError::Unusable { task_id, detail })?
    };

    tracing::info!(task_id = %handle, status = %outcome.status, "Parsed provider callback");
    Ok(CallbackUpdate { handle, outcome })
}
