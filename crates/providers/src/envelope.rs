//! Wire types for the upstream jobs API.
//!
//! Every response is wrapped as `{code, msg | message, data}`. The envelope
//! is read first and `data` is only decoded once `code` reports success, so
//! a rejection keeps its code and message whatever `data` holds.
//!
//! Task records carry the result URLs as a JSON string in `resultJson`,
//! which is decoded a second time here. The GPT image API returns its own
//! record shape, [`GptImageRecord`].

use serde::de::DeserializeOwned;
use serde::Deserialize;

use ocgen_core::task::{normalize_state, FailureDetail, PollOutcome, TaskStatus};

/// Business success code inside the envelope.
pub const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: i64,
    pub msg: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Provider message, preferring `message` over `msg`.
    pub fn message(&self) -> String {
        self.message
            .as_deref()
            .or(self.msg.as_deref())
            .filter(|m| !m.is_empty())
            .unwrap_or("Unknown business error")
            .to_string()
    }

    /// Decode `data` as `T`. A missing or `null` payload is `Ok(None)`.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        match &self.data {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => T::deserialize(value).map(Some),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskData {
    pub task_id: Option<String>,
}

/// A task record from `recordInfo`, also the `data` of a webhook callback.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordData {
    pub task_id: Option<String>,
    pub state: Option<String>,
    pub result_json: Option<String>,
    pub fail_msg: Option<String>,
    pub fail_code: Option<serde_json::Value>,
    /// Older callback shape: result URLs under `info.result_urls`.
    pub info: Option<RecordInfo>,
}

#[derive(Debug, Deserialize)]
pub struct RecordInfo {
    #[serde(default)]
    pub result_urls: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultPayload {
    #[serde(default)]
    result_urls: Vec<String>,
}

impl RecordData {
    /// Convert to a [`PollOutcome`]. `Err` carries a description of why the
    /// record is unusable.
    pub fn to_outcome(&self) -> Result<PollOutcome, String> {
        let legacy_urls = self.legacy_urls();
        let status = match self.state.as_deref() {
            Some(state) => normalize_state(state),
            None if !legacy_urls.is_empty() => TaskStatus::Succeeded,
            None => return Err("task record has no state".into()),
        };

        match status {
            TaskStatus::Succeeded => {
                let urls = match self.result_json.as_deref() {
                    Some(raw) if !raw.trim().is_empty() => {
                        serde_json::from_str::<ResultPayload>(raw)
                            .map_err(|e| format!("resultJson is not valid: {e}"))?
                            .result_urls
                    }
                    _ => legacy_urls,
                };
                if urls.is_empty() {
                    return Err("task succeeded without result URLs".into());
                }
                Ok(PollOutcome::succeeded(urls))
            }
            TaskStatus::Failed => Ok(PollOutcome::failed(FailureDetail {
                code: self.fail_code.as_ref().and_then(code_to_string),
                message: self.fail_msg.clone().filter(|m| !m.is_empty()),
            })),
            in_progress => Ok(PollOutcome::in_progress(in_progress)),
        }
    }

    fn legacy_urls(&self) -> Vec<String> {
        self.info
            .iter()
            .flat_map(|info| info.result_urls.iter())
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    }
}

/// A task record from the GPT image API's `record-info`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GptImageRecord {
    pub task_id: Option<String>,
    #[serde(alias = "status")]
    pub state: Option<String>,
    /// `0` generating, `1` succeeded, `2` failed.
    pub success_flag: Option<i64>,
    pub response: Option<GptImageResponse>,
    pub error_message: Option<String>,
    pub error_code: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GptImageResponse {
    #[serde(default)]
    pub result_urls: Vec<String>,
}

impl GptImageRecord {
    pub fn to_outcome(&self) -> Result<PollOutcome, String> {
        let status = match (self.state.as_deref(), self.success_flag) {
            (Some(state), _) => normalize_state(state),
            (None, Some(1)) => TaskStatus::Succeeded,
            (None, Some(2 | 3)) => TaskStatus::Failed,
            (None, Some(_)) => TaskStatus::Running,
            (None, None) => return Err("task record has no state".into()),
        };

        match status {
            TaskStatus::Succeeded => {
                let urls = self
                    .response
                    .as_ref()
                    .map(|r| r.result_urls.clone())
                    .unwrap_or_default();
                if urls.is_empty() {
                    return Err("task succeeded without result URLs".into());
                }
                Ok(PollOutcome::succeeded(urls))
            }
            TaskStatus::Failed => Ok(PollOutcome::failed(FailureDetail {
                code: self.error_code.as_ref().and_then(code_to_string),
                message: self.error_message.clone().filter(|m| !m.is_empty()),
            })),
            in_progress => Ok(PollOutcome::in_progress(in_progress)),
        }
    }
}

/// `failCode` arrives as either a string or a number.
fn code_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
