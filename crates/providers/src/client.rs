//! HTTP client for the upstream task APIs.
//!
//! Wraps task creation and record lookup using [`reqwest`], and classifies
//! every failure into a [`ProviderError`] variant.

use std::time::Instant;

use serde::de::DeserializeOwned;

use ocgen_core::provider::ProviderKind;
use ocgen_core::task::{PollOutcome, ProviderJobHandle};

use crate::config::{ConfigError, ProviderConfig};
use crate::envelope::{CreateTaskData, Envelope, GptImageRecord, RecordData};
use crate::error::ProviderError;

/// Which upstream task API a provider lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskApi {
    /// The shared jobs API used by almost every model.
    Jobs,
    /// The dedicated GPT image API.
    GptImage,
}

impl TaskApi {
    fn create_path(self) -> &'static str {
        match self {
            Self::Jobs => "/api/v1/jobs/createTask",
            Self::GptImage => "/api/v1/gpt4o-image/generate",
        }
    }

    fn record_path(self) -> &'static str {
        match self {
            Self::Jobs => "/api/v1/jobs/recordInfo",
            Self::GptImage => "/api/v1/gpt4o-image/record-info",
        }
    }
}

/// Client for one upstream account, shared by every adapter.
#[derive(Debug, Clone)]
pub struct KieClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl KieClient {
    /// Build a client with the configured timeouts.
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Submit a task body. Returns the provider-assigned task id.
    pub async fn create_task(
        &self,
        provider: ProviderKind,
        api: TaskApi,
        body: &serde_json::Value,
    ) -> Result<ProviderJobHandle, ProviderError> {
        tracing::info!(
            %provider,
            model = body["model"].as_str().unwrap_or(provider.model_id()),
            "Creating provider task",
        );

        let request = self
            .client
            .post(format!("{}{}", self.base_url, api.create_path()))
            .bearer_auth(&self.api_key)
            .json(body);
        let (data, raw) = self
            .send::<CreateTaskData>(provider, "createTask", request)
            .await?;

        let task_id = data
            .and_then(|d| d.task_id)
            .ok_or_else(|| contract(provider, "taskId missing from successful response", raw.clone()))?;

        ProviderJobHandle::new(task_id).map_err(|e| contract(provider, &e.to_string(), raw))
    }

    /// Look up the current state of a task.
    pub async fn record_info(
        &self,
        provider: ProviderKind,
        api: TaskApi,
        handle: &ProviderJobHandle,
    ) -> Result<PollOutcome, ProviderError> {
        let request = self
            .client
            .get(format!("{}{}", self.base_url, api.record_path()))
            .query(&[("taskId", handle.provider_task_id())])
            .bearer_auth(&self.api_key);

        let outcome = match api {
            TaskApi::Jobs => {
                let (data, raw) = self.send::<RecordData>(provider, "recordInfo", request).await?;
                let data = data.ok_or_else(|| {
                    contract(provider, "data missing from successful response", raw.clone())
                })?;
                data.to_outcome().map_err(|detail| contract(provider, &detail, raw))?
            }
            TaskApi::GptImage => {
                let (data, raw) = self
                    .send::<GptImageRecord>(provider, "recordInfo", request)
                    .await?;
                let data = data.ok_or_else(|| {
                    contract(provider, "data missing from successful response", raw.clone())
                })?;
                data.to_outcome().map_err(|detail| contract(provider, &detail, raw))?
            }
        };

        tracing::debug!(%provider, task_id = %handle, status = %outcome.status, "Task state read");
        Ok(outcome)
    }

    // ---- private helpers ----

    /// Send a request and classify the answer:
    ///
    /// - network failure or timeout: [`ProviderError::Transport`]
    /// - non-2xx status, or an envelope whose `code` is not success:
    ///   [`ProviderError::Business`]
    /// - a 2xx body that is not an envelope, or a successful envelope whose
    ///   `data` does not decode as `T`: [`ProviderError::Contract`]
    ///
    /// Returns the decoded `data` and the raw body.
    async fn send<T: DeserializeOwned>(
        &self,
        provider: ProviderKind,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<(Option<T>, String), ProviderError> {
        let started = Instant::now();
        let transport = |source: reqwest::Error| {
            tracing::warn!(%provider, operation, timeout = source.is_timeout(), error = %source, "Provider request failed");
            ProviderError::Transport { provider, source }
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let raw = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(business(provider, i64::from(status.as_u16()), raw));
        }

        let envelope = match serde_json::from_str::<Envelope>(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                return Err(contract(provider, &format!("body is not a valid envelope: {e}"), raw))
            }
        };

        tracing::debug!(
            %provider,
            operation,
            code = envelope.code,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Provider responded",
        );

        if !envelope.is_success() {
            return Err(business(provider, envelope.code, envelope.message()));
        }

        match envelope.decode_data::<T>() {
            Ok(data) => Ok((data, raw)),
            Err(e) => Err(contract(provider, &format!("data has an unexpected shape: {e}"), raw)),
        }
    }
}

fn business(provider: ProviderKind, code: i64, message: String) -> ProviderError {
    tracing::warn!(%provider, code, message = %message, "Provider rejected request");
    ProviderError::Business {
        provider,
        code,
        message,
    }
}

fn contract(provider: ProviderKind, detail: &str, raw: String) -> ProviderError {
    tracing::error!(%provider, detail, raw = %raw, "Provider response violates contract");
    ProviderError::Contract {
        provider,
        detail: detail.to_string(),
        raw,
    }
}
