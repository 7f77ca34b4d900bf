//! The provider adapter interface.
//!
//! Every provider exposes the same three operations through
//! [`GenerationProvider`]. Providers on the upstream task APIs differ only
//! in how a validated request becomes a wire body and which API they call,
//! so they are all [`KieAdapter`]s parameterised by a [`RequestMapper`].

use async_trait::async_trait;

use ocgen_core::constraints::{self, ConstraintViolation, ValidatedParams};
use ocgen_core::images::select_images;
use ocgen_core::pricing::{self, CostResult};
use ocgen_core::provider::ProviderKind;
use ocgen_core::task::{PollOutcome, ProviderJobHandle};
use ocgen_core::types::GenerationRequest;

use crate::client::{KieClient, TaskApi};
use crate::error::ProviderError;

/// Uniform operations on one provider.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Pure; validation runs first.
    fn calculate_cost(&self, request: &GenerationRequest) -> Result<CostResult, ConstraintViolation> {
        pricing::calculate_cost(self.kind(), request)
    }

    /// Wire body that [`submit`](Self::submit) would send.
    fn build_request(
        &self,
        request: &GenerationRequest,
        callback_target: &str,
    ) -> Result<serde_json::Value, ConstraintViolation>;

    /// Create the upstream task. One outbound call, no retries.
    async fn submit(
        &self,
        request: &GenerationRequest,
        callback_target: &str,
    ) -> Result<ProviderJobHandle, ProviderError>;

    /// Read the task's current state. One outbound call, no retries.
    async fn poll(&self, handle: &ProviderJobHandle) -> Result<PollOutcome, ProviderError>;
}

/// Builds one provider's wire body from admitted parameters.
pub trait RequestMapper: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn api(&self) -> TaskApi {
        TaskApi::Jobs
    }

    /// `images` is already ordered and truncated to the provider's cap.
    fn build_body(
        &self,
        request: &GenerationRequest,
        params: &ValidatedParams,
        images: &[String],
        callback_target: &str,
    ) -> serde_json::Value;
}

/// Validate, select images, then map. No I/O.
pub fn map_request<M: RequestMapper + ?Sized>(
    mapper: &M,
    request: &GenerationRequest,
    callback_target: &str,
) -> Result<serde_json::Value, ConstraintViolation> {
    let kind = mapper.kind();
    let params = constraints::validate(kind, request)?;
    let rule = &constraints::table_for(kind).images;
    let images = select_images(request, rule);

    let supplied = request
        .reference_image_urls
        .iter()
        .chain(request.character_image_url.iter())
        .filter(|url| !url.trim().is_empty())
        .count();
    if supplied > images.len() {
        tracing::debug!(
            provider = %kind,
            supplied,
            kept = images.len(),
            "Dropped images beyond provider cap",
        );
    }

    Ok(mapper.build_body(request, &params, &images, callback_target))
}

/// Adapter for any provider served by the shared jobs API.
pub struct KieAdapter<M> {
    client: KieClient,
    mapper: M,
}

impl<M: RequestMapper> KieAdapter<M> {
    pub fn new(client: KieClient, mapper: M) -> Self {
        Self { client, mapper }
    }
}

#[async_trait]
impl<M: RequestMapper> GenerationProvider for KieAdapter<M> {
    fn kind(&self) -> ProviderKind {
        self.mapper.kind()
    }

    fn build_request(
        &self,
        request: &GenerationRequest,
        callback_target: &str,
    ) -> Result<serde_json::Value, ConstraintViolation> {
        map_request(&self.mapper, request, callback_target)
    }

    async fn submit(
        &self,
        request: &GenerationRequest,
        callback_target: &str,
    ) -> Result<ProviderJobHandle, ProviderError> {
        let body = self.build_request(request, callback_target)?;
        let handle = self
            .client
            .create_task(self.kind(), self.mapper.api(), &body)
            .await?;
        tracing::info!(provider = %self.kind(), task_id = %handle, "Provider task created");
        Ok(handle)
    }

    async fn poll(&self, handle: &ProviderJobHandle) -> Result<PollOutcome, ProviderError> {
        self.client
            .record_info(self.kind(), self.mapper.api(), handle)
            .await
    }
}
