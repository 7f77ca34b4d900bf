//! Task orchestration: quote, submit, poll, and webhook application.
//!
//! The orchestrator owns the provider handle after submission and is the
//! only writer of job status. Polling cadence belongs to the caller (see
//! [`PollSweeper`](crate::sweep::PollSweeper)); nothing here sleeps,
//! retries, or times a job out.

use std::sync::Arc;

use uuid::Uuid;

use ocgen_core::pricing::CostResult;
use ocgen_core::task::{PollOutcome, TaskStatus};
use ocgen_core::types::GenerationRequest;
use ocgen_providers::callback::parse_callback;
use ocgen_providers::ProviderLookup;

use crate::error::PipelineError;
use crate::job::{GenerationJob, Transition};
use crate::ledger::{Charge, CreditLedger};
use crate::store::JobStore;

pub struct TaskOrchestrator {
    providers: Arc<dyn ProviderLookup>,
    store: Arc<dyn JobStore>,
    ledger: Arc<dyn CreditLedger>,
}

impl TaskOrchestrator {
    pub fn new(
        providers: Arc<dyn ProviderLookup>,
        store: Arc<dyn JobStore>,
        ledger: Arc<dyn CreditLedger>,
    ) -> Self {
        Self {
            providers,
            store,
            ledger,
        }
    }

    /// Price a request without side effects.
    pub fn quote(&self, request: &GenerationRequest) -> Result<CostResult, PipelineError> {
        let adapter = self.providers.resolve(&request.model_identifier)?;
        Ok(adapter.calculate_cost(request)?)
    }

    /// Debit, submit upstream, and record the job.
    ///
    /// When the provider refuses the task, the debit is refunded before the
    /// error is returned.
    pub async fn submit(
        &self,
        owner: &str,
        request: GenerationRequest,
        callback_target: &str,
    ) -> Result<GenerationJob, PipelineError> {
        let adapter = self.providers.resolve(&request.model_identifier)?;
        let provider = adapter.kind();
        let cost = adapter.calculate_cost(&request)?;

        let charge = Charge {
            job_id: Uuid::now_v7(),
            owner: owner.to_string(),
            amount: cost.amount,
        };
        self.ledger.debit(&charge).await?;

        let handle = match adapter.submit(&request, callback_target).await {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(
                    job_id = %charge.job_id,
                    %provider,
                    retryable = e.is_retryable(),
                    error = %e,
                    "Provider submission failed, refunding",
                );
                self.refund(&charge).await;
                return Err(e.into());
            }
        };

        let job = GenerationJob::submitted(
            charge.job_id,
            owner,
            provider,
            request,
            callback_target,
            handle,
            cost.amount,
        );
        if let Err(e) = self.store.insert(job.clone()).await {
            // The upstream task already exists, so the debit stands.
            tracing::error!(
                job_id = %job.id,
                task_id = %job.handle,
                error = %e,
                "Failed to record submitted job",
            );
            return Err(e.into());
        }

        tracing::info!(
            job_id = %job.id,
            %provider,
            task_id = %job.handle,
            cost = job.cost,
            "Generation job submitted",
        );
        Ok(job)
    }

    /// Query the provider once and apply the result.
    ///
    /// Terminal jobs are returned as stored without contacting the provider.
    pub async fn poll(&self, job_id: Uuid) -> Result<GenerationJob, PipelineError> {
        let job = self
            .store
            .get(job_id)
            .await?
            .ok_or_else(|| PipelineError::NotFound(job_id.to_string()))?;
        if job.is_terminal() {
            return Ok(job);
        }

        let outcome = self.providers.adapter(job.provider).poll(&job.handle).await?;
        self.apply_outcome(job, outcome).await
    }

    /// Apply a provider webhook body to the job it names.
    pub async fn apply_callback(&self, body: &str) -> Result<GenerationJob, PipelineError> {
        let update = parse_callback(body)?;
        let task_id = update.handle.provider_task_id();
        let job = self
            .store
            .find_by_task_id(task_id)
            .await?
            .ok_or_else(|| PipelineError::NotFound(format!("provider task {task_id}")))?;
        if job.is_terminal() {
            tracing::debug!(job_id = %job.id, status = %job.status, "Callback for finished job ignored");
            return Ok(job);
        }
        self.apply_outcome(job, update.outcome).await
    }

    /// Jobs the sweeper should poll.
    pub async fn active_jobs(&self) -> Result<Vec<GenerationJob>, PipelineError> {
        Ok(self.store.list_active().await?)
    }

    async fn apply_outcome(
        &self,
        mut job: GenerationJob,
        outcome: PollOutcome,
    ) -> Result<GenerationJob, PipelineError> {
        let previous: TaskStatus = job.status;
        let transition = job.apply(outcome);
        if transition == Transition::Unchanged {
            return Ok(job);
        }

        if !self.store.update(&job, previous).await? {
            // A concurrent poll or callback already moved the job.
            return self
                .store
                .get(job.id)
                .await?
                .ok_or_else(|| PipelineError::NotFound(job.id.to_string()));
        }

        tracing::info!(
            job_id = %job.id,
            provider = %job.provider,
            from = %previous,
            to = %job.status,
            "Job status changed",
        );

        if transition == Transition::Failed {
            let failure = job.failure.clone().unwrap_or_default();
            tracing::warn!(
                job_id = %job.id,
                code = failure.code.as_deref().unwrap_or(""),
                message = failure.message.as_deref().unwrap_or(""),
                "Generation failed, refunding",
            );
            self.refund(&Charge {
                job_id: job.id,
                owner: job.owner.clone(),
                amount: job.cost,
            })
            .await;
        }

        Ok(job)
    }

    /// Refund failures are logged, never surfaced over the original outcome.
    async fn refund(&self, charge: &Charge) {
        if let Err(e) = self.ledger.refund(charge).await {
            tracing::error!(
                job_id = %charge.job_id,
                owner = %charge.owner,
                amount = charge.amount,
                error = %e,
                "Refund failed",
            );
        }
    }
}
