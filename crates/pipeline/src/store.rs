//! Job persistence.
//!
//! The orchestrator only needs a handful of operations, expressed as the
//! [`JobStore`] trait. [`InMemoryJobStore`] backs the CLI and the tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ocgen_core::task::TaskStatus;

use crate::job::GenerationJob;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Job {0} already exists")]
    Duplicate(Uuid),

    #[error("Job {0} does not exist")]
    Missing(Uuid),

    #[error("Job store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert(&self, job: GenerationJob) -> Result<(), StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<GenerationJob>, StoreError>;

    async fn find_by_task_id(&self, provider_task_id: &str)
        -> Result<Option<GenerationJob>, StoreError>;

    /// Replace the stored job only if its status is still `expected`.
    /// Returns `false` when another writer got there first.
    async fn update(&self, job: &GenerationJob, expected: TaskStatus) -> Result<bool, StoreError>;

    /// Every job that has not reached a terminal status.
    async fn list_active(&self) -> Result<Vec<GenerationJob>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<Uuid, GenerationJob>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn insert(&self, job: GenerationJob) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            return Err(StoreError::Duplicate(job.id));
        }
        jobs.insert(job.id, job);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<GenerationJob>, StoreError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn find_by_task_id(
        &self,
        provider_task_id: &str,
    ) -> Result<Option<GenerationJob>, StoreError> {
        Ok(self
            .jobs
            .read()
            .await
            .values()
            .find(|j| j.handle.provider_task_id() == provider_task_id)
            .cloned())
    }

    async fn update(&self, job: &GenerationJob, expected: TaskStatus) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.write().await;
        let stored = jobs.get_mut(&job.id).ok_or(StoreError::Missing(job.id))?;
        if stored.status != expected {
            return Ok(false);
        }
        *stored = job.clone();
        Ok(true)
    }

    async fn list_active(&self) -> Result<Vec<GenerationJob>, StoreError> {
        let mut active: Vec<GenerationJob> = self
            .jobs
            .read()
            .await
            .values()
            .filter(|j| !j.is_terminal())
            .cloned()
            .collect();
        active.sort_by_key(|j| j.created_at);
        Ok(active)
    }
}
