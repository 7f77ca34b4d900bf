//! Background poll loop for active jobs.
//!
//! Ticks every `interval`, polls each non-terminal job once with bounded
//! concurrency, and logs failures. A failed poll never ends a job; the job
//! is simply polled again on the next tick.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

use ocgen_core::task::TaskStatus;
use ocgen_providers::config::ConfigError;

use crate::error::PipelineError;
use crate::orchestrator::TaskOrchestrator;

#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Seconds between sweeps (default: `15`).
    pub interval_secs: u64,
    /// Polls in flight at once (default: `8`).
    pub concurrency: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: 15,
            concurrency: 8,
        }
    }
}

impl SweepConfig {
    /// | Env Var              | Default |
    /// |----------------------|---------|
    /// | `POLL_INTERVAL_SECS` | `15`    |
    /// | `POLL_CONCURRENCY`   | `8`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let interval_secs = parse_var("POLL_INTERVAL_SECS", defaults.interval_secs)?;
        let concurrency = parse_var("POLL_CONCURRENCY", defaults.concurrency as u64)?;
        if interval_secs == 0 || concurrency == 0 {
            return Err(ConfigError::Invalid {
                name: if interval_secs == 0 {
                    "POLL_INTERVAL_SECS"
                } else {
                    "POLL_CONCURRENCY"
                },
                reason: "must be greater than zero".into(),
            });
        }
        Ok(Self {
            interval_secs,
            concurrency: concurrency as usize,
        })
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

fn parse_var(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("'{raw}' is not a whole number"),
        }),
        Err(_) => Ok(default),
    }
}

/// Counts from one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub polled: usize,
    pub advanced: usize,
    pub completed: usize,
    pub errors: usize,
}

pub struct PollSweeper {
    orchestrator: Arc<TaskOrchestrator>,
    config: SweepConfig,
}

impl PollSweeper {
    pub fn new(orchestrator: Arc<TaskOrchestrator>, config: SweepConfig) -> Self {
        Self {
            orchestrator,
            config,
        }
    }

    /// Run until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.config.interval());
        tracing::info!(
            interval_ms = self.config.interval().as_millis() as u64,
            concurrency = self.config.concurrency,
            "Poll sweeper started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Poll sweeper shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    match self.sweep_once().await {
                        Ok(report) if report.polled > 0 => {
                            tracing::debug!(
                                polled = report.polled,
                                advanced = report.advanced,
                                completed = report.completed,
                                errors = report.errors,
                                "Sweep finished",
                            );
                        }
                        Ok(_) => {}
                        Err(e) => tracing::error!(error = %e, "Sweep cycle failed"),
                    }
                }
            }
        }
    }

    /// Poll every active job once.
    pub async fn sweep_once(&self) -> Result<SweepReport, PipelineError> {
        let active = self.orchestrator.active_jobs().await?;

        let results: Vec<(TaskStatus, Result<TaskStatus, PipelineError>)> = stream::iter(active)
            .map(|job| {
                let orchestrator = Arc::clone(&self.orchestrator);
                async move {
                    let before = job.status;
                    let after = orchestrator.poll(job.id).await.map(|j| j.status);
                    if let Err(e) = &after {
                        tracing::warn!(
                            job_id = %job.id,
                            provider = %job.provider,
                            retryable = e.is_retryable(),
                            error = %e,
                            "Poll failed",
                        );
                    }
                    (before, after)
                }
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut report = SweepReport {
            polled: results.len(),
            ..SweepReport::default()
        };
        for (before, after) in results {
            match after {
                Ok(status) if status.is_terminal() => report.completed += 1,
                Ok(status) if status != before => report.advanced += 1,
                Ok(_) => {}
                Err(_) => report.errors += 1,
            }
        }
        Ok(report)
    }
}
