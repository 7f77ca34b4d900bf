use ocgen_core::constraints::ConstraintViolation;
use ocgen_core::error::CoreError;
use ocgen_providers::callback::CallbackError;
use ocgen_providers::ProviderError;

use crate::ledger::LedgerError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Callback(#[from] CallbackError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No job found for {0}")]
    NotFound(String),
}

impl PipelineError {
    /// Whether repeating the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_retryable(),
            Self::Ledger(LedgerError::Unavailable(_)) | Self::Store(StoreError::Unavailable(_)) => true,
            _ => false,
        }
    }
}
