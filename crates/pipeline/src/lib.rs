//! Generation job orchestration.
//!
//! [`orchestrator::TaskOrchestrator`] ties together cost calculation,
//! credit debits and refunds, provider submission, and status tracking.
//! Persistence and accounting are collaborators behind
//! [`store::JobStore`] and [`ledger::CreditLedger`].

pub mod error;
pub mod job;
pub mod ledger;
pub mod orchestrator;
pub mod store;
pub mod sweep;

pub use error::PipelineError;
pub use job::GenerationJob;
pub use orchestrator::TaskOrchestrator;
