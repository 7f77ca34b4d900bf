//! Credit accounting collaborator.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

/// One debit or refund, tied to the job it pays for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Charge {
    pub job_id: Uuid,
    pub owner: String,
    pub amount: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Insufficient credits for {owner}: need {needed}, have {available}")]
    Insufficient {
        owner: String,
        needed: u64,
        available: u64,
    },

    #[error("Credit ledger unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CreditLedger: Send + Sync {
    async fn debit(&self, charge: &Charge) -> Result<(), LedgerError>;

    async fn refund(&self, charge: &Charge) -> Result<(), LedgerError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Debit,
    Refund,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    pub charge: Charge,
}

/// Balances held in memory, with a full entry history.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: Mutex<LedgerState>,
}

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<String, u64>,
    entries: Vec<LedgerEntry>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn grant(&self, owner: &str, amount: u64) {
        let mut state = self.inner.lock().await;
        *state.balances.entry(owner.to_string()).or_default() += amount;
    }

    pub async fn balance(&self, owner: &str) -> u64 {
        self.inner.lock().await.balances.get(owner).copied().unwrap_or(0)
    }

    pub async fn entries(&self) -> Vec<LedgerEntry> {
        self.inner.lock().await.entries.clone()
    }
}

#[async_trait]
impl CreditLedger for InMemoryLedger {
    async fn debit(&self, charge: &Charge) -> Result<(), LedgerError> {
        let mut state = self.inner.lock().await;
        let balance = state.balances.entry(charge.owner.clone()).or_default();
        if *balance < charge.amount {
            return Err(LedgerError::Insufficient {
                owner: charge.owner.clone(),
                needed: charge.amount,
                available: *balance,
            });
        }
        *balance -= charge.amount;
        state.entries.push(LedgerEntry {
            kind: EntryKind::Debit,
            charge: charge.clone(),
        });
        Ok(())
    }

    async fn refund(&self, charge: &Charge) -> Result<(), LedgerError> {
        let mut state = self.inner.lock().await;
        *state.balances.entry(charge.owner.clone()).or_default() += charge.amount;
        state.entries.push(LedgerEntry {
            kind: EntryKind::Refund,
            charge: charge.clone(),
        });
        Ok(())
    }
}
