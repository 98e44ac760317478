//! Process-local ledger backend.
//!
//! The ledger is a single arena of records in chain order plus an id index.
//! A session takes the ledger mutex for its whole lifetime and works on a
//! staged copy that replaces the shared state on commit, so sessions are fully
//! serialized and an uncommitted append is never visible to anyone else.

mod repo_impl;

use async_trait::async_trait;
use parking_lot::Mutex as ParkingMutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::models::audit::AuditLogModel;
use crate::models::ledger::FinancialRecordModel;
use crate::repository::session::{ChainSession, ChainSessionFactory};

#[derive(Debug, Clone, Default)]
pub(crate) struct LedgerState {
    /// Records in `sequence` order
    records: Vec<FinancialRecordModel>,
    index: HashMap<Uuid, usize>,
    /// Record snapshots, in insertion order
    record_audits: Vec<FinancialRecordModel>,
    audit_logs: HashMap<Uuid, AuditLogModel>,
}

/// Shared handle to an in-memory chain; clones see the same ledger
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Committed records in chain order
    #[cfg(test)]
    pub(crate) async fn snapshot(&self) -> Vec<FinancialRecordModel> {
        self.state.lock().await.records.clone()
    }

    /// Writes straight into the arena, bypassing hashing and linking, the way
    /// someone with direct store access would.
    #[cfg(test)]
    pub(crate) async fn overwrite_record(&self, record: FinancialRecordModel) {
        let mut state = self.state.lock().await;
        if let Some(&position) = state.index.get(&record.id) {
            state.records[position] = record;
        }
    }
}

#[async_trait]
impl ChainSessionFactory for InMemoryLedger {
    type Session = InMemorySession;

    async fn begin(&self) -> Result<InMemorySession, Box<dyn std::error::Error + Send + Sync>> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(InMemorySession {
            guard,
            staged: ParkingMutex::new(staged),
        })
    }
}

/// Exclusive session over an [`InMemoryLedger`]
pub struct InMemorySession {
    guard: OwnedMutexGuard<LedgerState>,
    staged: ParkingMutex<LedgerState>,
}

#[async_trait]
impl ChainSession for InMemorySession {
    type Records = InMemorySession;
    type AuditLogs = InMemorySession;

    fn records(&self) -> &Self::Records {
        self
    }

    fn audit_logs(&self) -> &Self::AuditLogs {
        self
    }

    async fn commit(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let InMemorySession { mut guard, staged } = self;
        *guard = staged.into_inner();
        Ok(())
    }

    async fn rollback(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
