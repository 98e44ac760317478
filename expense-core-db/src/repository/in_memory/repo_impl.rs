use async_trait::async_trait;
use expense_core_api::domain::TransactionStatus;
use std::error::Error;
use uuid::Uuid;

use super::InMemorySession;
use crate::models::audit::AuditLogModel;
use crate::models::ledger::{ChainEntry, FinancialRecordModel};
use crate::repository::{
    create::Create,
    find_chain_tail::FindChainTail,
    load::Load,
    load_audits::LoadAudits,
    load_chain::LoadChain,
    pagination::{Page, PageRequest},
    update_status::UpdateStatus,
};

#[async_trait]
impl FindChainTail for InMemorySession {
    async fn lock_chain(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        // the session already holds the ledger exclusively
        Ok(())
    }

    async fn find_chain_tail(&self) -> Result<Option<FinancialRecordModel>, Box<dyn Error + Send + Sync>> {
        Ok(self.staged.lock().records.last().cloned())
    }
}

#[async_trait]
impl LoadChain for InMemorySession {
    async fn load_chain(&self) -> Result<Vec<ChainEntry>, Box<dyn Error + Send + Sync>> {
        Ok(self.staged.lock().records.iter().cloned().map(ChainEntry::from).collect())
    }
}

#[async_trait]
impl Load<FinancialRecordModel> for InMemorySession {
    async fn load(&self, id: Uuid) -> Result<Option<FinancialRecordModel>, Box<dyn Error + Send + Sync>> {
        let state = self.staged.lock();
        Ok(state.index.get(&id).map(|&position| state.records[position].clone()))
    }
}

#[async_trait]
impl Create<FinancialRecordModel> for InMemorySession {
    async fn create(&self, item: FinancialRecordModel) -> Result<FinancialRecordModel, Box<dyn Error + Send + Sync>> {
        let audit_log_id = item.audit_log_id.ok_or("audit_log_id is required for FinancialRecordModel")?;
        let mut state = self.staged.lock();

        if !state.audit_logs.contains_key(&audit_log_id) {
            return Err(format!("audit log {audit_log_id} does not exist").into());
        }
        if state.index.contains_key(&item.id) {
            return Err(format!("record {} already exists", item.id).into());
        }
        // same guarantees as the unique constraints of the SQL schema
        if state.records.iter().any(|r| r.sequence == item.sequence) {
            return Err(format!("sequence {} is already taken", item.sequence).into());
        }
        if state.records.iter().any(|r| r.prev_hash == item.prev_hash) {
            return Err(format!("prev_hash {} is already linked", item.prev_hash).into());
        }

        let position = state.records.len();
        state.index.insert(item.id, position);
        state.records.push(item.clone());
        state.record_audits.push(item.clone());
        Ok(item)
    }
}

#[async_trait]
impl UpdateStatus for InMemorySession {
    async fn update_status(
        &self,
        item: &FinancialRecordModel,
        expected_hash: &str,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let mut state = self.staged.lock();
        let Some(&position) = state.index.get(&item.id) else {
            return Ok(false);
        };

        let stored = &mut state.records[position];
        if stored.status != TransactionStatus::Pending || stored.hash.as_str() != expected_hash {
            return Ok(false);
        }
        stored.status = item.status;
        stored.action_by = item.action_by;
        stored.hash = item.hash.clone();
        stored.audit_log_id = item.audit_log_id;

        let snapshot = stored.clone();
        state.record_audits.push(snapshot);
        Ok(true)
    }
}

#[async_trait]
impl LoadAudits<FinancialRecordModel> for InMemorySession {
    async fn load_audits(&self, id: Uuid, page: PageRequest) -> Result<Page<FinancialRecordModel>, Box<dyn Error + Send + Sync>> {
        let state = self.staged.lock();
        let newest_first: Vec<FinancialRecordModel> = state
            .record_audits
            .iter()
            .rev()
            .filter(|snapshot| snapshot.id == id)
            .cloned()
            .collect();
        Ok(Page::from_ordered(newest_first, page))
    }
}

#[async_trait]
impl Create<AuditLogModel> for InMemorySession {
    async fn create(&self, item: AuditLogModel) -> Result<AuditLogModel, Box<dyn Error + Send + Sync>> {
        let mut state = self.staged.lock();
        if state.audit_logs.contains_key(&item.id) {
            return Err(format!("audit log {} already exists", item.id).into());
        }
        state.audit_logs.insert(item.id, item.clone());
        Ok(item)
    }
}

#[async_trait]
impl Load<AuditLogModel> for InMemorySession {
    async fn load(&self, id: Uuid) -> Result<Option<AuditLogModel>, Box<dyn Error + Send + Sync>> {
        Ok(self.staged.lock().audit_logs.get(&id).cloned())
    }
}
