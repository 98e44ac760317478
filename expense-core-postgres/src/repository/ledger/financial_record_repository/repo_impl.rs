use async_trait::async_trait;
use expense_core_db::models::ledger::FinancialRecordModel;
use expense_core_db::repository::{load::Load, load_batch::LoadBatch};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};

pub struct FinancialRecordRepositoryImpl {
    pub(crate) executor: Executor,
}

impl FinancialRecordRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

/// Columns shared by `financial_record` and `financial_record_audit`
pub(crate) const RECORD_COLUMNS: &str = "id, sequence, description, amount, category, \
    transaction_type, attachment_url, owner_id, created_at, prev_hash, hash, status, \
    action_by, audit_log_id";

impl TryFromRow<PgRow> for FinancialRecordModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(FinancialRecordModel {
            id: row.try_get("id")?,
            sequence: row.try_get("sequence")?,
            description: get_heapless_string(row, "description")?,
            amount: row.try_get("amount")?,
            category: get_heapless_string(row, "category")?,
            transaction_type: row.try_get("transaction_type")?,
            attachment_url: get_optional_heapless_string(row, "attachment_url")?,
            owner_id: row.try_get("owner_id")?,
            created_at: row.try_get("created_at")?,
            prev_hash: get_heapless_string(row, "prev_hash")?,
            hash: get_heapless_string(row, "hash")?,
            status: row.try_get("status")?,
            action_by: row.try_get("action_by")?,
            audit_log_id: row.try_get("audit_log_id")?,
        })
    }
}

#[async_trait]
impl Load<FinancialRecordModel> for FinancialRecordRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<FinancialRecordModel>, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        Ok(results.into_iter().next().flatten())
    }
}

#[async_trait]
impl LoadBatch<FinancialRecordModel> for FinancialRecordRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<FinancialRecordModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
