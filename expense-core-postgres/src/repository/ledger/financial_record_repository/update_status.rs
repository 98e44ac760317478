use async_trait::async_trait;
use expense_core_db::models::ledger::FinancialRecordModel;
use expense_core_db::repository::update_status::UpdateStatus;
use std::error::Error;

use super::repo_impl::{FinancialRecordRepositoryImpl, RECORD_COLUMNS};

impl FinancialRecordRepositoryImpl {
    pub(super) async fn update_status_impl(
        repo: &FinancialRecordRepositoryImpl,
        item: &FinancialRecordModel,
        expected_hash: &str,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let audit_log_id = item
            .audit_log_id
            .ok_or("audit_log_id is required for FinancialRecordModel")?;

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        // content columns are never written here
        let updated = sqlx::query(
            r#"
            UPDATE financial_record SET
                status = $2,
                action_by = $3,
                hash = $4,
                audit_log_id = $5
            WHERE id = $1
              AND hash = $6
              AND status = 'Pending'
            "#,
        )
        .bind(item.id)
        .bind(item.status)
        .bind(item.action_by)
        .bind(item.hash.as_str())
        .bind(audit_log_id)
        .bind(expected_hash)
        .execute(&mut **transaction)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(false);
        }

        let snapshot = format!(
            "INSERT INTO financial_record_audit ({RECORD_COLUMNS}) \
             SELECT {RECORD_COLUMNS} FROM financial_record WHERE id = $1"
        );
        sqlx::query(&snapshot)
            .bind(item.id)
            .execute(&mut **transaction)
            .await?;

        Ok(true)
    }
}

#[async_trait]
impl UpdateStatus for FinancialRecordRepositoryImpl {
    async fn update_status(
        &self,
        item: &FinancialRecordModel,
        expected_hash: &str,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        Self::update_status_impl(self, item, expected_hash).await
    }
}
