use async_trait::async_trait;
use expense_core_db::models::ledger::FinancialRecordModel;
use expense_core_db::repository::find_chain_tail::FindChainTail;
use std::error::Error;

use super::repo_impl::{FinancialRecordRepositoryImpl, RECORD_COLUMNS};
use crate::utils::{hash_as_i64, TryFromRow};

/// Advisory lock key serializing appends to the record chain
pub fn chain_lock_key() -> i64 {
    hash_as_i64("expense_core.financial_record_chain")
}

#[async_trait]
impl FindChainTail for FinancialRecordRepositoryImpl {
    async fn lock_chain(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        // released by PostgreSQL when the transaction ends
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(chain_lock_key())
            .execute(&mut **transaction)
            .await?;
        Ok(())
    }

    async fn find_chain_tail(&self) -> Result<Option<FinancialRecordModel>, Box<dyn Error + Send + Sync>> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM financial_record ORDER BY sequence DESC LIMIT 1"
        );
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(&query).fetch_optional(&mut **transaction).await?
        };

        row.as_ref().map(FinancialRecordModel::try_from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::append_test_record;
    use crate::test_helper::setup_test_context;
    use expense_core_db::repository::FindChainTail;
    use rust_decimal::Decimal;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_tail_is_last_appended() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = &ctx.financial_record_repository;

        let first = append_test_record(&ctx, "lunch", Decimal::new(100, 0)).await?;
        let second = append_test_record(&ctx, "taxi", Decimal::new(45, 0)).await?;

        assert_eq!(second.prev_hash, first.hash);
        assert_eq!(second.sequence, first.sequence + 1);
        let tail = repo.find_chain_tail().await?;
        assert_eq!(tail.map(|record| record.id), Some(second.id));

        Ok(())
    }
}
