use async_trait::async_trait;
use expense_core_db::models::ledger::FinancialRecordModel;
use expense_core_db::repository::create::Create;
use std::error::Error;

use super::repo_impl::{FinancialRecordRepositoryImpl, RECORD_COLUMNS};

impl FinancialRecordRepositoryImpl {
    pub(super) async fn create_impl(
        repo: &FinancialRecordRepositoryImpl,
        item: FinancialRecordModel,
    ) -> Result<FinancialRecordModel, Box<dyn Error + Send + Sync>> {
        item.audit_log_id
            .ok_or("audit_log_id is required for FinancialRecordModel")?;
        if !item.is_sealed() {
            return Err("FinancialRecordModel must be sealed before it is stored".into());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        // audit snapshot first, then the chain row
        for table in ["financial_record_audit", "financial_record"] {
            let statement = format!(
                "INSERT INTO {table} ({RECORD_COLUMNS}) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"
            );
            sqlx::query(&statement)
                .bind(item.id)
                .bind(item.sequence)
                .bind(item.description.as_str())
                .bind(item.amount)
                .bind(item.category.as_str())
                .bind(item.transaction_type)
                .bind(item.attachment_url.as_deref())
                .bind(item.owner_id)
                .bind(item.created_at)
                .bind(item.prev_hash.as_str())
                .bind(item.hash.as_str())
                .bind(item.status)
                .bind(item.action_by)
                .bind(item.audit_log_id)
                .execute(&mut **transaction)
                .await?;
        }

        Ok(item)
    }
}

#[async_trait]
impl Create<FinancialRecordModel> for FinancialRecordRepositoryImpl {
    async fn create(&self, item: FinancialRecordModel) -> Result<FinancialRecordModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, item).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{append_test_record, create_test_audit_log, create_test_record};
    use crate::test_helper::setup_test_context;
    use expense_core_db::chain::linker::seal;
    use expense_core_db::repository::{Create, Load};
    use rust_decimal::Decimal;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_create_and_load() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let record = append_test_record(&ctx, "lunch", Decimal::new(100, 0)).await?;

        let loaded = ctx.financial_record_repository.load(record.id).await?;
        assert_eq!(loaded.as_ref(), Some(&record));

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_fork_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let first = append_test_record(&ctx, "lunch", Decimal::new(100, 0)).await?;

        let audit_log = create_test_audit_log();
        ctx.audit_log_repository.create(audit_log.clone()).await?;

        // a second record claiming the same predecessor as `first`
        let mut fork = create_test_record("taxi", Decimal::new(45, 0));
        seal(&mut fork, None)?;
        fork.prev_hash = first.prev_hash.clone();
        fork.sequence = first.sequence + 1;
        fork.audit_log_id = Some(audit_log.id);

        assert!(ctx.financial_record_repository.create(fork).await.is_err());

        Ok(())
    }
}
