use async_trait::async_trait;
use expense_core_db::models::ledger::FinancialRecordModel;
use expense_core_db::repository::load_audits::LoadAudits;
use expense_core_db::repository::pagination::{Page, PageRequest};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::FinancialRecordRepositoryImpl;
use crate::utils::TryFromRow;

impl FinancialRecordRepositoryImpl {
    pub(super) async fn load_audits_impl(
        repo: &FinancialRecordRepositoryImpl,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<FinancialRecordModel>, Box<dyn Error + Send + Sync>> {
        let count_query = r#"SELECT COUNT(*) as count FROM financial_record_audit WHERE id = $1"#;
        let total: i64 = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query_scalar(count_query)
                .bind(id)
                .fetch_one(&mut **transaction)
                .await?
        };

        // newest change first, by the time of its audit log
        let query = r#"
            SELECT r.id, r.sequence, r.description, r.amount, r.category, r.transaction_type,
                   r.attachment_url, r.owner_id, r.created_at, r.prev_hash, r.hash, r.status,
                   r.action_by, r.audit_log_id
            FROM financial_record_audit r
            JOIN audit_log a ON a.id = r.audit_log_id
            WHERE r.id = $1
            ORDER BY a.updated_at DESC, r.audit_log_id DESC
            LIMIT $2 OFFSET $3
        "#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query)
                .bind(id)
                .bind(page.limit as i64)
                .bind(page.offset as i64)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(FinancialRecordModel::try_from_row(&row)?);
        }

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[async_trait]
impl LoadAudits<FinancialRecordModel> for FinancialRecordRepositoryImpl {
    async fn load_audits(&self, id: Uuid, page: PageRequest) -> Result<Page<FinancialRecordModel>, Box<dyn Error + Send + Sync>> {
        Self::load_audits_impl(self, id, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{append_test_record, create_test_audit_log};
    use crate::test_helper::setup_test_context;
    use chrono::Duration;
    use expense_core_api::domain::TransactionStatus;
    use expense_core_db::repository::{Create, LoadAudits, PageRequest, UpdateStatus};
    use rust_decimal::Decimal;
    use serial_test::serial;
    use uuid::Uuid;

    #[tokio::test]
    #[serial]
    async fn test_load_audits() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = &ctx.financial_record_repository;
        let record = append_test_record(&ctx, "lunch", Decimal::new(100, 0)).await?;

        let mut audit_log = create_test_audit_log();
        audit_log.updated_at = record.created_at + Duration::seconds(1);
        ctx.audit_log_repository.create(audit_log.clone()).await?;
        let mut rejected = record.clone();
        rejected.status = TransactionStatus::Rejected;
        rejected.action_by = Some(Uuid::new_v4());
        rejected.audit_log_id = Some(audit_log.id);
        assert!(repo.update_status(&rejected, record.hash.as_str()).await?);

        let page = repo.load_audits(record.id, PageRequest::new(1, 0)).await?;
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].status, TransactionStatus::Rejected);
        assert!(page.has_more());

        let page = repo.load_audits(record.id, PageRequest::new(1, 1)).await?;
        assert_eq!(page.items[0].status, TransactionStatus::Pending);
        assert!(!page.has_more());

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_load_audits_empty() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let page = ctx
            .financial_record_repository
            .load_audits(Uuid::new_v4(), PageRequest::new(20, 0))
            .await?;

        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.page_number(), 1);
        assert!(!page.has_more());

        Ok(())
    }
}
