//! Transaction-scoped database access for tests
//!
//! Every context runs inside its own transaction that is rolled back when the
//! context is dropped, so tests leave no rows behind.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::PostgresConfig;
use crate::postgres_repositories::{PostgresRepositories, PostgresSession};

/// A session that is never committed
pub type TestContext = PostgresSession;

async fn migrated_pool(max_connections: u32) -> Result<PgPool, Box<dyn std::error::Error + Send + Sync>> {
    let config = PostgresConfig::from_env()?.with_max_connections(max_connections);
    let pool = config.connect().await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}

/// Setup a test context with a transactional database session
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let ctx = setup_test_context().await?;
///     let repo = &ctx.financial_record_repository;
///
///     // All changes are rolled back when ctx is dropped
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let pool = migrated_pool(1).await?;
    let repos = PostgresRepositories::new(Arc::new(pool));
    Ok(repos.create_session().await?)
}

/// Shared repositories for tests whose sessions commit
pub async fn setup_shared_repos() -> Result<PostgresRepositories, Box<dyn std::error::Error + Send + Sync>> {
    let pool = migrated_pool(5).await?;
    Ok(PostgresRepositories::new(Arc::new(pool)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use expense_core_api::domain::{NewFinancialRecord, StatusChangeRequest, TransactionStatus, TransactionType};
    use expense_core_api::service::FinancialRecordService;
    use expense_core_db::models::audit::AuditLogModel;
    use expense_core_db::repository::{Create, Load};
    use expense_core_db::FinancialRecordServiceImpl;
    use rust_decimal::Decimal;
    use serial_test::serial;
    use uuid::Uuid;

    #[tokio::test]
    #[serial]
    async fn test_transaction_rollback() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let audit_log = AuditLogModel::new(Uuid::new_v4(), Utc::now());
        {
            let ctx = setup_test_context().await?;
            ctx.audit_log_repository.create(audit_log.clone()).await?;
            assert!(ctx.audit_log_repository.load(audit_log.id).await?.is_some());
        }

        let ctx = setup_test_context().await?;
        assert!(ctx.audit_log_repository.load(audit_log.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_service_over_postgres() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = Arc::new(FinancialRecordServiceImpl::new(setup_shared_repos().await?));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service
                        .create_record(NewFinancialRecord {
                            description: format!("concurrent expense {i}"),
                            amount: Decimal::new(1_000 + i, 2),
                            category: "Travel".to_string(),
                            transaction_type: TransactionType::Expense,
                            attachment_url: None,
                            owner_id: Uuid::new_v4(),
                        })
                        .await
                })
            })
            .collect();

        let mut created = Vec::new();
        for handle in handles {
            created.push(handle.await??);
        }

        let report = service.validate_chain().await?;
        for record in &created {
            assert!(report.issue_for(record.id).is_none());
        }

        let rejected = service
            .change_status(StatusChangeRequest {
                record_id: created[0].id,
                status: TransactionStatus::Rejected,
                action_by: Uuid::new_v4(),
            })
            .await?;
        assert_eq!(rejected.hash, created[0].hash);

        Ok(())
    }
}
