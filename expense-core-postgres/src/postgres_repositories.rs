use async_trait::async_trait;
use expense_core_db::repository::session::{ChainSession, ChainSessionFactory};
use sqlx::PgPool;
use std::error::Error;
use std::sync::Arc;

use crate::executor::Executor;
use crate::repository::audit::{audit_log_repository::AuditLogRepositoryImpl, AuditRepoFactory};
use crate::repository::ledger::{financial_record_repository::FinancialRecordRepositoryImpl, LedgerRepoFactory};

/// Opens [`PostgresSession`]s on a shared pool.
///
/// One instance is shared by the whole application, typically wrapped in a
/// `FinancialRecordServiceImpl`.
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
    audit_factory: Arc<AuditRepoFactory>,
    ledger_factory: Arc<LedgerRepoFactory>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            audit_factory: AuditRepoFactory::new(),
            ledger_factory: LedgerRepoFactory::new(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// All repositories sharing a single transaction
    pub async fn create_session(&self) -> Result<PostgresSession, sqlx::Error> {
        let tx = self.pool.begin().await?;
        let executor = Executor::new(tx);

        Ok(PostgresSession {
            audit_log_repository: self.audit_factory.build_audit_log_repo(&executor),
            financial_record_repository: self.ledger_factory.build_financial_record_repo(&executor),
            executor,
        })
    }
}

#[async_trait]
impl ChainSessionFactory for PostgresRepositories {
    type Session = PostgresSession;

    async fn begin(&self) -> Result<PostgresSession, Box<dyn Error + Send + Sync>> {
        Ok(self.create_session().await?)
    }
}

/// One database transaction and the repositories bound to it.
///
/// Dropping the session without committing rolls the transaction back.
pub struct PostgresSession {
    pub executor: Executor,
    pub audit_log_repository: Arc<AuditLogRepositoryImpl>,
    pub financial_record_repository: Arc<FinancialRecordRepositoryImpl>,
}

#[async_trait]
impl ChainSession for PostgresSession {
    type Records = FinancialRecordRepositoryImpl;
    type AuditLogs = AuditLogRepositoryImpl;

    fn records(&self) -> &FinancialRecordRepositoryImpl {
        &self.financial_record_repository
    }

    fn audit_logs(&self) -> &AuditLogRepositoryImpl {
        &self.audit_log_repository
    }

    async fn commit(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.executor.commit().await
    }

    async fn rollback(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.executor.rollback().await
    }
}
