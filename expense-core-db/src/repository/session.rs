use async_trait::async_trait;

use crate::models::audit::AuditLogModel;
use crate::models::ledger::FinancialRecordModel;
use crate::repository::{
    create::Create, find_chain_tail::FindChainTail, load::Load, load_audits::LoadAudits,
    load_chain::LoadChain, update_status::UpdateStatus,
};

/// Everything the chain service needs from a financial record store
pub trait FinancialRecordRepository:
    FindChainTail
    + LoadChain
    + Load<FinancialRecordModel>
    + Create<FinancialRecordModel>
    + UpdateStatus
    + LoadAudits<FinancialRecordModel>
{
}

impl<T> FinancialRecordRepository for T where
    T: FindChainTail
        + LoadChain
        + Load<FinancialRecordModel>
        + Create<FinancialRecordModel>
        + UpdateStatus
        + LoadAudits<FinancialRecordModel>
{
}

pub trait AuditLogRepository: Create<AuditLogModel> + Load<AuditLogModel> {}

impl<T> AuditLogRepository for T where T: Create<AuditLogModel> + Load<AuditLogModel> {}

/// A unit of work over the record store
///
/// All repositories handed out by one session share its transaction. Dropping
/// a session without calling [`ChainSession::commit`] discards its writes and
/// releases the chain lock.
#[async_trait]
pub trait ChainSession: Send + Sync + Sized {
    type Records: FinancialRecordRepository;
    type AuditLogs: AuditLogRepository;

    fn records(&self) -> &Self::Records;

    fn audit_logs(&self) -> &Self::AuditLogs;

    async fn commit(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn rollback(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Opens sessions; one instance is shared by the whole application
#[async_trait]
pub trait ChainSessionFactory: Send + Sync {
    type Session: ChainSession;

    async fn begin(&self) -> Result<Self::Session, Box<dyn std::error::Error + Send + Sync>>;
}
