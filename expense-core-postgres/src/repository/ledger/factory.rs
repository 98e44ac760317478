use std::sync::Arc;

use super::financial_record_repository::FinancialRecordRepositoryImpl;
use crate::executor::Executor;

/// Builds ledger repositories bound to a session's executor.
#[derive(Default)]
pub struct LedgerRepoFactory {}

impl LedgerRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_financial_record_repo(&self, executor: &Executor) -> Arc<FinancialRecordRepositoryImpl> {
        Arc::new(FinancialRecordRepositoryImpl::new(executor.clone()))
    }
}
