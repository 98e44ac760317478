use std::sync::Arc;

use super::audit_log_repository::AuditLogRepositoryImpl;
use crate::executor::Executor;

/// Builds audit repositories bound to a session's executor.
///
/// One instance is shared by the application.
#[derive(Default)]
pub struct AuditRepoFactory {}

impl AuditRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_audit_log_repo(&self, executor: &Executor) -> Arc<AuditLogRepositoryImpl> {
        Arc::new(AuditLogRepositoryImpl::new(executor.clone()))
    }
}
