use async_trait::async_trait;
use expense_core_db::{
    models::audit::AuditLogModel,
    repository::{create::Create, load::Load, load_batch::LoadBatch},
};
use std::error::Error;
use uuid::Uuid;

use crate::executor::Executor;

pub struct AuditLogRepositoryImpl {
    pub(crate) executor: Executor,
}

impl AuditLogRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Create<AuditLogModel> for AuditLogRepositoryImpl {
    async fn create(&self, item: AuditLogModel) -> Result<AuditLogModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, item).await
    }
}

#[async_trait]
impl Load<AuditLogModel> for AuditLogRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<AuditLogModel>, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        Ok(results.into_iter().next().flatten())
    }
}

#[async_trait]
impl LoadBatch<AuditLogModel> for AuditLogRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<AuditLogModel>>, Box<dyn Error + Send + Sync>> {
        super::load_batch::load_batch_impl(&self.executor, ids).await
    }
}
