use expense_core_db::models::ledger::FinancialRecordModel;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{FinancialRecordRepositoryImpl, RECORD_COLUMNS};
use crate::utils::TryFromRow;

impl FinancialRecordRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &FinancialRecordRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<FinancialRecordModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!("SELECT {RECORD_COLUMNS} FROM financial_record WHERE id = ANY($1)");
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(&query).bind(ids).fetch_all(&mut **transaction).await?
        };

        let mut map = HashMap::with_capacity(rows.len());
        for row in rows {
            let item = FinancialRecordModel::try_from_row(&row)?;
            map.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| map.remove(id)).collect())
    }
}
