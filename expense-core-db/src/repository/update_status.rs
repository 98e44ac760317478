use async_trait::async_trait;

use crate::models::ledger::FinancialRecordModel;

/// Persists an approval decision
#[async_trait]
pub trait UpdateStatus: Send + Sync {
    /// Write `status`, `action_by`, `hash` and `audit_log_id` of `item` and
    /// append an audit snapshot.
    ///
    /// The update only applies while the stored row is still pending and still
    /// carries `expected_hash`.
    ///
    /// # Returns
    /// * `Ok(true)` - The row was updated
    /// * `Ok(false)` - The row changed concurrently or was already decided
    /// * `Err` - An error if the statement could not be executed
    async fn update_status(
        &self,
        item: &FinancialRecordModel,
        expected_hash: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}
