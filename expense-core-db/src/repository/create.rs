use async_trait::async_trait;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for inserting a single entity
///
/// Auditable entities are inserted together with their audit snapshot; the
/// snapshot references the entity's `audit_log_id`, which must already be set.
///
/// # Example
/// ```ignore
/// impl Create<AuditLogModel> for AuditLogRepositoryImpl {
///     async fn create(&self, item: AuditLogModel) -> Result<AuditLogModel, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait Create<T: Identifiable + Send + 'static>: Send + Sync {
    /// Insert `item` within the current session
    ///
    /// # Returns
    /// * `Ok(T)` - The stored entity
    /// * `Err` - An error if the insert failed, including unique constraint violations
    async fn create(&self, item: T) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
