use uuid::Uuid;

use super::identifiable::Identifiable;

/// Entities whose every create and status change leaves a snapshot in an audit table
pub trait Auditable: Identifiable {
    /// The audit log entry of the latest change, `None` before the first insert
    fn get_audit_log_id(&self) -> Option<Uuid>;
}
