use async_trait::async_trait;
use uuid::Uuid;

use crate::models::auditable::Auditable;
use crate::repository::pagination::{Page, PageRequest};

/// Generic repository trait for loading the audit snapshots of one entity, newest first
///
/// # Example
/// ```ignore
/// use expense_core_db::repository::pagination::PageRequest;
///
/// // Status history of a record, two snapshots per page
/// let page = repo.load_audits(record_id, PageRequest::new(2, 0)).await?;
/// println!("Page {} of {}", page.page_number(), page.total_pages());
/// ```
#[async_trait]
pub trait LoadAudits<T: Auditable>: Send + Sync {
    async fn load_audits(&self, id: Uuid, page: PageRequest) -> Result<Page<T>, Box<dyn std::error::Error + Send + Sync>>;
}
