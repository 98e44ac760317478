use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    ChainReport, FinancialRecord, NewFinancialRecord, RecordVerification, StatusChangeRequest,
};
use crate::error::ApiResult;

/// Entry point for the CRUD and approval layers into the hash chain.
#[async_trait]
pub trait FinancialRecordService: Send + Sync {
    /// Hash the record, link it to the current chain tail and persist it.
    ///
    /// Appends are serialized: two concurrent calls never observe the same tail.
    async fn create_record(&self, record: NewFinancialRecord) -> ApiResult<FinancialRecord>;

    /// Move a pending record to approved or rejected.
    ///
    /// Approval is refused while the chain reports tampering. The returned
    /// record carries the hash recomputed over its current content.
    async fn change_status(&self, request: StatusChangeRequest) -> ApiResult<FinancialRecord>;

    /// Re-derive every hash in creation order and report all divergences.
    ///
    /// Read-only; safe to run at any time.
    async fn validate_chain(&self) -> ApiResult<ChainReport>;

    /// Validate the chain and single out the findings for one record.
    async fn verify_record(&self, record_id: Uuid) -> ApiResult<RecordVerification>;
}
