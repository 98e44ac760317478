use async_trait::async_trait;
use chrono::Utc;
use expense_core_api::domain::{
    ChainReport, FinancialRecord, NewFinancialRecord, RecordVerification, StatusChangeRequest,
    TransactionStatus,
};
use expense_core_api::error::{ApiError, ApiResult};
use expense_core_api::service::FinancialRecordService;
use std::error::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::chain::{self, linker};
use crate::models::audit::AuditLogModel;
use crate::models::ledger::{ChainEntry, FinancialRecordModel, StoredLink};
use crate::repository::{
    ChainSession, ChainSessionFactory, Create, FindChainTail, Load, LoadAudits, LoadChain, Page,
    PageRequest, UpdateStatus,
};
use crate::utils::encoding::{truncate_to_millis, EncodingError};

impl From<EncodingError> for ApiError {
    fn from(error: EncodingError) -> Self {
        ApiError::EncodingError(error.to_string())
    }
}

fn store_error(context: &str, error: Box<dyn Error + Send + Sync>) -> ApiError {
    ApiError::DatabaseError(format!("{context}: {error}"))
}

/// [`FinancialRecordService`] over any session-capable store.
pub struct FinancialRecordServiceImpl<F: ChainSessionFactory> {
    sessions: F,
}

impl<F: ChainSessionFactory> FinancialRecordServiceImpl<F> {
    pub fn new(sessions: F) -> Self {
        Self { sessions }
    }

    /// Create and status-change snapshots of one record, newest first.
    pub async fn record_history(
        &self,
        record_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<FinancialRecord>> {
        let session = self.begin().await?;
        let snapshots = session
            .records()
            .load_audits(record_id, page)
            .await
            .map_err(|e| store_error("failed to load record history", e))?;
        session
            .rollback()
            .await
            .map_err(|e| store_error("failed to close session", e))?;

        Ok(Page::new(
            snapshots.items.into_iter().map(FinancialRecord::from).collect(),
            snapshots.total,
            snapshots.limit,
            snapshots.offset,
        ))
    }

    async fn begin(&self) -> ApiResult<F::Session> {
        self.sessions
            .begin()
            .await
            .map_err(|e| store_error("failed to open session", e))
    }

    /// One ordered read of the whole chain
    async fn chain_snapshot(&self) -> ApiResult<Vec<ChainEntry>> {
        let session = self.begin().await?;
        let entries = session
            .records()
            .load_chain()
            .await
            .map_err(|e| store_error("failed to load chain", e))?;
        session
            .rollback()
            .await
            .map_err(|e| store_error("failed to close session", e))?;
        Ok(entries)
    }
}

#[async_trait]
impl<F: ChainSessionFactory> FinancialRecordService for FinancialRecordServiceImpl<F> {
    async fn create_record(&self, record: NewFinancialRecord) -> ApiResult<FinancialRecord> {
        record.validate()?;

        let created_at = truncate_to_millis(Utc::now());
        let mut draft = FinancialRecordModel::draft(&record, created_at)?;

        let session = self.begin().await?;
        let audit_log = AuditLogModel::new(record.owner_id, created_at);
        session
            .audit_logs()
            .create(audit_log.clone())
            .await
            .map_err(|e| store_error("failed to write audit log", e))?;

        // Held until commit; the tail read below is the one this record links to.
        session
            .records()
            .lock_chain()
            .await
            .map_err(|e| ApiError::ChainUnavailable(format!("failed to lock chain: {e}")))?;
        let tail = session
            .records()
            .find_chain_tail()
            .await
            .map_err(|e| ApiError::ChainUnavailable(format!("failed to read chain tail: {e}")))?;

        linker::seal(&mut draft, tail.as_ref())?;
        draft.audit_log_id = Some(audit_log.id);

        let stored = session
            .records()
            .create(draft)
            .await
            .map_err(|e| store_error("failed to append record", e))?;
        session
            .commit()
            .await
            .map_err(|e| store_error("failed to commit record", e))?;

        info!(
            record_id = %stored.id,
            sequence = stored.sequence,
            prev_hash = %stored.prev_hash,
            hash = %stored.hash,
            "record appended to chain"
        );
        Ok(stored.into())
    }

    async fn change_status(&self, request: StatusChangeRequest) -> ApiResult<FinancialRecord> {
        if !request.status.is_decided() {
            return Err(ApiError::ValidationError(format!(
                "status can only change to Approved or Rejected, not {}",
                request.status
            )));
        }

        let session = self.begin().await?;
        let mut record = session
            .records()
            .load(request.record_id)
            .await
            .map_err(|e| store_error("failed to load record", e))?
            .ok_or_else(|| ApiError::NotFound(format!("record {}", request.record_id)))?;

        if record.status.is_decided() {
            return Err(ApiError::Conflict(format!(
                "record {} is already {}",
                record.id, record.status
            )));
        }

        let recomputed = linker::recompute_hash(&record)?;
        if recomputed != record.hash {
            warn!(
                record_id = %record.id,
                stored = %record.hash,
                computed = %recomputed,
                "refusing status change on tampered record"
            );
            return Err(ApiError::IntegrityViolation(format!(
                "record {} does not match its hash",
                record.id
            )));
        }

        if request.status == TransactionStatus::Approved {
            let records = session
                .records()
                .load_chain()
                .await
                .map_err(|e| store_error("failed to load chain", e))?;
            let report = chain::validate_chain(&records);
            if !report.is_secure() {
                warn!(
                    record_id = %record.id,
                    issues = report.issues.len(),
                    "refusing approval on tampered chain"
                );
                return Err(ApiError::IntegrityViolation(
                    "cannot approve a record while the chain is tampered".to_string(),
                ));
            }
        }

        let audit_log = AuditLogModel::new(request.action_by, Utc::now());
        session
            .audit_logs()
            .create(audit_log.clone())
            .await
            .map_err(|e| store_error("failed to write audit log", e))?;

        let expected_hash = record.hash.clone();
        record.status = request.status;
        record.action_by = Some(request.action_by);
        record.hash = recomputed;
        record.audit_log_id = Some(audit_log.id);

        let updated = session
            .records()
            .update_status(&record, expected_hash.as_str())
            .await
            .map_err(|e| store_error("failed to update status", e))?;
        if !updated {
            return Err(ApiError::Conflict(format!(
                "record {} changed while its status was being updated",
                record.id
            )));
        }
        session
            .commit()
            .await
            .map_err(|e| store_error("failed to commit status change", e))?;

        info!(record_id = %record.id, status = %record.status, action_by = %request.action_by, "record status changed");
        Ok(record.into())
    }

    async fn validate_chain(&self) -> ApiResult<ChainReport> {
        let entries = self.chain_snapshot().await?;
        let report = chain::validate_chain(&entries);

        if report.is_secure() {
            info!(records_checked = report.records_checked, "chain is secure");
        } else {
            warn!(
                records_checked = report.records_checked,
                issues = report.issues.len(),
                "chain is tampered"
            );
        }
        Ok(report)
    }

    async fn verify_record(&self, record_id: Uuid) -> ApiResult<RecordVerification> {
        let entries = self.chain_snapshot().await?;
        if !entries.iter().any(|entry| entry.id() == record_id) {
            return Err(ApiError::NotFound(format!("record {record_id}")));
        }

        let report = chain::validate_chain(&entries);
        let issue = report.issue_for(record_id).cloned();
        debug!(%record_id, intact = issue.is_none(), "record verified");

        Ok(RecordVerification {
            record_id,
            chain_status: report.overall_status,
            issue,
        })
    }
}
