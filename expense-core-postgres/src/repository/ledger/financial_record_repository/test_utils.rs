use chrono::Utc;
use expense_core_api::domain::{TransactionStatus, TransactionType};
use expense_core_db::chain::linker::seal;
use expense_core_db::models::audit::AuditLogModel;
use expense_core_db::models::ledger::{FinancialRecordModel, HashString};
use expense_core_db::repository::{Create, FindChainTail};
use expense_core_db::utils::encoding::truncate_to_millis;
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::test_helper::TestContext;

pub fn create_test_audit_log() -> AuditLogModel {
    AuditLogModel::new(Uuid::new_v4(), Utc::now())
}

/// Unsealed record; `sequence`, `prev_hash` and `hash` are left for the linker
pub fn create_test_record(description: &str, amount: Decimal) -> FinancialRecordModel {
    FinancialRecordModel {
        id: Uuid::new_v4(),
        sequence: 0,
        description: HeaplessString::try_from(description).unwrap(),
        amount,
        category: HeaplessString::try_from("Food").unwrap(),
        transaction_type: TransactionType::Expense,
        attachment_url: None,
        owner_id: Uuid::new_v4(),
        created_at: truncate_to_millis(Utc::now()),
        prev_hash: HashString::new(),
        hash: HashString::new(),
        status: TransactionStatus::Pending,
        action_by: None,
        audit_log_id: None,
    }
}

/// Appends a record to the chain inside the context's transaction
pub async fn append_test_record(
    ctx: &TestContext,
    description: &str,
    amount: Decimal,
) -> Result<FinancialRecordModel, Box<dyn std::error::Error + Send + Sync>> {
    let audit_log = create_test_audit_log();
    ctx.audit_log_repository.create(audit_log.clone()).await?;

    let repo = &ctx.financial_record_repository;
    repo.lock_chain().await?;
    let tail = repo.find_chain_tail().await?;

    let mut record = create_test_record(description, amount);
    seal(&mut record, tail.as_ref())?;
    record.audit_log_id = Some(audit_log.id);
    repo.create(record).await
}
