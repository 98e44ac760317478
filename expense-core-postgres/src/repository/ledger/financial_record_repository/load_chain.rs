use async_trait::async_trait;
use expense_core_db::models::ledger::{ChainEntry, FinancialRecordModel, UndecodableRecord};
use expense_core_db::repository::load_chain::LoadChain;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use super::repo_impl::{FinancialRecordRepositoryImpl, RECORD_COLUMNS};
use crate::utils::TryFromRow;

#[async_trait]
impl LoadChain for FinancialRecordRepositoryImpl {
    async fn load_chain(&self) -> Result<Vec<ChainEntry>, Box<dyn Error + Send + Sync>> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM financial_record ORDER BY sequence ASC");
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(&query).fetch_all(&mut **transaction).await?
        };

        rows.iter().map(chain_entry).collect()
    }
}

/// Content that no longer decodes is reported by the validator, not raised here.
/// Only the linkage columns must be readable.
fn chain_entry(row: &PgRow) -> Result<ChainEntry, Box<dyn Error + Send + Sync>> {
    match FinancialRecordModel::try_from_row(row) {
        Ok(record) => Ok(ChainEntry::Decoded(record)),
        Err(error) => Ok(ChainEntry::Undecodable(UndecodableRecord {
            id: row.try_get("id")?,
            sequence: row.try_get("sequence")?,
            prev_hash: row.try_get("prev_hash")?,
            hash: row.try_get("hash")?,
            error: error.to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::append_test_record;
    use crate::test_helper::setup_test_context;
    use expense_core_db::chain::validate_chain;
    use expense_core_db::models::ledger::{ChainEntry, StoredLink};
    use expense_core_db::repository::LoadChain;
    use expense_core_api::domain::IssueReason;
    use rust_decimal::Decimal;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_chain_is_ordered_and_validates() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let lunch = append_test_record(&ctx, "lunch", Decimal::new(100, 0)).await?;
        let taxi = append_test_record(&ctx, "taxi", Decimal::new(45, 0)).await?;

        let chain = ctx.financial_record_repository.load_chain().await?;
        assert!(chain.windows(2).all(|pair| pair[0].sequence() < pair[1].sequence()));
        let report = validate_chain(&chain);
        assert!(report.issue_for(lunch.id).is_none());
        assert!(report.issue_for(taxi.id).is_none());

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_direct_edit_is_detected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let lunch = append_test_record(&ctx, "lunch", Decimal::new(100, 0)).await?;
        let taxi = append_test_record(&ctx, "taxi", Decimal::new(45, 0)).await?;

        {
            let mut tx = ctx.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("UPDATE financial_record SET amount = 200 WHERE id = $1")
                .bind(lunch.id)
                .execute(&mut **transaction)
                .await?;
        }

        let chain = ctx.financial_record_repository.load_chain().await?;
        let report = validate_chain(&chain);
        assert!(!report.is_secure());
        assert_eq!(report.issue_for(lunch.id).map(|issue| issue.reason), Some(IssueReason::HashMismatch));
        assert!(report.issue_for(taxi.id).is_none());

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_undecodable_row_is_reported() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let lunch = append_test_record(&ctx, "lunch", Decimal::new(100, 0)).await?;
        let taxi = append_test_record(&ctx, "taxi", Decimal::new(45, 0)).await?;

        {
            let mut tx = ctx.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            // beyond what a Decimal can hold
            sqlx::query("UPDATE financial_record SET amount = 1e40 WHERE id = $1")
                .bind(lunch.id)
                .execute(&mut **transaction)
                .await?;
        }

        let chain = ctx.financial_record_repository.load_chain().await?;
        let entry = chain.iter().find(|entry| entry.id() == lunch.id).ok_or("record missing from chain")?;
        assert!(matches!(entry, ChainEntry::Undecodable(_)));

        let report = validate_chain(&chain);
        assert!(!report.is_secure());
        assert_eq!(report.issue_for(lunch.id).map(|issue| issue.reason), Some(IssueReason::Unencodable));
        assert!(report.issue_for(taxi.id).is_none());

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_multibyte_description_round_trips() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let record = append_test_record(&ctx, &"é".repeat(500), Decimal::new(100, 0)).await?;

        let chain = ctx.financial_record_repository.load_chain().await?;
        let entry = chain.iter().find(|entry| entry.id() == record.id).ok_or("record missing from chain")?;
        assert!(matches!(entry, ChainEntry::Decoded(stored) if stored.description == record.description));
        assert!(validate_chain(&chain).issue_for(record.id).is_none());

        Ok(())
    }
}
