use async_trait::async_trait;

use crate::models::ledger::FinancialRecordModel;

/// Access to the current end of the chain for appenders
#[async_trait]
pub trait FindChainTail: Send + Sync {
    /// Take the chain lock for the rest of the session.
    ///
    /// While held, no other session can read the tail for appending, so two
    /// appends never link to the same predecessor. Released on commit or rollback.
    async fn lock_chain(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// The record with the highest `sequence`, `None` for an empty chain
    async fn find_chain_tail(&self) -> Result<Option<FinancialRecordModel>, Box<dyn std::error::Error + Send + Sync>>;
}
