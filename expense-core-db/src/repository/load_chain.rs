use async_trait::async_trait;

use crate::models::ledger::ChainEntry;

/// Reads the whole chain as one consistent snapshot
#[async_trait]
pub trait LoadChain: Send + Sync {
    /// All records ordered by `sequence` ascending (creation order)
    ///
    /// Implementations must read with a single point-in-time query so that a
    /// concurrent, not yet committed append is either fully visible or absent.
    /// A row whose content columns cannot be decoded is returned as
    /// [`ChainEntry::Undecodable`]; only a failed read is an error.
    async fn load_chain(&self) -> Result<Vec<ChainEntry>, Box<dyn std::error::Error + Send + Sync>>;
}
