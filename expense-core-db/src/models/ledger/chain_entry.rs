use uuid::Uuid;

use super::financial_record::FinancialRecordModel;

/// A stored row whose content columns could not be read back into a
/// [`FinancialRecordModel`], e.g. after a direct write of out-of-range data.
///
/// Only the columns needed to keep walking the chain are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndecodableRecord {
    pub id: Uuid,
    pub sequence: i64,
    pub prev_hash: String,
    pub hash: String,
    /// Why decoding failed
    pub error: String,
}

/// One position of the chain as read from the store
#[derive(Debug, Clone, PartialEq)]
pub enum ChainEntry {
    Decoded(FinancialRecordModel),
    Undecodable(UndecodableRecord),
}

/// What chain validation reads from one stored position
pub trait StoredLink {
    fn id(&self) -> Uuid;

    fn sequence(&self) -> i64;

    fn stored_prev_hash(&self) -> &str;

    /// The hash as stored, whether or not it still matches the content
    fn stored_hash(&self) -> &str;

    /// The hashed content, or why it could not be read
    fn content(&self) -> Result<&FinancialRecordModel, &str>;
}

impl StoredLink for FinancialRecordModel {
    fn id(&self) -> Uuid {
        self.id
    }

    fn sequence(&self) -> i64 {
        self.sequence
    }

    fn stored_prev_hash(&self) -> &str {
        self.prev_hash.as_str()
    }

    fn stored_hash(&self) -> &str {
        self.hash.as_str()
    }

    fn content(&self) -> Result<&FinancialRecordModel, &str> {
        Ok(self)
    }
}

impl StoredLink for ChainEntry {
    fn id(&self) -> Uuid {
        match self {
            ChainEntry::Decoded(record) => record.id,
            ChainEntry::Undecodable(row) => row.id,
        }
    }

    fn sequence(&self) -> i64 {
        match self {
            ChainEntry::Decoded(record) => record.sequence,
            ChainEntry::Undecodable(row) => row.sequence,
        }
    }

    fn stored_prev_hash(&self) -> &str {
        match self {
            ChainEntry::Decoded(record) => record.prev_hash.as_str(),
            ChainEntry::Undecodable(row) => &row.prev_hash,
        }
    }

    fn stored_hash(&self) -> &str {
        match self {
            ChainEntry::Decoded(record) => record.hash.as_str(),
            ChainEntry::Undecodable(row) => &row.hash,
        }
    }

    fn content(&self) -> Result<&FinancialRecordModel, &str> {
        match self {
            ChainEntry::Decoded(record) => Ok(record),
            ChainEntry::Undecodable(row) => Err(&row.error),
        }
    }
}

impl From<FinancialRecordModel> for ChainEntry {
    fn from(record: FinancialRecordModel) -> Self {
        ChainEntry::Decoded(record)
    }
}
