use chrono::{DateTime, Utc};
use expense_core_api::domain::{
    FinancialRecord, NewFinancialRecord, TransactionStatus, TransactionType,
};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::auditable::Auditable;
use crate::models::identifiable::Identifiable;
use crate::utils::encoding::EncodingError;

/// Hex digest of a record (64 chars) or the genesis sentinel (16 chars)
pub type HashString = HeaplessString<64>;

pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const CATEGORY_MAX_CHARS: usize = 100;
pub const ATTACHMENT_URL_MAX_CHARS: usize = 500;

// Input limits and the VARCHAR columns count characters; heapless capacity is
// in bytes, so buffers hold the limit in 4-byte UTF-8 characters.
pub type DescriptionString = HeaplessString<{ DESCRIPTION_MAX_CHARS * 4 }>;
pub type CategoryString = HeaplessString<{ CATEGORY_MAX_CHARS * 4 }>;
pub type AttachmentUrlString = HeaplessString<{ ATTACHMENT_URL_MAX_CHARS * 4 }>;

/// # Documentation
/// A chained income or expense record.
///
/// `description`, `amount`, `category`, `transaction_type`, `attachment_url`,
/// `owner_id`, `created_at` and `prev_hash` are covered by `hash` and never
/// change after creation. `status` and `action_by` are the only mutable fields
/// and are deliberately left out of the hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecordModel {
    pub id: Uuid,

    /// 1-based position in the chain, assigned while the chain lock is held
    pub sequence: i64,

    pub description: DescriptionString,
    pub amount: Decimal,
    pub category: CategoryString,
    pub transaction_type: TransactionType,

    /// Uploaded bill reference; hashed as an empty string when absent
    pub attachment_url: Option<AttachmentUrlString>,

    pub owner_id: Uuid,

    /// Millisecond precision, see [`crate::utils::encoding::canonical_timestamp`]
    pub created_at: DateTime<Utc>,

    /// Hash of the chain tail when this record was appended
    pub prev_hash: HashString,

    /// Digest of the canonical encoding
    /// - empty: draft not yet sealed
    /// - 64 hex chars: sealed
    pub hash: HashString,

    pub status: TransactionStatus,
    pub action_by: Option<Uuid>,

    /// Reference to the audit log entry of the latest create or status change
    /// - None: for drafts not yet persisted
    ///
    /// This field, together with `id`, forms the composite primary key in the audit table
    pub audit_log_id: Option<Uuid>,
}

impl FinancialRecordModel {
    /// Unsealed record built from validated user input.
    ///
    /// `sequence`, `prev_hash` and `hash` are filled in by
    /// [`crate::chain::linker::seal`].
    pub fn draft(
        record: &NewFinancialRecord,
        created_at: DateTime<Utc>,
    ) -> Result<Self, EncodingError> {
        let attachment_url = match record.attachment_url.as_deref() {
            None | Some("") => None,
            Some(url) => Some(bounded("attachment_url", url, ATTACHMENT_URL_MAX_CHARS)?),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            sequence: 0,
            description: bounded("description", &record.description, DESCRIPTION_MAX_CHARS)?,
            amount: record.amount,
            category: bounded("category", &record.category, CATEGORY_MAX_CHARS)?,
            transaction_type: record.transaction_type,
            attachment_url,
            owner_id: record.owner_id,
            created_at,
            prev_hash: HashString::new(),
            hash: HashString::new(),
            status: TransactionStatus::Pending,
            action_by: None,
            audit_log_id: None,
        })
    }

    pub fn is_sealed(&self) -> bool {
        !self.hash.is_empty()
    }
}

fn bounded<const N: usize>(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<HeaplessString<N>, EncodingError> {
    if value.chars().count() > max_chars {
        return Err(EncodingError::FieldTooLong(field));
    }
    HeaplessString::from_str(value).map_err(|_| EncodingError::FieldTooLong(field))
}

impl Identifiable for FinancialRecordModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Auditable for FinancialRecordModel {
    fn get_audit_log_id(&self) -> Option<Uuid> {
        self.audit_log_id
    }
}

impl From<FinancialRecordModel> for FinancialRecord {
    fn from(model: FinancialRecordModel) -> Self {
        FinancialRecord {
            id: model.id,
            sequence: model.sequence,
            description: model.description.as_str().to_string(),
            amount: model.amount,
            category: model.category.as_str().to_string(),
            transaction_type: model.transaction_type,
            attachment_url: model.attachment_url.map(|url| url.as_str().to_string()),
            owner_id: model.owner_id,
            created_at: model.created_at,
            prev_hash: model.prev_hash.as_str().to_string(),
            hash: model.hash.as_str().to_string(),
            status: model.status,
            action_by: model.action_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use validator::Validate;

    fn new_record(description: String, category: String) -> NewFinancialRecord {
        NewFinancialRecord {
            description,
            amount: Decimal::new(100, 0),
            category,
            transaction_type: TransactionType::Expense,
            attachment_url: None,
            owner_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_draft_accepts_every_valid_multibyte_input() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        // 4-byte characters at the character limit
        let record = new_record("\u{1F9FE}".repeat(DESCRIPTION_MAX_CHARS), "\u{E9}".repeat(CATEGORY_MAX_CHARS));
        assert!(record.validate().is_ok());

        let draft = FinancialRecordModel::draft(&record, created_at).unwrap();
        assert_eq!(draft.description.chars().count(), DESCRIPTION_MAX_CHARS);
        assert_eq!(draft.category.as_str(), record.category);
    }

    #[test]
    fn test_draft_counts_characters_not_bytes() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let too_long = new_record("a".repeat(DESCRIPTION_MAX_CHARS + 1), "Food".to_string());

        assert!(too_long.validate().is_err());
        assert_eq!(
            FinancialRecordModel::draft(&too_long, created_at).unwrap_err(),
            EncodingError::FieldTooLong("description")
        );
    }
}
