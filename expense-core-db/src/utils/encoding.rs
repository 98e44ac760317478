use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::ledger::FinancialRecordModel;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("required field '{0}' is empty")]
    MissingField(&'static str),

    #[error("field '{0}' exceeds its maximum length")]
    FieldTooLong(&'static str),

    #[error("failed to serialize record for hashing: {0}")]
    Serialization(String),
}

/// The hashed view of a record.
///
/// Field order is part of the format: CBOR serializes struct fields as a map
/// in declaration order, and every text value is length-prefixed, so two
/// different field sets can never produce the same bytes.
#[derive(Serialize)]
struct CanonicalRecord<'a> {
    description: &'a str,
    amount: String,
    category: &'a str,
    transaction_type: &'static str,
    attachment_url: &'a str,
    owner_id: String,
    prev_hash: &'a str,
    created_at: String,
}

/// Scale-independent decimal form: `100`, `100.00` and `100.0000` all encode as `100`.
pub fn canonical_amount(amount: &Decimal) -> String {
    amount.normalize().to_string()
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn canonical_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Drops sub-millisecond precision so the stored value round-trips through
/// the canonical timestamp unchanged.
pub fn truncate_to_millis(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(3)
}

/// Serializes the immutable fields of `record` into its canonical byte form.
///
/// Fails closed on missing content so that an un-hashable record is never
/// persisted.
pub fn encode_record(record: &FinancialRecordModel) -> Result<Vec<u8>, EncodingError> {
    if record.description.trim().is_empty() {
        return Err(EncodingError::MissingField("description"));
    }
    if record.category.trim().is_empty() {
        return Err(EncodingError::MissingField("category"));
    }
    if record.prev_hash.is_empty() {
        return Err(EncodingError::MissingField("prev_hash"));
    }

    let canonical = CanonicalRecord {
        description: record.description.as_str(),
        amount: canonical_amount(&record.amount),
        category: record.category.as_str(),
        transaction_type: record.transaction_type.as_str(),
        attachment_url: record.attachment_url.as_ref().map(|url| url.as_str()).unwrap_or(""),
        owner_id: record.owner_id.hyphenated().to_string(),
        prev_hash: record.prev_hash.as_str(),
        created_at: canonical_timestamp(&record.created_at),
    };

    let mut cbor = Vec::new();
    ciborium::ser::into_writer(&canonical, &mut cbor)
        .map_err(|e| EncodingError::Serialization(e.to_string()))?;
    Ok(cbor)
}
