use std::str::FromStr;

use crate::chain::GENESIS_PREV_HASH;
use crate::models::ledger::{FinancialRecordModel, HashString};
use crate::utils::digest::hash_record;
use crate::utils::encoding::EncodingError;

/// The `prev_hash` a record appended after `tail` must carry.
pub fn next_prev_hash(tail: Option<&FinancialRecordModel>) -> &str {
    tail.map(|record| record.hash.as_str()).unwrap_or(GENESIS_PREV_HASH)
}

pub fn next_sequence(tail: Option<&FinancialRecordModel>) -> i64 {
    tail.map(|record| record.sequence + 1).unwrap_or(1)
}

/// Links `record` to `tail` and computes its hash.
///
/// `tail` must be the latest record read from the store inside the same
/// locked session that will persist `record`.
pub fn seal(
    record: &mut FinancialRecordModel,
    tail: Option<&FinancialRecordModel>,
) -> Result<(), EncodingError> {
    record.prev_hash = HashString::from_str(next_prev_hash(tail))
        .map_err(|_| EncodingError::FieldTooLong("prev_hash"))?;
    record.sequence = next_sequence(tail);
    if let Some(tail) = tail {
        // creation order and timestamp order must agree
        if record.created_at < tail.created_at {
            record.created_at = tail.created_at;
        }
    }
    record.hash = hash_record(record)?;
    Ok(())
}

/// Hash over the record's current field values; `prev_hash` is kept as stored.
pub fn recompute_hash(record: &FinancialRecordModel) -> Result<HashString, EncodingError> {
    hash_record(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::encoding::tests::sample_record;
    use rust_decimal::Decimal;

    #[test]
    fn test_first_record_uses_sentinel() {
        let mut record = sample_record("lunch", Decimal::new(100, 0));
        record.prev_hash = HashString::new();

        seal(&mut record, None).unwrap();

        assert_eq!(record.prev_hash.as_str(), GENESIS_PREV_HASH);
        assert_eq!(record.sequence, 1);
        assert_eq!(record.hash.len(), 64);
    }

    #[test]
    fn test_next_record_links_to_tail_hash() {
        let mut first = sample_record("lunch", Decimal::new(100, 0));
        seal(&mut first, None).unwrap();

        let mut second = sample_record("taxi", Decimal::new(40, 0));
        seal(&mut second, Some(&first)).unwrap();

        assert_eq!(second.prev_hash, first.hash);
        assert_eq!(second.sequence, 2);
        assert_ne!(second.hash, first.hash);
    }

    #[test]
    fn test_sealed_hash_matches_recomputation() {
        let mut record = sample_record("lunch", Decimal::new(100, 0));
        seal(&mut record, None).unwrap();
        assert_eq!(recompute_hash(&record).unwrap(), record.hash);
    }

    #[test]
    fn test_created_at_never_precedes_tail() {
        let mut first = sample_record("lunch", Decimal::new(100, 0));
        seal(&mut first, None).unwrap();

        let mut second = sample_record("taxi", Decimal::new(40, 0));
        second.created_at = first.created_at - chrono::Duration::seconds(5);
        seal(&mut second, Some(&first)).unwrap();

        assert_eq!(second.created_at, first.created_at);
        assert_eq!(recompute_hash(&second).unwrap(), second.hash);
    }

    #[test]
    fn test_unencodable_draft_is_not_sealed() {
        let mut record = sample_record("lunch", Decimal::new(100, 0));
        record.category = heapless::String::new();

        assert_eq!(seal(&mut record, None), Err(EncodingError::MissingField("category")));
        assert!(!record.is_sealed());
    }
}
