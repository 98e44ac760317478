use expense_core_api::domain::{ChainReport, IntegrityIssue, IssueReason};
use tracing::warn;

use crate::chain::GENESIS_PREV_HASH;
use crate::models::ledger::StoredLink;
use crate::utils::digest::hash_record;

/// Checks that `records` (ascending creation order) form an untampered chain.
///
/// Every record is compared against two expectations: its `prev_hash` must be
/// the stored hash of its predecessor, and its stored `hash` must equal the hash
/// of its stored fields. The predecessor's *stored* hash is carried forward even
/// when that record failed, so one tampered record is reported once instead of
/// breaking every link after it.
///
/// Rows whose content could not be read or encoded are reported as
/// [`IssueReason::Unencodable`]. The scan never stops early; the report lists
/// every failing record.
pub fn validate_chain<L: StoredLink>(records: &[L]) -> ChainReport {
    let mut expected_prev_hash = GENESIS_PREV_HASH;
    let mut issues = Vec::new();

    for record in records {
        let link_ok = record.stored_prev_hash() == expected_prev_hash;

        let reason = match record.content().map_err(str::to_string).and_then(|content| {
            hash_record(content).map_err(|e| e.to_string())
        }) {
            Ok(candidate) => {
                let hash_ok = candidate.as_str() == record.stored_hash();
                if !hash_ok {
                    warn!(
                        record_id = %record.id(),
                        sequence = record.sequence(),
                        stored = record.stored_hash(),
                        computed = %candidate,
                        "stored hash does not match record content"
                    );
                }
                IssueReason::from_checks(link_ok, hash_ok)
            }
            Err(error) => {
                warn!(record_id = %record.id(), sequence = record.sequence(), %error, "record cannot be encoded");
                Some(IssueReason::Unencodable)
            }
        };

        if !link_ok {
            warn!(
                record_id = %record.id(),
                sequence = record.sequence(),
                expected = expected_prev_hash,
                stored = record.stored_prev_hash(),
                "record is not linked to its predecessor"
            );
        }

        if let Some(reason) = reason {
            issues.push(IntegrityIssue {
                record_id: record.id(),
                sequence: record.sequence(),
                reason,
            });
        }

        expected_prev_hash = record.stored_hash();
    }

    let tail_hash = records.last().map(|record| record.stored_hash().to_string());
    ChainReport::new(records.len(), tail_hash, issues)
}
