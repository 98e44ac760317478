use std::str::FromStr;

use crate::models::ledger::{FinancialRecordModel, HashString};
use crate::utils::encoding::{encode_record, EncodingError};

/// BLAKE3 digest of `bytes` as 64 lowercase hex characters.
pub fn digest_hex(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Hash of the record's canonical encoding, using the field values as they are now.
pub fn hash_record(record: &FinancialRecordModel) -> Result<HashString, EncodingError> {
    let encoded = encode_record(record)?;
    HashString::from_str(&digest_hex(&encoded)).map_err(|_| EncodingError::FieldTooLong("hash"))
}
