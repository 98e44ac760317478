pub mod digest;
pub mod encoding;

pub use digest::{digest_hex, hash_record};
pub use encoding::{encode_record, EncodingError};
