pub mod linker;
pub mod validator;

pub use linker::{next_prev_hash, next_sequence, recompute_hash, seal};
pub use validator::validate_chain;

/// `prev_hash` of the first record in the chain.
///
/// Shared by the linker and the validator; changing it invalidates every
/// existing chain.
pub const GENESIS_PREV_HASH: &str = "0000000000000000";
