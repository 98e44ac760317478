//! Persistence models, repository contracts and the hash-chain core of
//! expense-core.
//!
//! Records are appended to a single global chain: each one carries the hash of
//! its predecessor (`prev_hash`) and a BLAKE3 digest of its canonically encoded
//! content (`hash`). [`chain::validator`] walks the chain and reports every
//! record whose link or hash no longer matches.

pub mod chain;
pub mod models;
pub mod repository;
pub mod service;
pub mod utils;

pub use chain::GENESIS_PREV_HASH;
pub use repository::in_memory::InMemoryLedger;
pub use service::FinancialRecordServiceImpl;
