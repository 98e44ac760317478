pub mod create;
pub mod find_chain_tail;
pub mod load_audits;
pub mod load_batch;
pub mod load_chain;
pub mod repo_impl;
pub mod update_status;
#[cfg(test)]
pub mod test_utils;

pub use find_chain_tail::chain_lock_key;
pub use repo_impl::FinancialRecordRepositoryImpl;
