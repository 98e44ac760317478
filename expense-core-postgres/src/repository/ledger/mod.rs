pub mod factory;
pub mod financial_record_repository;

pub use factory::LedgerRepoFactory;
