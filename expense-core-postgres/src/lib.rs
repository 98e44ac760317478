pub mod config;
pub mod executor;
pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use config::{ConfigError, PostgresConfig};
pub use executor::Executor;
pub use postgres_repositories::{PostgresRepositories, PostgresSession};
pub use repository::audit::audit_log_repository::AuditLogRepositoryImpl;
pub use repository::ledger::financial_record_repository::FinancialRecordRepositoryImpl;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helper;
