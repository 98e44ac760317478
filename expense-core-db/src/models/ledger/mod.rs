pub mod chain_entry;
pub mod financial_record;

pub use chain_entry::*;
pub use financial_record::*;
