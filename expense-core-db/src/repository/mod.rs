pub mod create;
pub mod find_chain_tail;
pub mod in_memory;
pub mod load;
pub mod load_audits;
pub mod load_batch;
pub mod load_chain;
pub mod pagination;
pub mod session;
pub mod update_status;

// Re-exports
pub use create::*;
pub use find_chain_tail::*;
pub use load::*;
pub use load_audits::*;
pub use load_batch::*;
pub use load_chain::*;
pub use pagination::*;
pub use session::*;
pub use update_status::*;
