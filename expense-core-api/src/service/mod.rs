pub mod financial_record_service;

pub use financial_record_service::*;
