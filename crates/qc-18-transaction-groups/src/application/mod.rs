//! Application layer for Transaction Groups

pub mod service;

pub use service::TransactionGroupService;
