//! Ports module for Transaction Groups
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::TransactionGroupApi;
pub use outbound::TransactionCodec;
