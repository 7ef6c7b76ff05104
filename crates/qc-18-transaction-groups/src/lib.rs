//! # QC-18: Transaction Groups Subsystem
//!
//! Binds independently signed transactions into an atomic group identified by
//! a content-derived digest, and checks that a presented batch is consistent
//! with the group ids embedded in it.
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (TransactionRecord, GroupRun, GroupAssignment), errors, invariants
//! - **Codec**: Canonical MessagePack reader/writer over raw value spans
//! - **Algorithms**: Record digest, group composition, assignment, verification, segmentation
//! - **Ports**: Inbound (TransactionGroupApi) and Outbound (TransactionCodec)
//! - **Adapters**: MsgpackCodec
//! - **Application**: Service orchestration
//!
//! ## Digests
//!
//! | Digest | Preimage |
//! |--------|----------|
//! | transaction | `"TX" ++ encode(record without GroupField)` |
//! | group | `"TG" ++ encode({"txlist": [digest, ...]})` |
//!
//! Both use SHA-512/256.

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod codec;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::MsgpackCodec;
pub use application::service::TransactionGroupService;
pub use codec::FieldValue;
pub use config::{DecodeLimits, GroupingConfig, MAX_DECODE_DEPTH, MAX_TX_GROUP_SIZE};
pub use domain::entities::*;
pub use domain::errors::{ConfigError, DecodeError, GroupError, GroupingError};
pub use domain::value_objects::*;
pub use ports::inbound::TransactionGroupApi;
pub use ports::outbound::TransactionCodec;
