//! # Attack Simulations
//!
//! Adversarial batches against the group service:
//!
//! - `group_splicing`: moving, duplicating and forging group members
//! - `malformed_records`: decoder bounds and canonical-form abuse

pub mod malformed_records;
