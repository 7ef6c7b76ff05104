//! Algorithms module for Transaction Groups
//!
//! Contains:
//! - Canonical record digest
//! - Group digest composer
//! - Group assigner
//! - Group verifier
//! - Group segmentation

pub mod assigner;
pub mod composer;
pub mod record_digest;
pub mod segmentation;
pub mod verifier;

pub use assigner::{assign_group, group_digest};
pub use composer::compose_group_digest;
pub use record_digest::{record_digest, transaction_digest};
pub use segmentation::find_and_verify_groups;
pub use verifier::verify_group;

use crate::domain::entities::TransactionRecord;
use crate::domain::errors::GroupError;
use crate::domain::value_objects::EncodedTransaction;
use crate::ports::outbound::TransactionCodec;

/// Decode every batch element, tagging failures with their position.
pub(crate) fn decode_batch<C: TransactionCodec + ?Sized>(
    codec: &C,
    batch: &[EncodedTransaction],
) -> Result<Vec<TransactionRecord>, GroupError> {
    batch
        .iter()
        .enumerate()
        .map(|(index, tx)| codec.decode(tx.as_bytes()).map_err(GroupError::decode_at(index)))
        .collect()
}
