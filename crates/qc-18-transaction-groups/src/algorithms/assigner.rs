//! Group Assigner
//!
//! Stamps one freshly composed group id into every transaction of a batch.

use super::composer::compose_record_group;
use super::decode_batch;
use crate::domain::errors::GroupError;
use crate::domain::value_objects::{Digest, EncodedTransaction};
use crate::ports::outbound::TransactionCodec;

/// Group id `assign_group` would stamp on this batch.
pub fn group_digest<C: TransactionCodec + ?Sized>(
    codec: &C,
    batch: &[EncodedTransaction],
) -> Result<Digest, GroupError> {
    let records = decode_batch(codec, batch)?;
    Ok(compose_record_group(codec, &records))
}

/// Return a stamped copy of the batch.
///
/// Any GroupField already present is replaced. Nothing is returned unless
/// every element decodes.
pub fn assign_group<C: TransactionCodec + ?Sized>(
    codec: &C,
    batch: &[EncodedTransaction],
) -> Result<Vec<EncodedTransaction>, GroupError> {
    // 1. Decode everything before producing output
    let records = decode_batch(codec, batch)?;

    // 2. Compose over the unstamped identities
    let group = compose_record_group(codec, &records);

    // 3. Re-encode with only the GroupField changed
    Ok(records
        .into_iter()
        .map(|record| EncodedTransaction::new(codec.encode(&record.with_group(group))))
        .collect())
}
