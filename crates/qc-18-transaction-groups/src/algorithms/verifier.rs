//! Group Verifier
//!
//! A batch verifies when every embedded GroupField is zero or equals the
//! group digest composed over the whole batch. Mismatch is a `false`, not an
//! error.

use super::composer::compose_record_group;
use super::decode_batch;
use crate::domain::entities::TransactionRecord;
use crate::domain::errors::GroupError;
use crate::domain::value_objects::{Digest, EncodedTransaction};
use crate::ports::outbound::TransactionCodec;

/// Check every GroupField in the batch against the composed group id.
pub fn verify_group<C: TransactionCodec + ?Sized>(
    codec: &C,
    batch: &[EncodedTransaction],
) -> Result<bool, GroupError> {
    let records = decode_batch(codec, batch)?;
    Ok(records_consistent(codec, &records))
}

/// Whole-batch check over decoded records.
pub fn records_consistent<C: TransactionCodec + ?Sized>(
    codec: &C,
    records: &[TransactionRecord],
) -> bool {
    // Unstamped records are individually acceptable.
    if records.iter().all(|record| !record.has_group()) {
        return true;
    }
    let expected = compose_record_group(codec, records);
    records
        .iter()
        .all(|record| !record.has_group() || record.group() == expected)
}

/// Run-level check used by segmentation.
///
/// Returns the recomputed digest when it differs from `claimed`.
pub fn check_run<C: TransactionCodec + ?Sized>(
    codec: &C,
    claimed: Digest,
    members: &[TransactionRecord],
) -> Result<(), Digest> {
    let computed = compose_record_group(codec, members);
    if computed == claimed {
        Ok(())
    } else {
        Err(computed)
    }
}
