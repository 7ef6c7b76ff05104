//! Group Digest Composer
//!
//! Group id is the domain-prefixed hash of the canonical digest list. Order
//! is significant.

use super::record_digest::record_digest;
use crate::domain::entities::TransactionRecord;
use crate::domain::value_objects::{Digest, GROUP_DOMAIN};
use crate::ports::outbound::TransactionCodec;
use shared_crypto::DomainHasher;

/// Compose the group digest of an ordered list of transaction digests.
pub fn compose_group_digest<C: TransactionCodec + ?Sized>(codec: &C, digests: &[Digest]) -> Digest {
    let payload = codec.encode_digest_list(digests);
    let mut hasher = DomainHasher::new(GROUP_DOMAIN);
    hasher.update(&payload);
    Digest::new(hasher.finalize())
}

/// Group digest over decoded records, in order.
pub fn compose_record_group<C: TransactionCodec + ?Sized>(
    codec: &C,
    records: &[TransactionRecord],
) -> Digest {
    let digests: Vec<Digest> = records
        .iter()
        .map(|record| record_digest(codec, record))
        .collect();
    compose_group_digest(codec, &digests)
}
