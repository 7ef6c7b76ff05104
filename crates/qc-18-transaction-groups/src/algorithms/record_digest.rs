//! Canonical Record Digest
//!
//! Identity of a transaction is the domain-prefixed hash of its canonical
//! encoding with the GroupField cleared, so stamping never changes it.

use crate::domain::entities::TransactionRecord;
use crate::domain::errors::DecodeError;
use crate::domain::value_objects::{Digest, TRANSACTION_DOMAIN};
use crate::ports::outbound::TransactionCodec;
use shared_crypto::sha512_256_with_prefix;

/// Digest of an already decoded record.
pub fn record_digest<C: TransactionCodec + ?Sized>(codec: &C, record: &TransactionRecord) -> Digest {
    let canonical = codec.encode(&record.without_group());
    Digest::new(sha512_256_with_prefix(TRANSACTION_DOMAIN, &canonical))
}

/// Decode one encoded transaction and compute its digest.
pub fn transaction_digest<C: TransactionCodec + ?Sized>(
    codec: &C,
    bytes: &[u8],
) -> Result<Digest, DecodeError> {
    let record = codec.decode(bytes)?;
    Ok(record_digest(codec, &record))
}
