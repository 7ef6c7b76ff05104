//! Outbound Ports (Driven Ports / SPI)

use crate::domain::entities::TransactionRecord;
use crate::domain::errors::DecodeError;
use crate::domain::value_objects::Digest;

/// Canonical transaction record codec
///
/// Must be deterministic: one logical record always encodes to the same
/// bytes, and decoding then encoding a canonical input reproduces it.
pub trait TransactionCodec: Send + Sync {
    /// Parse one encoded transaction into a field map.
    fn decode(&self, bytes: &[u8]) -> Result<TransactionRecord, DecodeError>;

    /// Canonical bytes of a record. A zero GroupField is omitted.
    fn encode(&self, record: &TransactionRecord) -> Vec<u8>;

    /// Canonical bytes of an ordered digest list, the payload a group
    /// digest is computed over.
    fn encode_digest_list(&self, digests: &[Digest]) -> Vec<u8>;
}
