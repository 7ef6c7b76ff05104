//! Canonical MessagePack wire primitives
//!
//! The record format is a map with string keys sorted in byte order and every
//! header in its smallest form. Values are kept as the exact bytes they were
//! read from, so fields the core does not understand round-trip unchanged.

pub mod reader;
pub mod writer;

use crate::domain::value_objects::Digest;
use std::fmt;

/// One pre-encoded field value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldValue(Vec<u8>);

impl FieldValue {
    /// Unsigned integer in its smallest form.
    pub fn uint(value: u64) -> Self {
        let mut out = Vec::with_capacity(9);
        writer::write_uint(&mut out, value);
        Self(out)
    }

    /// UTF-8 string.
    pub fn string(value: &str) -> Self {
        let mut out = Vec::with_capacity(value.len() + 5);
        writer::write_str(&mut out, value);
        Self(out)
    }

    /// Binary blob.
    pub fn bytes(value: &[u8]) -> Self {
        let mut out = Vec::with_capacity(value.len() + 5);
        writer::write_bin(&mut out, value);
        Self(out)
    }

    /// Wrap bytes already known to hold exactly one encoded value.
    pub(crate) fn from_encoded(raw: &[u8]) -> Self {
        Self(raw.to_vec())
    }

    /// Exact encoded bytes.
    pub fn as_encoded(&self) -> &[u8] {
        &self.0
    }

    /// Interpret as a 32-byte binary digest.
    pub fn as_digest(&self) -> Option<Digest> {
        reader::bin_payload(&self.0).and_then(Digest::from_slice)
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldValue(0x{})", hex::encode(&self.0))
    }
}
