//! MessagePack Codec Adapter
//!
//! Implements `TransactionCodec` over canonical MessagePack records.

use crate::codec::reader::Reader;
use crate::codec::{writer, FieldValue};
use crate::config::DecodeLimits;
use crate::domain::entities::TransactionRecord;
use crate::domain::errors::DecodeError;
use crate::domain::value_objects::{Digest, GROUP_FIELD_KEY, GROUP_LIST_KEY};
use crate::ports::outbound::TransactionCodec;
use std::collections::BTreeMap;

/// Canonical MessagePack codec with bounded decoding.
#[derive(Clone, Copy, Debug, Default)]
pub struct MsgpackCodec {
    limits: DecodeLimits,
}

impl MsgpackCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: DecodeLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }
}

impl TransactionCodec for MsgpackCodec {
    fn decode(&self, bytes: &[u8]) -> Result<TransactionRecord, DecodeError> {
        let mut reader = Reader::new(bytes, self.limits);
        let len = reader.map_header()?;
        let mut record = TransactionRecord::new();
        let mut seen = std::collections::HashSet::with_capacity(len);

        for _ in 0..len {
            let key = reader.key()?;
            let offset = reader.position();
            let raw = reader.value_span(1)?;

            if !seen.insert(key.clone()) {
                return Err(DecodeError::DuplicateKey(key));
            }

            let value = FieldValue::from_encoded(raw);
            if key == GROUP_FIELD_KEY {
                let group = value
                    .as_digest()
                    .ok_or_else(|| DecodeError::InvalidGroupField {
                        offset,
                        reason: format!("expected 32-byte binary, got 0x{}", hex::encode(raw)),
                    })?;
                record.set_group(group);
            } else {
                record.insert_field(key, value);
            }
        }

        reader.finish()?;
        Ok(record)
    }

    fn encode(&self, record: &TransactionRecord) -> Vec<u8> {
        let group_value = record
            .has_group()
            .then(|| FieldValue::bytes(record.group().as_bytes()));

        let mut entries: BTreeMap<&str, &FieldValue> = record.fields().collect();
        if let Some(value) = &group_value {
            entries.insert(GROUP_FIELD_KEY, value);
        }

        let body_len: usize = entries
            .iter()
            .map(|(k, v)| k.len() + v.as_encoded().len() + 5)
            .sum();
        let mut out = Vec::with_capacity(body_len + 5);
        writer::write_map_header(&mut out, entries.len());
        for (key, value) in entries {
            writer::write_str(&mut out, key);
            out.extend_from_slice(value.as_encoded());
        }
        out
    }

    fn encode_digest_list(&self, digests: &[Digest]) -> Vec<u8> {
        let mut out = Vec::with_capacity(digests.len() * 34 + 16);
        // An empty list is omitted, leaving an empty map.
        if digests.is_empty() {
            writer::write_map_header(&mut out, 0);
            return out;
        }
        writer::write_map_header(&mut out, 1);
        writer::write_str(&mut out, GROUP_LIST_KEY);
        writer::write_array_header(&mut out, digests.len());
        for digest in digests {
            writer::write_bin(&mut out, digest.as_bytes());
        }
        out
    }
}
