//! Error types for Transaction Groups

use super::value_objects::Digest;
use thiserror::Error;

/// Structural failures of the canonical record codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input ended in the middle of a value
    #[error("Unexpected end of input at offset {offset}: needed {needed} more bytes")]
    UnexpectedEof { offset: usize, needed: usize },

    /// Top-level value is not a map
    #[error("Record is not a map: found type byte 0x{found:02x} at offset 0")]
    NotAMap { found: u8 },

    /// Map key is not a string
    #[error("Non-string map key at offset {offset}: type byte 0x{found:02x}")]
    NonStringKey { offset: usize, found: u8 },

    /// Map key is not valid UTF-8
    #[error("Map key at offset {offset} is not valid UTF-8")]
    InvalidKey { offset: usize },

    /// Same key appears twice
    #[error("Duplicate field key: {0}")]
    DuplicateKey(String),

    /// Reserved or unassigned type byte
    #[error("Reserved type byte 0x{found:02x} at offset {offset}")]
    ReservedType { offset: usize, found: u8 },

    /// Container nesting exceeds the configured limit
    #[error("Nesting depth exceeds limit {max} at offset {offset}")]
    DepthLimitExceeded { offset: usize, max: usize },

    /// Container header claims too many entries
    #[error("Container at offset {offset} claims {len} entries, limit is {max}")]
    ContainerTooLarge { offset: usize, len: usize, max: usize },

    /// GroupField is not a 32-byte binary value
    #[error("Invalid group field at offset {offset}: {reason}")]
    InvalidGroupField { offset: usize, reason: String },

    /// Bytes remain after the record
    #[error("Trailing bytes after record: {remaining} bytes at offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },
}

/// Grouping invariant violations over a readable batch.
///
/// Ranges are half-open `[start, end)` positions in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupingError {
    /// Claimed group does not match the digest recomputed over the run
    #[error("transactions in range [{start}, {end}) claim group {claimed} but compose to {computed}")]
    DigestMismatch {
        start: usize,
        end: usize,
        claimed: Digest,
        computed: Digest,
    },

    /// Same group id reused by a run that is not adjacent to its first use
    #[error("transactions in range [{start}, {end}) do not form a contiguous group: group {group} already used by [{first_start}, {first_end})")]
    NonContiguousGroup {
        start: usize,
        end: usize,
        group: Digest,
        first_start: usize,
        first_end: usize,
    },

    /// Run is larger than the ledger's group size limit
    #[error("transactions in range [{start}, {end}) exceed the group size limit of {max}")]
    GroupTooLarge { start: usize, end: usize, max: usize },
}

impl GroupingError {
    /// Position range `[start, end)` of the offending run.
    pub fn range(&self) -> (usize, usize) {
        match self {
            GroupingError::DigestMismatch { start, end, .. }
            | GroupingError::NonContiguousGroup { start, end, .. }
            | GroupingError::GroupTooLarge { start, end, .. } => (*start, *end),
        }
    }
}

/// Unusable grouping configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Limit must be at least 1
    #[error("{field} must be at least 1")]
    ZeroLimit { field: &'static str },

    /// Decode depth above the supported ceiling
    #[error("decode_limits.max_depth {depth} exceeds the ceiling of {max}")]
    DepthTooLarge { depth: usize, max: usize },
}

/// All errors that can occur in transaction grouping
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    /// Batch element is not a well-formed record
    #[error("Transaction {index} is malformed: {source}")]
    Decode {
        index: usize,
        #[source]
        source: DecodeError,
    },

    /// Batch is readable but its grouping is inconsistent
    #[error(transparent)]
    Grouping(#[from] GroupingError),

    /// Empty transaction batch
    #[error("Empty transaction batch")]
    EmptyBatch,

    /// Batch size exceeded limits
    #[error("Batch size exceeded: {size} > {max}")]
    BatchTooLarge { size: usize, max: usize },

    /// Group to stamp exceeds the group size limit
    #[error("Group size exceeded: {size} > {max}")]
    GroupTooLarge { size: usize, max: usize },

    /// Service built from an invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl GroupError {
    /// Attach the batch position to a codec failure.
    pub fn decode_at(index: usize) -> impl FnOnce(DecodeError) -> GroupError {
        move |source| GroupError::Decode { index, source }
    }
}
