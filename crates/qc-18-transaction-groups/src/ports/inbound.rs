//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::GroupAssignment;
use crate::domain::errors::GroupError;
use crate::domain::value_objects::{Digest, EncodedTransaction};

/// Primary Transaction Groups API
///
/// Every operation is a synchronous pure function of its input batch. Inputs
/// are borrowed and never modified; outputs are freshly allocated.
pub trait TransactionGroupApi: Send + Sync {
    /// Identity digest of one transaction, independent of its GroupField.
    fn transaction_digest(&self, transaction: &[u8]) -> Result<Digest, GroupError>;

    /// Group id that `assign_group` would stamp on this batch.
    fn group_digest(&self, batch: &[EncodedTransaction]) -> Result<Digest, GroupError>;

    /// Stamp a freshly composed group id into every transaction.
    ///
    /// Only the GroupField changes; every other field is re-emitted as is.
    fn assign_group(
        &self,
        batch: &[EncodedTransaction],
    ) -> Result<Vec<EncodedTransaction>, GroupError>;

    /// Check that every embedded GroupField is zero or equals the digest
    /// composed over the whole batch.
    ///
    /// An inconsistent grouping is `Ok(false)`, never an error.
    fn verify_group(&self, batch: &[EncodedTransaction]) -> Result<bool, GroupError>;

    /// Partition the batch into verified runs and return one group index
    /// per position.
    fn find_and_verify_groups(&self, batch: &[EncodedTransaction])
        -> Result<Vec<usize>, GroupError>;

    /// Like `find_and_verify_groups`, keeping the run boundaries.
    fn segment_groups(&self, batch: &[EncodedTransaction]) -> Result<GroupAssignment, GroupError>;
}
