//! Transaction Group Service
//!
//! Main service implementing TransactionGroupApi.

use crate::adapters::MsgpackCodec;
use crate::algorithms::{self, segmentation::segment_with_limit};
use crate::config::GroupingConfig;
use crate::domain::entities::GroupAssignment;
use crate::domain::errors::GroupError;
use crate::domain::invariants::{invariant_contiguous_groups, invariant_dense_indices};
use crate::domain::value_objects::{Digest, EncodedTransaction};
use crate::ports::inbound::TransactionGroupApi;
use crate::ports::outbound::TransactionCodec;

use tracing::{debug, info, warn};

/// Transaction Group Service
///
/// Orchestrates every operation the same way:
/// 1. Validate batch limits
/// 2. Run the pure algorithm over the configured codec
/// 3. Check domain invariants (debug builds)
/// 4. Log the outcome
pub struct TransactionGroupService<C: TransactionCodec = MsgpackCodec> {
    config: GroupingConfig,
    codec: C,
}

impl TransactionGroupService<MsgpackCodec> {
    /// Create a new service with default config
    pub fn new() -> Self {
        let config = GroupingConfig::default();
        let codec = MsgpackCodec::with_limits(config.decode_limits);
        Self { config, codec }
    }

    /// Create a new service with custom config
    ///
    /// Fails if the config does not pass [`GroupingConfig::validate`].
    pub fn with_config(config: GroupingConfig) -> Result<Self, GroupError> {
        let codec = MsgpackCodec::with_limits(config.decode_limits);
        Self::with_codec(codec, config)
    }
}

impl Default for TransactionGroupService<MsgpackCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TransactionCodec> TransactionGroupService<C> {
    /// Create a service over a custom codec
    pub fn with_codec(codec: C, config: GroupingConfig) -> Result<Self, GroupError> {
        config.validate().map_err(|err| {
            warn!(error = %err, "Rejecting grouping configuration");
            err
        })?;
        Ok(Self { config, codec })
    }

    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Reject batches above the configured size
    fn check_batch_size(&self, batch: &[EncodedTransaction]) -> Result<(), GroupError> {
        if batch.len() > self.config.max_batch_size {
            warn!(
                size = batch.len(),
                max = self.config.max_batch_size,
                "Rejecting oversized batch"
            );
            return Err(GroupError::BatchTooLarge {
                size: batch.len(),
                max: self.config.max_batch_size,
            });
        }
        Ok(())
    }

    /// Limits for a batch that is about to become one group
    fn check_group_batch(&self, batch: &[EncodedTransaction]) -> Result<(), GroupError> {
        if batch.is_empty() {
            warn!("Rejecting empty batch");
            return Err(GroupError::EmptyBatch);
        }
        self.check_batch_size(batch)?;
        if batch.len() > self.config.max_group_size {
            warn!(
                size = batch.len(),
                max = self.config.max_group_size,
                "Rejecting oversized group"
            );
            return Err(GroupError::GroupTooLarge {
                size: batch.len(),
                max: self.config.max_group_size,
            });
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn debug_check_stamped(&self, batch: &[EncodedTransaction], stamped: &[EncodedTransaction]) {
        let decode_all = |txs: &[EncodedTransaction]| algorithms::decode_batch(&self.codec, txs);
        if let (Ok(before), Ok(after)) = (decode_all(batch), decode_all(stamped)) {
            debug_assert!(crate::domain::invariants::invariant_payload_preserved(
                &before, &after
            ));
        }
    }

    #[cfg(not(debug_assertions))]
    fn debug_check_stamped(&self, _batch: &[EncodedTransaction], _stamped: &[EncodedTransaction]) {}
}

impl<C: TransactionCodec> TransactionGroupApi for TransactionGroupService<C> {
    fn transaction_digest(&self, transaction: &[u8]) -> Result<Digest, GroupError> {
        algorithms::transaction_digest(&self.codec, transaction).map_err(GroupError::decode_at(0))
    }

    fn group_digest(&self, batch: &[EncodedTransaction]) -> Result<Digest, GroupError> {
        self.check_group_batch(batch)?;
        algorithms::group_digest(&self.codec, batch)
    }

    fn assign_group(
        &self,
        batch: &[EncodedTransaction],
    ) -> Result<Vec<EncodedTransaction>, GroupError> {
        self.check_group_batch(batch)?;

        info!(tx_count = batch.len(), "Assigning group id");

        let stamped = algorithms::assign_group(&self.codec, batch).map_err(|err| {
            warn!(error = %err, "Group assignment failed");
            err
        })?;
        self.debug_check_stamped(batch, &stamped);

        debug!(tx_count = stamped.len(), "Group id assigned");
        Ok(stamped)
    }

    fn verify_group(&self, batch: &[EncodedTransaction]) -> Result<bool, GroupError> {
        self.check_batch_size(batch)?;

        let valid = algorithms::verify_group(&self.codec, batch)?;
        if valid {
            debug!(tx_count = batch.len(), "Group verified");
        } else {
            warn!(tx_count = batch.len(), "Group id does not match batch");
        }
        Ok(valid)
    }

    fn find_and_verify_groups(
        &self,
        batch: &[EncodedTransaction],
    ) -> Result<Vec<usize>, GroupError> {
        self.segment_groups(batch).map(GroupAssignment::into_indices)
    }

    fn segment_groups(&self, batch: &[EncodedTransaction]) -> Result<GroupAssignment, GroupError> {
        self.check_batch_size(batch)?;

        info!(tx_count = batch.len(), "Segmenting transaction groups");

        let assignment = segment_with_limit(&self.codec, batch, self.config.max_group_size)
            .map_err(|err| {
                match &err {
                    GroupError::Grouping(grouping) => {
                        let (start, end) = grouping.range();
                        warn!(start, end, error = %grouping, "Grouping violation");
                    }
                    other => warn!(error = %other, "Segmentation failed"),
                }
                err
            })?;

        debug_assert!(invariant_dense_indices(assignment.indices()));
        debug_assert_eq!(assignment.indices().len(), batch.len());
        debug_assert!(invariant_contiguous_groups(&position_groups(&assignment)));

        for run in assignment.runs() {
            debug!(
                index = run.index,
                start = run.start,
                end = run.end,
                stamped = run.is_stamped(),
                "Verified run"
            );
        }

        info!(
            tx_count = batch.len(),
            group_count = assignment.group_count(),
            "Segmentation complete"
        );
        Ok(assignment)
    }
}

/// Claimed group per batch position.
fn position_groups(assignment: &GroupAssignment) -> Vec<Digest> {
    assignment
        .runs()
        .iter()
        .flat_map(|run| std::iter::repeat(run.group).take(run.len()))
        .collect()
}
