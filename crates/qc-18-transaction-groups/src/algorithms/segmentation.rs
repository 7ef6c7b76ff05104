//! Group Segmentation
//!
//! Splits a batch into maximal contiguous runs, verifies each claimed run on
//! its own and rejects a group id that reappears after its run has closed.
//! Cost is one decode per element plus one compose per closed stamped run.

use super::verifier::check_run;
use crate::domain::entities::{GroupAssignment, GroupRun, TransactionRecord};
use crate::domain::errors::{GroupError, GroupingError};
use crate::domain::value_objects::{Digest, EncodedTransaction};
use crate::ports::outbound::TransactionCodec;
use std::collections::HashMap;

/// Stamped run still accepting members.
struct OpenRun {
    start: usize,
    group: Digest,
    members: Vec<TransactionRecord>,
}

impl OpenRun {
    fn end(&self) -> usize {
        self.start + self.members.len()
    }
}

/// Segment a batch with no limit on run length.
pub fn find_and_verify_groups<C: TransactionCodec + ?Sized>(
    codec: &C,
    batch: &[EncodedTransaction],
) -> Result<GroupAssignment, GroupError> {
    segment_with_limit(codec, batch, usize::MAX)
}

/// Segment a batch, rejecting any stamped run longer than `max_group_size`.
///
/// Unstamped transactions each form their own run. Fails on the first
/// malformed element or the first inconsistent run; no partial assignment is
/// returned.
pub fn segment_with_limit<C: TransactionCodec + ?Sized>(
    codec: &C,
    batch: &[EncodedTransaction],
    max_group_size: usize,
) -> Result<GroupAssignment, GroupError> {
    let mut assignment = GroupAssignment::new();
    // Closed stamped runs: group -> [start, end)
    let mut finalized: HashMap<Digest, (usize, usize)> = HashMap::new();
    let mut open: Option<OpenRun> = None;

    for (position, tx) in batch.iter().enumerate() {
        let record = codec
            .decode(tx.as_bytes())
            .map_err(GroupError::decode_at(position))?;
        let group = record.group();

        // 1. Extend the open run on a matching non-zero claim
        if let Some(run) = open
            .as_mut()
            .filter(|run| !group.is_zero() && run.group == group)
        {
            run.members.push(record);
            continue;
        }

        // 2. Any other claim closes the open run
        if let Some(run) = open.take() {
            close_run(codec, run, max_group_size, &mut assignment, &mut finalized)?;
        }

        // 3. Unstamped: singleton run, nothing to verify
        if group.is_zero() {
            let index = assignment.group_count();
            assignment.push_run(GroupRun::new(index, position, position + 1, Digest::ZERO));
            continue;
        }

        // 4. A group may not reappear once its run has closed
        if let Some(&(first_start, first_end)) = finalized.get(&group) {
            return Err(GroupingError::NonContiguousGroup {
                start: position,
                end: claim_end(codec, batch, position, group),
                group,
                first_start,
                first_end,
            }
            .into());
        }

        open = Some(OpenRun {
            start: position,
            group,
            members: vec![record],
        });
    }

    if let Some(run) = open.take() {
        close_run(codec, run, max_group_size, &mut assignment, &mut finalized)?;
    }

    Ok(assignment)
}

/// End of the run claiming `group` that starts at `start`.
///
/// Stops at the first element that is unreadable or claims something else.
fn claim_end<C: TransactionCodec + ?Sized>(
    codec: &C,
    batch: &[EncodedTransaction],
    start: usize,
    group: Digest,
) -> usize {
    let extra = batch[start + 1..]
        .iter()
        .take_while(|tx| {
            codec
                .decode(tx.as_bytes())
                .is_ok_and(|record| record.group() == group)
        })
        .count();
    start + 1 + extra
}

fn close_run<C: TransactionCodec + ?Sized>(
    codec: &C,
    run: OpenRun,
    max_group_size: usize,
    assignment: &mut GroupAssignment,
    finalized: &mut HashMap<Digest, (usize, usize)>,
) -> Result<(), GroupingError> {
    let (start, end) = (run.start, run.end());

    if run.members.len() > max_group_size {
        return Err(GroupingError::GroupTooLarge {
            start,
            end,
            max: max_group_size,
        });
    }

    check_run(codec, run.group, &run.members).map_err(|computed| {
        GroupingError::DigestMismatch {
            start,
            end,
            claimed: run.group,
            computed,
        }
    })?;

    finalized.insert(run.group, (start, end));
    let index = assignment.group_count();
    assignment.push_run(GroupRun::new(index, start, end, run.group));
    Ok(())
}
