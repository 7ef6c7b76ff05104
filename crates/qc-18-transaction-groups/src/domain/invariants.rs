//! Domain invariants for Transaction Groups

use super::entities::TransactionRecord;
use super::value_objects::Digest;
use std::collections::HashSet;

/// INVARIANT-1: Dense Indices
/// Group indices start at 0 and step by exactly 0 or 1 between neighbours.
pub fn invariant_dense_indices(indices: &[usize]) -> bool {
    let Some(&first) = indices.first() else {
        return true;
    };
    if first != 0 {
        return false;
    }
    indices
        .windows(2)
        .all(|pair| pair[1] == pair[0] || pair[1] == pair[0] + 1)
}

/// INVARIANT-2: Contiguous Groups
/// A non-zero group value occupies exactly one contiguous span of the batch.
pub fn invariant_contiguous_groups(groups: &[Digest]) -> bool {
    let mut closed: HashSet<Digest> = HashSet::new();
    let mut previous: Option<Digest> = None;

    for group in groups {
        if previous == Some(*group) && !group.is_zero() {
            continue;
        }
        if let Some(prev) = previous {
            if !prev.is_zero() {
                closed.insert(prev);
            }
        }
        if !group.is_zero() && closed.contains(group) {
            return false;
        }
        previous = Some(*group);
    }

    true
}

/// INVARIANT-3: Payload Preserved
/// Stamping changes nothing but the GroupField.
pub fn invariant_payload_preserved(
    originals: &[TransactionRecord],
    stamped: &[TransactionRecord],
) -> bool {
    originals.len() == stamped.len()
        && originals
            .iter()
            .zip(stamped)
            .all(|(original, stamped)| original.same_payload(stamped))
}
