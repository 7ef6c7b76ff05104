//! Core entities for Transaction Groups

use super::value_objects::{Digest, GROUP_FIELD_KEY};
use crate::codec::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decoded transaction as a key-ordered field map.
///
/// The GroupField is held apart from the other fields; `fields` never
/// contains [`GROUP_FIELD_KEY`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionRecord {
    fields: BTreeMap<String, FieldValue>,
    group: Digest,
}

impl TransactionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. A value under the group key sets the GroupField when it
    /// is a 32-byte binary and is dropped otherwise.
    pub fn with_field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.insert_field(key.into(), value);
        self
    }

    pub fn with_group(mut self, group: Digest) -> Self {
        self.group = group;
        self
    }

    /// Copy with the GroupField forced to zero.
    pub fn without_group(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            group: Digest::ZERO,
        }
    }

    pub fn insert_field(&mut self, key: String, value: FieldValue) -> Option<FieldValue> {
        if key == GROUP_FIELD_KEY {
            if let Some(group) = value.as_digest() {
                self.group = group;
            }
            return None;
        }
        self.fields.insert(key, value)
    }

    pub fn set_group(&mut self, group: Digest) {
        self.group = group;
    }

    pub fn group(&self) -> Digest {
        self.group
    }

    pub fn has_group(&self) -> bool {
        !self.group.is_zero()
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Fields other than the GroupField, in canonical key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields excluding the GroupField.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Same payload once the GroupField is ignored.
    pub fn same_payload(&self, other: &TransactionRecord) -> bool {
        self.fields == other.fields
    }
}

/// Maximal contiguous span of a batch sharing one grouping decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRun {
    /// Zero-based group index assigned to every member
    pub index: usize,
    /// First position (inclusive)
    pub start: usize,
    /// Last position (exclusive)
    pub end: usize,
    /// Claimed GroupField, zero for an unstamped singleton
    pub group: Digest,
}

impl GroupRun {
    pub fn new(index: usize, start: usize, end: usize, group: Digest) -> Self {
        Self {
            index,
            start,
            end,
            group,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_stamped(&self) -> bool {
        !self.group.is_zero()
    }

    pub fn contains(&self, position: usize) -> bool {
        (self.start..self.end).contains(&position)
    }
}

/// Result of segmenting a batch into verified groups.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAssignment {
    indices: Vec<usize>,
    runs: Vec<GroupRun>,
}

impl GroupAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a closed run and assign its index to every member.
    pub fn push_run(&mut self, run: GroupRun) {
        self.indices.extend(std::iter::repeat(run.index).take(run.len()));
        self.runs.push(run);
    }

    /// Group index per batch position.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn runs(&self) -> &[GroupRun] {
        &self.runs
    }

    pub fn group_count(&self) -> usize {
        self.runs.len()
    }

    /// Run containing a batch position.
    pub fn run_of(&self, position: usize) -> Option<&GroupRun> {
        let index = *self.indices.get(position)?;
        self.runs.get(index)
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }
}
