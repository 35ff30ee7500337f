/// Pairwise merge of two ranked runs, one human vote at a time.
///
/// A `MergeCursor` only exists while a comparison is pending. As soon as one
/// side is consumed, the caller finishes it and gets the merged run back.
use crate::types::{ItemIdx, Run, Vote};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MergeCursor {
    left: Run,
    right: Run,
    left_index: usize,
    right_index: usize,
    merged: Run,
}

impl MergeCursor {
    /// Begin merging two non-empty runs.
    pub fn new(left: Run, right: Run) -> Self {
        debug_assert!(!left.is_empty() && !right.is_empty(), "cannot merge an empty run");
        let capacity = left.len() + right.len();
        MergeCursor {
            left,
            right,
            left_index: 0,
            right_index: 0,
            merged: Vec::with_capacity(capacity),
        }
    }

    /// The two head items awaiting comparison, or `None` once either side is used up.
    pub fn pending(&self) -> Option<(ItemIdx, ItemIdx)> {
        let left = self.left.get(self.left_index)?;
        let right = self.right.get(self.right_index)?;
        Some((*left, *right))
    }

    /// Apply a vote to the pending pair. Returns the number of items moved into
    /// the merged output, or `None` if nothing was pending.
    pub fn apply(&mut self, vote: Vote) -> Option<usize> {
        let (left, right) = self.pending()?;
        let moved = match vote {
            Vote::Left => {
                self.merged.push(left);
                self.left_index += 1;
                1
            }
            Vote::Right => {
                self.merged.push(right);
                self.right_index += 1;
                1
            }
            Vote::Tie => {
                self.merged.push(left);
                self.merged.push(right);
                self.left_index += 1;
                self.right_index += 1;
                2
            }
        };
        debug_assert_eq!(self.left_index + self.right_index, self.merged.len());
        Some(moved)
    }

    /// Whether one side has been fully consumed.
    pub fn is_exhausted(&self) -> bool {
        self.left_index >= self.left.len() || self.right_index >= self.right.len()
    }

    /// Close out the merge: append whatever is left on either side, in order.
    ///
    /// Returns the completed run and how many items were appended without a vote.
    pub fn finish(self) -> (Run, usize) {
        let MergeCursor { left, right, left_index, right_index, mut merged } = self;
        let before = merged.len();
        merged.extend_from_slice(&left[left_index..]);
        merged.extend_from_slice(&right[right_index..]);
        let appended = merged.len() - before;
        (merged, appended)
    }

    pub fn left(&self) -> &[ItemIdx] {
        &self.left
    }

    pub fn right(&self) -> &[ItemIdx] {
        &self.right
    }

    pub fn left_index(&self) -> usize {
        self.left_index
    }

    pub fn right_index(&self) -> usize {
        self.right_index
    }

    pub fn merged(&self) -> &[ItemIdx] {
        &self.merged
    }

    /// Items not yet placed in the merged output, left side first.
    #[cfg(test)]
    pub fn unconsumed(&self) -> impl Iterator<Item = ItemIdx> + '_ {
        self.left[self.left_index..]
            .iter()
            .chain(&self.right[self.right_index..])
            .copied()
    }
}
