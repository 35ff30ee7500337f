/// Session state as a single immutable value.
///
/// Every transition returns a new `SessionState` instead of patching fields in
/// place. A history entry is therefore just the previous value.
use std::collections::VecDeque;

use tracing::debug;

use crate::merge::MergeCursor;
use crate::types::{ItemCatalog, ItemIdx, Run, Vote};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SessionState {
    /// Runs waiting to be merged, front first.
    queue: VecDeque<Run>,
    /// Present only while a comparison is pending.
    cursor: Option<MergeCursor>,
    merged_count: usize,
    result: Option<Run>,
}

impl SessionState {
    /// Seed the queue with one singleton run per item, in the given order.
    pub fn seeded(order: &[ItemIdx]) -> Self {
        SessionState {
            queue: order.iter().map(|&idx| vec![idx]).collect(),
            ..SessionState::default()
        }
        .settle()
    }

    /// Restore the queue invariant after a change.
    ///
    /// With a comparison pending, nothing happens. Otherwise the two front runs
    /// move into a fresh cursor, or a lone remaining run becomes the result.
    pub fn settle(mut self) -> Self {
        if self.result.is_some() || self.cursor.is_some() {
            return self;
        }

        if self.queue.len() >= 2 {
            if let (Some(left), Some(right)) = (self.queue.pop_front(), self.queue.pop_front()) {
                debug!(
                    left_len = left.len(),
                    right_len = right.len(),
                    queued = self.queue.len(),
                    "starting merge"
                );
                self.cursor = Some(MergeCursor::new(left, right));
            }
        } else if let Some(last) = self.queue.pop_front() {
            debug!(len = last.len(), "final run ready");
            self.result = Some(last);
        }

        self
    }

    /// The state after `vote` is applied, or `None` if no comparison is pending.
    pub fn after_vote(&self, vote: Vote) -> Option<Self> {
        let mut next = self.clone();
        let cursor = next.cursor.as_mut()?;
        let moved = cursor.apply(vote)?;
        let exhausted = cursor.is_exhausted();
        next.merged_count += moved;

        if exhausted {
            if let Some(done) = next.cursor.take() {
                let (run, appended) = done.finish();
                debug!(len = run.len(), appended, "merge finished");
                next.merged_count += appended;
                next.queue.push_back(run);
            }
        }

        Some(next.settle())
    }

    pub fn pending(&self) -> Option<(ItemIdx, ItemIdx)> {
        self.cursor.as_ref().and_then(MergeCursor::pending)
    }

    pub fn merged_count(&self) -> usize {
        self.merged_count
    }

    pub fn result(&self) -> Option<&[ItemIdx]> {
        self.result.as_deref()
    }

    #[cfg(test)]
    pub fn queued_runs(&self) -> usize {
        self.queue.len()
    }

    /// Runs not yet merged into the final ranking, counting both sides of an
    /// active merge.
    pub fn remaining_runs(&self) -> usize {
        match (&self.result, &self.cursor) {
            (Some(_), _) => 1,
            (None, Some(_)) => self.queue.len() + 2,
            (None, None) => self.queue.len(),
        }
    }

    /// Caller-facing copy of this state, expressed in item IDs.
    pub fn snapshot(&self, catalog: &ItemCatalog) -> SessionSnapshot {
        let ids = |run: &[ItemIdx]| -> Vec<i64> { run.iter().map(|&idx| catalog.get(idx).id).collect() };
        SessionSnapshot {
            queue: self.queue.iter().map(|run| ids(run.as_slice())).collect(),
            cursor: self.cursor.as_ref().map(|c| CursorSnapshot {
                left: ids(c.left()),
                right: ids(c.right()),
                left_index: c.left_index(),
                right_index: c.right_index(),
                merged: ids(c.merged()),
            }),
            merged_count: self.merged_count,
            final_result: self.result.as_deref().map(ids),
        }
    }

    /// Every item index the state currently places somewhere, in no
    /// particular order. Used to check the partition invariant.
    #[cfg(test)]
    pub fn placed(&self) -> Vec<ItemIdx> {
        let mut all: Vec<ItemIdx> = self.queue.iter().flatten().copied().collect();
        if let Some(cursor) = &self.cursor {
            all.extend_from_slice(cursor.merged());
            all.extend(cursor.unconsumed());
        }
        if let Some(result) = &self.result {
            all.extend_from_slice(result);
        }
        all
    }
}

/// Read-only view of a merge in progress, in item IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CursorSnapshot {
    pub left: Vec<i64>,
    pub right: Vec<i64>,
    pub left_index: usize,
    pub right_index: usize,
    pub merged: Vec<i64>,
}

/// Read-only view of a whole session, in item IDs.
///
/// Two snapshots compare equal exactly when the underlying states do, which
/// makes this the handle for checking undo and replay behavior from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub queue: Vec<Vec<i64>>,
    pub cursor: Option<CursorSnapshot>,
    pub merged_count: usize,
    pub final_result: Option<Vec<i64>>,
}

impl SessionSnapshot {
    /// All item IDs held anywhere in the session: queued runs, the merged
    /// prefix and unconsumed tails of the cursor, and the final result.
    pub fn placed_ids(&self) -> Vec<i64> {
        let mut all: Vec<i64> = self.queue.iter().flatten().copied().collect();
        if let Some(cursor) = &self.cursor {
            all.extend_from_slice(&cursor.merged);
            all.extend_from_slice(&cursor.left[cursor.left_index..]);
            all.extend_from_slice(&cursor.right[cursor.right_index..]);
        }
        if let Some(result) = &self.final_result {
            all.extend_from_slice(result);
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<ItemIdx>) -> Vec<ItemIdx> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_seeded_installs_first_two_runs() {
        let state = SessionState::seeded(&[0, 1, 2, 3]);
        assert_eq!(state.pending(), Some((0, 1)));
        assert_eq!(state.queued_runs(), 2);
        assert_eq!(state.remaining_runs(), 4);
        assert!(state.result().is_none());
    }

    #[test]
    fn test_single_item_settles_to_result() {
        let state = SessionState::seeded(&[0]);
        assert_eq!(state.result(), Some(&[0][..]));
        assert_eq!(state.pending(), None);
        assert_eq!(state.queued_runs(), 0);
    }

    #[test]
    fn test_finished_merge_goes_to_back_of_queue() {
        let state = SessionState::seeded(&[0, 1, 2]);
        let next = state.after_vote(Vote::Right).unwrap();

        // [1, 0] was appended behind [2], so [2] merges against it next.
        assert_eq!(next.pending(), Some((2, 1)));
        assert_eq!(next.merged_count(), 2);
        assert_eq!(next.queued_runs(), 0);
    }

    #[test]
    fn test_vote_leaves_original_state_untouched() {
        let state = SessionState::seeded(&[0, 1, 2, 3]);
        let copy = state.clone();
        let _next = state.after_vote(Vote::Left).unwrap();
        assert_eq!(state, copy);
    }

    #[test]
    fn test_vote_after_completion_is_rejected() {
        let state = SessionState::seeded(&[0, 1]);
        let done = state.after_vote(Vote::Tie).unwrap();
        assert_eq!(done.result(), Some(&[0, 1][..]));
        assert!(done.after_vote(Vote::Left).is_none());
    }

    #[test]
    fn test_partition_holds_through_a_session() {
        let mut state = SessionState::seeded(&[4, 2, 0, 3, 1]);
        let votes = [Vote::Left, Vote::Right, Vote::Tie, Vote::Right, Vote::Left];
        let mut i = 0;
        while state.result().is_none() {
            assert_eq!(sorted(state.placed()), vec![0, 1, 2, 3, 4]);
            state = state.after_vote(votes[i % votes.len()]).unwrap();
            i += 1;
        }
        assert_eq!(sorted(state.placed()), vec![0, 1, 2, 3, 4]);
    }
}
