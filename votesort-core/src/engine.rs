/// Interactive merge-sort engine.
///
/// Pure state machine: no IO, no blocking. The caller renders `current_pair()`,
/// collects a vote however it likes, and feeds it back through `handle_vote()`.
/// Every operation settles the queue before returning, so the next pair (or
/// the final ranking) is visible immediately.
///
/// Items are identified by caller-provided `i64` IDs.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, trace};

use crate::constants::PROGRESS_COMPLETE;
use crate::error::SortError;
use crate::progress::{estimate_total_steps, progress_percent};
use crate::state::{SessionSnapshot, SessionState};
use crate::types::{Item, ItemCatalog, ItemIdx, Pair, Vote};

pub struct MergeSorter {
    /// Maps between caller i64 IDs and internal 0..N indices.
    catalog: ItemCatalog,

    /// Progress denominator, fixed when the session starts.
    total_steps: usize,

    state: SessionState,

    /// States captured immediately before each applied vote, oldest first.
    history: Vec<SessionState>,
    /// States rolled back by undo, most recent last. Cleared by any new vote.
    redo: Vec<SessionState>,
}

impl MergeSorter {
    /// Start a session with a uniformly random initial order.
    pub fn start(items: Vec<Item>) -> Result<Self, SortError> {
        Self::start_with_rng(items, &mut rand::rng())
    }

    /// Start a session whose initial order is fully determined by `seed`.
    pub fn start_seeded(items: Vec<Item>, seed: u64) -> Result<Self, SortError> {
        Self::start_with_rng(items, &mut StdRng::seed_from_u64(seed))
    }

    /// Start a session, shuffling with the supplied random source.
    pub fn start_with_rng<R: Rng + ?Sized>(items: Vec<Item>, rng: &mut R) -> Result<Self, SortError> {
        let catalog = ItemCatalog::from_items(items)?;
        let mut order: Vec<ItemIdx> = (0..catalog.len()).collect();
        order.shuffle(rng);
        Ok(Self::from_order(catalog, &order))
    }

    /// Start a session that keeps the items in the order given.
    ///
    /// Mostly useful for tests and replays that need a fixed pairing sequence.
    pub fn start_in_order(items: Vec<Item>) -> Result<Self, SortError> {
        let catalog = ItemCatalog::from_items(items)?;
        let order: Vec<ItemIdx> = (0..catalog.len()).collect();
        Ok(Self::from_order(catalog, &order))
    }

    fn from_order(catalog: ItemCatalog, order: &[ItemIdx]) -> Self {
        let total_steps = estimate_total_steps(catalog.len());
        let state = SessionState::seeded(order);
        info!(items = catalog.len(), total_steps, "sort started");

        MergeSorter {
            catalog,
            total_steps,
            state,
            history: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Throw away all progress and start over on the same items with a new shuffle.
    pub fn restart(&mut self) {
        self.restart_with_rng(&mut rand::rng());
    }

    /// Like `restart`, with a caller-supplied random source.
    pub fn restart_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<ItemIdx> = (0..self.catalog.len()).collect();
        order.shuffle(rng);
        self.state = SessionState::seeded(&order);
        self.history.clear();
        self.redo.clear();
        info!(items = self.catalog.len(), "sort restarted");
    }

    /// Answer the pending comparison.
    ///
    /// Rejected with `NoActivePair` (and no state change) when nothing is
    /// pending, i.e. after the ranking is complete.
    pub fn handle_vote(&mut self, vote: Vote) -> Result<(), SortError> {
        let next = self.state.after_vote(vote).ok_or(SortError::NoActivePair)?;
        trace!(?vote, merged = next.merged_count(), "vote applied");

        let previous = std::mem::replace(&mut self.state, next);
        self.history.push(previous);
        self.redo.clear();

        if self.state.result().is_some() {
            info!(votes = self.history.len(), "sort complete");
        }
        Ok(())
    }

    /// Roll back the most recent vote. Returns `false` if there is nothing to undo.
    pub fn handle_undo(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.state, previous);
        self.redo.push(undone);
        trace!(depth = self.history.len(), "vote undone");
        true
    }

    /// Re-apply the most recently undone vote. Returns `false` if there is
    /// nothing to redo.
    pub fn handle_redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let previous = std::mem::replace(&mut self.state, next);
        self.history.push(previous);
        trace!(depth = self.history.len(), "vote redone");
        true
    }

    /// The comparison awaiting a vote. `None` once the ranking is complete.
    pub fn current_pair(&self) -> Option<Pair<'_>> {
        self.state.pending().map(|(left, right)| Pair {
            left: self.catalog.get(left),
            right: self.catalog.get(right),
        })
    }

    /// Estimated completion, 0 to 100. Exactly 100 once the ranking exists.
    pub fn current_progress(&self) -> u8 {
        if self.is_complete() {
            return PROGRESS_COMPLETE;
        }
        progress_percent(self.state.merged_count(), self.total_steps)
    }

    /// The final ranking, best first. `None` until every item has been merged.
    pub fn final_result(&self) -> Option<Vec<&Item>> {
        self.state.result().map(|run| self.catalog.resolve(run))
    }

    pub fn is_complete(&self) -> bool {
        self.state.result().is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Votes currently applied (undone votes excluded).
    pub fn votes_cast(&self) -> usize {
        self.history.len()
    }

    /// Runs still to be merged, including both sides of the active merge.
    pub fn remaining_runs(&self) -> usize {
        self.state.remaining_runs()
    }

    /// Items placed into merged runs so far.
    pub fn merged_count(&self) -> usize {
        self.state.merged_count()
    }

    pub fn total_estimated_steps(&self) -> usize {
        self.total_steps
    }

    /// Number of items being ranked.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Always `false`: a session cannot be started without items.
    pub fn is_empty(&self) -> bool {
        self.catalog.len() == 0
    }

    /// Look up an item by its caller ID.
    pub fn item(&self, id: i64) -> Option<&Item> {
        self.catalog.to_idx(id).map(|idx| self.catalog.get(idx))
    }

    /// Read-only copy of the full session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot(&self.catalog)
    }
}
