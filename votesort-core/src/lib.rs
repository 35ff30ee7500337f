/// votesort-core: Interactive merge-sort engine.
///
/// Bottom-up merge sort where every comparison is answered by a person.
/// No IO, no terminal, no filesystem: the caller shows `current_pair()`,
/// collects a vote, and hands it back.
///
/// Items are identified by caller-provided `i64` IDs. The crate handles the
/// internal mapping to array indices, so callers never think about indices.
///
/// # Quick start
///
/// ```rust
/// use votesort_core::{Item, MergeSorter, Vote};
///
/// let items = vec![
///     Item::new(1, "Wave"),
///     Item::new(2, "Say My Name"),
///     Item::new(3, "Utopia"),
/// ];
///
/// let mut sorter = MergeSorter::start_seeded(items, 7).unwrap();
///
/// while let Some(pair) = sorter.current_pair() {
///     // Prefer the shorter title.
///     let vote = if pair.left.title.len() <= pair.right.title.len() {
///         Vote::Left
///     } else {
///         Vote::Right
///     };
///     sorter.handle_vote(vote).unwrap();
/// }
///
/// assert_eq!(sorter.current_progress(), 100);
/// for (rank, item) in sorter.final_result().unwrap().iter().enumerate() {
///     println!("{}. {}", rank + 1, item.title);
/// }
/// ```

pub mod constants;
pub mod engine;
pub mod error;
mod merge;
pub mod progress;
mod state;
pub mod types;

// Re-export primary public API at crate root.
pub use engine::MergeSorter;
pub use error::SortError;
pub use progress::{estimate_total_steps, progress_percent};
pub use state::{CursorSnapshot, SessionSnapshot};
pub use types::{Item, Pair, Vote};
