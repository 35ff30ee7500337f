/// Errors returned by the merge engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    /// `start` was called with no items.
    #[error("cannot start a sort with no items")]
    EmptyInput,

    /// Two items share the same ID.
    #[error("duplicate item ID: {0}")]
    DuplicateId(i64),

    /// An item has an empty or whitespace-only title.
    #[error("item {0} has an empty title")]
    EmptyTitle(i64),

    /// A vote arrived while no comparison was pending.
    #[error("no comparison is waiting for a vote")]
    NoActivePair,
}
