/// Progress reported once the final ranking exists.
///
/// The step estimate is only an estimate, so the live value can stall
/// short of this (or hit it early). It is forced here on completion.
pub const PROGRESS_COMPLETE: u8 = 100;

/// Lower bound on the estimated number of merge steps.
///
/// A single item needs no merging at all (`1 * ceil(log2 1) == 0`); the floor
/// keeps the progress ratio well-defined.
pub const MIN_ESTIMATED_STEPS: usize = 1;
