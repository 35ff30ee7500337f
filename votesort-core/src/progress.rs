/// Progress estimation.
///
/// Progress counts items merged rather than comparisons made. Items appended
/// automatically when one side of a merge runs out took no vote, but they are
/// still finished work, so they move the bar.
use crate::constants::{MIN_ESTIMATED_STEPS, PROGRESS_COMPLETE};

/// Estimated element movements for a full bottom-up merge sort of `num_items`.
///
/// Each element is merged roughly `ceil(log2 N)` times, giving `N * ceil(log2 N)`.
/// Ties and unbalanced final passes mean the real count can land on either side.
pub fn estimate_total_steps(num_items: usize) -> usize {
    if num_items == 0 {
        return MIN_ESTIMATED_STEPS;
    }
    let depth = num_items.next_power_of_two().ilog2() as usize;
    (num_items * depth).max(MIN_ESTIMATED_STEPS)
}

/// Percentage of `total_steps` covered by `merged_count`, rounded half-up and
/// capped at 100.
pub fn progress_percent(merged_count: usize, total_steps: usize) -> u8 {
    let total = total_steps.max(MIN_ESTIMATED_STEPS);
    let rounded = (merged_count * 200 + total) / (2 * total);
    rounded.min(PROGRESS_COMPLETE as usize) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_single_item_uses_floor() {
        assert_eq!(estimate_total_steps(1), 1);
        assert_eq!(estimate_total_steps(0), 1);
    }

    #[test]
    fn test_estimate_powers_of_two() {
        assert_eq!(estimate_total_steps(2), 2);
        assert_eq!(estimate_total_steps(4), 8);
        assert_eq!(estimate_total_steps(8), 24);
    }

    #[test]
    fn test_estimate_rounds_depth_up() {
        // ceil(log2 5) = 3
        assert_eq!(estimate_total_steps(5), 15);
        // ceil(log2 100) = 7
        assert_eq!(estimate_total_steps(100), 700);
    }

    #[test]
    fn test_progress_rounds_half_up() {
        assert_eq!(progress_percent(0, 8), 0);
        assert_eq!(progress_percent(1, 8), 13); // 12.5
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
    }

    #[test]
    fn test_progress_is_capped() {
        assert_eq!(progress_percent(8, 8), 100);
        assert_eq!(progress_percent(30, 8), 100);
    }

    #[test]
    fn test_progress_tolerates_zero_total() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(1, 0), 100);
    }
}
