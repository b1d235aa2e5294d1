//! Quicksort Implementation
//!
//! In-place quicksort with a Hoare-style partition around the middle element.
//! Two cursors scan inward from both ends of the range and every inversion they
//! meet is exchanged through the [`OperationLog`].
//!
//! Complexity: O(n log n) expected, O(n²) worst case on inputs that keep
//! landing the middle pivot on an extreme value.

use crate::operation_log::OperationLog;

/// Sort a slice in-place, recording every exchange in `log`.
///
/// # Arguments
/// * `data` - The slice to sort in-place
/// * `log` - Receives one operation per exchange, in execution order
pub fn sort<T: Ord + Clone>(data: &mut [T], log: &mut OperationLog) {
    if data.len() <= 1 {
        return;
    }
    sort_range(data, 0, data.len() - 1, log);
}

/// Sort the inclusive range `[start, end]`.
fn sort_range<T: Ord + Clone>(data: &mut [T], start: usize, end: usize, log: &mut OperationLog) {
    if start >= end {
        return;
    }

    let pivot = data[(start + end) / 2].clone();

    // Cursors are signed: `right` may step one below `start` when the range
    // begins at index 0.
    let mut left = start as isize;
    let mut right = end as isize;

    while left <= right {
        while data[left as usize] < pivot {
            left += 1;
        }
        while data[right as usize] > pivot {
            right -= 1;
        }

        if left <= right {
            if left != right {
                log.swap(data, left as usize, right as usize);
            }
            left += 1;
            right -= 1;
        }
    }

    if (start as isize) < right {
        sort_range(data, start, right as usize, log);
    }
    if (left as usize) < end {
        sort_range(data, left as usize, end, log);
    }
}
