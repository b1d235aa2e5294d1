//! Insertion Sort Implementation
//!
//! Each element walks leftward past every strictly greater predecessor. Each
//! step is a real adjacent exchange `(j, j - 1)`, so the recorded log replays to
//! exactly the same array the sort produced.
//!
//! Complexity: O(n²) worst and average case, O(n) on already sorted input.
//! Stable: equal elements never pass each other.

use crate::operation_log::OperationLog;

/// Sort a slice in-place, recording every exchange in `log`.
pub fn sort<T: Ord>(data: &mut [T], log: &mut OperationLog) {
    for i in 1..data.len() {
        let mut j = i;
        while j > 0 && data[j - 1] > data[j] {
            log.swap(data, j, j - 1);
            j -= 1;
        }
    }
}
