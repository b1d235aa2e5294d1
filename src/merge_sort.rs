//! Merge Sort Implementation
//!
//! Top-down merge sort over inclusive index ranges. The merge step works in two
//! passes:
//! 1. Build the stable merged order as a buffer of source positions, taking
//!    from the right run only when its head is strictly smaller
//! 2. Realise that order in place with the fewest exchanges, tracking where
//!    every element of the range currently sits
//!
//! Each merge of `len` elements records at most `len - 1` exchanges and none at
//! all when the two runs are already in order, so sorted input produces an
//! empty log.
//!
//! Complexity: O(n log n) comparisons and exchanges, O(n) auxiliary memory.
//! Stable.

use crate::operation_log::OperationLog;

/// Sort a slice in-place, recording every exchange in `log`.
pub fn sort<T: Ord>(data: &mut [T], log: &mut OperationLog) {
    let n = data.len();
    if n <= 1 {
        return;
    }

    let mut scratch = MergeScratch::new(n);
    sort_range(data, 0, n - 1, &mut scratch, log);
}

/// Reusable buffers for [`merge`], allocated once per sort.
struct MergeScratch {
    /// Merged order: `order[k]` is the pre-merge position of the element that
    /// belongs at `low + k`.
    order: Vec<usize>,
    /// `position[s]`: current index of the element that started the merge at `s`.
    position: Vec<usize>,
    /// `occupant[p]`: pre-merge position of the element currently at `p`.
    occupant: Vec<usize>,
}

impl MergeScratch {
    fn new(n: usize) -> Self {
        MergeScratch {
            order: Vec::with_capacity(n),
            position: vec![0; n],
            occupant: vec![0; n],
        }
    }
}

fn sort_range<T: Ord>(
    data: &mut [T],
    low: usize,
    high: usize,
    scratch: &mut MergeScratch,
    log: &mut OperationLog,
) {
    if low >= high {
        return;
    }

    let mid = low + (high - low) / 2;
    sort_range(data, low, mid, scratch, log);
    sort_range(data, mid + 1, high, scratch, log);
    merge(data, low, mid, high, scratch, log);
}

/// Merge the sorted runs `[low, mid]` and `[mid + 1, high]`.
fn merge<T: Ord>(
    data: &mut [T],
    low: usize,
    mid: usize,
    high: usize,
    scratch: &mut MergeScratch,
    log: &mut OperationLog,
) {
    // Runs already in order. Equal boundary elements count as ordered: the
    // left run's element must stay ahead of its equal on the right.
    if data[mid] <= data[mid + 1] {
        return;
    }

    let MergeScratch {
        order,
        position,
        occupant,
    } = scratch;

    order.clear();
    let (mut i, mut j) = (low, mid + 1);
    while i <= mid && j <= high {
        if data[j] < data[i] {
            order.push(j);
            j += 1;
        } else {
            order.push(i);
            i += 1;
        }
    }
    order.extend(i..=mid);
    order.extend(j..=high);

    for p in low..=high {
        position[p] = p;
        occupant[p] = p;
    }

    for (offset, &source) in order.iter().enumerate() {
        let target = low + offset;
        let current = position[source];
        if current == target {
            continue;
        }

        log.swap(data, target, current);

        let displaced = occupant[target];
        occupant[target] = source;
        occupant[current] = displaced;
        position[source] = target;
        position[displaced] = current;
    }
}
