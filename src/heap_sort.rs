//! Heapsort Implementation
//!
//! Binary max-heap sort in two phases:
//! 1. Build: sift every parent node down, from the last parent to the root
//! 2. Extract: exchange the root with the last unsorted element, shrink the
//!    heap by one and sift the new root down
//!
//! Complexity: O(n log n) in all cases. Not stable.

use crate::operation_log::OperationLog;

/// Sort a slice in-place, recording every exchange in `log`.
pub fn sort<T: Ord>(data: &mut [T], log: &mut OperationLog) {
    let n = data.len();
    if n <= 1 {
        return;
    }

    heapify(data, log);

    // [0, end] is a valid max-heap at the top of every iteration.
    let mut end = n - 1;
    while end > 0 {
        end = pop_max(data, end, log);
    }
}

/// Move the root of the heap `[0, end]` to `end` and restore the heap on
/// `[0, end - 1]`. Returns the new last heap index.
fn pop_max<T: Ord>(data: &mut [T], end: usize, log: &mut OperationLog) -> usize {
    log.swap(data, 0, end);
    let end = end - 1;
    sift_down(data, 0, end, log);
    end
}

/// Put `data` in max-heap order, starting from the last parent `(n - 2) / 2`.
fn heapify<T: Ord>(data: &mut [T], log: &mut OperationLog) {
    let n = data.len();
    let end = n - 1;
    for start in (0..=(n - 2) / 2).rev() {
        sift_down(data, start, end, log);
    }
}

/// Repair the heap rooted at `start`, assuming both child subtrees are valid
/// heaps. Only indices up to `end` (inclusive) belong to the heap.
fn sift_down<T: Ord>(data: &mut [T], start: usize, end: usize, log: &mut OperationLog) {
    let mut root = start;

    while root * 2 + 1 <= end {
        let child = root * 2 + 1;
        let mut largest = root;

        if data[largest] < data[child] {
            largest = child;
        }
        if child < end && data[largest] < data[child + 1] {
            largest = child + 1;
        }

        if largest == root {
            return;
        }

        log.swap(data, root, largest);
        root = largest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::is_sorted;
    use rand::Rng;

    fn is_max_heap(data: &[u32]) -> bool {
        (1..data.len()).all(|i| data[(i - 1) / 2] >= data[i])
    }

    #[test]
    fn test_sort_empty() {
        let mut data: Vec<u32> = vec![];
        let mut log = OperationLog::new();
        sort(&mut data, &mut log);
        assert!(log.is_empty());
    }

    #[test]
    fn test_sort_single() {
        let mut data = vec![42u32];
        let mut log = OperationLog::new();
        sort(&mut data, &mut log);
        assert_eq!(data, vec![42]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_sort_two_elements() {
        let mut data = vec![5u32, 3];
        let mut log = OperationLog::new();
        sort(&mut data, &mut log);
        assert_eq!(data, vec![3, 5]);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_heapify_builds_max_heap() {
        let mut rng = rand::thread_rng();
        let mut data: Vec<u32> = (0..257).map(|_| rng.gen_range(0..50)).collect();
        let mut log = OperationLog::new();
        heapify(&mut data, &mut log);
        assert!(is_max_heap(&data));
    }

    #[test]
    fn test_heap_holds_after_every_extraction() {
        let mut rng = rand::thread_rng();
        for size in [2usize, 3, 10, 64, 257] {
            let mut data: Vec<u32> = (0..size).map(|_| rng.gen_range(0..20)).collect();
            let mut log = OperationLog::new();
            heapify(&mut data, &mut log);

            let mut end = size - 1;
            while end > 0 {
                end = pop_max(&mut data, end, &mut log);
                assert!(is_max_heap(&data[..=end]), "heap broken at end {}", end);
                // Everything past the heap is sorted and no smaller than the root.
                assert!(is_sorted(&data[end + 1..]));
                assert!(data[end + 1..].iter().all(|&v| v >= data[0]));
            }
            assert!(is_sorted(&data));
        }
    }

    #[test]
    fn test_sort_reverse_five() {
        let input = vec![5u32, 4, 3, 2, 1];
        let mut data = input.clone();
        let mut log = OperationLog::new();
        sort(&mut data, &mut log);
        assert_eq!(data, vec![1, 2, 3, 4, 5]);

        // n - 1 extractions, each followed by at most floor(log2 n) sift steps.
        let n = input.len();
        let bound = (n - 1) * (1 + n.ilog2() as usize) + n;
        assert!(log.len() <= bound, "{} steps exceeds {}", log.len(), bound);

        let mut replayed = input;
        log.replay(&mut replayed).unwrap();
        assert_eq!(replayed, data);
    }

    #[test]
    fn test_sort_sorted_is_noop_equivalent() {
        let input: Vec<u32> = (0..64).collect();
        let mut data = input.clone();
        let mut log = OperationLog::new();
        sort(&mut data, &mut log);
        assert_eq!(data, input);

        let mut replayed = input.clone();
        log.replay(&mut replayed).unwrap();
        assert_eq!(replayed, input);
    }

    #[test]
    fn test_sort_duplicates() {
        let input = vec![5u32, 3, 5, 1, 3, 5, 1, 1];
        let mut data = input.clone();
        let mut log = OperationLog::new();
        sort(&mut data, &mut log);
        assert_eq!(data, vec![1, 1, 1, 3, 3, 5, 5, 5]);

        let mut replayed = input;
        log.replay(&mut replayed).unwrap();
        assert_eq!(replayed, data);
    }

    #[test]
    fn test_sort_random() {
        let mut rng = rand::thread_rng();
        let input: Vec<u32> = (0..1000).map(|_| rng.gen()).collect();
        let mut data = input.clone();
        let mut log = OperationLog::new();
        sort(&mut data, &mut log);
        assert!(is_sorted(&data));

        let mut replayed = input;
        log.replay(&mut replayed).unwrap();
        assert_eq!(replayed, data);
    }
}
