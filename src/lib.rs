//! Instrumented sorting engine.
//!
//! Sorts an array with one of four classic algorithms and records every
//! exchange it performs. The resulting [`OperationLog`] can be replayed on the
//! original input, one step at a time, to animate the sort:
//!
//! ```
//! use visual_sorting::Algorithm;
//!
//! let input = [3, 1, 2];
//! let result = Algorithm::QuickSort.sort(&input);
//! assert_eq!(result.sorted(), &[1, 2, 3]);
//!
//! let mut replayed = input.to_vec();
//! result.operations().replay(&mut replayed).unwrap();
//! assert_eq!(replayed, result.sorted());
//! ```
//!
//! Algorithms:
//! - **Quicksort**: Hoare-style partition around the middle element
//! - **Heapsort**: binary max-heap, O(n log n) in all cases
//! - **Insertion Sort**: adjacent exchanges, O(n) on sorted input
//! - **Merge Sort**: stable merge realised with the fewest exchanges

pub mod algorithm;
pub mod heap_sort;
pub mod insertion_sort;
pub mod lino_report;
pub mod merge_sort;
pub mod operation_log;
pub mod quick_sort;
pub mod stress;
pub mod validation;

pub use algorithm::{Algorithm, ParseAlgorithmError, SortResult};
pub use operation_log::{Operation, OperationLog, ReplayError};
pub use validation::{verify, ValidationError};
