//! Algorithm selection and dispatch.
//!
//! [`Algorithm`] is the closed set of instrumented sorts. [`Algorithm::sort`]
//! is the single dispatch point: it copies the caller's input, runs the chosen
//! algorithm on the copy and returns the sorted array with its operation log.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::operation_log::OperationLog;
use crate::{heap_sort, insertion_sort, merge_sort, quick_sort};

/// The instrumented sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    QuickSort,
    HeapSort,
    InsertionSort,
    MergeSort,
}

impl Algorithm {
    /// Every algorithm, in the order they are presented side by side.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::QuickSort,
        Algorithm::HeapSort,
        Algorithm::InsertionSort,
        Algorithm::MergeSort,
    ];

    /// Human-readable title, e.g. "Quick Sort".
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::QuickSort => "Quick Sort",
            Algorithm::HeapSort => "Heap Sort",
            Algorithm::InsertionSort => "Insertion Sort",
            Algorithm::MergeSort => "Merge Sort",
        }
    }

    /// Short identifier used on the command line and in reports.
    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::QuickSort => "quick",
            Algorithm::HeapSort => "heap",
            Algorithm::InsertionSort => "insertion",
            Algorithm::MergeSort => "merge",
        }
    }

    /// Whether equal elements keep their relative order.
    pub fn is_stable(&self) -> bool {
        matches!(self, Algorithm::InsertionSort | Algorithm::MergeSort)
    }

    /// Sort a copy of `input`, recording every exchange.
    ///
    /// `input` is never modified. Empty and single-element inputs produce an
    /// empty log.
    pub fn sort<T: Ord + Clone>(&self, input: &[T]) -> SortResult<T> {
        let mut data = input.to_vec();
        let mut operations = OperationLog::new();

        match self {
            Algorithm::QuickSort => quick_sort::sort(&mut data, &mut operations),
            Algorithm::HeapSort => heap_sort::sort(&mut data, &mut operations),
            Algorithm::InsertionSort => insertion_sort::sort(&mut data, &mut operations),
            Algorithm::MergeSort => merge_sort::sort(&mut data, &mut operations),
        }

        debug!(
            "{} sorted {} elements in {} steps",
            self.name(),
            data.len(),
            operations.len()
        );

        SortResult::new(data, operations)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm '{}' (expected one of: quick, heap, insertion, merge)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Accepts the short id ("heap"), the title ("Heap Sort") and compact
    /// spellings ("heapsort", "heap_sort"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        let key = normalized.strip_suffix("sort").unwrap_or(&normalized);

        match key {
            "quick" => Ok(Algorithm::QuickSort),
            "heap" => Ok(Algorithm::HeapSort),
            "insertion" => Ok(Algorithm::InsertionSort),
            "merge" => Ok(Algorithm::MergeSort),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Sorted array paired with the operations that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortResult<T> {
    sorted: Vec<T>,
    operations: OperationLog,
}

impl<T> SortResult<T> {
    pub fn new(sorted: Vec<T>, operations: OperationLog) -> Self {
        SortResult { sorted, operations }
    }

    pub fn sorted(&self) -> &[T] {
        &self.sorted
    }

    pub fn operations(&self) -> &OperationLog {
        &self.operations
    }

    /// Number of recorded exchanges.
    pub fn steps(&self) -> usize {
        self.operations.len()
    }

    pub fn into_parts(self) -> (Vec<T>, OperationLog) {
        (self.sorted, self.operations)
    }
}
