//! Result validation.
//!
//! Checks the three invariants every sort result must satisfy: the output is
//! non-decreasing, it is a permutation of the input, and replaying the log on
//! the input reproduces the output.

use std::fmt;

use crate::algorithm::SortResult;
use crate::operation_log::ReplayError;

/// First invariant violation found by [`verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `sorted[index] > sorted[index + 1]`.
    NotSorted { index: usize },
    /// The output does not hold the same multiset of values as the input.
    NotPermutation,
    /// The log could not be replayed against the input.
    Replay(ReplayError),
    /// Replaying the log diverges from the output at `index`.
    ReplayMismatch { index: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotSorted { index } => {
                write!(f, "output out of order at index {}", index)
            }
            ValidationError::NotPermutation => {
                write!(f, "output is not a permutation of the input")
            }
            ValidationError::Replay(err) => write!(f, "replay failed: {}", err),
            ValidationError::ReplayMismatch { index } => {
                write!(f, "replayed array differs from output at index {}", index)
            }
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationError::Replay(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ReplayError> for ValidationError {
    fn from(err: ReplayError) -> Self {
        ValidationError::Replay(err)
    }
}

/// Check if a slice is sorted in ascending order.
#[inline]
pub fn is_sorted<T: Ord>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

/// Check whether `output` holds exactly the values of `input`, counting duplicates.
pub fn is_permutation<T: Ord + Clone>(input: &[T], output: &[T]) -> bool {
    if input.len() != output.len() {
        return false;
    }
    let mut a = input.to_vec();
    let mut b = output.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Verify `result` against the `input` it was produced from.
pub fn verify<T: Ord + Clone>(input: &[T], result: &SortResult<T>) -> Result<(), ValidationError> {
    let sorted = result.sorted();

    if let Some(index) = sorted.windows(2).position(|w| w[0] > w[1]) {
        return Err(ValidationError::NotSorted { index });
    }

    if !is_permutation(input, sorted) {
        return Err(ValidationError::NotPermutation);
    }

    let mut replayed = input.to_vec();
    result.operations().replay(&mut replayed)?;
    if let Some(index) = replayed.iter().zip(sorted).position(|(a, b)| a != b) {
        return Err(ValidationError::ReplayMismatch { index });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::operation_log::{Operation, OperationLog};

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted(&[1, 2, 3, 4, 5]));
        assert!(is_sorted(&[1, 1, 1, 1]));
        assert!(is_sorted(&[1]));
        assert!(is_sorted::<u32>(&[]));
        assert!(!is_sorted(&[5, 4, 3, 2, 1]));
        assert!(!is_sorted(&[1, 3, 2]));
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[4, 2, 4, 1], &[1, 2, 4, 4]));
        assert!(is_permutation::<u32>(&[], &[]));
        assert!(!is_permutation(&[4, 2, 4, 1], &[1, 2, 2, 4]));
        assert!(!is_permutation(&[1, 2], &[1, 2, 3]));
    }

    #[test]
    fn test_verify_accepts_every_algorithm() {
        let input = vec![9, 3, 7, 1, 1, 8, 2];
        for algorithm in Algorithm::ALL {
            let result = algorithm.sort(&input);
            assert_eq!(verify(&input, &result), Ok(()), "{}", algorithm);
        }
    }

    #[test]
    fn test_verify_rejects_unsorted_output() {
        let result = SortResult::new(vec![1, 3, 2], OperationLog::new());
        assert_eq!(
            verify(&[1, 3, 2], &result),
            Err(ValidationError::NotSorted { index: 1 })
        );
    }

    #[test]
    fn test_verify_rejects_foreign_values() {
        let result = SortResult::new(vec![1, 2, 3], OperationLog::new());
        assert_eq!(
            verify(&[3, 2, 2], &result),
            Err(ValidationError::NotPermutation)
        );
    }

    #[test]
    fn test_verify_rejects_incomplete_log() {
        // Correct output, but the log leaves the input untouched.
        let result = SortResult::new(vec![1, 2, 3], OperationLog::new());
        assert_eq!(
            verify(&[2, 1, 3], &result),
            Err(ValidationError::ReplayMismatch { index: 0 })
        );
    }

    #[test]
    fn test_verify_rejects_out_of_range_log() {
        let log: OperationLog = vec![Operation::new(0, 9)].into_iter().collect();
        let result = SortResult::new(vec![1, 2], log);
        let err = verify(&[1, 2], &result).unwrap_err();
        assert!(matches!(err, ValidationError::Replay(_)));
        assert!(err.to_string().starts_with("replay failed"));
    }
}
