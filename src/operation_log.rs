//! Operation Log
//!
//! Every algorithm in this crate reorders its working array exclusively through
//! pairwise exchanges, and every exchange is appended to an [`OperationLog`].
//! Replaying the log against a copy of the original input reproduces the sorted
//! output exactly, which is what a visualizer needs to animate the sort step by
//! step.

use std::fmt;

/// A single recorded exchange of the elements at two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub first: usize,
    pub second: usize,
}

impl Operation {
    pub fn new(first: usize, second: usize) -> Self {
        Operation { first, second }
    }

    /// Largest index touched by this operation.
    #[inline]
    pub fn max_index(&self) -> usize {
        self.first.max(self.second)
    }
}

impl From<(usize, usize)> for Operation {
    fn from((first, second): (usize, usize)) -> Self {
        Operation { first, second }
    }
}

impl From<Operation> for (usize, usize) {
    fn from(op: Operation) -> Self {
        (op.first, op.second)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Errors raised when a log is replayed against an incompatible array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// Operation number `step` refers to `index`, but the array only has `len` elements.
    IndexOutOfBounds { step: usize, index: usize, len: usize },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::IndexOutOfBounds { step, index, len } => write!(
                f,
                "step {} exchanges index {} but the array has {} elements",
                step, index, len
            ),
        }
    }
}

impl std::error::Error for ReplayError {}

/// Ordered, append-only sequence of exchanges performed by one sort.
///
/// Insertion order is execution order. Only the algorithms inside this crate
/// can append; callers get a read-only view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationLog {
    operations: Vec<Operation>,
}

impl OperationLog {
    pub fn new() -> Self {
        OperationLog {
            operations: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        OperationLog {
            operations: Vec::with_capacity(capacity),
        }
    }

    /// Record an exchange of `data[i]` and `data[j]`, then perform it.
    ///
    /// Callers never pass `i == j`; an exchange with itself is not an
    /// observable reordering and must not appear in the log.
    #[inline]
    pub(crate) fn swap<T>(&mut self, data: &mut [T], i: usize, j: usize) {
        debug_assert_ne!(i, j, "self-exchange must not be recorded");
        self.operations.push(Operation::new(i, j));
        data.swap(i, j);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    pub fn as_slice(&self) -> &[Operation] {
        &self.operations
    }

    pub fn into_vec(self) -> Vec<Operation> {
        self.operations
    }

    /// Apply every operation, in order, to `data`.
    ///
    /// The whole log is checked against `data.len()` first, so on error `data`
    /// is left untouched.
    pub fn replay<T>(&self, data: &mut [T]) -> Result<(), ReplayError> {
        self.replay_prefix(data, self.operations.len())
    }

    /// Apply the first `steps` operations to `data`.
    ///
    /// `steps` larger than the log length replays the whole log. This is how a
    /// visualizer jumps straight to an arbitrary animation frame.
    pub fn replay_prefix<T>(&self, data: &mut [T], steps: usize) -> Result<(), ReplayError> {
        let prefix = &self.operations[..steps.min(self.operations.len())];
        check_bounds(prefix, data.len())?;
        for op in prefix {
            data.swap(op.first, op.second);
        }
        Ok(())
    }

    /// Iterate over every intermediate array state, starting with `initial`
    /// itself and ending with the fully replayed array.
    ///
    /// Yields `len() + 1` states.
    pub fn frames<T: Clone>(&self, initial: &[T]) -> Result<Frames<'_, T>, ReplayError> {
        check_bounds(&self.operations, initial.len())?;
        Ok(Frames {
            state: initial.to_vec(),
            operations: self.operations.iter(),
            started: false,
        })
    }
}

fn check_bounds(operations: &[Operation], len: usize) -> Result<(), ReplayError> {
    match operations
        .iter()
        .enumerate()
        .find(|(_, op)| op.max_index() >= len)
    {
        Some((step, op)) => Err(ReplayError::IndexOutOfBounds {
            step,
            index: op.max_index(),
            len,
        }),
        None => Ok(()),
    }
}

/// Iterator over successive array states produced by [`OperationLog::frames`].
pub struct Frames<'a, T> {
    state: Vec<T>,
    operations: std::slice::Iter<'a, Operation>,
    started: bool,
}

impl<T: Clone> Iterator for Frames<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if !self.started {
            self.started = true;
            return Some(self.state.clone());
        }
        let op = self.operations.next()?;
        self.state.swap(op.first, op.second);
        Some(self.state.clone())
    }
}

impl<'a> IntoIterator for &'a OperationLog {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

impl IntoIterator for OperationLog {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

impl FromIterator<Operation> for OperationLog {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        OperationLog {
            operations: iter.into_iter().collect(),
        }
    }
}
