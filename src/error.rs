//! Error types for the array family.

use thiserror::Error;

/// Errors raised by checked array operations.
///
/// Each operation family gets its own variant so callers can tell a failed
/// `at` apart from a failed `remove_at` or `values_at`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrayError {
    /// Checked element access outside `0..len`.
    #[error("index out of range: the index is {index} but the length is {len}")]
    OutOfRange { index: usize, len: usize },

    /// `remove_at` / `removed_at` outside `0..len`.
    #[error("remove_at: index {index} is out of range for length {len}")]
    RemoveOutOfRange { index: usize, len: usize },

    /// One of the indices handed to `values_at` is outside `0..len`.
    #[error("values_at: index {index} is out of range for length {len}")]
    ValuesAtOutOfRange { index: usize, len: usize },

    /// The operation needs at least one element.
    #[error("{operation}: array is empty")]
    Empty { operation: &'static str },
}

/// Result type for checked array operations.
pub type Result<T> = std::result::Result<T, ArrayError>;
