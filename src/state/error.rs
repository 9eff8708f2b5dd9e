//! Error types shared by the plan, the library and the control surface

use std::error::Error;
use std::fmt;

/// Errors raised by workout plan and library operations
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutError {
    /// Bad exercise name or duration, or an empty workout title
    Validation(String),
    /// List operation outside the plan
    Index { index: usize, len: usize },
    /// No saved workout under the requested title
    NotFound(String),
    /// The backing store refused a write
    Storage(String),
    /// Shared state could not be locked
    Unavailable(String),
}

impl fmt::Display for WorkoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutError::Validation(msg) => write!(f, "{}", msg),
            WorkoutError::Index { index, len } => {
                write!(f, "No exercise at position {} (plan has {})", index, len)
            }
            WorkoutError::NotFound(msg) => write!(f, "{}", msg),
            WorkoutError::Storage(msg) => write!(f, "Storage error: {}", msg),
            WorkoutError::Unavailable(msg) => write!(f, "State unavailable: {}", msg),
        }
    }
}

impl Error for WorkoutError {}

pub type Result<T> = std::result::Result<T, WorkoutError>;
