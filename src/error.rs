//! Error types for temario operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for temario operations.
///
/// Provides detailed context about failures including dimension mismatches,
/// invalid hyperparameters, and anchor-selection degeneracies.
///
/// # Examples
///
/// ```
/// use temario::error::TemarioError;
///
/// let err = TemarioError::DimensionMismatch {
///     expected: "4x4".to_string(),
///     actual: "4x3".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemarioError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Fewer usable anchor candidates than requested anchors.
    ///
    /// Raised when the document-frequency filter leaves too few words, or
    /// when the surviving candidate rows span fewer distinct directions
    /// than the requested anchor count.
    InsufficientAnchorCandidates {
        /// Number of anchors requested
        needed: usize,
        /// Number of usable candidates found
        available: usize,
    },

    /// Operation requires a fitted model.
    NotFitted,

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for TemarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemarioError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Matrix dimension mismatch: expected {expected}, got {actual}"
                )
            }
            TemarioError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            TemarioError::InsufficientAnchorCandidates { needed, available } => {
                write!(
                    f,
                    "Insufficient anchor candidates: need {needed}, found {available} usable"
                )
            }
            TemarioError::NotFitted => write!(f, "Model not fitted. Call fit() first"),
            TemarioError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for TemarioError {}

impl From<&str> for TemarioError {
    fn from(msg: &str) -> Self {
        TemarioError::Other(msg.to_string())
    }
}

impl From<String> for TemarioError {
    fn from(msg: String) -> Self {
        TemarioError::Other(msg)
    }
}

impl TemarioError {
    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for TemarioError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<TemarioError> for &str {
    fn eq(&self, other: &TemarioError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, TemarioError>;
