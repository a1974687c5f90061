use thiserror::Error;

/// Errors surfaced by the structures in this crate.
///
/// Every failing operation rejects before mutating anything, so a structure
/// that returned an error is still in the state it was in before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgorithmError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("range [{start}, {end}] out of bounds for length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
    #[error("`{0}` is not tracked")]
    NotFound(String),
}

impl AlgorithmError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// True for both the point-index and the range flavour of out-of-range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::RangeOutOfBounds { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AlgorithmError>;
