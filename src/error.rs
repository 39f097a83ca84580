use thiserror::Error;

/// Contract violations reported by range-taking rope operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RopeError {
    #[error("invalid range: {start} > {end}")]
    InvalidRange { start: usize, end: usize },

    #[error("end index out of bounds: {end} (size {size})")]
    EndOutOfBounds { end: usize, size: usize },

    #[error("index ({index}) is out of rope byte string bounds: [0..{size})")]
    IndexOutOfBounds { index: usize, size: usize },
}

impl RopeError {
    /// `start > end`
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RopeError::InvalidRange { .. })
    }

    pub fn is_range_error(&self) -> bool {
        matches!(self, RopeError::EndOutOfBounds { .. } | RopeError::IndexOutOfBounds { .. })
    }
}

pub type Result<T> = std::result::Result<T, RopeError>;

/// Validates `[start, end)` against `size`. The ordering check runs first.
pub(crate) fn check_range(start: usize, end: usize, size: usize) -> Result<()> {
    if start > end {
        return Err(RopeError::InvalidRange { start, end });
    }

    if end > size {
        return Err(RopeError::EndOutOfBounds { end, size });
    }

    Ok(())
}
