use crate::util::chunks::{normalize_chunk_size, DEFAULT_CHUNK_SIZE};

/// Construction settings for ropes built from a flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RopeOptions {
    /// Maximum bytes per leaf. Values outside `1..=MAX_CHUNK_SIZE` are replaced by the default.
    pub chunk_size: usize,
    /// Rebalance after a concatenation leaves the root unbalanced.
    pub maintain_balance: bool,
}

impl Default for RopeOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            maintain_balance: false,
        }
    }
}

impl RopeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_maintain_balance(mut self, maintain_balance: bool) -> Self {
        self.maintain_balance = maintain_balance;
        self
    }

    /// The chunk size actually used when splitting.
    pub fn effective_chunk_size(&self) -> usize {
        normalize_chunk_size(self.chunk_size)
    }
}
