/// Buffer that failed size validation
#[derive(Debug, Copy, Clone, Eq, PartialEq, derive_more::Display)]
pub enum BufferKind {
    /// Input leaves
    #[display("leaves")]
    Leaves,
    /// Output intermediate nodes (including the root)
    #[display("intermediates")]
    Intermediates,
}

/// Errors returned by tree construction.
///
/// All of them are precondition violations detected before any computation starts, nothing is
/// written into caller-provided buffers when an error is returned.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum MerklizeError {
    /// Leaf count is not a power of two or is smaller than two
    #[error("Invalid leaf count {leaf_count}, must be a power of two and at least 2")]
    InvalidLeafCount {
        /// Provided leaf count
        leaf_count: usize,
    },
    /// Caller-provided buffer doesn't match the size implied by leaf count
    #[error("Wrong {buffer} buffer size: expected {expected} words, actual {actual}")]
    BufferSizeMismatch {
        /// Which buffer is wrong
        buffer: BufferKind,
        /// Expected size in words
        expected: usize,
        /// Actual size in words
        actual: usize,
    },
}
