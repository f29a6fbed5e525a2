//! Placement of tree levels in the flat intermediates buffer.
//!
//! The layout is fixed: levels are stored bottom-up, starting with the level right above the
//! leaves, so the root is always the very last node. Level `r` holds `leaf_count >> (r + 1)` nodes
//! and starts at node offset `leaf_count - (leaf_count >> r)`. Node `i` of level `r` is the parent
//! of nodes `2 * i` and `2 * i + 1` of level `r - 1` (or of leaves when `r == 0`).


use crate::{BufferKind, MerklizeError, NODE_WORDS};
use core::ops::Range;

/// Validated shape of a tree with a power-of-two number of leaves
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TreeLayout {
    leaf_count: usize,
}

impl TreeLayout {
    /// Smallest supported number of leaves
    pub const MIN_LEAF_COUNT: usize = 2;

    /// Create layout for the given number of leaves.
    ///
    /// Returns an error if `leaf_count` is not a power of two or is smaller than
    /// [`Self::MIN_LEAF_COUNT`].
    pub fn new(leaf_count: usize) -> Result<Self, MerklizeError> {
        if leaf_count < Self::MIN_LEAF_COUNT || !leaf_count.is_power_of_two() {
            return Err(MerklizeError::InvalidLeafCount { leaf_count });
        }

        Ok(Self { leaf_count })
    }

    /// Number of leaves
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of levels above the leaves, including the root level
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.leaf_count.ilog2() as usize
    }

    /// Total number of nodes above the leaves, including the root
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.leaf_count - 1
    }

    /// Number of nodes at `level`, `None` if there is no such level
    #[inline]
    pub fn level_len(&self, level: usize) -> Option<usize> {
        (level < self.num_levels()).then(|| self.leaf_count >> (level + 1))
    }

    /// Offset (in nodes) of the first node of `level`, `None` if there is no such level
    #[inline]
    pub fn level_offset(&self, level: usize) -> Option<usize> {
        (level < self.num_levels()).then(|| self.leaf_count - (self.leaf_count >> level))
    }

    /// Range of nodes occupied by `level`, `None` if there is no such level
    #[inline]
    pub fn level_range(&self, level: usize) -> Option<Range<usize>> {
        let offset = self.level_offset(level)?;
        let len = self.level_len(level)?;
        Some(offset..offset + len)
    }

    /// Offset (in nodes) of the root, which is always the last node
    #[inline]
    pub fn root_offset(&self) -> usize {
        self.num_nodes() - 1
    }

    /// Position of the parent of node `index` at `level`.
    ///
    /// Returns `None` for the root or a non-existent node.
    #[inline]
    pub fn parent(&self, level: usize, index: usize) -> Option<(usize, usize)> {
        if index >= self.level_len(level)? {
            return None;
        }

        let parent_level = level + 1;
        self.level_len(parent_level)?;

        Some((parent_level, index / 2))
    }

    /// Size of the leaves buffer in words
    #[inline]
    pub fn leaves_words(&self) -> usize {
        self.leaf_count * NODE_WORDS
    }

    /// Size of the intermediates buffer in words
    #[inline]
    pub fn intermediates_words(&self) -> usize {
        self.num_nodes() * NODE_WORDS
    }

    /// Check both caller-provided buffer sizes against this layout
    pub fn check_buffers(
        &self,
        leaves_words: usize,
        intermediates_words: usize,
    ) -> Result<(), MerklizeError> {
        if leaves_words != self.leaves_words() {
            return Err(MerklizeError::BufferSizeMismatch {
                buffer: BufferKind::Leaves,
                expected: self.leaves_words(),
                actual: leaves_words,
            });
        }
        if intermediates_words != self.intermediates_words() {
            return Err(MerklizeError::BufferSizeMismatch {
                buffer: BufferKind::Intermediates,
                expected: self.intermediates_words(),
                actual: intermediates_words,
            });
        }

        Ok(())
    }
}
