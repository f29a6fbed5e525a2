//! Pipelined construction of binary Merkle Trees with SHA-256 2-to-1 hashing.
//!
//! Given a power-of-two number of 256-bit leaves, [`Merklizer`] computes every node above the
//! leaves, up to and including the root. Hashing is performed by a pool of compute workers fed over
//! bounded channels, while the orchestrator builds the tree level by level with a full barrier
//! between levels (see [`orchestrator`] module documentation for details).
//!
//! Nodes are written into a flat words buffer in a fixed bottom-up order with the root last, see
//! [`TreeLayout`]. Any external verifier must agree on this layout.
//!
//! ```
//! use merklize::{MerklizeError, TreeLayout, merklize};
//!
//! # fn main() -> Result<(), MerklizeError> {
//! let layout = TreeLayout::new(4)?;
//! let leaves = vec![0x0102_0304_u32; layout.leaves_words()];
//! let mut intermediates = vec![0_u32; layout.intermediates_words()];
//!
//! merklize(layout.leaf_count(), &leaves, &mut intermediates)?;
//!
//! let root = &intermediates[layout.root_offset() * 8..];
//! assert_eq!(root.len(), 8);
//! # Ok(())
//! # }
//! ```

mod error;
mod layout;
mod options;
pub mod orchestrator;
mod tree;
mod worker;

pub use error::{BufferKind, MerklizeError};
pub use layout::TreeLayout;
pub use merklize_sha256::{DIGEST_LEN, DIGEST_WORDS};
pub use options::MerklizerOptions;
pub use orchestrator::{Merklizer, merklize_sequential};
pub use tree::MerkleTree;

/// The number of words in a single node (and in a single leaf)
pub const NODE_WORDS: usize = DIGEST_WORDS;

/// Tree node (or leaf) as words
pub type Node = merklize_sha256::Digest;

/// Compute all intermediate nodes (including the root) using [`Merklizer`] with default options.
///
/// `leaves` must contain exactly `leaf_count * 8` words and `intermediates` exactly
/// `(leaf_count - 1) * 8` words, `leaf_count` must be a power of two and at least 2.
pub fn merklize(
    leaf_count: usize,
    leaves: &[u32],
    intermediates: &mut [u32],
) -> Result<(), MerklizeError> {
    Merklizer::default().construct(leaf_count, leaves, intermediates)
}

/// Convert a node into its canonical big-endian byte representation
#[inline]
pub fn node_to_bytes(node: &Node) -> [u8; DIGEST_LEN] {
    merklize_sha256::be_bytes_from_words(node)
}

/// Inverse of [`node_to_bytes()`]
#[inline]
pub fn node_from_bytes(bytes: &[u8; DIGEST_LEN]) -> Node {
    merklize_sha256::words_from_be_bytes(bytes)
}
