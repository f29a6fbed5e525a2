//! Level-by-level orchestration of tree construction.
//!
//! Construction runs three kinds of concurrent stages connected by bounded channels:
//! * padding feeder that reads pairs of nodes from the level below, pads them and routes each pair
//!   to a worker
//! * compute workers that hash padded messages
//! * orchestrator itself, which collects digests and writes them to their positions in the tree
//!
//! Workers live for the whole construction, while the feeder is spawned per level. The feeder
//! borrows the level below immutably and the orchestrator borrows the level being built mutably,
//! both within a thread scope that is joined before the next level starts. That join is the level
//! barrier: level `r + 1` never reads a node of level `r` that wasn't written yet.

#[cfg(test)]
mod tests;

use crate::worker::{Completed, Job, run_worker};
use crate::{MerkleTree, MerklizeError, MerklizerOptions, NODE_WORDS, Node, TreeLayout};
use futures::channel::mpsc;
use futures::executor::block_on;
use futures::{SinkExt, StreamExt};
use merklize_sha256::{concat_pair, hash_pair, pad_message};
use std::{mem, thread};
use tracing::{Span, debug, trace};

/// Pipelined Merkle Tree builder with a configurable pool of compute workers
#[derive(Debug, Clone, Default)]
pub struct Merklizer {
    options: MerklizerOptions,
}

impl Merklizer {
    /// Create new instance with provided options
    pub fn new(options: MerklizerOptions) -> Self {
        Self { options }
    }

    /// Options this instance was created with
    pub fn options(&self) -> &MerklizerOptions {
        &self.options
    }

    /// Compute all intermediate nodes (including the root) of a tree with `leaf_count` leaves.
    ///
    /// `leaves` must contain exactly `leaf_count * 8` words and `intermediates` exactly
    /// `(leaf_count - 1) * 8` words, see [`TreeLayout`] for placement of nodes in `intermediates`.
    /// All preconditions are checked before any work starts, on error neither buffer is touched.
    pub fn construct(
        &self,
        leaf_count: usize,
        leaves: &[u32],
        intermediates: &mut [u32],
    ) -> Result<(), MerklizeError> {
        let layout = TreeLayout::new(leaf_count)?;
        layout.check_buffers(leaves.len(), intermediates.len())?;

        let (leaves, _) = leaves.as_chunks::<NODE_WORDS>();
        let (tree, _) = intermediates.as_chunks_mut::<NODE_WORDS>();

        self.construct_nodes(&layout, leaves, tree);

        Ok(())
    }

    /// Build a tree that owns its nodes
    pub fn build(&self, leaves: &[Node]) -> Result<MerkleTree, MerklizeError> {
        let layout = TreeLayout::new(leaves.len())?;
        let mut nodes = vec![Node::default(); layout.num_nodes()];

        self.construct_nodes(&layout, leaves, &mut nodes);

        Ok(MerkleTree::from_parts(layout, nodes))
    }

    /// Both `leaves` and `tree` must already be validated against `layout`
    fn construct_nodes(&self, layout: &TreeLayout, leaves: &[Node], tree: &mut [Node]) {
        let widest_level = layout.leaf_count() / 2;
        let num_workers = self.options.num_workers.get().min(widest_level);
        let channel_capacity = self.options.channel_capacity;

        debug!(
            leaf_count = %layout.leaf_count(),
            num_levels = %layout.num_levels(),
            %num_workers,
            %channel_capacity,
            "Starting tree construction"
        );

        thread::scope(|scope| {
            let (results_sender, mut results_receiver) = mpsc::channel(channel_capacity);
            let mut job_senders = Vec::with_capacity(num_workers);

            for worker_index in 0..num_workers {
                let (job_sender, job_receiver) = mpsc::channel(channel_capacity);
                job_senders.push(job_sender);

                let results_sender = results_sender.clone();
                let span = Span::current();
                scope.spawn(move || {
                    let _guard = span.enter();

                    run_worker(worker_index, job_receiver, results_sender);
                });
            }
            // Only workers hold results senders from now on
            drop(results_sender);

            let mut level_below = leaves;
            let mut remaining_tree = tree;
            for level in 0..layout.num_levels() {
                let level_len = level_below.len() / 2;
                let (level_nodes, rest) = mem::take(&mut remaining_tree).split_at_mut(level_len);

                process_level(
                    level,
                    level_below,
                    &mut *level_nodes,
                    &mut job_senders,
                    &mut results_receiver,
                );

                level_below = level_nodes;
                remaining_tree = rest;
            }

            // Closing job channels lets workers exit, scope joins them
            drop(job_senders);
        });

        debug!(leaf_count = %layout.leaf_count(), "Finished tree construction");
    }
}

/// Compute all nodes of a single level from the level below.
///
/// Returns only after every node of the level was written.
fn process_level(
    level: usize,
    level_below: &[Node],
    level_nodes: &mut [Node],
    job_senders: &mut [mpsc::Sender<Job>],
    results_receiver: &mut mpsc::Receiver<Completed>,
) {
    trace!(%level, num_nodes = %level_nodes.len(), "Starting level");

    thread::scope(|scope| {
        let span = Span::current();
        scope.spawn(move || {
            let _guard = span.enter();

            feed_pairs(level_below, job_senders);
        });

        for _ in 0..level_nodes.len() {
            let Completed { index, node } = block_on(results_receiver.next())
                .expect("Workers are running until all levels are done; qed");
            level_nodes[index] = node;
        }
    });

    trace!(%level, "Finished level");
}

/// Pad pairs of adjacent nodes and distribute them across workers in round-robin fashion
fn feed_pairs(level_below: &[Node], job_senders: &mut [mpsc::Sender<Job>]) {
    let num_workers = job_senders.len();
    let (pairs, _) = level_below.as_chunks::<2>();

    for (index, [left, right]) in pairs.iter().enumerate() {
        let message = pad_message(&concat_pair(left, right));

        block_on(job_senders[index % num_workers].send(Job { index, message }))
            .expect("Workers are running until job channels are closed; qed");
    }
}

/// Construct the tree on the current thread, without any workers.
///
/// Produces exactly the same output and has the same preconditions as
/// [`Merklizer::construct()`].
pub fn merklize_sequential(
    leaf_count: usize,
    leaves: &[u32],
    intermediates: &mut [u32],
) -> Result<(), MerklizeError> {
    let layout = TreeLayout::new(leaf_count)?;
    layout.check_buffers(leaves.len(), intermediates.len())?;

    let (leaves, _) = leaves.as_chunks::<NODE_WORDS>();
    let (mut tree_nodes, _) = intermediates.as_chunks_mut::<NODE_WORDS>();
    let mut level_below = leaves;

    while level_below.len() > 1 {
        let num_pairs = level_below.len() / 2;
        let level_nodes;
        (level_nodes, tree_nodes) = mem::take(&mut tree_nodes).split_at_mut(num_pairs);

        let (pairs, _) = level_below.as_chunks::<2>();
        for ([left, right], node) in pairs.iter().zip(level_nodes.iter_mut()) {
            *node = hash_pair(left, right);
        }

        level_below = level_nodes;
    }

    Ok(())
}
