//! Compute workers hashing padded messages received over a bounded channel


use crate::Node;
use futures::channel::mpsc;
use futures::executor::block_on;
use futures::{SinkExt, StreamExt};
use merklize_sha256::{PaddedMessage, hash_padded};
use tracing::trace;

/// Padded pair of nodes together with the position of their parent within the level
#[derive(Debug, Copy, Clone)]
pub(crate) struct Job {
    pub(crate) index: usize,
    pub(crate) message: PaddedMessage,
}

/// Digest of a [`Job`], carries the same `index`
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Completed {
    pub(crate) index: usize,
    pub(crate) node: Node,
}

/// Process jobs until the job channel is closed or nobody is interested in results anymore.
///
/// Both send and receive block the calling thread, so this must run on a dedicated thread.
pub(crate) fn run_worker(
    worker_index: usize,
    mut jobs: mpsc::Receiver<Job>,
    mut results: mpsc::Sender<Completed>,
) {
    let mut processed = 0_usize;

    while let Some(Job { index, message }) = block_on(jobs.next()) {
        let node = hash_padded(&message);

        if block_on(results.send(Completed { index, node })).is_err() {
            trace!(%worker_index, %processed, "Results receiver dropped, exiting");
            return;
        }

        processed += 1;
    }

    trace!(%worker_index, %processed, "Job channel closed, exiting");
}
