use std::num::NonZeroUsize;

/// Upper bound for the number of workers picked by [`MerklizerOptions::default()`]
const MAX_DEFAULT_WORKERS: usize = 16;
/// Channel capacity used by [`MerklizerOptions::default()`]
const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Tuning knobs of [`Merklizer`](crate::Merklizer).
///
/// None of them affect the output, only throughput.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MerklizerOptions {
    /// Number of compute workers hashing pairs of nodes in parallel.
    ///
    /// The number of workers actually spawned never exceeds the number of pairs at the widest
    /// level.
    pub num_workers: NonZeroUsize,
    /// Capacity of every job channel and of the shared results channel.
    ///
    /// Senders block when a channel is full, which provides backpressure between the padding
    /// feeder, compute workers and the orchestrator.
    pub channel_capacity: usize,
}

impl Default for MerklizerOptions {
    fn default() -> Self {
        let num_workers = num_cpus::get().clamp(1, MAX_DEFAULT_WORKERS);

        Self {
            num_workers: NonZeroUsize::new(num_workers).unwrap_or(NonZeroUsize::MIN),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl MerklizerOptions {
    /// Replace the number of workers
    pub fn with_num_workers(mut self, num_workers: NonZeroUsize) -> Self {
        self.num_workers = num_workers;
        self
    }

    /// Replace channel capacity
    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }
}
