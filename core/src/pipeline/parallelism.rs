//! pipeline/parallelism.rs
//! Render worker sizing.

use crate::config::TransferConfig;

/// Parallelism configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelismProfile {
    pub worker_count: usize,
    /// Bounded channel depth between feeder, workers and collector.
    pub inflight_symbols: usize,
}

impl ParallelismProfile {
    /// Size the pool for `jobs` render jobs.
    ///
    /// `requested` overrides the CPU count; the result never exceeds the job
    /// count and never drops below one.
    pub fn dynamic(jobs: usize, requested: Option<usize>) -> Self {
        let cores = requested.unwrap_or_else(num_cpus::get);
        let worker_count = cores.clamp(1, jobs.max(1));

        Self {
            worker_count,
            inflight_symbols: worker_count * 2,
        }
    }

    pub fn from_config(config: &TransferConfig, jobs: usize) -> Self {
        Self::dynamic(jobs, config.workers)
    }
}
