//! Thread pool sizing for seed sweeps.

use std::num::NonZeroUsize;

use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::debug;

/// Worker count for a sweep; `None` runs on the global rayon pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    threads: Option<NonZeroUsize>,
}

impl WorkerPool {
    /// `0` keeps the global pool, as the `--workers` flag documents.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            threads: NonZeroUsize::new(workers),
        }
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads.map(NonZeroUsize::get)
    }

    pub fn install<F, R>(&self, f: F) -> Result<R, ThreadPoolBuildError>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        let Some(threads) = self.threads else {
            return Ok(f());
        };
        debug!(threads = threads.get(), "building sweep pool");
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.get())
            .thread_name(|index| format!("skirmish-sweep-{index}"))
            .build()?;
        Ok(pool.install(f))
    }
}
