pub mod pool;
pub mod sweep;

pub use pool::WorkerPool;
pub use sweep::{run_sweep, SeedOutcome, SweepError, SweepSummary};
