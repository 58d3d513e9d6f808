//! Distance estimation and its distribution over workers

pub mod batch;
pub mod estimator;
pub mod partition;
pub mod progress;

pub use batch::{BatchConfig, BatchRunner, ChunkTotals, WorkerSummary, process_chunk};
pub use estimator::{EstimateStats, GroupDistance, PruningPolicy, estimate_group_distance};
pub use partition::{WorkerAssignment, partition_ranges};
pub use progress::{LogProgress, NoProgress, ProgressSink};
