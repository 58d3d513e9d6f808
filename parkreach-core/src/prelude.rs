pub use crate::DEFAULT_PRUNE_THRESHOLD;

// Re-export key components
pub use crate::algo::{
    BatchConfig, BatchRunner, GroupDistance, LogProgress, NoProgress, ProgressSink, PruningPolicy,
    WorkerAssignment, WorkerSummary, estimate_group_distance, partition_ranges,
};
pub use crate::loading::{
    ConfiguredGraphProvider, CsvGraphProvider, GraphProvider, GraphSettings,
    SnapshotGraphProvider, census::read_census_centroids, write_origin_table,
};
pub use crate::model::{CoordinateFrame, DestinationGroup, DestinationPoint, Origin, StreetGraph};
pub use crate::output::DistanceWriter;
pub use crate::routing::{PathLengths, PathSearch};

// Core types
pub use crate::Distance;
pub use crate::Error;
pub use crate::StreetNodeId;
