//! Walking distances from residential area centroids to park entrances
//! over a street network.
//!
//! The crate loads a routable street graph, snaps origins and park points to
//! it and computes, for every (origin, park) pair, the shortest network
//! distance together with a straight-line fallback. Work is split into
//! contiguous origin partitions so several workers can run independently.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod output;
pub mod prelude;
pub mod routing;

pub use error::Error;

pub use algo::{
    BatchConfig, BatchRunner, GroupDistance, NoProgress, ProgressSink, PruningPolicy,
    WorkerAssignment, WorkerSummary, estimate_group_distance, partition_ranges,
};
pub use loading::{
    ConfiguredGraphProvider, CsvGraphProvider, GraphProvider, GraphSettings,
    SnapshotGraphProvider,
};
pub use model::{DestinationGroup, DestinationPoint, Origin, StreetGraph};
pub use routing::{CachedPaths, PathLengths, PathSearch, PointToPointPaths};

/// Identifier of a street node in the source data (usually an OSM id)
pub type StreetNodeId = i64;

/// Length along the network or in the plane, in units of the coordinate frame
pub type Distance = f64;

/// Euclidean distance above which a destination point is not searched
pub const DEFAULT_PRUNE_THRESHOLD: Distance = 5000.0;

#[cfg(test)]
pub(crate) mod test_support;
