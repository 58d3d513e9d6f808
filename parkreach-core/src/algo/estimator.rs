//! Minimum network distance from one origin to one park
//!
//! A park usually has several entrance points. The Euclidean distance to
//! each point is cheap, the network distance is not, so points farther than
//! the pruning threshold in a straight line are never searched. Pruning is
//! applied point by point: a far point is skipped and the scan continues
//! with the rest of the group, whatever order the points come in.

use std::ops::AddAssign;

use geo::{Distance as _, Euclidean};

use crate::{
    DEFAULT_PRUNE_THRESHOLD, Distance, Error,
    model::{DestinationGroup, Origin},
    routing::PathLengths,
};

/// Straight-line cut-off for path searches, in frame units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PruningPolicy {
    threshold: Distance,
}

impl PruningPolicy {
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for negative or NaN thresholds.
    /// Infinity is allowed and disables pruning.
    pub fn new(threshold: Distance) -> Result<Self, Error> {
        if threshold.is_nan() || threshold < 0.0 {
            return Err(Error::InvalidData(format!(
                "prune threshold must be >= 0, got {threshold}"
            )));
        }
        Ok(Self { threshold })
    }

    /// Never prunes
    pub fn exhaustive() -> Self {
        Self {
            threshold: Distance::INFINITY,
        }
    }

    pub fn threshold(&self) -> Distance {
        self.threshold
    }

    /// Whether a point this far away in a straight line is worth searching
    pub fn allows(&self, euclidean: Distance) -> bool {
        euclidean <= self.threshold
    }
}

impl Default for PruningPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PRUNE_THRESHOLD,
        }
    }
}

/// Distances from an origin to the nearest point of a group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupDistance {
    /// Minimum network distance, infinite if no point was reached
    pub path: Distance,
    /// Minimum straight-line distance over all points, pruned ones included
    pub euclidean: Distance,
}

impl GroupDistance {
    pub const UNREACHABLE: Self = Self {
        path: Distance::INFINITY,
        euclidean: Distance::INFINITY,
    };

    pub fn new(path: Distance, euclidean: Distance) -> Self {
        Self { path, euclidean }
    }

    pub fn is_reachable(&self) -> bool {
        self.path.is_finite()
    }
}

/// Work counters, summed over a batch for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EstimateStats {
    /// Path searches issued
    pub searches: usize,
    /// Points beyond the pruning threshold
    pub pruned: usize,
    /// Points skipped because the origin or the point has no street node
    pub unresolved: usize,
}

impl AddAssign for EstimateStats {
    fn add_assign(&mut self, other: Self) {
        self.searches += other.searches;
        self.pruned += other.pruned;
        self.unresolved += other.unresolved;
    }
}

/// Minimum path and Euclidean distance from `origin` to `group`
///
/// A missing path to a point counts as infinity. An empty group yields
/// [`GroupDistance::UNREACHABLE`] without touching `paths`.
///
/// # Errors
///
/// Propagates errors from `paths`, i.e. malformed node indices. A missing
/// path is not an error.
pub fn estimate_group_distance<P>(
    origin: &Origin,
    group: &DestinationGroup,
    policy: &PruningPolicy,
    paths: &mut P,
    stats: &mut EstimateStats,
) -> Result<GroupDistance, Error>
where
    P: PathLengths + ?Sized,
{
    let mut best = GroupDistance::UNREACHABLE;

    for point in &group.points {
        let euclidean = Euclidean.distance(origin.geometry, point.geometry);
        best.euclidean = best.euclidean.min(euclidean);

        if !policy.allows(euclidean) {
            stats.pruned += 1;
            continue;
        }

        let (Some(source), Some(target)) = (origin.node, point.node) else {
            stats.unresolved += 1;
            continue;
        };

        stats.searches += 1;
        if let Some(length) = paths.path_length(source, target)? {
            best.path = best.path.min(length);
        }
    }

    Ok(best)
}
