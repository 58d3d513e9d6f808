//! Street network components - nodes and edges

use geo::Point;

use crate::{Distance, StreetNodeId};

/// Street graph node
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// Source id of the node
    pub id: StreetNodeId,
    /// Node coordinates in the planar frame of the graph
    pub geometry: Point<f64>,
}

/// Street graph edge (street segment)
#[derive(Debug, Clone)]
pub struct StreetEdge {
    /// Segment length in frame units
    pub length: Distance,
}
