//! Routable street graph with a spatial index over its nodes

use std::fmt;

use geo::Point;
use hashbrown::HashMap;
use petgraph::{
    Directed,
    graph::{DiGraph, Edges, NodeIndex},
};
use rstar::{PointDistance, RTree, primitives::GeomWithData};

use super::components::{StreetEdge, StreetNode};
use crate::{
    Distance, Error, StreetNodeId,
    model::frame::{Location, Projector},
};

/// Planar node position tagged with its graph index
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Directed street graph weighted by segment length
///
/// Immutable once built. Node positions live in the planar frame described
/// by [`StreetGraph::projector`], which is also used to bring origins and
/// destinations into the same frame.
pub struct StreetGraph {
    pub(crate) graph: DiGraph<StreetNode, StreetEdge>,
    rtree: RTree<IndexedPoint>,
    node_ids: HashMap<StreetNodeId, NodeIndex>,
    projector: Projector,
}

impl StreetGraph {
    pub(crate) fn new(graph: DiGraph<StreetNode, StreetEdge>, projector: Projector) -> Self {
        let points: Vec<IndexedPoint> = graph
            .node_indices()
            .map(|idx| {
                let geometry = graph[idx].geometry;
                IndexedPoint::new([geometry.x(), geometry.y()], idx)
            })
            .collect();
        let node_ids = graph
            .node_indices()
            .map(|idx| (graph[idx].id, idx))
            .collect();

        Self {
            graph,
            rtree: RTree::bulk_load(points),
            node_ids,
            projector,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        node.index() < self.graph.node_count()
    }

    pub fn node(&self, node: NodeIndex) -> Option<&StreetNode> {
        self.graph.node_weight(node)
    }

    /// Graph index of a source node id
    pub fn node_index(&self, id: StreetNodeId) -> Option<NodeIndex> {
        self.node_ids.get(&id).copied()
    }

    /// Outgoing edges of `node`
    pub fn edges(&self, node: NodeIndex) -> Edges<'_, StreetEdge, Directed> {
        self.graph.edges(node)
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Brings a location into the frame of this graph
    ///
    /// # Errors
    ///
    /// See [`Projector::project`].
    pub fn project(&self, location: &Location) -> Result<Point<f64>, Error> {
        self.projector.project(location)
    }

    /// Nearest node to a planar point together with the straight-line
    /// distance to it. `None` for an empty graph.
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, Distance)> {
        let query = [point.x(), point.y()];
        self.rtree
            .nearest_neighbor(&query)
            .map(|nearest| (nearest.data, nearest.distance_2(&query).sqrt()))
    }
}

impl fmt::Debug for StreetGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreetGraph")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .field("projector", &self.projector)
            .finish_non_exhaustive()
    }
}
