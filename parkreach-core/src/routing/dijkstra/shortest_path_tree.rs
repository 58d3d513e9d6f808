use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use crate::{Distance, Error, model::StreetGraph};

/// Resumable single-source Dijkstra search
///
/// Each query settles nodes only until the requested target is final, and
/// later queries continue from where the previous one stopped. Answers are
/// identical to independent point-to-point searches from the same source.
pub struct ShortestPathTree<'a> {
    graph: &'a StreetGraph,
    source: NodeIndex,
    distances: Vec<Distance>,
    settled: FixedBitSet,
    heap: BinaryHeap<State>,
}

impl<'a> ShortestPathTree<'a> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeIndex`] if `source` is not in the graph.
    pub fn new(graph: &'a StreetGraph, source: NodeIndex) -> Result<Self, Error> {
        let node_count = graph.node_count();
        let mut tree = Self {
            graph,
            source,
            distances: vec![Distance::INFINITY; node_count],
            settled: FixedBitSet::with_capacity(node_count),
            heap: BinaryHeap::new(),
        };
        tree.reset(source)?;
        Ok(tree)
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    /// Restart the search from another source, reusing the allocations
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeIndex`] if `source` is not in the graph.
    pub fn reset(&mut self, source: NodeIndex) -> Result<(), Error> {
        if !self.graph.contains(source) {
            return Err(Error::InvalidNodeIndex);
        }
        self.source = source;
        self.distances.fill(Distance::INFINITY);
        self.settled.clear();
        self.heap.clear();

        self.distances[source.index()] = 0.0;
        self.heap.push(State {
            cost: 0.0,
            node: source,
        });
        Ok(())
    }

    /// Network distance from the source to `target`, `None` if unreachable
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeIndex`] if `target` is not in the graph.
    pub fn distance_to(&mut self, target: NodeIndex) -> Result<Option<Distance>, Error> {
        if !self.graph.contains(target) {
            return Err(Error::InvalidNodeIndex);
        }
        if self.settled.contains(target.index()) {
            return Ok(Some(self.distances[target.index()]));
        }

        while let Some(State { cost, node }) = self.heap.pop() {
            if self.settled.contains(node.index()) {
                continue;
            }
            self.settled.insert(node.index());

            // Relax before returning so the search can resume later
            for edge in self.graph.edges(node) {
                let next = edge.target();
                let next_cost = cost + edge.weight().length;
                if next_cost < self.distances[next.index()] {
                    self.distances[next.index()] = next_cost;
                    self.heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
            }

            if node == target {
                return Ok(Some(cost));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{grid_graph, graph_from_edges};

    #[test]
    fn resumed_queries_give_grid_distances() {
        // 6 x 5 grid, node 7 sits at column 1, row 1
        let graph = grid_graph(6, 5, 100.0);
        let source = graph.node_index(7).unwrap();
        let mut tree = ShortestPathTree::new(&graph, source).unwrap();

        // Query in an order that forces both resumption and cache hits
        let mut targets: Vec<i64> = (0..30).rev().collect();
        targets.extend(0..30);

        for id in targets {
            let target = graph.node_index(id).unwrap();
            let steps = (id % 6 - 1).abs() + (id / 6 - 1).abs();
            #[allow(clippy::cast_precision_loss)]
            let expected = steps as f64 * 100.0;
            assert_eq!(tree.distance_to(target).unwrap(), Some(expected), "target {id}");
        }
    }

    #[test]
    fn unreachable_target_is_none_and_search_stays_usable() {
        let graph = graph_from_edges(
            &[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 2.0, 0.0)],
            &[(1, 2, 1.0), (3, 1, 1.0)],
        );
        let source = graph.node_index(1).unwrap();
        let mut tree = ShortestPathTree::new(&graph, source).unwrap();

        assert_eq!(tree.distance_to(graph.node_index(3).unwrap()).unwrap(), None);
        assert_eq!(
            tree.distance_to(graph.node_index(2).unwrap()).unwrap(),
            Some(1.0)
        );
        assert_eq!(tree.distance_to(source).unwrap(), Some(0.0));
    }

    #[test]
    fn reset_switches_source() {
        let graph = graph_from_edges(&[(1, 0.0, 0.0), (2, 1.0, 0.0)], &[(1, 2, 3.0)]);
        let a = graph.node_index(1).unwrap();
        let b = graph.node_index(2).unwrap();
        let mut tree = ShortestPathTree::new(&graph, a).unwrap();
        assert_eq!(tree.distance_to(b).unwrap(), Some(3.0));

        tree.reset(b).unwrap();
        assert_eq!(tree.source(), b);
        assert_eq!(tree.distance_to(a).unwrap(), None);
    }

    #[test]
    fn invalid_indices_fail_loudly() {
        let graph = graph_from_edges(&[(1, 0.0, 0.0)], &[]);
        assert!(matches!(
            ShortestPathTree::new(&graph, NodeIndex::new(5)),
            Err(Error::InvalidNodeIndex)
        ));

        let mut tree = ShortestPathTree::new(&graph, NodeIndex::new(0)).unwrap();
        assert!(matches!(
            tree.distance_to(NodeIndex::new(9)),
            Err(Error::InvalidNodeIndex)
        ));
    }
}
