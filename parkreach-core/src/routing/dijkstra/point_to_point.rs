use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use crate::{Distance, model::StreetGraph};

/// Length of the shortest path from `source` to `target`, `None` without one
///
/// The search stops as soon as `target` is settled. Tentative distances are
/// kept in a map, so memory follows the explored area rather than the graph.
/// Callers check that both indices belong to `graph`.
pub(crate) fn shortest_path_length(
    graph: &StreetGraph,
    source: NodeIndex,
    target: NodeIndex,
) -> Option<Distance> {
    let mut tentative: HashMap<NodeIndex, Distance> = HashMap::new();
    let mut heap = BinaryHeap::new();
    tentative.insert(source, 0.0);
    heap.push(State {
        cost: 0.0,
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            return Some(cost);
        }
        // stale entry
        if tentative.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in graph.edges(node) {
            let next_cost = cost + edge.weight().length;
            let slot = tentative.entry(edge.target()).or_insert(Distance::INFINITY);
            if next_cost < *slot {
                *slot = next_cost;
                heap.push(State {
                    cost: next_cost,
                    node: edge.target(),
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::graph_from_edges;

    #[test]
    fn finds_cheaper_detour() {
        // 1 -> 2 direct is 10, 1 -> 3 -> 2 is 4
        let graph = graph_from_edges(
            &[(1, 0.0, 0.0), (2, 5.0, 0.0), (3, 2.0, 1.0)],
            &[(1, 2, 10.0), (1, 3, 1.5), (3, 2, 2.5)],
        );
        let from = graph.node_index(1).unwrap();
        let to = graph.node_index(2).unwrap();

        assert_eq!(shortest_path_length(&graph, from, to), Some(4.0));
        assert_eq!(shortest_path_length(&graph, from, from), Some(0.0));
    }

    #[test]
    fn edges_are_one_way() {
        let graph = graph_from_edges(&[(1, 0.0, 0.0), (2, 1.0, 0.0)], &[(2, 1, 1.0)]);
        let a = graph.node_index(1).unwrap();
        let b = graph.node_index(2).unwrap();

        assert_eq!(shortest_path_length(&graph, a, b), None);
        assert_eq!(shortest_path_length(&graph, b, a), Some(1.0));
    }
}
