use hashbrown::HashMap;
use log::{debug, info};
use petgraph::graph::DiGraph;

use super::GraphSettings;
use crate::{
    Error,
    loading::raw_types::{EdgeRecord, NodeRecord},
    model::{Projector, StreetEdge, StreetGraph, StreetNode},
};

/// Builds a street graph from node and edge rows
///
/// # Errors
///
/// Returns [`Error::InvalidData`] for duplicate node ids, edges that
/// reference unknown nodes, negative or non-finite lengths, and node
/// positions the configured frame cannot handle.
pub fn build_street_graph(
    nodes: &[NodeRecord],
    edges: &[EdgeRecord],
    settings: &GraphSettings,
) -> Result<StreetGraph, Error> {
    let locations: Vec<_> = nodes.iter().map(NodeRecord::location).collect();
    let projector = Projector::for_network(settings.frame, &locations);

    let edge_capacity = if settings.undirected {
        edges.len() * 2
    } else {
        edges.len()
    };
    let mut graph = DiGraph::with_capacity(nodes.len(), edge_capacity);
    let mut index = HashMap::with_capacity(nodes.len());

    for (record, location) in nodes.iter().zip(&locations) {
        let geometry = projector.project(location).map_err(|e| {
            Error::InvalidData(format!("street node {}: {e}", record.id))
        })?;
        let idx = graph.add_node(StreetNode {
            id: record.id,
            geometry,
        });
        if index.insert(record.id, idx).is_some() {
            return Err(Error::InvalidData(format!(
                "duplicate street node id {}",
                record.id
            )));
        }
    }

    for edge in edges {
        if !edge.length.is_finite() || edge.length < 0.0 {
            return Err(Error::InvalidData(format!(
                "edge {} -> {} has invalid length {}",
                edge.u, edge.v, edge.length
            )));
        }
        let (Some(&u), Some(&v)) = (index.get(&edge.u), index.get(&edge.v)) else {
            return Err(Error::InvalidData(format!(
                "edge {} -> {} references an unknown node",
                edge.u, edge.v
            )));
        };

        graph.add_edge(
            u,
            v,
            StreetEdge {
                length: edge.length,
            },
        );
        if settings.undirected && u != v {
            graph.add_edge(
                v,
                u,
                StreetEdge {
                    length: edge.length,
                },
            );
        }
    }

    debug!("Street graph frame: {projector:?}");
    info!(
        "Street graph built: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(StreetGraph::new(graph, projector))
}

/// Hands memory freed after table parsing back to the system
pub(super) fn release_parse_memory() {
    // CSV deserialization allocates large amounts of short lived memory
    // which glibc does not always return to the system on its own.
    //
    // # Safety
    //
    // This call is safe to use on linux with glibc implementation
    // which is checked by the cfg attribute in compile time.
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    unsafe {
        if libc::malloc_trim(0) == 0 {
            log::debug!("No heap memory was released after parsing");
        } else {
            log::debug!("Successfully trimmed unused heap memory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CoordinateFrame;

    fn node(id: i64, x: f64, y: f64) -> NodeRecord {
        NodeRecord {
            id,
            lat: 40.0,
            lon: -74.0,
            x: Some(x),
            y: Some(y),
        }
    }

    fn edge(u: i64, v: i64, length: f64) -> EdgeRecord {
        EdgeRecord { u, v, length }
    }

    fn provided() -> GraphSettings {
        GraphSettings {
            frame: CoordinateFrame::Provided,
            undirected: false,
        }
    }

    #[test]
    fn builds_directed_graph_with_index() {
        let graph = build_street_graph(
            &[node(10, 0.0, 0.0), node(20, 3.0, 4.0)],
            &[edge(10, 20, 5.0)],
            &provided(),
        )
        .unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let idx = graph.node_index(20).unwrap();
        assert_eq!(graph.node(idx).unwrap().geometry.x(), 3.0);
        assert_eq!(graph.nearest_node(&geo::Point::new(2.9, 4.1)).unwrap().0, idx);
    }

    #[test]
    fn undirected_setting_doubles_edges() {
        let settings = GraphSettings {
            undirected: true,
            ..provided()
        };
        let graph = build_street_graph(
            &[node(1, 0.0, 0.0), node(2, 1.0, 0.0)],
            &[edge(1, 2, 1.0), edge(2, 2, 0.0)],
            &settings,
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn rejects_bad_input() {
        let nodes = [node(1, 0.0, 0.0), node(2, 1.0, 0.0)];

        let err = build_street_graph(&nodes, &[edge(1, 3, 1.0)], &provided()).expect_err("unknown");
        assert!(err.to_string().contains("unknown node"));

        let err = build_street_graph(&nodes, &[edge(1, 2, -1.0)], &provided()).expect_err("negative");
        assert!(err.to_string().contains("invalid length"));

        let err = build_street_graph(&nodes, &[edge(1, 2, f64::NAN)], &provided()).expect_err("nan");
        assert!(err.to_string().contains("invalid length"));

        let err = build_street_graph(&[node(1, 0.0, 0.0), node(1, 1.0, 1.0)], &[], &provided())
            .expect_err("duplicate");
        assert!(err.to_string().contains("duplicate street node id 1"));
    }

    #[test]
    fn provided_frame_requires_projected_nodes() {
        let mut bare = node(1, 0.0, 0.0);
        bare.x = None;
        let err = build_street_graph(&[bare], &[], &provided()).expect_err("must fail");
        assert!(err.to_string().contains("street node 1"));
    }
}
