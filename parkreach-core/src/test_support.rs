//! Graph and filesystem fixtures shared by unit tests

use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    StreetNodeId,
    loading::{EdgeRecord, GraphSettings, NodeRecord, build_street_graph},
    model::{CoordinateFrame, StreetGraph},
};

/// Directed graph in the `provided` frame from `(id, x, y)` nodes and
/// `(u, v, length)` edges
pub(crate) fn graph_from_edges(
    nodes: &[(StreetNodeId, f64, f64)],
    edges: &[(StreetNodeId, StreetNodeId, f64)],
) -> StreetGraph {
    let nodes: Vec<_> = nodes
        .iter()
        .map(|&(id, x, y)| NodeRecord {
            id,
            lat: 0.0,
            lon: 0.0,
            x: Some(x),
            y: Some(y),
        })
        .collect();
    let edges: Vec<_> = edges
        .iter()
        .map(|&(u, v, length)| EdgeRecord { u, v, length })
        .collect();
    build_street_graph(
        &nodes,
        &edges,
        &GraphSettings {
            frame: CoordinateFrame::Provided,
            undirected: false,
        },
    )
    .expect("valid test graph")
}

/// `width` x `height` lattice with two-way edges of `spacing` length.
/// Node `row * width + col` sits at `(col * spacing, row * spacing)`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub(crate) fn grid_graph(width: usize, height: usize, spacing: f64) -> StreetGraph {
    let id = |row: usize, col: usize| (row * width + col) as StreetNodeId;
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for row in 0..height {
        for col in 0..width {
            nodes.push((id(row, col), col as f64 * spacing, row as f64 * spacing));
            if col + 1 < width {
                edges.push((id(row, col), id(row, col + 1), spacing));
                edges.push((id(row, col + 1), id(row, col), spacing));
            }
            if row + 1 < height {
                edges.push((id(row, col), id(row + 1, col), spacing));
                edges.push((id(row + 1, col), id(row, col), spacing));
            }
        }
    }
    graph_from_edges(&nodes, &edges)
}

pub(crate) fn unique_temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("parkreach-tests-{name}-{nanos}"))
}
