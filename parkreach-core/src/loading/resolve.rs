use geo::Point;
use log::{info, warn};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use super::raw_types::{DestinationRecord, OriginRecord};
use crate::{
    Distance, Error, StreetNodeId,
    model::{DestinationGroup, DestinationPoint, Origin, StreetGraph, group_destinations},
};

/// Projects origin rows into the graph frame and snaps them to street nodes
///
/// Rows that cannot be snapped keep `node: None` and produce infinite
/// network distances later on.
///
/// # Errors
///
/// Fails on coordinates the frame cannot project and on supplied node ids
/// that do not exist in the graph.
pub fn resolve_origins(
    graph: &StreetGraph,
    records: &[OriginRecord],
    max_snap_distance: Option<Distance>,
) -> Result<Vec<Origin>, Error> {
    let origins = records
        .par_iter()
        .map(|record| {
            let geometry = graph.project(&record.location()).map_err(|e| {
                Error::InvalidData(format!("origin {}: {e}", record.geoid))
            })?;
            let node = resolve_node(graph, record.node, &geometry, max_snap_distance)?;
            if node.is_none() {
                log::trace!(
                    "Origin {} at {:?} could not be snapped to the street network",
                    record.geoid,
                    geometry
                );
            }
            Ok(Origin {
                id: record.geoid.clone(),
                geometry,
                node,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    log_unresolved("origins", origins.iter().filter(|o| o.node.is_none()).count(), origins.len());
    Ok(origins)
}

/// Projects and snaps destination rows, then groups them by park id
///
/// # Errors
///
/// Same conditions as [`resolve_origins`].
pub fn resolve_destinations(
    graph: &StreetGraph,
    records: &[DestinationRecord],
    max_snap_distance: Option<Distance>,
) -> Result<Vec<DestinationGroup>, Error> {
    let points = records
        .par_iter()
        .map(|record| {
            let geometry = graph.project(&record.location()).map_err(|e| {
                Error::InvalidData(format!("destination {}: {e}", record.id))
            })?;
            let node = resolve_node(graph, record.node, &geometry, max_snap_distance)?;
            if node.is_none() {
                log::trace!(
                    "Point of {} at {:?} could not be snapped to the street network",
                    record.id,
                    geometry
                );
            }
            Ok((record.id.clone(), DestinationPoint { geometry, node }))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let unresolved = points.iter().filter(|(_, p)| p.node.is_none()).count();
    log_unresolved("destination points", unresolved, points.len());

    let groups = group_destinations(points);
    info!("Resolved {} destination groups", groups.len());
    Ok(groups)
}

/// Supplied ids must exist; otherwise snap to the nearest node within reach
fn resolve_node(
    graph: &StreetGraph,
    supplied: Option<StreetNodeId>,
    geometry: &Point<f64>,
    max_snap_distance: Option<Distance>,
) -> Result<Option<NodeIndex>, Error> {
    if let Some(id) = supplied {
        return graph.node_index(id).map(Some).ok_or(Error::UnknownNode(id));
    }

    Ok(graph
        .nearest_node(geometry)
        .filter(|&(_, distance)| max_snap_distance.is_none_or(|max| distance <= max))
        .map(|(node, _)| node))
}

/// One warning per table; individual rows are only traced
fn log_unresolved(what: &str, unresolved: usize, total: usize) {
    if let Some(message) = unresolved_summary(what, unresolved, total) {
        warn!("{message}");
    }
}

#[allow(clippy::cast_precision_loss)]
fn unresolved_summary(what: &str, unresolved: usize, total: usize) -> Option<String> {
    if unresolved == 0 || total == 0 {
        return None;
    }
    let percentage = unresolved as f64 / total as f64 * 100.0;
    Some(format!(
        "{unresolved} of {total} {what} ({percentage:.1}%) are farther than the snap \
        distance from any street node; their network distances will be infinite"
    ))
}
