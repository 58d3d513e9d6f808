//! Shortest path searches over the street graph

pub mod dijkstra;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::{Distance, Error, model::StreetGraph};
use dijkstra::{ShortestPathTree, shortest_path_length};

/// Source of network distances between two graph nodes
///
/// `Ok(None)` means no path exists, which is a normal outcome. Errors are
/// reserved for malformed queries such as node indices outside the graph.
pub trait PathLengths {
    fn path_length(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Result<Option<Distance>, Error>;
}

/// Which [`PathLengths`] implementation a batch uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathSearch {
    /// Keep one resumable search per source
    #[default]
    Cached,
    /// Run an independent target-terminated search per pair
    PointToPoint,
}

/// Reuses the search tree of the last source across queries
pub struct CachedPaths<'a> {
    graph: &'a StreetGraph,
    tree: Option<ShortestPathTree<'a>>,
}

impl<'a> CachedPaths<'a> {
    pub fn new(graph: &'a StreetGraph) -> Self {
        Self { graph, tree: None }
    }
}

impl PathLengths for CachedPaths<'_> {
    fn path_length(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Result<Option<Distance>, Error> {
        let tree = match self.tree.take() {
            Some(mut tree) => {
                if tree.source() != source {
                    tree.reset(source)?;
                }
                tree
            }
            None => ShortestPathTree::new(self.graph, source)?,
        };
        self.tree.insert(tree).distance_to(target)
    }
}

/// One Dijkstra search per query
pub struct PointToPointPaths<'a> {
    graph: &'a StreetGraph,
}

impl<'a> PointToPointPaths<'a> {
    pub fn new(graph: &'a StreetGraph) -> Self {
        Self { graph }
    }
}

impl PathLengths for PointToPointPaths<'_> {
    fn path_length(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Result<Option<Distance>, Error> {
        if !self.graph.contains(source) || !self.graph.contains(target) {
            return Err(Error::InvalidNodeIndex);
        }
        Ok(shortest_path_length(self.graph, source, target))
    }
}
