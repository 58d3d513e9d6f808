//! Street graph providers
//!
//! The graph comes either from node/edge tables or from a JSON snapshot
//! written by an earlier run. Every worker loads its own copy.

mod builder;
mod snapshot;

use std::path::PathBuf;

use log::info;
use serde::{Deserialize, Serialize};

pub use builder::build_street_graph;
pub use snapshot::{GraphSnapshot, SnapshotGraphProvider};

use super::parser::read_table;
use super::raw_types::{EdgeRecord, NodeRecord};
use crate::{Error, model::CoordinateFrame, model::StreetGraph};

/// Supplies a routable street graph
pub trait GraphProvider {
    /// # Errors
    ///
    /// Returns an error if the graph source is missing or malformed.
    fn load(&self) -> Result<StreetGraph, Error>;

    /// Human readable description of the source, for logs
    fn describe(&self) -> String;
}

/// How node and edge rows turn into a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphSettings {
    #[serde(default)]
    pub frame: CoordinateFrame,
    /// Insert every edge row in both directions
    #[serde(default)]
    pub undirected: bool,
}

/// Graph from `nodes` (`id,lat,lon[,x,y]`) and `edges` (`u,v,length`) tables
#[derive(Debug, Clone)]
pub struct CsvGraphProvider {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub settings: GraphSettings,
}

impl CsvGraphProvider {
    pub fn new(nodes: PathBuf, edges: PathBuf, settings: GraphSettings) -> Self {
        Self {
            nodes,
            edges,
            settings,
        }
    }

    fn validate_paths(&self) -> Result<(), Error> {
        for path in [&self.nodes, &self.edges] {
            if !path.exists() {
                return Err(Error::GraphLoad(format!(
                    "graph table not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Reads both tables into a snapshot without building the graph
    ///
    /// # Errors
    ///
    /// Returns an error if either table is missing or malformed.
    pub fn snapshot(&self) -> Result<GraphSnapshot, Error> {
        self.validate_paths()?;
        info!("Reading street nodes: {}", self.nodes.display());
        let nodes: Vec<NodeRecord> = read_table(&self.nodes)?;
        info!("Reading street edges: {}", self.edges.display());
        let edges: Vec<EdgeRecord> = read_table(&self.edges)?;

        Ok(GraphSnapshot {
            settings: self.settings,
            nodes,
            edges,
        })
    }
}

impl GraphProvider for CsvGraphProvider {
    fn load(&self) -> Result<StreetGraph, Error> {
        let snapshot = self.snapshot()?;
        let graph = snapshot.build()?;
        drop(snapshot);
        builder::release_parse_memory();
        Ok(graph)
    }

    fn describe(&self) -> String {
        format!(
            "tables {} + {}",
            self.nodes.display(),
            self.edges.display()
        )
    }
}

/// Prefers a snapshot when one exists, otherwise reads the tables
///
/// A snapshot that exists but cannot be read is an error; there is no
/// silent fallback to the tables in that case.
#[derive(Debug, Clone)]
pub struct ConfiguredGraphProvider {
    pub tables: CsvGraphProvider,
    pub snapshot: Option<PathBuf>,
}

impl ConfiguredGraphProvider {
    fn existing_snapshot(&self) -> Option<SnapshotGraphProvider> {
        self.snapshot
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| SnapshotGraphProvider::new(path.clone()))
    }
}

impl GraphProvider for ConfiguredGraphProvider {
    fn load(&self) -> Result<StreetGraph, Error> {
        match self.existing_snapshot() {
            Some(snapshot) => snapshot.load(),
            None => {
                if let Some(path) = &self.snapshot {
                    info!(
                        "No graph snapshot at {}, reading tables instead",
                        path.display()
                    );
                }
                self.tables.load()
            }
        }
    }

    fn describe(&self) -> String {
        match self.existing_snapshot() {
            Some(snapshot) => snapshot.describe(),
            None => self.tables.describe(),
        }
    }
}
