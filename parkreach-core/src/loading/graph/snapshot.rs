use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use super::{GraphProvider, GraphSettings, builder};
use crate::{
    Error,
    loading::raw_types::{EdgeRecord, NodeRecord},
    model::StreetGraph,
};

/// Serialized form of a street graph, cached between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub settings: GraphSettings,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphSnapshot {
    /// # Errors
    ///
    /// See [`builder::build_street_graph`].
    pub fn build(&self) -> Result<StreetGraph, Error> {
        builder::build_street_graph(&self.nodes, &self.edges, &self.settings)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        info!(
            "Graph snapshot with {} nodes and {} edges written to {}",
            self.nodes.len(),
            self.edges.len(),
            path.display()
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the file is missing or is not a valid snapshot.
    pub fn read(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| {
            Error::GraphLoad(format!(
                "cannot open graph snapshot {}: {e}",
                path.display()
            ))
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Graph from a snapshot written by [`GraphSnapshot::write`]
#[derive(Debug, Clone)]
pub struct SnapshotGraphProvider {
    pub path: PathBuf,
}

impl SnapshotGraphProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl GraphProvider for SnapshotGraphProvider {
    fn load(&self) -> Result<StreetGraph, Error> {
        info!("Reading graph snapshot: {}", self.path.display());
        let snapshot = GraphSnapshot::read(&self.path)?;
        let graph = snapshot.build()?;
        drop(snapshot);
        builder::release_parse_memory();
        Ok(graph)
    }

    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }
}
