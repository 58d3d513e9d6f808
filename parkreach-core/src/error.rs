use thiserror::Error;

use crate::StreetNodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("Unknown street node id: {0}")]
    UnknownNode(StreetNodeId),
    #[error("Invalid worker assignment: {0}")]
    InvalidAssignment(String),
    #[error("Graph load error: {0}")]
    GraphLoad(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Snapshot error: {0}")]
    SnapshotError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
