//! This module is responsible for loading the street graph and the
//! origin / destination tables, and for snapping their rows to the graph.

pub mod census;
pub mod graph;
mod parser;
mod raw_types;
mod resolve;

pub use graph::{
    ConfiguredGraphProvider, CsvGraphProvider, GraphProvider, GraphSettings, GraphSnapshot,
    SnapshotGraphProvider, build_street_graph,
};
pub use parser::{read_records, read_table, write_origin_table};
pub use raw_types::{DestinationRecord, EdgeRecord, NodeRecord, OriginRecord};
pub use resolve::{resolve_destinations, resolve_origins};
