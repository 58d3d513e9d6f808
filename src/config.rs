//! TOML configuration of a run
//!
//! Every field has a default, so an absent `parkreach.toml` is a valid
//! configuration. Relative paths are resolved against the working directory.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use parkreach_core::{
    CsvGraphProvider, ConfiguredGraphProvider, GraphSettings, PruningPolicy,
    algo::BatchConfig,
    model::CoordinateFrame,
    routing::PathSearch,
};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "parkreach.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub inputs: InputsConfig,
    pub graph: GraphConfig,
    pub estimator: EstimatorConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputsConfig {
    pub origins: PathBuf,
    pub destinations: PathBuf,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            origins: PathBuf::from("data/blockgroups.csv"),
            destinations: PathBuf::from("data/park_points.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    /// Read instead of the tables when it exists; written by `cache`
    pub snapshot: Option<PathBuf>,
    pub undirected: bool,
    pub frame: CoordinateFrame,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            nodes: PathBuf::from("data/nodes.csv"),
            edges: PathBuf::from("data/edges.csv"),
            snapshot: Some(PathBuf::from("data/graph.json")),
            undirected: false,
            frame: CoordinateFrame::Local,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorConfig {
    /// In units of the coordinate frame (metres for `local`)
    pub prune_threshold: f64,
    pub max_snap_distance: Option<f64>,
    pub search: PathSearch,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            prune_threshold: parkreach_core::DEFAULT_PRUNE_THRESHOLD,
            max_snap_distance: None,
            search: PathSearch::Cached,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub prefix: String,
    /// Include the `euc_dist` column
    pub euclidean: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            prefix: "park_distances".to_string(),
            euclidean: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads `path`; a missing file is only accepted when `path` was not
    /// given explicitly.
    pub fn load(path: &Path, explicit: bool) -> Result<Self, Box<dyn Error>> {
        if !path.exists() && !explicit {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
        Self::parse(&text).map_err(|e| format!("invalid config {}: {e}", path.display()).into())
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn graph_settings(&self) -> GraphSettings {
        GraphSettings {
            frame: self.graph.frame,
            undirected: self.graph.undirected,
        }
    }

    pub fn table_provider(&self) -> CsvGraphProvider {
        CsvGraphProvider::new(
            self.graph.nodes.clone(),
            self.graph.edges.clone(),
            self.graph_settings(),
        )
    }

    pub fn graph_provider(&self) -> ConfiguredGraphProvider {
        ConfiguredGraphProvider {
            tables: self.table_provider(),
            snapshot: self.graph.snapshot.clone(),
        }
    }

    pub fn batch_config(&self) -> Result<BatchConfig, parkreach_core::Error> {
        if let Some(max) = self.estimator.max_snap_distance {
            if max.is_nan() || max < 0.0 {
                return Err(parkreach_core::Error::InvalidData(format!(
                    "max_snap_distance must be >= 0, got {max}"
                )));
            }
        }
        Ok(BatchConfig {
            origins: self.inputs.origins.clone(),
            destinations: self.inputs.destinations.clone(),
            output_dir: self.output.dir.clone(),
            output_prefix: self.output.prefix.clone(),
            euclidean_column: self.output.euclidean,
            pruning: PruningPolicy::new(self.estimator.prune_threshold)?,
            max_snap_distance: self.estimator.max_snap_distance,
            search: self.estimator.search,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").expect("parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.estimator.prune_threshold, 5000.0);
        assert_eq!(config.graph.frame, CoordinateFrame::Local);
    }

    #[test]
    fn reads_all_sections() {
        let config = Config::parse(
            r#"
            [inputs]
            origins = "in/tracts.csv"
            destinations = "in/parks.csv"

            [graph]
            nodes = "g/nodes.csv"
            edges = "g/edges.csv"
            snapshot = "g/graph.json"
            undirected = true
            frame = "provided"

            [estimator]
            prune_threshold = 2500.0
            max_snap_distance = 300.0
            search = "point-to-point"

            [output]
            dir = "out"
            prefix = "tract_parks"
            euclidean = false

            [logging]
            level = "debug"
            "#,
        )
        .expect("parse");

        assert_eq!(config.inputs.origins, PathBuf::from("in/tracts.csv"));
        assert!(config.graph.undirected);
        assert_eq!(config.graph.frame, CoordinateFrame::Provided);
        assert_eq!(config.estimator.search, PathSearch::PointToPoint);
        assert_eq!(config.logging.level, "debug");

        let batch = config.batch_config().expect("valid");
        assert_eq!(batch.pruning.threshold(), 2500.0);
        assert_eq!(batch.max_snap_distance, Some(300.0));
        assert!(!batch.euclidean_column);
        assert_eq!(batch.output_prefix, "tract_parks");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::parse("[estimator]\nthreshold = 10.0\n").expect_err("must fail");
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let config = Config::parse("[estimator]\nprune_threshold = -5.0\n").expect("parse");
        assert!(config.batch_config().is_err());

        let config = Config::parse("[estimator]\nmax_snap_distance = -1.0\n").expect("parse");
        assert!(config.batch_config().is_err());
    }

    #[test]
    fn missing_file_is_only_fine_when_implicit() {
        let path = Path::new("/definitely/not/parkreach.toml");
        assert_eq!(Config::load(path, false).expect("defaults"), Config::default());
        assert!(Config::load(path, true).is_err());
    }
}
