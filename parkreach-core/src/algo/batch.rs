//! Partitioned batch over all (origin, park) pairs
//!
//! Each worker owns one contiguous chunk of the origin table. It loads its
//! own copy of the street graph, snaps its origins and all park points, and
//! writes one row per (origin, park) pair to its own output file. Workers
//! share nothing and their files are never merged here.

use std::io::Write;
use std::path::PathBuf;

use log::{info, warn};
use rayon::prelude::*;

use super::estimator::{EstimateStats, PruningPolicy, estimate_group_distance};
use super::partition::WorkerAssignment;
use super::progress::ProgressSink;
use crate::{
    Distance, Error,
    loading::{
        DestinationRecord, GraphProvider, OriginRecord, read_table, resolve_destinations,
        resolve_origins,
    },
    model::{DestinationGroup, Origin, StreetGraph},
    output::{DistanceWriter, worker_output_path},
    routing::{CachedPaths, PathLengths, PathSearch, PointToPointPaths},
};

/// Inputs, outputs and tuning of a batch
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Origin table (`geoid,latitude,longitude[,x,y][,node]`)
    pub origins: PathBuf,
    /// Destination table (`id,latitude,longitude[,x,y][,node]`)
    pub destinations: PathBuf,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    /// Write the `euc_dist` column
    pub euclidean_column: bool,
    pub pruning: PruningPolicy,
    /// Rows farther than this from every street node stay unresolved
    pub max_snap_distance: Option<Distance>,
    pub search: PathSearch,
}

/// Counters of one finished chunk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkTotals {
    pub origins: usize,
    pub records: usize,
    pub reachable: usize,
    pub stats: EstimateStats,
}

/// Outcome of one worker
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerSummary {
    pub assignment: WorkerAssignment,
    pub groups: usize,
    pub totals: ChunkTotals,
    pub output: PathBuf,
}

pub struct BatchRunner<G> {
    provider: G,
    config: BatchConfig,
}

impl<G: GraphProvider> BatchRunner<G> {
    pub fn new(provider: G, config: BatchConfig) -> Self {
        Self { provider, config }
    }

    /// File the given worker writes to
    pub fn output_path(&self, worker: usize) -> PathBuf {
        worker_output_path(&self.config.output_dir, &self.config.output_prefix, worker)
    }

    /// Runs one partition end to end
    ///
    /// # Errors
    ///
    /// Any failure to load the graph or the tables, or to write the output,
    /// ends this worker. Rows already written stay in the output file.
    pub fn run_worker(
        &self,
        assignment: WorkerAssignment,
        progress: &dyn ProgressSink,
    ) -> Result<WorkerSummary, Error> {
        self.validate_inputs()?;
        info!(
            "Worker {}/{} (pid {}) loading graph from {}",
            assignment.index,
            assignment.count,
            std::process::id(),
            self.provider.describe()
        );
        let graph = self.provider.load()?;
        if graph.is_empty() {
            warn!("Street graph has no nodes; every network distance will be infinite");
        }

        let origin_records: Vec<OriginRecord> = read_table(&self.config.origins)?;
        let chunk = assignment.chunk(origin_records.len());
        info!(
            "Worker {} handles origins {}..{} of {}",
            assignment.index,
            chunk.start,
            chunk.end,
            origin_records.len()
        );
        let origins = resolve_origins(
            &graph,
            &origin_records[chunk],
            self.config.max_snap_distance,
        )?;
        drop(origin_records);

        let destination_records: Vec<DestinationRecord> = read_table(&self.config.destinations)?;
        let groups = resolve_destinations(
            &graph,
            &destination_records,
            self.config.max_snap_distance,
        )?;

        let output = self.output_path(assignment.index);
        let mut writer = DistanceWriter::create(&output, self.config.euclidean_column)?;
        let totals = process_chunk(
            &graph,
            &origins,
            &groups,
            &self.config,
            assignment.index,
            &mut writer,
            progress,
        )?;
        writer.flush()?;

        info!(
            "Worker {} done: {} records ({} reachable), {} searches, {} points pruned, \
            {} unresolved; written to {}",
            assignment.index,
            totals.records,
            totals.reachable,
            totals.stats.searches,
            totals.stats.pruned,
            totals.stats.unresolved,
            output.display()
        );

        Ok(WorkerSummary {
            assignment,
            groups: groups.len(),
            totals,
            output,
        })
    }

    /// Runs every partition concurrently in this process
    ///
    /// Workers are isolated: each loads its own graph and a failing worker
    /// leaves the others running. Results are in worker order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAssignment`] if `count` is zero.
    pub fn run_all(
        &self,
        count: usize,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<Result<WorkerSummary, Error>>, Error>
    where
        G: Sync,
    {
        let assignments = (0..count)
            .map(|index| WorkerAssignment::new(index, count))
            .collect::<Result<Vec<_>, _>>()?;
        if assignments.is_empty() {
            return Err(Error::InvalidAssignment(
                "worker count must be > 0".to_string(),
            ));
        }

        let results: Vec<_> = assignments
            .into_par_iter()
            .map(|assignment| self.run_worker(assignment, progress))
            .collect();

        for (index, result) in results.iter().enumerate() {
            if let Err(e) = result {
                warn!("Worker {index} failed: {e}");
            }
        }
        Ok(results)
    }

    fn validate_inputs(&self) -> Result<(), Error> {
        for path in [&self.config.origins, &self.config.destinations] {
            if !path.exists() {
                return Err(Error::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("input table not found: {}", path.display()),
                )));
            }
        }
        Ok(())
    }
}

/// Estimates and writes every (origin, group) pair of a chunk
///
/// Rows follow origin order, then group order. The writer is flushed after
/// each origin.
///
/// # Errors
///
/// Fails on write errors and on malformed node indices.
pub fn process_chunk<W: Write>(
    graph: &StreetGraph,
    origins: &[Origin],
    groups: &[DestinationGroup],
    config: &BatchConfig,
    worker: usize,
    writer: &mut DistanceWriter<W>,
    progress: &dyn ProgressSink,
) -> Result<ChunkTotals, Error> {
    match config.search {
        PathSearch::Cached => write_chunk(
            &mut CachedPaths::new(graph),
            origins,
            groups,
            &config.pruning,
            worker,
            writer,
            progress,
        ),
        PathSearch::PointToPoint => write_chunk(
            &mut PointToPointPaths::new(graph),
            origins,
            groups,
            &config.pruning,
            worker,
            writer,
            progress,
        ),
    }
}

fn write_chunk<P, W>(
    paths: &mut P,
    origins: &[Origin],
    groups: &[DestinationGroup],
    pruning: &PruningPolicy,
    worker: usize,
    writer: &mut DistanceWriter<W>,
    progress: &dyn ProgressSink,
) -> Result<ChunkTotals, Error>
where
    P: PathLengths,
    W: Write,
{
    let mut totals = ChunkTotals::default();

    for (done, origin) in origins.iter().enumerate() {
        for group in groups {
            let distance =
                estimate_group_distance(origin, group, pruning, paths, &mut totals.stats)?;
            writer.write(&origin.id, &group.id, &distance)?;
            totals.records += 1;
            if distance.is_reachable() {
                totals.reachable += 1;
            }
        }
        writer.flush()?;
        totals.origins += 1;
        progress.report(worker, done + 1, origins.len());
    }

    Ok(totals)
}
