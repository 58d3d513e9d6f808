mod cli;
mod config;
mod launch;
mod logging;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use parkreach_core::prelude::*;
use tracing::{error, info};

use crate::cli::{Cli, Command};
use crate::config::{Config, DEFAULT_CONFIG_PATH};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let explicit = cli.config.is_some();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = match Config::load(&config_path, explicit) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("parkreach: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init_tracing(&config.logging.level);

    // Children get the same file, or none when running on defaults
    let config_file = (explicit || config_path.exists()).then_some(config_path.as_path());

    match run(cli, &config, config_file) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &Config, config_file: Option<&Path>) -> Result<ExitCode, Box<dyn Error>> {
    match cli.command {
        Some(Command::All { workers }) => {
            let count = workers.unwrap_or_else(rayon::current_num_threads);
            let runner = BatchRunner::new(config.graph_provider(), config.batch_config()?);
            let results = runner.run_all(count, &LogProgress)?;
            let failed = results.iter().filter(|r| r.is_err()).count();
            Ok(finish(failed, count))
        }
        Some(Command::Launch { workers }) => {
            let count = workers.unwrap_or_else(rayon::current_num_threads);
            // Fail fast on bad settings instead of in every child
            WorkerAssignment::new(0, count)?;
            config.batch_config()?;
            let failed = launch::launch_workers(config_file, count)?;
            Ok(finish(failed.len(), count))
        }
        Some(Command::Cache) => {
            let path = config
                .graph
                .snapshot
                .as_deref()
                .ok_or("no [graph] snapshot path configured")?;
            let snapshot = config.table_provider().snapshot()?;
            snapshot.write(path)?;
            info!("Graph snapshot written to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Census {
            input,
            output,
            counties,
        }) => {
            let origins = read_census_centroids(&input, &counties)?;
            write_origin_table(&output, &origins)?;
            info!("Wrote {} origins to {}", origins.len(), output.display());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let (Some(index), Some(count)) = (cli.worker_index, cli.worker_count) else {
                return Err("expected <WORKER_INDEX> <WORKER_COUNT> or a subcommand, see --help".into());
            };
            let assignment = WorkerAssignment::new(index, count)?;
            let runner = BatchRunner::new(config.graph_provider(), config.batch_config()?);
            let summary = runner.run_worker(assignment, &LogProgress)?;
            info!(
                "Worker {index} wrote {} rows for {} origins and {} parks",
                summary.totals.records, summary.totals.origins, summary.groups
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn finish(failed: usize, count: usize) -> ExitCode {
    if failed == 0 {
        info!("All {count} workers finished");
        ExitCode::SUCCESS
    } else {
        error!("{failed} of {count} workers failed");
        ExitCode::FAILURE
    }
}
