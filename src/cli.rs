use std::path::PathBuf;

use clap::{Parser, Subcommand, builder::RangedU64ValueParser};

/// Park walking distances over a street network, one origin partition per
/// worker
#[derive(Debug, Parser)]
#[command(name = "parkreach", version)]
pub struct Cli {
    /// TOML configuration (defaults to ./parkreach.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Zero-based index of the partition this process handles
    #[arg(value_name = "WORKER_INDEX", requires = "worker_count")]
    pub worker_index: Option<usize>,

    /// Total number of partitions
    #[arg(value_name = "WORKER_COUNT")]
    pub worker_count: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run every partition on a thread pool inside this process
    All {
        /// Number of partitions (defaults to the number of CPUs)
        #[arg(value_parser = at_least_one_worker())]
        workers: Option<usize>,
    },
    /// Spawn one process per partition and wait for all of them
    Launch {
        /// Number of partitions (defaults to the number of CPUs)
        #[arg(value_parser = at_least_one_worker())]
        workers: Option<usize>,
    },
    /// Build the street graph from its tables and write the snapshot
    Cache,
    /// Convert a Census centroid file into an origin table
    Census {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// County FIPS codes to keep, e.g. 005,047,061
        #[arg(long, value_delimiter = ',')]
        counties: Vec<String>,
    },
}

/// At least one worker
fn at_least_one_worker() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_worker_run() {
        let cli = Cli::try_parse_from(["parkreach", "2", "8"]).unwrap();
        assert_eq!(cli.worker_index, Some(2));
        assert_eq!(cli.worker_count, Some(8));
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn index_without_count_is_rejected() {
        assert!(Cli::try_parse_from(["parkreach", "2"]).is_err());
        assert!(Cli::try_parse_from(["parkreach", "x", "8"]).is_err());
    }

    #[test]
    fn subcommands_accept_config() {
        let cli = Cli::try_parse_from(["parkreach", "--config", "nyc.toml", "all", "4"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("nyc.toml")));
        assert!(matches!(cli.command, Some(Command::All { workers: Some(4) })));

        let cli = Cli::try_parse_from(["parkreach", "launch"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Launch { workers: None })));
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(Cli::try_parse_from(["parkreach", "launch", "0"]).is_err());
        assert!(Cli::try_parse_from(["parkreach", "all", "0"]).is_err());
        assert!(Cli::try_parse_from(["parkreach", "launch", "1"]).is_ok());
    }

    #[test]
    fn census_counties_are_comma_separated() {
        let cli = Cli::try_parse_from([
            "parkreach",
            "census",
            "--input",
            "cenpop.txt",
            "--output",
            "bg.csv",
            "--counties",
            "005,047,061",
        ])
        .unwrap();
        let Some(Command::Census { counties, .. }) = cli.command else {
            panic!("expected census command");
        };
        assert_eq!(counties, ["005", "047", "061"]);
    }
}
