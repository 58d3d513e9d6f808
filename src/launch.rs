//! One OS process per partition
//!
//! Each child is this executable invoked as `parkreach [--config FILE] <i> <n>`,
//! so workers share nothing but the input files.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Child, Command};

use tracing::{error, info};

/// Spawns `count` copies of this executable and waits for all of them
///
/// Returns the indices of workers that failed to start or exited with a
/// non-zero status. A failing worker never stops the others.
///
/// # Errors
///
/// Fails if `count` is zero or the current executable cannot be located.
pub fn launch_workers(config: Option<&Path>, count: usize) -> io::Result<Vec<usize>> {
    let exe = std::env::current_exe()?;
    let mut leading = Vec::new();
    if let Some(path) = config {
        leading.push(OsString::from("--config"));
        leading.push(path.as_os_str().to_owned());
    }
    launch_workers_with(&exe, &leading, count)
}

/// Runs `program <leading..> <index> <count>` for every index
///
/// # Errors
///
/// Fails if `count` is zero; no process is started in that case.
pub fn launch_workers_with(
    program: &Path,
    leading: &[OsString],
    count: usize,
) -> io::Result<Vec<usize>> {
    if count == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "worker count must be > 0",
        ));
    }

    let mut failed = Vec::new();
    let mut children: Vec<(usize, Child)> = Vec::with_capacity(count);

    for index in 0..count {
        let spawned = Command::new(program)
            .args(leading)
            .arg(index.to_string())
            .arg(count.to_string())
            .spawn();

        match spawned {
            Ok(child) => {
                info!("Started worker {index}/{count} as pid {}", child.id());
                children.push((index, child));
            }
            Err(e) => {
                error!("Could not start worker {index}: {e}");
                failed.push(index);
            }
        }
    }

    for (index, mut child) in children {
        match child.wait() {
            Ok(status) if status.success() => info!("Worker {index} finished"),
            Ok(status) => {
                error!("Worker {index} exited with {status}");
                failed.push(index);
            }
            Err(e) => {
                error!("Could not wait for worker {index}: {e}");
                failed.push(index);
            }
        }
    }

    failed.sort_unstable();
    Ok(failed)
}
