//! Progress signals from running workers

use log::info;

/// Receives progress of a worker over its origin chunk
pub trait ProgressSink: Sync {
    /// `done` of `total` origins of `worker` have been written
    fn report(&self, worker: usize, done: usize, total: usize);
}

/// Discards progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _worker: usize, _done: usize, _total: usize) {}
}

/// Logs a line each time a worker crosses a whole percent
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&self, worker: usize, done: usize, total: usize) {
        if let Some(percent) = crossed_percent(done, total) {
            info!("Worker {worker}: {percent}% ({done}/{total} origins)");
        }
    }
}

impl<F> ProgressSink for F
where
    F: Fn(usize, usize, usize) + Sync,
{
    fn report(&self, worker: usize, done: usize, total: usize) {
        self(worker, done, total);
    }
}

/// Whole percentage reached by `done` when it differs from `done - 1`'s
fn crossed_percent(done: usize, total: usize) -> Option<usize> {
    if total == 0 || done == 0 || done > total {
        return None;
    }
    let percent = done * 100 / total;
    let previous = (done - 1) * 100 / total;
    (percent != previous || done == 1).then_some(percent)
}
