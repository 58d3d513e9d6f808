//! Contiguous origin partitions, one per worker

use std::ops::Range;

use crate::Error;

/// Which partition a worker handles out of how many
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerAssignment {
    pub index: usize,
    pub count: usize,
}

impl WorkerAssignment {
    /// # Errors
    ///
    /// Returns [`Error::InvalidAssignment`] if `count` is zero or `index` is
    /// not below `count`.
    pub fn new(index: usize, count: usize) -> Result<Self, Error> {
        if count == 0 {
            return Err(Error::InvalidAssignment(
                "worker count must be > 0".to_string(),
            ));
        }
        if index >= count {
            return Err(Error::InvalidAssignment(format!(
                "worker index {index} out of range for {count} workers"
            )));
        }
        Ok(Self { index, count })
    }

    /// Rows of a `len` long table this worker owns
    pub fn chunk(&self, len: usize) -> Range<usize> {
        chunk_range(len, self.count, self.index)
    }
}

/// Splits `0..len` into `parts` contiguous ranges whose sizes differ by at
/// most one; the first `len % parts` ranges are the longer ones.
///
/// # Errors
///
/// Returns [`Error::InvalidAssignment`] if `parts` is zero.
pub fn partition_ranges(len: usize, parts: usize) -> Result<Vec<Range<usize>>, Error> {
    if parts == 0 {
        return Err(Error::InvalidAssignment(
            "worker count must be > 0".to_string(),
        ));
    }
    Ok((0..parts).map(|idx| chunk_range(len, parts, idx)).collect())
}

fn chunk_range(len: usize, parts: usize, idx: usize) -> Range<usize> {
    let base = len / parts;
    let extra = len % parts;
    let start = idx * base + idx.min(extra);
    let size = base + usize::from(idx < extra);
    start..start + size
}
