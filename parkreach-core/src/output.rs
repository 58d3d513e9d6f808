//! Per-worker distance tables

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Distance, Error, algo::GroupDistance};

/// Writes `geoid,park_id,distance[,euc_dist]` rows
///
/// Infinite distances are written as `inf`. Call [`DistanceWriter::flush`]
/// at record boundaries so an interrupted run leaves a valid prefix.
pub struct DistanceWriter<W: Write> {
    writer: csv::Writer<W>,
    euclidean: bool,
}

impl DistanceWriter<File> {
    /// Creates (or truncates) `path`, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the header written.
    pub fn create(path: &Path, euclidean: bool) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::new(File::create(path)?, euclidean)
    }
}

impl<W: Write> DistanceWriter<W> {
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn new(inner: W, euclidean: bool) -> Result<Self, Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        if euclidean {
            writer.write_record(["geoid", "park_id", "distance", "euc_dist"])?;
        } else {
            writer.write_record(["geoid", "park_id", "distance"])?;
        }
        Ok(Self { writer, euclidean })
    }

    /// # Errors
    ///
    /// Returns an error if the row cannot be written.
    pub fn write(&mut self, origin: &str, park: &str, distance: &GroupDistance) -> Result<(), Error> {
        let path = format_distance(distance.path);
        if self.euclidean {
            let euclidean = format_distance(distance.euclidean);
            self.writer
                .write_record([origin, park, path.as_str(), euclidean.as_str()])?;
        } else {
            self.writer.write_record([origin, park, path.as_str()])?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if buffered rows cannot be written out.
    pub fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying writer
    ///
    /// # Errors
    ///
    /// Returns an error if buffered rows cannot be written out.
    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|e| Error::IoError(e.into_error()))
    }
}

/// `inf` for infinity, shortest round-trip representation otherwise
fn format_distance(distance: Distance) -> String {
    if distance.is_infinite() {
        "inf".to_string()
    } else {
        distance.to_string()
    }
}

/// File a worker writes to: `<dir>/<prefix>_<worker>.csv`
pub fn worker_output_path(dir: &Path, prefix: &str, worker: usize) -> PathBuf {
    dir.join(format!("{prefix}_{worker}.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(euclidean: bool, rows: &[(&str, &str, GroupDistance)]) -> String {
        let mut writer = DistanceWriter::new(Vec::new(), euclidean).unwrap();
        for (origin, park, distance) in rows {
            writer.write(origin, park, distance).unwrap();
        }
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn writes_header_and_infinity_marker() {
        let out = written(
            true,
            &[
                ("360810001001", "P1", GroupDistance::new(150.0, 100.0)),
                ("360810001001", "P2", GroupDistance::new(f64::INFINITY, 42.5)),
            ],
        );
        assert_eq!(
            out,
            "geoid,park_id,distance,euc_dist\n\
             360810001001,P1,150,100\n\
             360810001001,P2,inf,42.5\n"
        );
    }

    #[test]
    fn variant_without_euclidean_column() {
        let out = written(false, &[("a", "b", GroupDistance::new(1.25, 1.0))]);
        assert_eq!(out, "geoid,park_id,distance\na,b,1.25\n");
    }

    #[test]
    fn header_only_when_nothing_written() {
        assert_eq!(written(true, &[]), "geoid,park_id,distance,euc_dist\n");
    }

    #[test]
    fn worker_files_are_tagged_by_index() {
        let path = worker_output_path(Path::new("out"), "park_distances", 3);
        assert_eq!(path, Path::new("out/park_distances_3.csv"));
    }
}
