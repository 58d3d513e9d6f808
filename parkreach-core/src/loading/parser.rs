use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;

use super::raw_types::OriginRecord;
use crate::Error;

/// Reads every row of a delimited table at `path`
///
/// # Errors
///
/// Fails if the file cannot be opened or any row does not deserialize.
pub fn read_table<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    let file = File::open(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    read_records(file)
}

/// Reads every row of a comma separated table with a header line
///
/// # Errors
///
/// Fails on the first row that does not deserialize into `T`.
pub fn read_records<T, R>(reader: R) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
    R: Read,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(Error::from)
}

/// Writes origin rows in the layout [`read_table`] expects
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn write_origin_table(path: &Path, origins: &[OriginRecord]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for origin in origins {
        writer.serialize(origin)?;
    }
    writer.flush()?;
    Ok(())
}
