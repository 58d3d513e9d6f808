//! Census centre-of-population files
//!
//! The Census Bureau publishes block group and tract centroids as
//! `STATEFP,COUNTYFP,TRACTCE[,BLKGRPCE],POPULATION,LATITUDE,LONGITUDE`.
//! Codes may lose their leading zeros on the way through spreadsheets, so
//! they are padded back before the GEOID is assembled.

use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use super::parser::{read_records, read_table};
use super::raw_types::OriginRecord;
use crate::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct CensusCentroid {
    #[serde(rename = "STATEFP")]
    pub state: String,
    #[serde(rename = "COUNTYFP")]
    pub county: String,
    #[serde(rename = "TRACTCE")]
    pub tract: String,
    #[serde(rename = "BLKGRPCE", default)]
    pub block_group: Option<String>,
    #[serde(rename = "LATITUDE")]
    pub latitude: f64,
    #[serde(rename = "LONGITUDE")]
    pub longitude: f64,
}

impl CensusCentroid {
    pub fn county_code(&self) -> String {
        pad(&self.county, 3)
    }

    /// State (2) + county (3) + tract (6) [+ block group (1)]
    pub fn geoid(&self) -> String {
        let mut geoid = format!(
            "{}{}{}",
            pad(&self.state, 2),
            self.county_code(),
            pad(&self.tract, 6)
        );
        if let Some(block_group) = &self.block_group {
            geoid.push_str(block_group.trim());
        }
        geoid
    }

    pub fn into_origin(self) -> OriginRecord {
        OriginRecord {
            geoid: self.geoid(),
            latitude: self.latitude,
            longitude: self.longitude,
            x: None,
            y: None,
            node: None,
        }
    }
}

fn pad(code: &str, width: usize) -> String {
    format!("{:0>width$}", code.trim())
}

/// Reads a centroid file and keeps rows in `counties` (all rows if empty)
///
/// # Errors
///
/// Fails if the file cannot be read or a row is malformed.
pub fn read_census_centroids(path: &Path, counties: &[String]) -> Result<Vec<OriginRecord>, Error> {
    let rows: Vec<CensusCentroid> = read_table(path)?;
    let origins = filter_counties(rows, counties);
    info!(
        "Read {} census centroids from {}",
        origins.len(),
        path.display()
    );
    Ok(origins)
}

/// Same as [`read_census_centroids`] over any reader
///
/// # Errors
///
/// Fails if a row is malformed.
pub fn census_centroids_from_reader<R: Read>(
    reader: R,
    counties: &[String],
) -> Result<Vec<OriginRecord>, Error> {
    let rows: Vec<CensusCentroid> = read_records(reader)?;
    Ok(filter_counties(rows, counties))
}

fn filter_counties(rows: Vec<CensusCentroid>, counties: &[String]) -> Vec<OriginRecord> {
    let counties: Vec<String> = counties.iter().map(|c| pad(c, 3)).collect();
    rows.into_iter()
        .filter(|row| counties.is_empty() || counties.contains(&row.county_code()))
        .map(CensusCentroid::into_origin)
        .collect()
}
