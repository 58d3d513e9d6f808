//! Planar coordinate frames
//!
//! Euclidean distances, the pruning threshold and nearest-node snapping all
//! work in a single planar frame. Either every input already carries
//! projected `x`/`y` values in a common CRS, or geographic coordinates are
//! projected with a local equirectangular approximation centred on the
//! street network.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Mean Earth radius in metres
const EARTH_RADIUS: f64 = 6_371_008.8;

/// Which planar frame a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateFrame {
    /// Project latitude/longitude locally, in metres
    #[default]
    Local,
    /// Use the `x`/`y` columns supplied with every row
    Provided,
}

/// Geographic position of an input row with an optional projected twin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub projected: Option<Point<f64>>,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            projected: None,
        }
    }

    /// Builds a location from optional `x`/`y` columns; both must be present
    /// for the projected position to be kept.
    pub fn with_xy(lat: f64, lon: f64, x: Option<f64>, y: Option<f64>) -> Self {
        Self {
            lat,
            lon,
            projected: x.zip(y).map(|(x, y)| Point::new(x, y)),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let valid = self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon);
        if valid {
            Ok(())
        } else {
            Err(Error::InvalidData(format!(
                "invalid lat/lon values ({}, {})",
                self.lat, self.lon
            )))
        }
    }
}

/// Equirectangular projection around a fixed centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalProjection {
    center_lat: f64,
    center_lon: f64,
    cos_center_lat: f64,
}

impl LocalProjection {
    pub fn new(center_lat: f64, center_lon: f64) -> Self {
        Self {
            center_lat,
            center_lon,
            cos_center_lat: center_lat.to_radians().cos(),
        }
    }

    /// Centre at the mean position of the given locations
    #[allow(clippy::cast_precision_loss)]
    pub fn centered_on<'a>(locations: impl IntoIterator<Item = &'a Location>) -> Self {
        let (count, lat_sum, lon_sum) = locations
            .into_iter()
            .fold((0usize, 0.0, 0.0), |(n, lat, lon), loc| {
                (n + 1, lat + loc.lat, lon + loc.lon)
            });
        if count == 0 {
            return Self::new(0.0, 0.0);
        }
        Self::new(lat_sum / count as f64, lon_sum / count as f64)
    }

    pub fn project(&self, lat: f64, lon: f64) -> Point<f64> {
        let x = EARTH_RADIUS * (lon - self.center_lon).to_radians() * self.cos_center_lat;
        let y = EARTH_RADIUS * (lat - self.center_lat).to_radians();
        Point::new(x, y)
    }
}

/// Maps input locations into the frame of a street graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projector {
    Local(LocalProjection),
    Provided,
}

impl Projector {
    /// Derive a projector for `frame` from the street network locations
    pub fn for_network<'a>(
        frame: CoordinateFrame,
        locations: impl IntoIterator<Item = &'a Location>,
    ) -> Self {
        match frame {
            CoordinateFrame::Local => Projector::Local(LocalProjection::centered_on(locations)),
            CoordinateFrame::Provided => Projector::Provided,
        }
    }

    pub fn frame(&self) -> CoordinateFrame {
        match self {
            Projector::Local(_) => CoordinateFrame::Local,
            Projector::Provided => CoordinateFrame::Provided,
        }
    }

    /// Planar position of `location`
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of range, or if the frame
    /// expects projected values the location does not carry.
    pub fn project(&self, location: &Location) -> Result<Point<f64>, Error> {
        match self {
            Projector::Local(projection) => {
                location.validate()?;
                Ok(projection.project(location.lat, location.lon))
            }
            Projector::Provided => {
                let point = location.projected.ok_or_else(|| {
                    Error::InvalidData(format!(
                        "row at ({}, {}) has no projected x/y but the frame is `provided`",
                        location.lat, location.lon
                    ))
                })?;
                if point.x().is_finite() && point.y().is_finite() {
                    Ok(point)
                } else {
                    Err(Error::InvalidData(format!(
                        "non-finite projected coordinates ({}, {})",
                        point.x(),
                        point.y()
                    )))
                }
            }
        }
    }
}
