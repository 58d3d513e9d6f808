use serde::{Deserialize, Serialize};

use crate::{StreetNodeId, model::Location};

/// Street node row: source id, geographic position and optional projection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeRecord {
    #[serde(alias = "osmid")]
    pub id: StreetNodeId,
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lon: f64,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub y: Option<f64>,
}

impl NodeRecord {
    pub fn location(&self) -> Location {
        Location::with_xy(self.lat, self.lon, self.x, self.y)
    }
}

/// Directed street segment row
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EdgeRecord {
    pub u: StreetNodeId,
    pub v: StreetNodeId,
    pub length: f64,
}

/// Residential area centroid row
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OriginRecord {
    #[serde(alias = "GEOID")]
    pub geoid: String,
    #[serde(alias = "LATITUDE", alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "LONGITUDE", alias = "lon")]
    pub longitude: f64,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub node: Option<StreetNodeId>,
}

impl OriginRecord {
    pub fn location(&self) -> Location {
        Location::with_xy(self.latitude, self.longitude, self.x, self.y)
    }
}

/// Park entrance / boundary point row; `id` repeats for every point of a park
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DestinationRecord {
    #[serde(alias = "park_id")]
    pub id: String,
    #[serde(alias = "LATITUDE", alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "LONGITUDE", alias = "lon")]
    pub longitude: f64,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub node: Option<StreetNodeId>,
}

impl DestinationRecord {
    pub fn location(&self) -> Location {
        Location::with_xy(self.latitude, self.longitude, self.x, self.y)
    }
}
