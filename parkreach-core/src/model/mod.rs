//! Data model for network distance computation
//!
//! Contains the street graph, the planar coordinate frame shared by all
//! inputs, and the origins and destination groups that distances are
//! computed between.

pub mod frame;
pub mod places;
pub mod streets;

pub use frame::{CoordinateFrame, LocalProjection, Location, Projector};
pub use places::{DestinationGroup, DestinationPoint, Origin, group_destinations};
pub use streets::network::StreetGraph;
pub use streets::{IndexedPoint, StreetEdge, StreetNode};
