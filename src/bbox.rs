use std::fmt;

use crate::data::Coordinates;

use serde::*;

/// Degrees added on every side of the start-end span.
///
/// Fixed regardless of how far apart the endpoints are; long queries can still lose connecting roads at the edges.
pub const DEFAULT_MARGIN: f64 = 0.02;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct BoundingBox {
	pub south: f64,
	pub west: f64,
	pub north: f64,
	pub east: f64,
}

impl BoundingBox {
	pub fn around(start: Coordinates, end: Coordinates, margin: f64) -> Self {
		Self {
			south: start.lat.min(end.lat) - margin,
			west: start.lon.min(end.lon) - margin,
			north: start.lat.max(end.lat) + margin,
			east: start.lon.max(end.lon) + margin,
		}
	}
	pub fn contains(&self, c: &Coordinates) -> bool {
		(self.south..=self.north).contains(&c.lat) && (self.west..=self.east).contains(&c.lon)
	}
	/// Overpass QL selecting every highway in the box along with its nodes
	pub fn overpass_query(&self) -> String {
		format!("[out:json];\nway({})[highway];\n(._;>;);\nout body;\n", self)
	}
}

impl fmt::Display for BoundingBox {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
	}
}
