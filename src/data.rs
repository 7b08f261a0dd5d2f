use std::collections::HashMap;

use crate::*;

use geo::prelude::HaversineDistance;
use serde::*;

pub trait Distance {
	type Measure;
	fn distance(&self, other: &Self) -> Self::Measure;
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Coordinates {
	pub lat: f64,
	pub lon: f64,
}

impl Coordinates {
	pub fn new(lat: f64, lon: f64) -> Self {
		Self { lat, lon }
	}
	pub fn to_point(self) -> geo::Point<f64> {
		geo::Point::new(self.lon, self.lat)
	}
}

/// Great-circle distance in meters
impl Distance for Coordinates {
	type Measure = f64;
	fn distance(&self, othr: &Self) -> Self::Measure {
		self.to_point().haversine_distance(&othr.to_point())
	}
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GeoPoint {
	pub id: PointId,
	pub coordinates: Coordinates,
}

#[derive(Clone, PartialEq, Debug)]
pub struct PathSegment {
	pub way: WayId,
	pub nodes: Vec<PointId>,
	/// `None` for ways that are not part of the street network
	pub classification: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
	Node {
		id: PointId,
		lat: f64,
		lon: f64,
	},
	Way {
		id: WayId,
		#[serde(default)]
		nodes: Vec<PointId>,
		#[serde(default)]
		tags: HashMap<String, String>,
	},
	#[serde(other)]
	Other,
}

/// Raw map data as returned by an Overpass-style query
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
pub struct MapData {
	#[serde(default)]
	pub elements: Vec<Element>,
}

impl MapData {
	pub fn points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
		self.elements.iter().filter_map(|e| match e {
			Element::Node { id, lat, lon } => Some(GeoPoint { id: *id, coordinates: Coordinates::new(*lat, *lon) }),
			_ => None,
		})
	}
	pub fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
		self.elements.iter().filter_map(|e| match e {
			Element::Way { id, nodes, tags } => Some(PathSegment {
				way: *id,
				nodes: nodes.clone(),
				classification: tags.get(HIGHWAY_TAG).cloned(),
			}),
			_ => None,
		})
	}
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct RoutePoint {
	pub id: PointId,
	pub lat: f64,
	pub lon: f64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Route {
	pub mode: weight::Mode,
	pub start: Coordinates,
	pub end: Coordinates,
	pub weight: f64,
	/// Physical length in meters
	pub length: f64,
	pub path: Vec<RoutePoint>,
}

impl Route {
	pub fn coordinates(&self) -> impl Iterator<Item = Coordinates> + '_ {
		self.path.iter().map(|p| Coordinates::new(p.lat, p.lon))
	}
}
