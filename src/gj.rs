use crate::data::{Coordinates, Route};

use geojson::*;
use serde_json::json;

fn position(c: Coordinates) -> Vec<f64> {
	vec![c.lon, c.lat]
}

fn feature(geometry: Geometry, properties: JsonObject) -> Feature {
	Feature {
		bbox: None,
		geometry: Some(geometry),
		id: None,
		properties: Some(properties),
		foreign_members: None,
	}
}

fn marker(c: Coordinates, role: &str) -> Feature {
	let mut properties = JsonObject::new();
	properties.insert("role".to_string(), json!(role));
	feature(Geometry::new(Value::Point(position(c))), properties)
}

/// The route line plus markers at the requested start and end
pub fn route_to_geojson(route: &Route) -> GeoJson {
	let mut properties = JsonObject::new();
	properties.insert("mode".to_string(), json!(route.mode));
	properties.insert("weight".to_string(), json!(route.weight));
	properties.insert("length".to_string(), json!(route.length));
	let line = Geometry::new(Value::LineString(route.coordinates().map(position).collect()));
	GeoJson::FeatureCollection(FeatureCollection {
		bbox: None,
		features: vec![feature(line, properties), marker(route.start, "start"), marker(route.end, "end")],
		foreign_members: None,
	})
}
