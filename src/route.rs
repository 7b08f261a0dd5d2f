use crate::*;
use crate::data::{Coordinates, Distance, MapData, Route, RoutePoint};
use crate::network::RoadGraph;
use crate::weight::Mode;

use noisy_float::prelude::*;
use serde::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
	#[error("no route could be computed in this area")]
	EmptyArea,
	#[error("no route found between these points ({from} and {to} are not connected)")]
	NoPath { from: PointId, to: PointId },
	#[error("coordinates must be finite numbers")]
	InvalidCoordinates,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
	Dijkstra,
	#[serde(rename = "astar")]
	AStar,
}

impl Default for Algorithm {
	fn default() -> Self {
		Algorithm::Dijkstra
	}
}

impl std::str::FromStr for Algorithm {
	type Err = String;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"dijkstra" => Ok(Algorithm::Dijkstra),
			"astar" | "a*" => Ok(Algorithm::AStar),
			other => Err(format!("unknown algorithm {:?}", other)),
		}
	}
}

#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Options {
	pub mode: Mode,
	pub algorithm: Algorithm,
}

/// Vertices of a minimum weight path, with its total weight and physical length
#[derive(Clone, PartialEq, Debug)]
pub struct Solution {
	pub nodes: Vec<PointId>,
	pub weight: f64,
	pub length: f64,
}

/// Minimum weight path between two vertices; `None` when they are not connected
pub fn solve(g: &RoadGraph, from: PointId, to: PointId, algorithm: Algorithm, mode: Mode) -> Option<Solution> {
	let path = match algorithm {
		Algorithm::Dijkstra => g.pathfind(from, to, |e| e.weight, |_| n64(0.0)),
		Algorithm::AStar => {
			let target = *g.get_node(to)?;
			let scale = mode.min_factor();
			g.pathfind(from, to, |e| e.weight, |v| n64(g.get_node(v).map_or(0.0, |c| c.distance(&target) * scale)))
		},
	}?;
	Some(Solution {
		weight: path.iter().map(|e| e.weight.raw()).sum(),
		length: path.iter().map(|e| e.length.raw()).sum(),
		nodes: RoadGraph::path_to_nodes(path.into_iter(), from).into_iter().map(|(u, _)| u).collect(),
	})
}

/// Route between two arbitrary coordinates over the street network of `map`
pub fn plan(map: &MapData, start: Coordinates, end: Coordinates, options: Options) -> Result<Route, RouteError> {
	if ![start.lat, start.lon, end.lat, end.lon].iter().all(|v| v.is_finite()) {
		return Err(RouteError::InvalidCoordinates);
	}
	let (g, table) = network::build(map.points(), map.segments(), options.mode);
	log::info!("Built road graph: {} vertices, {} edges", g.node_count(), g.edge_count());
	if g.is_empty() {
		return Err(RouteError::EmptyArea);
	}
	let routable: Vec<_> = table.iter().filter(|(id, _)| g.contains_node(**id)).collect();
	let from = locate::nearest(&start, routable.iter().copied()).ok_or(RouteError::EmptyArea)?;
	let to = locate::nearest(&end, routable.iter().copied()).ok_or(RouteError::EmptyArea)?;
	log::info!("Located endpoints at points {} and {}", from, to);
	let solution = solve(&g, from, to, options.algorithm, options.mode).ok_or(RouteError::NoPath { from, to })?;
	// vertices always carry their coordinates
	let points: Vec<RoutePoint> = solution.nodes.iter().filter_map(|&u| g.get_node(u).map(|c| RoutePoint { id: u, lat: c.lat, lon: c.lon })).collect();
	log::info!("Solved {} route with {} points, weight {:.1}, length {:.1}m", options.mode, points.len(), solution.weight, solution.length);
	Ok(Route {
		mode: options.mode,
		start,
		end,
		weight: solution.weight,
		length: solution.length,
		path: points,
	})
}
