use crate::*;
use crate::data::{Coordinates, Distance, GeoPoint, PathSegment};
use crate::graph::{Edge, Graph};

use indexmap::IndexMap;
use itertools::Itertools;
use noisy_float::prelude::*;

/// Coordinates of every known point, in the order the map data listed them
pub type CoordinateTable = IndexMap<PointId, Coordinates>;

pub type RoadGraph = Graph<PointId, Coordinates, Segment>;

/// One hop between consecutive points of a way
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Segment {
	pub p1: PointId,
	pub p2: PointId,
	pub way: WayId,
	pub length: N64,
	pub weight: N64,
}

impl Edge<PointId> for Segment {
	fn p1(&self) -> PointId {
		self.p1
	}
	fn p2(&self) -> PointId {
		self.p2
	}
}

/// Build the street graph of the given map data.
///
/// Ways without a classification and hops that reference an unknown point are skipped.
pub fn build(points: impl IntoIterator<Item = GeoPoint>, segments: impl IntoIterator<Item = PathSegment>, mode: weight::Mode) -> (RoadGraph, CoordinateTable) {
	let table: CoordinateTable = points.into_iter().map(|p| (p.id, p.coordinates)).collect();
	let mut g = RoadGraph::default();
	let mut dangling = 0usize;
	for s in segments {
		let class = match &s.classification {
			Some(class) => class,
			None => continue,
		};
		for (&p1, &p2) in s.nodes.iter().tuple_windows() {
			let (c1, c2) = match (table.get(&p1), table.get(&p2)) {
				(Some(c1), Some(c2)) => (*c1, *c2),
				_ => {
					log::trace!("way {} references unknown point in {}-{}", s.way, p1, p2);
					dangling += 1;
					continue;
				},
			};
			let length = c1.distance(&c2);
			g.add_node(p1, c1);
			g.add_node(p2, c2);
			g.add_edge(Segment {
				p1,
				p2,
				way: s.way,
				length: n64(length),
				weight: weight::weight(class, length, mode),
			});
		}
	}
	if dangling > 0 {
		log::debug!("Skipped {} segments with dangling point references", dangling);
	}
	log::debug!("Built {} graph with {} vertices and {} edges out of {} points", mode, g.node_count(), g.edge_count(), table.len());
	(g, table)
}
