use std::{collections::{HashMap, HashSet}, hash::Hash};

use indexmap::IndexMap;
use noisy_float::prelude::*;
use priority_queue::PriorityQueue;

pub trait Edge<NId: Clone + Copy + Hash + Eq> : Clone + Hash + PartialEq + Eq {
	fn p1(&self) -> NId;
	fn p2(&self) -> NId;
	fn is_cyclic(&self) -> bool {
		self.p1() == self.p2()
	}
	fn other(&self, id: NId) -> NId {
		if id == self.p1() {
			self.p2()
		} else {
			self.p1()
		}
	}
}

/// Undirected multigraph; parallel edges are kept as long as they compare unequal
#[derive(Clone, Debug)]
pub struct Graph<NId, N, E>
where
	NId: Clone + Copy + Hash + Eq,
	E: Edge<NId>,
{
	nodes: HashMap<NId, N>,
	edges: IndexMap<NId, HashSet<E>>,
}

impl<NId, N, E> Default for Graph<NId, N, E>
where
	NId: Clone + Copy + Hash + Eq,
	E: Edge<NId>,
{
	fn default() -> Self {
		Self { nodes: HashMap::new(), edges: IndexMap::new() }
	}
}

impl<NId, N, E> Graph<NId, N, E>
where
	NId: Clone + Copy + Hash + Eq,
	E: Edge<NId>,
{
	pub fn get_node(&self, n: NId) -> Option<&N> {
		self.nodes.get(&n)
	}
	pub fn contains_node(&self, n: NId) -> bool {
		self.nodes.contains_key(&n)
	}
	pub fn get_edges(&self, n: NId) -> Option<&HashSet<E>> {
		self.edges.get(&n)
	}
	#[cfg(test)]
	pub fn get_edges_between(&self, n1: NId, n2: NId) -> Vec<&E> {
		self.edges.get(&n1).iter().flat_map(|es| es.iter()).filter(|e| e.other(n1) == n2).collect()
	}
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}
	pub fn edge_count(&self) -> usize {
		self.edges.values().flat_map(|es| es.iter()).map(|e| if e.is_cyclic() { 2 } else { 1 }).sum::<usize>()/2
	}
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
	/// Adds (or replaces) a node
	pub fn add_node(&mut self, id: NId, n: N) -> Option<N> {
		self.edges.entry(id).or_default();
		self.nodes.insert(id, n)
	}
	/// Adds an edge between two known nodes
	pub fn add_edge(&mut self, e: E) -> bool {
		if self.nodes.contains_key(&e.p1()) && self.nodes.contains_key(&e.p2()) {
			if !e.is_cyclic() {
				self.edges.entry(e.p1()).or_default().insert(e.clone());
			}
			self.edges.entry(e.p2()).or_default().insert(e);
			true
		} else {
			false
		}
	}
	/// Find minimum weight path between 2 nodes.
	///
	/// `heuristic` must never overestimate the remaining weight to `n2` (and must be consistent); `|_| n64(0.0)` gives plain Dijkstra.
	/// Weights must be non-negative. Returns `None` when either node is unknown or `n2` is unreachable from `n1`.
	pub fn pathfind<FW, FH>(&self, n1: NId, n2: NId, weight: FW, heuristic: FH) -> Option<Vec<&E>>
	where
		FW: Fn(&E) -> N64,
		FH: Fn(NId) -> N64,
	{
		if !self.contains_node(n1) || !self.contains_node(n2) {
			return None;
		}
		let mut dp: HashMap<NId, (N64, Option<&E>)> = HashMap::new();
		let mut settled: HashSet<NId> = HashSet::new();
		dp.insert(n1, (n64(0.0), None));
		let mut q = PriorityQueue::new();
		q.push(n1, -heuristic(n1));
		while let Some((u, _)) = q.pop() {
			if u == n2 {
				let mut path = Vec::new();
				let mut v = u;
				while let Some((_, Some(e))) = dp.get(&v) {
					v = e.other(v);
					path.push(*e);
				}
				path.reverse();
				return Some(path);
			}
			settled.insert(u);
			let d = dp[&u].0;
			for e in self.get_edges(u).into_iter().flatten() {
				let v = e.other(u);
				if settled.contains(&v) {
					continue;
				}
				let d = d + weight(e);
				if dp.get(&v).map_or(true, |(vd, _)| vd > &d) {
					dp.insert(v, (d, Some(e)));
					q.push(v, -(d + heuristic(v)));
				}
			}
		}
		None
	}
	/// Converts a path consisting of successive edges to successively visited nodes
	pub fn path_to_nodes<'a>(path: impl Iterator<Item = &'a E>, n: NId) -> Vec<(NId, Option<&'a E>)>
	where
		E: 'a,
	{
		let mut vs: Vec<(NId, Option<&'a E>)> = vec![(n, None)];
		for e in path {
			let last = vs[vs.len() - 1].0;
			vs.push((e.other(last), Some(e)));
		}
		vs
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{Rng, SeedableRng, rngs::StdRng};

	#[derive(Clone, Debug, Hash, PartialEq, Eq)]
	struct E(u32, u32, N64, u32);

	impl Edge<u32> for E {
		fn p1(&self) -> u32 {
			self.0
		}
		fn p2(&self) -> u32 {
			self.1
		}
	}

	fn graph(n: u32, es: &[E]) -> Graph<u32, (), E> {
		let mut g = Graph::default();
		for i in 0..n {
			g.add_node(i, ());
		}
		for e in es {
			assert!(g.add_edge(e.clone()));
		}
		g
	}

	fn dijkstra(g: &Graph<u32, (), E>, n1: u32, n2: u32) -> Option<Vec<&E>> {
		g.pathfind(n1, n2, |e| e.2, |_| n64(0.0))
	}

	fn cost(path: &[&E]) -> f64 {
		path.iter().map(|e| e.2.raw()).sum()
	}

	#[test]
	fn prefers_cheaper_detour() {
		let g = graph(4, &[E(0, 1, n64(1.0), 0), E(1, 2, n64(1.0), 0), E(0, 2, n64(5.0), 0), E(2, 3, n64(1.0), 0)]);
		let path = dijkstra(&g, 0, 3).unwrap();
		assert_eq!(cost(&path), 3.0);
		let nodes: Vec<_> = Graph::<u32, (), E>::path_to_nodes(path.into_iter(), 0).into_iter().map(|(n, _)| n).collect();
		assert_eq!(nodes, vec![0, 1, 2, 3]);
	}

	#[test]
	fn walks_edges_against_their_orientation() {
		let g = graph(3, &[E(1, 0, n64(2.0), 0), E(2, 1, n64(2.0), 0)]);
		let path = dijkstra(&g, 0, 2).unwrap();
		let nodes: Vec<_> = Graph::<u32, (), E>::path_to_nodes(path.into_iter(), 0).into_iter().map(|(n, _)| n).collect();
		assert_eq!(nodes, vec![0, 1, 2]);
	}

	#[test]
	fn parallel_edges_pick_lighter() {
		let g = graph(2, &[E(0, 1, n64(9.0), 1), E(0, 1, n64(4.0), 2)]);
		assert_eq!(g.edge_count(), 2);
		assert_eq!(g.get_edges_between(0, 1).len(), 2);
		let path = dijkstra(&g, 1, 0).unwrap();
		assert_eq!(path, vec![&E(0, 1, n64(4.0), 2)]);
	}

	#[test]
	fn same_node_is_trivial_path() {
		let g = graph(2, &[E(0, 1, n64(1.0), 0)]);
		let path = dijkstra(&g, 1, 1).unwrap();
		assert!(path.is_empty());
		assert_eq!(Graph::<u32, (), E>::path_to_nodes(path.into_iter(), 1), vec![(1, None)]);
	}

	#[test]
	fn disconnected_is_none() {
		let g = graph(4, &[E(0, 1, n64(1.0), 0), E(2, 3, n64(1.0), 0)]);
		assert!(dijkstra(&g, 0, 3).is_none());
		assert!(dijkstra(&g, 0, 42).is_none());
		assert!(dijkstra(&g, 42, 42).is_none());
	}

	#[test]
	fn self_loops() {
		let g = graph(2, &[E(0, 0, n64(1.0), 0), E(0, 1, n64(3.0), 0)]);
		assert_eq!(g.edge_count(), 2);
		assert_eq!(cost(&dijkstra(&g, 0, 1).unwrap()), 3.0);
	}

	#[test]
	fn rejects_edges_to_unknown_nodes() {
		let mut g: Graph<u32, (), E> = Graph::default();
		g.add_node(0, ());
		assert!(!g.add_edge(E(0, 1, n64(1.0), 0)));
		assert_eq!(g.edge_count(), 0);
	}

	#[test]
	fn search_leaves_graph_reusable() {
		let g = graph(3, &[E(0, 1, n64(1.0), 0), E(1, 2, n64(1.0), 0)]);
		let first = cost(&dijkstra(&g, 0, 2).unwrap());
		let second = cost(&dijkstra(&g, 0, 2).unwrap());
		assert_eq!(first, second);
		assert_eq!(g.edge_count(), 2);
	}

	/// Compares against Bellman-Ford on random multigraphs
	#[test]
	fn optimal_on_random_graphs() {
		let mut rng = StdRng::seed_from_u64(0x5eed);
		for _ in 0..50 {
			let n = rng.gen_range(2..12u32);
			let es: Vec<E> = (0..rng.gen_range(0..30u32))
				.map(|i| E(rng.gen_range(0..n), rng.gen_range(0..n), n64(rng.gen_range(0.0..100.0)), i))
				.collect();
			let g = graph(n, &es);
			let mut best = vec![f64::INFINITY; n as usize];
			best[0] = 0.0;
			for _ in 0..n {
				for e in &es {
					let w = e.2.raw();
					best[e.1 as usize] = best[e.1 as usize].min(best[e.0 as usize] + w);
					best[e.0 as usize] = best[e.0 as usize].min(best[e.1 as usize] + w);
				}
			}
			for t in 0..n {
				match dijkstra(&g, 0, t) {
					Some(path) => {
						assert!((cost(&path) - best[t as usize]).abs() < 1e-6);
						let nodes = Graph::<u32, (), E>::path_to_nodes(path.into_iter(), 0);
						assert_eq!(nodes.last().map(|(v, _)| *v), Some(t));
					},
					None => assert!(best[t as usize].is_infinite()),
				}
			}
		}
	}
}
