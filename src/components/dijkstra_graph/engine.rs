//! Step-wise Dijkstra engine.
//!
//! Each call to [`advance`] is a pure function from one immutable [`Step`]
//! snapshot to the next, so the full history can be retained and scrubbed
//! backward and forward by the UI. Weights are assumed non-negative;
//! negative weights or cycles are outside the contract and not detected.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::path::{highlight, reconstruct};
use super::types::{Graph, NodeStatus};

/// Errors from the engine's fail-fast boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
	/// A start or end id that names no node in the graph.
	#[error("no node with id `{0}` in the graph")]
	UnknownNode(String),
}

/// The complete algorithm state after processing zero or more nodes.
///
/// Every field is an independent copy; deriving the next step never mutates
/// this one. Unreachable nodes carry `f64::INFINITY`, which compares greater
/// than every finite distance and renders as "∞".
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
	/// Best known distance per node id.
	pub distances: HashMap<String, f64>,
	/// Predecessor per node id; absence means none recorded yet.
	pub previous: HashMap<String, String>,
	/// The node being relaxed this step, `None` once finished.
	pub current_node: Option<String>,
	/// Nodes whose distances are final.
	pub visited: HashSet<String>,
	/// The frontier of candidate nodes.
	pub unvisited: HashSet<String>,
	/// Graph copy whose statuses reflect this step's visualization state.
	pub graph: Graph,
	pub is_done: bool,
	/// Populated only on the terminal step, when reconstructable.
	pub shortest_path: Option<Vec<String>>,
}

/// Outcome of a full run: the scrubbable timeline plus the final answer.
#[derive(Clone, Debug)]
pub struct RunResult {
	/// Whether a path from start to end exists.
	pub success: bool,
	/// Every snapshot in order, the initial one included.
	pub steps: Vec<Step>,
	pub shortest_path: Option<Vec<String>>,
	pub shortest_distance: Option<f64>,
}

/// Initial snapshot: distance zero at the start node, infinity elsewhere,
/// the whole node set unvisited, the start node current.
///
/// The graph copy gets [`NodeStatus::Start`] on the start node; any
/// pre-existing end mark on another node is left in place.
pub fn init(graph: &Graph, start_id: &str) -> Result<Step, EngineError> {
	if !graph.contains_node(start_id) {
		return Err(EngineError::UnknownNode(start_id.to_string()));
	}

	let mut graph = graph.clone();
	let mut distances = HashMap::new();
	let mut unvisited = HashSet::new();
	for node in &mut graph.nodes {
		let distance = if node.id == start_id { 0.0 } else { f64::INFINITY };
		distances.insert(node.id.clone(), distance);
		unvisited.insert(node.id.clone());
		if node.id == start_id {
			node.status = NodeStatus::Start;
		}
	}

	Ok(Step {
		distances,
		previous: HashMap::new(),
		current_node: Some(start_id.to_string()),
		visited: HashSet::new(),
		unvisited,
		graph,
		is_done: false,
		shortest_path: None,
	})
}

/// Derive the next snapshot: finalize the current node, relax its unvisited
/// neighbors, and pick the next frontier node by minimum distance.
///
/// Ties on the minimum are broken toward the lexicographically lowest node
/// id, a deterministic choice that affects step order only, never distances.
/// At a terminal step this returns an equivalent snapshot.
pub fn advance(step: &Step) -> Step {
	let Some(u) = step.current_node.clone() else {
		return step.clone();
	};
	if step.is_done {
		return step.clone();
	}

	let mut next = step.clone();
	next.unvisited.remove(&u);
	next.visited.insert(u.clone());

	// Statuses are a projection of (visited, current, endpoint marks).
	// Endpoint marks take precedence: they are the only record of which
	// nodes were chosen as start and end.
	for node in &mut next.graph.nodes {
		if node.id == u {
			if node.status != NodeStatus::Start && node.status != NodeStatus::End {
				node.status = NodeStatus::Current;
			}
		} else if next.visited.contains(&node.id) && node.status != NodeStatus::End {
			node.status = NodeStatus::Visited;
		}
	}

	let du = next.distances.get(&u).copied().unwrap_or(f64::INFINITY);
	let adjacency = next.graph.adjacency();
	if let Some(neighbors) = adjacency.get(u.as_str()) {
		for &(v, weight) in neighbors {
			if next.visited.contains(v) {
				continue;
			}
			let candidate = du + weight;
			// Strict improvement only: ties keep the first-discovered path.
			if candidate < next.distances.get(v).copied().unwrap_or(f64::INFINITY) {
				next.distances.insert(v.to_string(), candidate);
				next.previous.insert(v.to_string(), u.clone());
			}
		}
	}

	let next_current = next
		.unvisited
		.iter()
		.filter_map(|id| {
			let d = next.distances.get(id).copied().unwrap_or(f64::INFINITY);
			d.is_finite().then_some((id.clone(), d))
		})
		.min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

	match next_current {
		Some((id, _)) => next.current_node = Some(id),
		None => {
			next.current_node = None;
			next.is_done = true;
		}
	}
	next
}

/// Run the algorithm to completion and collect every snapshot.
///
/// After termination the path to `end_id` is reconstructed from the terminal
/// predecessor map; when one of length ≥ 2 exists it is overlaid onto the
/// terminal step's graph copy. Termination itself never depends on reaching
/// the end node.
pub fn run(graph: &Graph, start_id: &str, end_id: &str) -> Result<RunResult, EngineError> {
	if !graph.contains_node(end_id) {
		return Err(EngineError::UnknownNode(end_id.to_string()));
	}

	let mut current = init(graph, start_id)?;
	let mut steps = Vec::new();
	while !current.is_done {
		let next = advance(&current);
		steps.push(current);
		current = next;
	}

	let shortest_path = reconstruct(end_id, &current.previous, &current.distances);
	let shortest_distance = current
		.distances
		.get(end_id)
		.copied()
		.filter(|d| d.is_finite());
	if let Some(path) = &shortest_path {
		if path.len() >= 2 {
			current.graph = highlight(&current.graph, path);
		}
		current.shortest_path = Some(path.clone());
	}
	steps.push(current);

	Ok(RunResult {
		success: shortest_path.is_some(),
		steps,
		shortest_path,
		shortest_distance,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::dijkstra_graph::types::{Edge, EdgeStatus, Node, edge_id};
	use proptest::prelude::*;
	use rstest::rstest;

	fn build(nodes: &[&str], edges: &[(&str, &str, f64)]) -> Graph {
		let mut graph = Graph::default();
		for (i, id) in nodes.iter().enumerate() {
			graph.nodes.push(Node {
				id: id.to_string(),
				x: i as f64 * 10.0,
				y: 0.0,
				label: id.to_uppercase(),
				status: NodeStatus::Default,
			});
		}
		for (a, b, w) in edges {
			graph.edges.push(Edge {
				id: edge_id(a, b),
				source: a.to_string(),
				target: b.to_string(),
				weight: *w,
				status: EdgeStatus::Default,
			});
		}
		graph
	}

	/// The worked example: A-B(4), A-D(3), B-C(5), B-D(2), C-D(1), C-E(6),
	/// D-E(8).
	fn demo_graph() -> Graph {
		build(
			&["a", "b", "c", "d", "e"],
			&[
				("a", "b", 4.0),
				("a", "d", 3.0),
				("b", "c", 5.0),
				("b", "d", 2.0),
				("c", "d", 1.0),
				("c", "e", 6.0),
				("d", "e", 8.0),
			],
		)
	}

	/// Total weight of every simple path between two nodes, by exhaustive
	/// DFS enumeration. Oracle for small graphs.
	fn enumerate_path_weights(graph: &Graph, start: &str, end: &str) -> Vec<f64> {
		fn dfs(
			adjacency: &std::collections::HashMap<&str, Vec<(&str, f64)>>,
			current: &str,
			end: &str,
			seen: &mut Vec<String>,
			total: f64,
			out: &mut Vec<f64>,
		) {
			if current == end {
				out.push(total);
				return;
			}
			for &(v, w) in &adjacency[current] {
				if !seen.iter().any(|s| s == v) {
					seen.push(v.to_string());
					dfs(adjacency, v, end, seen, total + w, out);
					seen.pop();
				}
			}
		}

		let adjacency = graph.adjacency();
		let mut out = Vec::new();
		let mut seen = vec![start.to_string()];
		dfs(&adjacency, start, end, &mut seen, 0.0, &mut out);
		out
	}

	/// Independent distance oracle: repeated full-edge relaxation sweeps.
	fn relaxation_oracle(graph: &Graph, start: &str) -> HashMap<String, f64> {
		let mut dist: HashMap<String, f64> = graph
			.nodes
			.iter()
			.map(|n| (n.id.clone(), f64::INFINITY))
			.collect();
		dist.insert(start.to_string(), 0.0);
		for _ in 0..graph.nodes.len() {
			for edge in &graph.edges {
				for (from, to) in [
					(edge.source.as_str(), edge.target.as_str()),
					(edge.target.as_str(), edge.source.as_str()),
				] {
					let candidate = dist[from] + edge.weight;
					if candidate < dist[to] {
						dist.insert(to.to_string(), candidate);
					}
				}
			}
		}
		dist
	}

	#[test]
	fn init_marks_the_start_and_keeps_an_end_mark() {
		let mut graph = demo_graph();
		graph.node_mut("e").unwrap().status = NodeStatus::End;

		let step = init(&graph, "a").unwrap();
		assert_eq!(step.distances["a"], 0.0);
		assert!(step.distances["e"].is_infinite());
		assert_eq!(step.current_node.as_deref(), Some("a"));
		assert_eq!(step.unvisited.len(), 5);
		assert!(step.visited.is_empty());
		assert!(!step.is_done);
		assert_eq!(step.graph.node("a").unwrap().status, NodeStatus::Start);
		assert_eq!(step.graph.node("e").unwrap().status, NodeStatus::End);
		assert_eq!(step.graph.node("b").unwrap().status, NodeStatus::Default);
	}

	#[test]
	fn init_fails_fast_on_an_unknown_start() {
		let err = init(&demo_graph(), "zz").unwrap_err();
		assert_eq!(err, EngineError::UnknownNode("zz".to_string()));
	}

	#[test]
	fn run_fails_fast_on_an_unknown_end() {
		let err = run(&demo_graph(), "a", "zz").unwrap_err();
		assert_eq!(err, EngineError::UnknownNode("zz".to_string()));
	}

	#[test]
	fn run_finds_the_true_minimum_on_the_worked_example() {
		let result = run(&demo_graph(), "a", "e").unwrap();
		assert!(result.success);
		assert_eq!(result.shortest_distance, Some(10.0));
		assert_eq!(
			result.shortest_path,
			Some(vec![
				"a".to_string(),
				"d".to_string(),
				"c".to_string(),
				"e".to_string()
			])
		);

		// Cross-check against exhaustive enumeration of all simple paths.
		let weights = enumerate_path_weights(&demo_graph(), "a", "e");
		let minimum = weights.iter().copied().fold(f64::INFINITY, f64::min);
		assert_eq!(result.shortest_distance, Some(minimum));
	}

	#[rstest]
	#[case("a", "a", &["a"], 0.0)]
	#[case("a", "b", &["a", "b"], 4.0)]
	#[case("a", "c", &["a", "d", "c"], 4.0)]
	#[case("e", "a", &["e", "c", "d", "a"], 10.0)]
	fn run_reports_path_and_distance(
		#[case] start: &str,
		#[case] end: &str,
		#[case] path: &[&str],
		#[case] distance: f64,
	) {
		let result = run(&demo_graph(), start, end).unwrap();
		let expected: Vec<String> = path.iter().map(|s| s.to_string()).collect();
		assert!(result.success);
		assert_eq!(result.shortest_path, Some(expected));
		assert_eq!(result.shortest_distance, Some(distance));
	}

	#[test]
	fn unreachable_end_is_a_normal_outcome() {
		let graph = build(&["a", "b", "f"], &[("a", "b", 1.0)]);
		let result = run(&graph, "a", "f").unwrap();
		assert!(!result.success);
		assert_eq!(result.shortest_path, None);
		assert_eq!(result.shortest_distance, None);
		assert!(result.steps.last().unwrap().is_done);
		// The terminal step still records no path.
		assert_eq!(result.steps.last().unwrap().shortest_path, None);
	}

	#[test]
	fn start_distance_is_zero_in_every_step() {
		let result = run(&demo_graph(), "a", "e").unwrap();
		for step in &result.steps {
			assert_eq!(step.distances["a"], 0.0);
		}
	}

	#[test]
	fn visited_nodes_stay_visited_with_frozen_distances() {
		let result = run(&demo_graph(), "a", "e").unwrap();
		for pair in result.steps.windows(2) {
			assert!(pair[1].visited.is_superset(&pair[0].visited));
			for id in &pair[0].visited {
				assert_eq!(pair[0].distances[id], pair[1].distances[id]);
			}
		}
	}

	#[test]
	fn unvisited_shrinks_by_exactly_one_per_step() {
		let result = run(&demo_graph(), "a", "e").unwrap();
		for pair in result.steps.windows(2) {
			assert_eq!(pair[0].unvisited.len(), pair[1].unvisited.len() + 1);
		}
	}

	#[test]
	fn advance_is_idempotent_at_the_terminal_step() {
		let result = run(&demo_graph(), "a", "e").unwrap();
		let last = result.steps.last().unwrap();
		assert!(last.is_done);
		assert_eq!(last.current_node, None);
		assert_eq!(&advance(last), last);
	}

	#[test]
	fn advance_never_mutates_its_input() {
		let first = init(&demo_graph(), "a").unwrap();
		let snapshot = first.clone();
		let _ = advance(&first);
		assert_eq!(first, snapshot);
	}

	#[test]
	fn equal_distance_frontier_ties_go_to_the_lowest_id() {
		let graph = build(&["s", "b", "a"], &[("s", "b", 1.0), ("s", "a", 1.0)]);
		let step = advance(&init(&graph, "s").unwrap());
		assert_eq!(step.current_node.as_deref(), Some("a"));
	}

	#[test]
	fn ties_are_not_relaxed_so_the_first_predecessor_wins() {
		// Two equal-cost routes into d: via b (1+1) and via c (1+1). b is
		// processed first, so d's predecessor must stay b.
		let graph = build(
			&["a", "b", "c", "d"],
			&[
				("a", "b", 1.0),
				("a", "c", 1.0),
				("b", "d", 1.0),
				("c", "d", 1.0),
			],
		);
		let result = run(&graph, "a", "d").unwrap();
		assert_eq!(result.shortest_distance, Some(2.0));
		assert_eq!(
			result.shortest_path,
			Some(vec!["a".to_string(), "b".to_string(), "d".to_string()])
		);
	}

	#[test]
	fn statuses_track_the_walk_and_the_final_path() {
		let mut graph = demo_graph();
		graph.node_mut("e").unwrap().status = NodeStatus::End;

		let result = run(&graph, "a", "e").unwrap();
		let last = result.steps.last().unwrap();

		// Interior path nodes are marked, the end mark survives, and the
		// path edges are highlighted on the terminal graph copy.
		assert_eq!(last.graph.node("d").unwrap().status, NodeStatus::Path);
		assert_eq!(last.graph.node("c").unwrap().status, NodeStatus::Path);
		assert_eq!(last.graph.node("e").unwrap().status, NodeStatus::End);
		assert_eq!(
			last.graph.edge_between("d", "c").unwrap().status,
			EdgeStatus::Path
		);
		assert_eq!(
			last.graph.edge_between("a", "b").unwrap().status,
			EdgeStatus::Default
		);

		// Two advances in, d has just been processed (Current), the start
		// node has joined the visited set (Visited), and the frontier pick
		// is b (tied with c at distance 4, lowest id wins).
		let mid = &result.steps[2];
		assert_eq!(mid.current_node.as_deref(), Some("b"));
		assert_eq!(mid.graph.node("d").unwrap().status, NodeStatus::Current);
		assert_eq!(mid.graph.node("a").unwrap().status, NodeStatus::Visited);
		assert_eq!(mid.graph.node("b").unwrap().status, NodeStatus::Default);
	}

	#[test]
	fn timeline_length_is_processed_nodes_plus_one() {
		// All five nodes are reachable, so five processing steps follow the
		// initial snapshot.
		let result = run(&demo_graph(), "a", "e").unwrap();
		assert_eq!(result.steps.len(), 6);
	}

	proptest! {
		#[test]
		fn terminal_distances_match_the_relaxation_oracle(
			mask in proptest::collection::vec(any::<bool>(), 21),
			weights in proptest::collection::vec(1u32..=9u32, 21),
		) {
			let ids: Vec<String> = (0..7).map(|i| format!("n{}", i)).collect();
			let mut graph = Graph::default();
			for (i, id) in ids.iter().enumerate() {
				graph.nodes.push(Node {
					id: id.clone(),
					x: i as f64,
					y: 0.0,
					label: id.to_uppercase(),
					status: NodeStatus::Default,
				});
			}
			let mut k = 0;
			for i in 0..7 {
				for j in (i + 1)..7 {
					if mask[k] {
						graph.edges.push(Edge {
							id: edge_id(&ids[i], &ids[j]),
							source: ids[i].clone(),
							target: ids[j].clone(),
							weight: f64::from(weights[k]),
							status: EdgeStatus::Default,
						});
					}
					k += 1;
				}
			}

			let result = run(&graph, "n0", "n6").unwrap();
			let last = result.steps.last().unwrap();
			let oracle = relaxation_oracle(&graph, "n0");
			for id in &ids {
				let d = last.distances[id];
				let o = oracle[id];
				prop_assert!(d == o || (d.is_infinite() && o.is_infinite()));
			}

			// When a path exists, its edge weights sum to the reported
			// distance.
			if let Some(path) = &result.shortest_path {
				let total: f64 = path
					.windows(2)
					.map(|p| graph.edge_between(&p[0], &p[1]).unwrap().weight)
					.sum();
				prop_assert_eq!(Some(total), result.shortest_distance);
			} else {
				prop_assert!(!result.success);
			}
		}
	}
}
