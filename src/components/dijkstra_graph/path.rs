//! Path reconstruction from a predecessor map, and path highlighting on a
//! graph copy for display.

use std::collections::HashMap;

use super::types::{EdgeStatus, Graph, NodeStatus};

/// Walk the predecessor map backward from `end_id` and return the
/// start-to-end node sequence, or `None` when no finite path was found.
///
/// When the end node is the start node itself its distance is zero and it
/// has no predecessor, so the walk yields the single-element path.
pub fn reconstruct(
	end_id: &str,
	previous: &HashMap<String, String>,
	distances: &HashMap<String, f64>,
) -> Option<Vec<String>> {
	if !distances.get(end_id).is_some_and(|d| d.is_finite()) {
		return None;
	}
	let mut path = vec![end_id.to_string()];
	let mut cursor = end_id;
	while let Some(prev) = previous.get(cursor) {
		path.push(prev.clone());
		cursor = prev;
	}
	path.reverse();
	Some(path)
}

/// Copy of the graph with the given path marked: path nodes that are not
/// start/end become [`NodeStatus::Path`], and every edge joining adjacent
/// path elements (either orientation) becomes [`EdgeStatus::Path`]. Paths
/// shorter than two nodes leave the copy unchanged.
pub fn highlight(graph: &Graph, path: &[String]) -> Graph {
	let mut graph = graph.clone();
	if path.len() < 2 {
		return graph;
	}
	for node in &mut graph.nodes {
		if path.contains(&node.id)
			&& node.status != NodeStatus::Start
			&& node.status != NodeStatus::End
		{
			node.status = NodeStatus::Path;
		}
	}
	for pair in path.windows(2) {
		for edge in &mut graph.edges {
			if (edge.source == pair[0] && edge.target == pair[1])
				|| (edge.source == pair[1] && edge.target == pair[0])
			{
				edge.status = EdgeStatus::Path;
			}
		}
	}
	graph
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Graph {
		let mut graph = Graph::default();
		let a = graph.add_node(0.0, 0.0);
		let b = graph.add_node(1.0, 0.0);
		let c = graph.add_node(2.0, 0.0);
		graph.add_edge(&a, &b, 1.0);
		graph.add_edge(&b, &c, 1.0);
		graph
	}

	#[test]
	fn reconstruct_walks_back_to_the_start() {
		let previous = HashMap::from([
			("n2".to_string(), "n1".to_string()),
			("n3".to_string(), "n2".to_string()),
		]);
		let distances = HashMap::from([
			("n1".to_string(), 0.0),
			("n2".to_string(), 1.0),
			("n3".to_string(), 2.0),
		]);
		assert_eq!(
			reconstruct("n3", &previous, &distances),
			Some(vec!["n1".to_string(), "n2".to_string(), "n3".to_string()])
		);
	}

	#[test]
	fn reconstruct_is_none_without_a_finite_distance() {
		let previous = HashMap::new();
		let distances = HashMap::from([("n9".to_string(), f64::INFINITY)]);
		assert_eq!(reconstruct("n9", &previous, &distances), None);
		assert_eq!(reconstruct("unknown", &previous, &distances), None);
	}

	#[test]
	fn reconstruct_start_as_end_is_the_trivial_path() {
		let previous = HashMap::new();
		let distances = HashMap::from([("n1".to_string(), 0.0)]);
		assert_eq!(
			reconstruct("n1", &previous, &distances),
			Some(vec!["n1".to_string()])
		);
	}

	#[test]
	fn highlight_marks_path_nodes_and_edges() {
		let mut graph = sample();
		graph.node_mut("n1").unwrap().status = NodeStatus::Start;
		graph.node_mut("n3").unwrap().status = NodeStatus::End;

		let path = vec!["n1".to_string(), "n2".to_string(), "n3".to_string()];
		let marked = highlight(&graph, &path);

		// Start/end keep their marks, the interior node becomes a path node.
		assert_eq!(marked.node("n1").unwrap().status, NodeStatus::Start);
		assert_eq!(marked.node("n2").unwrap().status, NodeStatus::Path);
		assert_eq!(marked.node("n3").unwrap().status, NodeStatus::End);
		assert!(
			marked
				.edges
				.iter()
				.all(|e| e.status == EdgeStatus::Path)
		);
	}

	#[test]
	fn highlight_short_paths_is_identity() {
		let graph = sample();
		assert_eq!(highlight(&graph, &[]), graph);
		assert_eq!(highlight(&graph, &["n2".to_string()]), graph);
	}
}
