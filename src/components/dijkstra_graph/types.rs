//! Plain graph data: nodes, edges, statuses, and small geometry/id helpers.
//!
//! Statuses are purely presentational. The algorithm reads only ids, edges
//! and weights; positions exist for the canvas alone.

use std::collections::HashMap;

/// Display status of a node, recomputed on every algorithm step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeStatus {
	#[default]
	Default,
	Visited,
	Current,
	Start,
	End,
	Path,
}

/// Display status of an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeStatus {
	#[default]
	Default,
	Path,
}

/// A labeled point in the graph. `id` is unique and stable; `label` is the
/// display string the user sees and is independent of the id.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub label: String,
	pub status: NodeStatus,
}

/// An undirected, weighted connection between two nodes. Weights are kept
/// positive by the editor; the engine assumes non-negative weights and does
/// not check.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub weight: f64,
	pub status: EdgeStatus,
}

/// The editable graph. Invariants maintained by the mutation helpers: edge
/// endpoints reference existing node ids, at most one edge per unordered
/// node pair, no self-loops.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	next_node_seq: u32,
}

impl Graph {
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}

	/// Display label for a node id, falling back to the id itself.
	pub fn label_of(&self, id: &str) -> String {
		self.node(id)
			.map(|n| n.label.clone())
			.unwrap_or_else(|| id.to_string())
	}

	/// Undirected adjacency list. Every node appears as a key, isolated
	/// nodes with an empty neighbor list; each edge contributes both
	/// directions.
	pub fn adjacency(&self) -> HashMap<&str, Vec<(&str, f64)>> {
		let mut adjacency: HashMap<&str, Vec<(&str, f64)>> = self
			.nodes
			.iter()
			.map(|n| (n.id.as_str(), Vec::new()))
			.collect();
		for edge in &self.edges {
			if let Some(neighbors) = adjacency.get_mut(edge.source.as_str()) {
				neighbors.push((edge.target.as_str(), edge.weight));
			}
			if let Some(neighbors) = adjacency.get_mut(edge.target.as_str()) {
				neighbors.push((edge.source.as_str(), edge.weight));
			}
		}
		adjacency
	}

	/// The edge between two nodes, in either orientation.
	pub fn edge_between(&self, a: &str, b: &str) -> Option<&Edge> {
		self.edges
			.iter()
			.find(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
	}

	pub fn edge_mut(&mut self, id: &str) -> Option<&mut Edge> {
		self.edges.iter_mut().find(|e| e.id == id)
	}

	/// Add a node at a canvas position, generating a fresh id and label.
	/// Ids are never reused within a session, even after deletions.
	pub fn add_node(&mut self, x: f64, y: f64) -> String {
		let seq = self.next_node_seq;
		self.next_node_seq += 1;
		let id = format!("n{}", seq + 1);
		self.nodes.push(Node {
			id: id.clone(),
			x,
			y,
			label: node_label(seq),
			status: NodeStatus::Default,
		});
		id
	}

	/// Add an edge between two existing nodes. Self-loops, duplicate pairs
	/// and unknown endpoints are rejected with `None`.
	pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) -> Option<String> {
		if a == b
			|| !self.contains_node(a)
			|| !self.contains_node(b)
			|| self.edge_between(a, b).is_some()
		{
			return None;
		}
		let id = edge_id(a, b);
		self.edges.push(Edge {
			id: id.clone(),
			source: a.to_string(),
			target: b.to_string(),
			weight,
			status: EdgeStatus::Default,
		});
		Some(id)
	}

	/// Remove a node and every edge incident to it.
	pub fn remove_node(&mut self, id: &str) {
		self.nodes.retain(|n| n.id != id);
		self.edges.retain(|e| e.source != id && e.target != id);
	}

	pub fn remove_edge(&mut self, id: &str) {
		self.edges.retain(|e| e.id != id);
	}

	/// Reset all node and edge statuses to default.
	pub fn clear_statuses(&mut self) {
		for node in &mut self.nodes {
			node.status = NodeStatus::Default;
		}
		for edge in &mut self.edges {
			edge.status = EdgeStatus::Default;
		}
	}
}

/// Edge id derived from the unordered endpoint pair.
pub fn edge_id(a: &str, b: &str) -> String {
	if a <= b {
		format!("{}--{}", a, b)
	} else {
		format!("{}--{}", b, a)
	}
}

/// Spreadsheet-style label sequence: A..Z, AA, AB, ...
pub fn node_label(seq: u32) -> String {
	let mut n = seq;
	let mut label = String::new();
	loop {
		label.insert(0, char::from(b'A' + (n % 26) as u8));
		n /= 26;
		if n == 0 {
			break;
		}
		n -= 1;
	}
	label
}

pub fn midpoint(x1: f64, y1: f64, x2: f64, y2: f64) -> (f64, f64) {
	((x1 + x2) / 2.0, (y1 + y2) / 2.0)
}

pub fn point_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	(dx * dx + dy * dy).sqrt()
}

/// Distance from a point to the closest point on a segment. Used for edge
/// hit-testing on the canvas.
pub fn segment_distance(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let len_sq = dx * dx + dy * dy;
	if len_sq < f64::EPSILON {
		return point_distance(px, py, x1, y1);
	}
	let t = (((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0);
	point_distance(px, py, x1 + t * dx, y1 + t * dy)
}
