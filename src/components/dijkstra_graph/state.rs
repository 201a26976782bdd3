//! Interaction state for the graph editor: drag, edge drafting, hover, and
//! canvas hit-testing.

use super::types::{Graph, segment_distance};

pub const NODE_RADIUS: f64 = 16.0;
pub const HIT_RADIUS: f64 = 20.0;
pub const EDGE_HIT_TOLERANCE: f64 = 8.0;
/// Weight a newly drawn edge starts with; adjustable with the wheel.
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_id: Option<String>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

/// An edge being drawn from a source node toward the cursor.
#[derive(Clone, Debug, Default)]
pub struct EdgeDraft {
	pub active: bool,
	pub source: Option<String>,
	pub cursor_x: f64,
	pub cursor_y: f64,
}

pub struct EditorState {
	pub drag: DragState,
	pub draft: EdgeDraft,
	pub hover: Option<String>,
	pub width: f64,
	pub height: f64,
}

impl EditorState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			drag: DragState::default(),
			draft: EdgeDraft::default(),
			hover: None,
			width,
			height,
		}
	}

	/// Drop any in-progress interaction, e.g. when the cursor leaves the
	/// canvas.
	pub fn cancel_interactions(&mut self) {
		self.drag = DragState::default();
		self.draft = EdgeDraft::default();
		self.hover = None;
	}
}

/// The topmost node under the cursor, later nodes drawn on top winning.
pub fn node_at_position(graph: &Graph, x: f64, y: f64) -> Option<String> {
	graph
		.nodes
		.iter()
		.rev()
		.find(|n| {
			let (dx, dy) = (n.x - x, n.y - y);
			(dx * dx + dy * dy).sqrt() < HIT_RADIUS
		})
		.map(|n| n.id.clone())
}

/// The edge whose segment passes closest to the cursor, within tolerance.
pub fn edge_at_position(graph: &Graph, x: f64, y: f64) -> Option<String> {
	graph
		.edges
		.iter()
		.filter_map(|edge| {
			let a = graph.node(&edge.source)?;
			let b = graph.node(&edge.target)?;
			let d = segment_distance(x, y, a.x, a.y, b.x, b.y);
			(d < EDGE_HIT_TOLERANCE).then(|| (edge.id.clone(), d))
		})
		.min_by(|a, b| a.1.total_cmp(&b.1))
		.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn two_nodes() -> (Graph, String, String) {
		let mut graph = Graph::default();
		let a = graph.add_node(100.0, 100.0);
		let b = graph.add_node(300.0, 100.0);
		(graph, a, b)
	}

	#[test]
	fn node_hit_testing_respects_the_hit_radius() {
		let (graph, a, _) = two_nodes();
		assert_eq!(node_at_position(&graph, 105.0, 95.0), Some(a));
		assert_eq!(node_at_position(&graph, 200.0, 100.0), None);
	}

	#[test]
	fn edge_hit_testing_finds_the_segment() {
		let (mut graph, a, b) = two_nodes();
		let edge = graph.add_edge(&a, &b, 1.0).unwrap();
		assert_eq!(edge_at_position(&graph, 200.0, 103.0), Some(edge));
		assert_eq!(edge_at_position(&graph, 200.0, 150.0), None);
	}
}
