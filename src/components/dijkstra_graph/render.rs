//! Canvas drawing: edges with weight labels, status-colored nodes, and the
//! in-progress edge draft.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{EditorState, NODE_RADIUS};
use super::types::{EdgeStatus, Graph, NodeStatus, midpoint};

fn node_fill(status: NodeStatus) -> &'static str {
	match status {
		NodeStatus::Default => "#90a4ae",
		NodeStatus::Visited => "#1f77b4",
		NodeStatus::Current => "#ff7f0e",
		NodeStatus::Start => "#2ca02c",
		NodeStatus::End => "#d62728",
		NodeStatus::Path => "#9467bd",
	}
}

fn edge_stroke(status: EdgeStatus) -> &'static str {
	match status {
		EdgeStatus::Default => "rgba(100, 180, 255, 0.6)",
		EdgeStatus::Path => "#9467bd",
	}
}

pub fn render(graph: &Graph, editor: &EditorState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, editor.width, editor.height);
	draw_edges(graph, ctx);
	draw_draft(graph, editor, ctx);
	draw_nodes(graph, editor, ctx);
}

fn draw_edges(graph: &Graph, ctx: &CanvasRenderingContext2d) {
	for edge in &graph.edges {
		let (Some(a), Some(b)) = (graph.node(&edge.source), graph.node(&edge.target)) else {
			continue;
		};

		let on_path = edge.status == EdgeStatus::Path;
		ctx.set_stroke_style_str(edge_stroke(edge.status));
		ctx.set_line_width(if on_path { 3.5 } else { 1.5 });
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();

		// Weight label on a small backing pill at the midpoint.
		let (mx, my) = midpoint(a.x, a.y, b.x, b.y);
		let label = format!("{}", edge.weight);
		ctx.set_fill_style_str("#1a1a2e");
		ctx.begin_path();
		let _ = ctx.arc(mx, my, 9.0, 0.0, 2.0 * PI);
		ctx.fill();
		ctx.set_fill_style_str(if on_path { "#c5a8e8" } else { "rgba(255, 255, 255, 0.8)" });
		ctx.set_font("11px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&label, mx, my);
	}
}

fn draw_draft(graph: &Graph, editor: &EditorState, ctx: &CanvasRenderingContext2d) {
	if !editor.draft.active {
		return;
	}
	let Some(source) = editor.draft.source.as_deref().and_then(|id| graph.node(id)) else {
		return;
	};

	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.5)");
	ctx.set_line_width(1.5);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(6.0),
		&JsValue::from_f64(4.0),
	));
	ctx.begin_path();
	ctx.move_to(source.x, source.y);
	ctx.line_to(editor.draft.cursor_x, editor.draft.cursor_y);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(graph: &Graph, editor: &EditorState, ctx: &CanvasRenderingContext2d) {
	for node in &graph.nodes {
		let hovered = editor.hover.as_deref() == Some(node.id.as_str());

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_fill(node.status));
		ctx.fill();

		if hovered {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, NODE_RADIUS + 2.5, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		ctx.set_font("12px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&node.label, node.x, node.y);
	}
}
