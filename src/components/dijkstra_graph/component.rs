use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{self, DEFAULT_WEIGHT, EditorState};
use super::types::Graph;

/// The graph editor canvas.
///
/// `graph` is the editable model; `display` is what actually gets drawn (the
/// active algorithm snapshot while a run is loaded, the editor graph
/// otherwise). While `locked`, structural edits are ignored so a loaded
/// timeline stays consistent; `on_edit` fires on every structural change so
/// the page can drop a stale run.
#[component]
pub fn DijkstraCanvas(
	graph: RwSignal<Graph>,
	#[prop(into)] display: Signal<Graph>,
	#[prop(into)] locked: Signal<bool>,
	on_edit: Callback<()>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let editor: Rc<RefCell<Option<EditorState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (editor_init, animate_init) = (editor.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = (
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0)
			}),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*editor_init.borrow_mut() = Some(EditorState::new(w, h));

		let (editor_anim, animate_inner) = (editor_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref editor) = *editor_anim.borrow() {
				render::render(&display.get_untracked(), editor, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let cursor = move |ev: &MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	};

	let editor_md = editor.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 || locked.get_untracked() {
			return;
		}
		let (x, y) = cursor(&ev);
		if let Some(ref mut editor) = *editor_md.borrow_mut() {
			let hit = state::node_at_position(&graph.get_untracked(), x, y);
			match hit {
				Some(id) if ev.shift_key() => {
					editor.draft.active = true;
					editor.draft.source = Some(id);
					editor.draft.cursor_x = x;
					editor.draft.cursor_y = y;
				}
				Some(id) => {
					let (nx, ny) = graph
						.with_untracked(|g| g.node(&id).map(|n| (n.x, n.y)))
						.unwrap_or((x, y));
					editor.drag.active = true;
					editor.drag.node_id = Some(id);
					editor.drag.start_x = x;
					editor.drag.start_y = y;
					editor.drag.node_start_x = nx;
					editor.drag.node_start_y = ny;
				}
				None => {
					graph.update(|g| {
						g.add_node(x, y);
					});
					on_edit.run(());
				}
			}
		}
	};

	let editor_mm = editor.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = cursor(&ev);
		if let Some(ref mut editor) = *editor_mm.borrow_mut() {
			if !editor.drag.active {
				editor.hover = state::node_at_position(&graph.get_untracked(), x, y);
			}

			if editor.drag.active {
				if let Some(id) = editor.drag.node_id.clone() {
					let (nx, ny) = (
						editor.drag.node_start_x + (x - editor.drag.start_x),
						editor.drag.node_start_y + (y - editor.drag.start_y),
					);
					graph.update(|g| {
						if let Some(node) = g.node_mut(&id) {
							node.x = nx;
							node.y = ny;
						}
					});
				}
			} else if editor.draft.active {
				editor.draft.cursor_x = x;
				editor.draft.cursor_y = y;
			}
		}
	};

	let editor_mu = editor.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let (x, y) = cursor(&ev);
		if let Some(ref mut editor) = *editor_mu.borrow_mut() {
			if editor.draft.active {
				if let Some(source) = editor.draft.source.clone() {
					if let Some(target) = state::node_at_position(&graph.get_untracked(), x, y) {
						let mut added = None;
						graph.update(|g| {
							added = g.add_edge(&source, &target, DEFAULT_WEIGHT);
						});
						if added.is_some() {
							on_edit.run(());
						}
					}
				}
			}
			editor.drag = Default::default();
			editor.draft = Default::default();
		}
	};

	let editor_ml = editor.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut editor) = *editor_ml.borrow_mut() {
			editor.cancel_interactions();
		}
	};

	let on_wheel = move |ev: WheelEvent| {
		if locked.get_untracked() {
			return;
		}
		let (x, y) = cursor(&ev);
		if let Some(id) = graph.with_untracked(|g| state::edge_at_position(g, x, y)) {
			ev.prevent_default();
			let delta = if ev.delta_y() < 0.0 { 1.0 } else { -1.0 };
			graph.update(|g| {
				if let Some(edge) = g.edge_mut(&id) {
					edge.weight = (edge.weight + delta).max(1.0);
				}
			});
			on_edit.run(());
		}
	};

	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		if locked.get_untracked() {
			return;
		}
		let (x, y) = cursor(&ev);
		let hit_node = graph.with_untracked(|g| state::node_at_position(g, x, y));
		if let Some(id) = hit_node {
			graph.update(|g| g.remove_node(&id));
			on_edit.run(());
			return;
		}
		if let Some(id) = graph.with_untracked(|g| state::edge_at_position(g, x, y)) {
			graph.update(|g| g.remove_edge(&id));
			on_edit.run(());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="dijkstra-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:contextmenu=on_contextmenu
			style="display: block; cursor: crosshair;"
		/>
	}
}
