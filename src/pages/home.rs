use leptos::prelude::*;

use crate::components::dijkstra_graph::{DijkstraCanvas, Graph, RunResult};
use crate::components::panels::{ControlPanel, InfoPanel};

/// The worked example the editor starts with: five nodes A–E and seven
/// weighted edges. The shortest A→E route is A→D→C→E at distance 10.
fn sample_graph() -> Graph {
	let mut graph = Graph::default();
	let a = graph.add_node(160.0, 150.0);
	let b = graph.add_node(400.0, 90.0);
	let c = graph.add_node(620.0, 210.0);
	let d = graph.add_node(330.0, 330.0);
	let e = graph.add_node(560.0, 440.0);
	graph.add_edge(&a, &b, 4.0);
	graph.add_edge(&a, &d, 3.0);
	graph.add_edge(&b, &c, 5.0);
	graph.add_edge(&b, &d, 2.0);
	graph.add_edge(&c, &d, 1.0);
	graph.add_edge(&c, &e, 6.0);
	graph.add_edge(&d, &e, 8.0);
	graph
}

/// Default Home Page: the editor canvas plus the control and info panels.
#[component]
pub fn Home() -> impl IntoView {
	let graph = RwSignal::new(sample_graph());
	let result: RwSignal<Option<RunResult>> = RwSignal::new(None);
	let step_index = RwSignal::new(0usize);
	let start_id: RwSignal<Option<String>> = RwSignal::new(None);
	let end_id: RwSignal<Option<String>> = RwSignal::new(None);

	// The snapshot currently shown, when a timeline is loaded.
	let current_step = Signal::derive(move || {
		result.with(|r| {
			r.as_ref()
				.and_then(|r| r.steps.get(step_index.get()).cloned())
		})
	});
	// The canvas draws the snapshot's graph copy during a run, the editable
	// graph otherwise.
	let display = Signal::derive(move || match current_step.get() {
		Some(step) => step.graph,
		None => graph.get(),
	});
	let locked = Signal::derive(move || result.with(|r| r.is_some()));

	let on_edit = Callback::new(move |()| {
		result.set(None);
		step_index.set(0);
		// A deleted node may have been one of the chosen endpoints.
		let exists = |id: Option<String>| {
			id.as_deref()
				.is_some_and(|id| graph.with_untracked(|g| g.contains_node(id)))
		};
		if !exists(start_id.get_untracked()) {
			start_id.set(None);
		}
		if !exists(end_id.get_untracked()) {
			end_id.set(None);
		}
	});

	view! {
		<div class="app-layout">
			<div class="canvas-pane">
				<DijkstraCanvas graph=graph display=display locked=locked on_edit=on_edit />
				<div class="graph-overlay">
					<h1>"Dijkstra Playground"</h1>
					<p class="subtitle">
						"Click to add nodes. Drag to move. Shift-drag between two nodes to connect them. Scroll over an edge to change its weight. Right-click deletes."
					</p>
				</div>
			</div>
			<aside class="side-pane">
				<ControlPanel graph start_id end_id result step_index />
				<InfoPanel step=current_step result=result />
			</aside>
		</div>
	}
}
