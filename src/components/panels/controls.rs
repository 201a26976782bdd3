use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::components::dijkstra_graph::{Graph, NodeStatus, RunResult, run};

/// Milliseconds between automatic steps during playback.
const PLAYBACK_INTERVAL_MS: i32 = 700;

fn clear_timer(interval_id: &Cell<Option<i32>>) {
	if let Some(handle) = interval_id.take() {
		if let Some(window) = web_sys::window() {
			window.clear_interval_with_handle(handle);
		}
	}
}

/// Start/end marks are a projection of the two selections onto the editor
/// graph; everything else resets to default.
fn apply_endpoint_marks(graph: &mut Graph, start: Option<&str>, end: Option<&str>) {
	graph.clear_statuses();
	if let Some(id) = start {
		if let Some(node) = graph.node_mut(id) {
			node.status = NodeStatus::Start;
		}
	}
	if let Some(id) = end {
		if let Some(node) = graph.node_mut(id) {
			node.status = NodeStatus::End;
		}
	}
}

/// Start/end selection plus run/step/playback controls for the timeline.
#[component]
pub fn ControlPanel(
	graph: RwSignal<Graph>,
	start_id: RwSignal<Option<String>>,
	end_id: RwSignal<Option<String>>,
	result: RwSignal<Option<RunResult>>,
	step_index: RwSignal<usize>,
) -> impl IntoView {
	let playing = RwSignal::new(false);
	let interval_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	// Stops playback and drops any loaded timeline; cloned into every
	// handler that invalidates a run.
	let stop_and_clear = {
		let interval_id = interval_id.clone();
		move || {
			clear_timer(&interval_id);
			playing.set(false);
			result.set(None);
			step_index.set(0);
		}
	};

	let validation = Memo::new(move |_| match (start_id.get(), end_id.get()) {
		(Some(s), Some(e)) if s != e => None,
		_ => Some("Pick two distinct nodes to run the algorithm."),
	});

	let stop_start = stop_and_clear.clone();
	let on_start_change = move |ev| {
		let value = event_target_value(&ev);
		let id = (!value.is_empty()).then_some(value);
		start_id.set(id.clone());
		graph.update(|g| {
			apply_endpoint_marks(g, id.as_deref(), end_id.get_untracked().as_deref());
		});
		stop_start();
	};

	let stop_end = stop_and_clear.clone();
	let on_end_change = move |ev| {
		let value = event_target_value(&ev);
		let id = (!value.is_empty()).then_some(value);
		end_id.set(id.clone());
		graph.update(|g| {
			apply_endpoint_marks(g, start_id.get_untracked().as_deref(), id.as_deref());
		});
		stop_end();
	};

	let on_run = move |_| {
		let (Some(s), Some(e)) = (start_id.get_untracked(), end_id.get_untracked()) else {
			return;
		};
		if s == e {
			return;
		}
		match run(&graph.get_untracked(), &s, &e) {
			Ok(outcome) => {
				log::info!(
					"run finished in {} steps, path {:?}",
					outcome.steps.len(),
					outcome.shortest_path
				);
				step_index.set(0);
				result.set(Some(outcome));
			}
			// Unreachable through the dropdowns; logged rather than shown.
			Err(err) => log::warn!("shortest-path run rejected: {err}"),
		}
	};

	let on_back = move |_| step_index.update(|i| *i = i.saturating_sub(1));
	let on_forward = move |_| {
		let last = result.with_untracked(|r| r.as_ref().map(|r| r.steps.len().saturating_sub(1)));
		if let Some(last) = last {
			step_index.update(|i| *i = (*i + 1).min(last));
		}
	};

	let (interval_play, tick_play) = (interval_id.clone(), tick.clone());
	let on_play = move |_| {
		if playing.get_untracked() {
			clear_timer(&interval_play);
			playing.set(false);
			return;
		}
		let last = result.with_untracked(|r| r.as_ref().map(|r| r.steps.len().saturating_sub(1)));
		let Some(last) = last else {
			return;
		};
		if step_index.get_untracked() >= last {
			step_index.set(0);
		}

		let interval_tick = interval_play.clone();
		let cb: Closure<dyn FnMut()> = Closure::new(move || {
			let last =
				result.with_untracked(|r| r.as_ref().map(|r| r.steps.len().saturating_sub(1)));
			match last {
				Some(last) if step_index.get_untracked() < last => {
					step_index.update(|i| *i += 1);
					if step_index.get_untracked() >= last {
						clear_timer(&interval_tick);
						playing.set(false);
					}
				}
				_ => {
					clear_timer(&interval_tick);
					playing.set(false);
				}
			}
		});
		let window = web_sys::window().unwrap();
		if let Ok(handle) = window.set_interval_with_callback_and_timeout_and_arguments_0(
			cb.as_ref().unchecked_ref(),
			PLAYBACK_INTERVAL_MS,
		) {
			interval_play.set(Some(handle));
			playing.set(true);
			// A replaced closure's interval is already cleared, so it
			// never fires again.
			*tick_play.borrow_mut() = Some(cb);
		}
	};

	let stop_reset = stop_and_clear.clone();
	let on_reset = move |_| stop_reset();

	view! {
		<div class="control-panel">
			<h2>"Algorithm"</h2>
			<label>
				"Start node"
				<select
					on:change=on_start_change
					prop:value=move || start_id.get().unwrap_or_default()
				>
					<option value="">"—"</option>
					{move || {
						graph
							.get()
							.nodes
							.into_iter()
							.map(|n| view! { <option value=n.id>{n.label}</option> })
							.collect_view()
					}}
				</select>
			</label>
			<label>
				"End node"
				<select on:change=on_end_change prop:value=move || end_id.get().unwrap_or_default()>
					<option value="">"—"</option>
					{move || {
						graph
							.get()
							.nodes
							.into_iter()
							.map(|n| view! { <option value=n.id>{n.label}</option> })
							.collect_view()
					}}
				</select>
			</label>
			{move || validation.get().map(|msg| view! { <p class="hint">{msg}</p> })}
			<div class="buttons">
				<button on:click=on_run disabled=move || validation.get().is_some()>
					"Run"
				</button>
				<button
					on:click=on_back
					disabled=move || result.get().is_none() || step_index.get() == 0
				>
					"◀ Step"
				</button>
				<button
					on:click=on_forward
					disabled=move || {
						result
							.get()
							.map(|r| step_index.get() + 1 >= r.steps.len())
							.unwrap_or(true)
					}
				>
					"Step ▶"
				</button>
				<button on:click=on_play disabled=move || result.get().is_none()>
					{move || if playing.get() { "Pause" } else { "Play" }}
				</button>
				<button on:click=on_reset disabled=move || result.get().is_none()>
					"Reset"
				</button>
			</div>
			{move || {
				result
					.get()
					.map(|r| {
						view! {
							<p class="step-counter">
								{format!("Step {} / {}", step_index.get() + 1, r.steps.len())}
							</p>
						}
					})
			}}
		</div>
	}
}
