use leptos::prelude::*;

use crate::components::dijkstra_graph::{NodeStatus, RunResult, Step};

fn fmt_distance(distance: f64) -> String {
	if distance.is_finite() {
		format!("{}", distance)
	} else {
		"∞".to_string()
	}
}

fn row_class(status: NodeStatus) -> &'static str {
	match status {
		NodeStatus::Default => "",
		NodeStatus::Visited => "visited",
		NodeStatus::Current => "current",
		NodeStatus::Start => "start",
		NodeStatus::End => "end",
		NodeStatus::Path => "path",
	}
}

/// Final answer for the terminal step, progress hint otherwise. A missing
/// path is an informational outcome, not a fault.
fn summary(step: &Step, result: &RunResult) -> impl IntoView + use<> {
	if !step.is_done {
		let processing = step
			.current_node
			.as_deref()
			.map(|id| step.graph.label_of(id))
			.unwrap_or_default();
		return view! { <p class="hint">{format!("Next to process: {}", processing)}</p> }
			.into_any();
	}
	if !result.success {
		return view! { <p class="result">"No path exists between the chosen nodes."</p> }
			.into_any();
	}

	let labels: Vec<String> = step
		.shortest_path
		.as_deref()
		.unwrap_or_default()
		.iter()
		.map(|id| step.graph.label_of(id))
		.collect();
	let distance = result.shortest_distance.unwrap_or(f64::INFINITY);
	view! {
		<p class="result">
			{format!(
				"Shortest path: {} (distance {})",
				labels.join(" → "),
				fmt_distance(distance),
			)}
		</p>
	}
	.into_any()
}

/// Distance table for the displayed step, plus the final answer once the
/// algorithm has finished.
#[component]
pub fn InfoPanel(
	#[prop(into)] step: Signal<Option<Step>>,
	result: RwSignal<Option<RunResult>>,
) -> impl IntoView {
	view! {
		<div class="info-panel">
			<h2>"Distances"</h2>
			{move || match (step.get(), result.get()) {
				(Some(step), Some(result)) => {
					let rows = step
						.graph
						.nodes
						.iter()
						.map(|node| {
							let distance = fmt_distance(
								step.distances.get(&node.id).copied().unwrap_or(f64::INFINITY),
							);
							let predecessor = step
								.previous
								.get(&node.id)
								.map(|p| step.graph.label_of(p))
								.unwrap_or_else(|| "–".to_string());
							view! {
								<tr class=row_class(node.status)>
									<td>{node.label.clone()}</td>
									<td>{distance}</td>
									<td>{predecessor}</td>
								</tr>
							}
						})
						.collect_view();
					view! {
						<div class="distance-table">
							<table>
								<thead>
									<tr>
										<th>"Node"</th>
										<th>"Distance"</th>
										<th>"Previous"</th>
									</tr>
								</thead>
								<tbody>{rows}</tbody>
							</table>
							{summary(&step, &result)}
						</div>
					}
					.into_any()
				}
				_ => {
					view! { <p class="hint">"Run the algorithm to see the distance table."</p> }
						.into_any()
				}
			}}
		</div>
	}
}
