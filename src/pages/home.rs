use std::collections::HashSet;

use leptos::prelude::*;

use crate::components::map_view::{Edge, GraphSnapshot, MapCanvas, MapViewHandle, Marker, Node};

const TAGS: &[&str] = &["cup", "chair", "door", "plant", "extinguisher"];

/// Generate a sample waypoint map: a jittered grid walked as a chain, with a
/// few shortcut edges and standalone markers.
fn generate_sample_map(n: usize) -> GraphSnapshot {
	let nodes: Vec<Node> = (0..n)
		.map(|i| {
			let (col, row) = ((i % 8) as f64, (i / 8) as f64);
			let jitter = rand_simple(i) - 0.5;
			Node {
				id: format!("wp-{i}"),
				position: Some(vec![col * 2.0 + jitter, row * 2.0 - jitter, 0.0]),
				label: (i % 6 == 0).then(|| format!("Waypoint {i}")),
				tags: Some(vec![
					TAGS[i % TAGS.len()].to_string(),
					TAGS[(i * 7 / 3) % TAGS.len()].to_string(),
				]),
			}
		})
		.collect();

	let link = |from: usize, to: usize| Edge {
		from_id: nodes[from].id.clone(),
		to_id: nodes[to].id.clone(),
		from_position: nodes[from].position.clone(),
		to_position: nodes[to].position.clone(),
	};
	let chain = (1..n).map(|i| link(i - 1, i));
	let shortcuts = (1..n)
		.step_by(5)
		.map(|i| link(i, (rand_simple(i + n) * i as f64) as usize));
	let edges: Vec<Edge> = chain.chain(shortcuts).collect();

	let markers = (0..n / 10)
		.map(|i| Marker {
			id: format!("fiducial_{i}"),
			position: Some(vec![
				rand_simple(i * 3) * 14.0,
				rand_simple(i * 3 + 1) * (n / 8) as f64 * 2.0,
				0.0,
			]),
		})
		.collect();

	GraphSnapshot {
		nodes,
		edges,
		markers: Some(markers),
	}
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Map page with a minimal tag filter and label toggle beside the canvas.
#[component]
pub fn Home() -> impl IntoView {
	let snapshot = RwSignal::new(generate_sample_map(48));
	let selected = RwSignal::new(None::<String>);
	let filter_tags = RwSignal::new(HashSet::<String>::new());
	let show_labels = RwSignal::new(true);
	let handle = MapViewHandle::new();

	let toggle_tag = move |tag: &'static str| {
		let mut next = filter_tags.get_untracked();
		if !next.remove(tag) {
			next.insert(tag.to_string());
		}
		filter_tags.set(next);
	};

	view! {
		<div class="map-page">
			<aside class="map-sidebar">
				<h2>"Filter by Object"</h2>
				<ul class="object-list">
					{TAGS
						.iter()
						.copied()
						.map(|tag| {
							view! {
								<li>
									<label>
										<input
											type="checkbox"
											prop:checked=move || filter_tags.with(|tags| tags.contains(tag))
											on:change=move |_| toggle_tag(tag)
										/>
										{tag}
									</label>
								</li>
							}
						})
						.collect_view()}
				</ul>
				<button on:click=move |_| filter_tags.set(HashSet::new())>"Clear All"</button>

				<label>
					<input
						type="checkbox"
						prop:checked=move || show_labels.get()
						on:change=move |_| show_labels.update(|show| *show = !*show)
					/>
					"Show labels"
				</label>

				<p class="selection">
					{move || {
						selected
							.get()
							.map(|id| format!("Selected: {id}"))
							.unwrap_or_else(|| "No waypoint selected".into())
					}}
				</p>
			</aside>

			<div class="map-container">
				<MapCanvas
					snapshot=snapshot
					selected=selected
					filter_tags=filter_tags
					on_node_select=move |id: String| selected.set(Some(id))
					show_labels=show_labels
					handle=handle
				/>
			</div>
		</div>
	}
}
