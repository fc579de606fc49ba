use std::collections::HashSet;
use std::f64::consts::TAU;

use super::bounds::Bounds;
use super::filter::FilterMatch;
use super::frame::{FrameLayout, ScreenNode};
use super::state::{SelectionState, Viewport};
use super::style::MapStyle;
use super::surface::{DrawError, RasterSurface};
use super::transform::{Projection, SurfaceSize};
use super::types::{Edge, GraphSnapshot, Marker, Node, Vec2};

/// Everything one frame depends on.
pub struct FrameInput<'a> {
	pub snapshot: &'a GraphSnapshot,
	pub viewport: Viewport,
	pub selection: &'a SelectionState,
	pub size: SurfaceSize,
	pub show_labels: bool,
	pub style: &'a MapStyle,
	/// Wall-clock time in milliseconds, drives the hover pulse.
	pub time_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Highlight {
	Normal,
	Filtered,
	Selected,
}

/// Draws a full frame and returns the node geometry it produced.
pub fn render<S: RasterSurface>(surface: &mut S, input: &FrameInput) -> FrameLayout {
	let FrameInput {
		snapshot,
		viewport,
		selection,
		size,
		style,
		..
	} = *input;

	surface.resize(size);
	surface.clear();

	let bounds = Bounds::of_nodes(&snapshot.nodes);
	let projection = Projection::new(&bounds, &viewport, size, style.fit_margin);
	let filter = FilterMatch::compute(&snapshot.nodes, &snapshot.edges, &selection.filter_tags);
	let screens: Vec<Option<Vec2>> = snapshot
		.nodes
		.iter()
		.map(|node| node.world_position().map(|p| projection.world_to_screen(p)))
		.collect();
	let highlights: Vec<Highlight> = snapshot
		.nodes
		.iter()
		.map(|node| highlight_of(node, selection, &filter))
		.collect();

	let mut skipped = 0usize;
	let mut contain = |result: Result<(), DrawError>| {
		if let Err(err) = result {
			skipped += 1;
			log::warn!("skipping map item: {err}");
		}
	};

	let node_ids: HashSet<&str> = snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
	for highlighted in [false, true] {
		for (i, edge) in snapshot.edges.iter().enumerate() {
			if filter.is_edge_highlighted(i) == highlighted {
				contain(draw_edge(surface, edge, &node_ids, &projection, highlighted, style));
			}
		}
	}

	let hovered = selection.hovered.as_deref();
	for pass in [Highlight::Normal, Highlight::Filtered, Highlight::Selected] {
		for ((node, screen), highlight) in snapshot.nodes.iter().zip(&screens).zip(&highlights) {
			if *highlight != pass {
				continue;
			}
			let is_hovered = hovered == Some(node.id.as_str());
			contain(screen_position(node, *screen).and_then(|at| match pass {
				Highlight::Normal => draw_plain_node(surface, at, is_hovered, style),
				Highlight::Filtered => {
					draw_filtered_node(surface, at, is_hovered, input.time_ms, style)
				}
				Highlight::Selected => draw_selected_node(surface, at, style),
			}));
		}
	}

	for marker in snapshot.markers() {
		contain(draw_marker(surface, marker, &projection, style));
	}

	if input.show_labels && viewport.scale > style.label_min_scale {
		for ((node, screen), highlight) in snapshot.nodes.iter().zip(&screens).zip(&highlights) {
			if let (Some(label), Some(at)) = (node.label.as_deref(), screen) {
				contain(draw_node_label(surface, label, *at, *highlight, style));
			}
		}
		for marker in snapshot.markers() {
			if let Some(at) = marker.world_position() {
				contain(draw_marker_label(surface, &marker.id, projection.world_to_screen(at), style));
			}
		}
	}

	let mut frame = FrameLayout::new(size, Some(projection));
	for (node, screen) in snapshot.nodes.iter().zip(&screens) {
		if let Some(position) = screen {
			frame.push(ScreenNode {
				id: node.id.clone(),
				label: node.label.clone(),
				position: *position,
				hit_radius: style.hit_radius,
				filtered: filter.contains_node(&node.id),
			});
		}
	}

	log::debug!(
		"drew {} waypoints, {} edges, {} markers at scale {:.2} ({} skipped)",
		frame.nodes().len(),
		snapshot.edges.len(),
		snapshot.markers().len(),
		viewport.scale,
		skipped
	);
	frame
}

/// Highest-priority state for `node`: selected beats filtered beats normal.
fn highlight_of(node: &Node, selection: &SelectionState, filter: &FilterMatch) -> Highlight {
	if selection.selected.as_deref() == Some(node.id.as_str()) {
		Highlight::Selected
	} else if filter.contains_node(&node.id) {
		Highlight::Filtered
	} else {
		Highlight::Normal
	}
}

fn screen_position(node: &Node, screen: Option<Vec2>) -> Result<Vec2, DrawError> {
	screen.ok_or_else(|| DrawError::MissingPosition {
		kind: "waypoint",
		id: node.id.clone(),
	})
}

fn draw_edge<S: RasterSurface>(
	surface: &mut S,
	edge: &Edge,
	node_ids: &HashSet<&str>,
	projection: &Projection,
	highlighted: bool,
	style: &MapStyle,
) -> Result<(), DrawError> {
	if !node_ids.contains(edge.from_id.as_str()) || !node_ids.contains(edge.to_id.as_str()) {
		return Err(DrawError::DanglingEdge {
			from: edge.from_id.clone(),
			to: edge.to_id.clone(),
		});
	}
	let (from, to) = edge.endpoints().ok_or_else(|| DrawError::MissingPosition {
		kind: "edge",
		id: format!("{} -> {}", edge.from_id, edge.to_id),
	})?;

	surface.begin_path();
	surface.move_to(projection.world_to_screen(from));
	surface.line_to(projection.world_to_screen(to));
	if highlighted {
		surface.stroke(style.edge_highlight, style.edge_highlight_width);
	} else {
		surface.stroke(style.edge, style.edge_width);
	}
	Ok(())
}

fn draw_plain_node<S: RasterSurface>(
	surface: &mut S,
	at: Vec2,
	hovered: bool,
	style: &MapStyle,
) -> Result<(), DrawError> {
	let (fill, stroke) = if hovered {
		(style.node_hover_fill, style.node_hover_stroke)
	} else {
		(style.node_fill, style.node_stroke)
	};
	surface.begin_path();
	surface.arc(at, style.node_radius)?;
	surface.fill(fill);
	surface.stroke(stroke, 1.0);
	Ok(())
}

fn draw_filtered_node<S: RasterSurface>(
	surface: &mut S,
	at: Vec2,
	hovered: bool,
	time_ms: f64,
	style: &MapStyle,
) -> Result<(), DrawError> {
	let r = style.node_radius;
	surface.radial_glow(
		at,
		r * 0.5,
		r * 3.0,
		&[(0.0, style.filter_glow), (1.0, "rgba(0, 200, 0, 0)")],
	)?;

	surface.begin_path();
	surface.arc(at, r)?;
	surface.fill(style.filter_fill);
	surface.stroke(style.filter_stroke, 1.5);

	if hovered {
		surface.begin_path();
		surface.arc(at, pulse_radius(r, time_ms, style.pulse_period_ms))?;
		surface.stroke(style.filter_stroke, 1.5);
	}
	Ok(())
}

/// Ring radius for the hover pulse, oscillating between `r + 3` and `r + 9`.
///
/// `time_ms` is sampled per frame and nothing schedules frames for the pulse,
/// so the ring only moves when a state change redraws the map.
pub fn pulse_radius(r: f64, time_ms: f64, period_ms: f64) -> f64 {
	let phase = if period_ms > 0.0 {
		(time_ms / period_ms * TAU).sin()
	} else {
		0.0
	};
	r + 6.0 + 3.0 * phase
}

fn draw_selected_node<S: RasterSurface>(
	surface: &mut S,
	at: Vec2,
	style: &MapStyle,
) -> Result<(), DrawError> {
	surface.begin_path();
	surface.arc(at, style.node_radius * 2.4)?;
	surface.fill(style.selected_halo);

	surface.begin_path();
	surface.arc(at, style.node_radius)?;
	surface.fill(style.selected_fill);
	surface.stroke(style.selected_stroke, 2.0);
	Ok(())
}

fn draw_marker<S: RasterSurface>(
	surface: &mut S,
	marker: &Marker,
	projection: &Projection,
	style: &MapStyle,
) -> Result<(), DrawError> {
	let world = marker.world_position().ok_or_else(|| DrawError::MissingPosition {
		kind: "marker",
		id: marker.id.clone(),
	})?;
	let at = projection.world_to_screen(world);
	let half = style.marker_half_size;

	surface.begin_path();
	surface.rect(at - Vec2::new(half, half), half * 2.0, half * 2.0);
	surface.fill(style.marker_fill);
	surface.stroke(style.marker_stroke, 1.0);
	Ok(())
}

fn draw_node_label<S: RasterSurface>(
	surface: &mut S,
	label: &str,
	at: Vec2,
	highlight: Highlight,
	style: &MapStyle,
) -> Result<(), DrawError> {
	let colour = match highlight {
		Highlight::Selected => style.selected_label,
		Highlight::Filtered => style.filter_label,
		Highlight::Normal => style.label,
	};
	surface.fill_text(
		label,
		at - Vec2::new(0.0, style.node_radius + 3.0),
		style.label_font,
		colour,
	)
}

fn draw_marker_label<S: RasterSurface>(
	surface: &mut S,
	id: &str,
	at: Vec2,
	style: &MapStyle,
) -> Result<(), DrawError> {
	surface.fill_text(
		id,
		at - Vec2::new(0.0, style.marker_half_size + 2.0),
		style.marker_label_font,
		style.marker_label,
	)
}
