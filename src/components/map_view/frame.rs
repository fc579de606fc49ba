use std::collections::HashMap;

use super::transform::{Projection, SurfaceSize};
use super::types::Vec2;

/// Tooltip placement relative to the hovered node, in pixels.
pub const TOOLTIP_OFFSET: Vec2 = Vec2::new(15.0, -15.0);

/// Where a node ended up on screen in the last drawn frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenNode {
	pub id: String,
	pub label: Option<String>,
	pub position: Vec2,
	pub hit_radius: f64,
	pub filtered: bool,
}

/// Output of one render pass: the geometry that pointer input is tested
/// against until the next frame replaces it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameLayout {
	pub size: SurfaceSize,
	pub projection: Option<Projection>,
	nodes: Vec<ScreenNode>,
	index: HashMap<String, usize>,
}

/// Data for the hover tooltip overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	/// Hovered waypoint id.
	pub id: String,
	/// Waypoint label, if it has one.
	pub label: Option<String>,
	/// Screen position of the node itself.
	pub node_position: Vec2,
	/// Top-left corner for the overlay.
	pub anchor: Vec2,
	/// Whether the waypoint matches the active filter.
	pub filtered: bool,
}

impl FrameLayout {
	pub fn new(size: SurfaceSize, projection: Option<Projection>) -> Self {
		Self {
			size,
			projection,
			..Self::default()
		}
	}

	/// Records a drawn node. The first entry wins if an id repeats.
	pub fn push(&mut self, node: ScreenNode) {
		let slot = self.nodes.len();
		self.index.entry(node.id.clone()).or_insert(slot);
		self.nodes.push(node);
	}

	/// Nodes in snapshot order.
	pub fn nodes(&self) -> &[ScreenNode] {
		&self.nodes
	}

	pub fn get(&self, id: &str) -> Option<&ScreenNode> {
		self.index.get(id).and_then(|&slot| self.nodes.get(slot))
	}

	pub fn tooltip(&self, hovered: Option<&str>) -> Option<Tooltip> {
		let node = self.get(hovered?)?;
		Some(Tooltip {
			id: node.id.clone(),
			label: node.label.clone(),
			node_position: node.position,
			anchor: node.position + TOOLTIP_OFFSET,
			filtered: node.filtered,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn screen_node(id: &str, x: f64, label: Option<&str>) -> ScreenNode {
		ScreenNode {
			id: id.into(),
			label: label.map(Into::into),
			position: Vec2::new(x, 40.0),
			hit_radius: 5.0,
			filtered: x > 50.0,
		}
	}

	#[test]
	fn tooltip_reports_hovered_node() {
		let mut frame = FrameLayout::default();
		frame.push(screen_node("A", 10.0, Some("dock")));
		frame.push(screen_node("B", 90.0, None));

		let tooltip = frame.tooltip(Some("A")).unwrap();
		assert_eq!(tooltip.label.as_deref(), Some("dock"));
		assert_eq!(tooltip.anchor, Vec2::new(25.0, 25.0));
		assert!(!tooltip.filtered);

		assert!(frame.tooltip(Some("B")).unwrap().filtered);
		assert_eq!(frame.tooltip(None), None);
		assert_eq!(frame.tooltip(Some("missing")), None);
	}

	#[test]
	fn repeated_ids_resolve_to_first_entry() {
		let mut frame = FrameLayout::default();
		frame.push(screen_node("A", 10.0, Some("first")));
		frame.push(screen_node("A", 20.0, Some("second")));
		assert_eq!(frame.nodes().len(), 2);
		assert_eq!(frame.get("A").unwrap().label.as_deref(), Some("first"));
	}
}
