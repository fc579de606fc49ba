use super::frame::{FrameLayout, ScreenNode};
use super::types::Vec2;

/// Nearest node whose hit circle contains `pointer`, compared in screen space.
///
/// Equal distances resolve to the node drawn first.
pub fn node_at(frame: &FrameLayout, pointer: Vec2) -> Option<&ScreenNode> {
	if !pointer.is_finite() {
		return None;
	}
	frame
		.nodes()
		.iter()
		.filter_map(|node| {
			let distance = node.position.distance(pointer);
			(distance <= node.hit_radius).then_some((node, distance))
		})
		.fold(None, |best: Option<(&ScreenNode, f64)>, candidate| match best {
			Some((_, best_distance)) if best_distance <= candidate.1 => best,
			_ => Some(candidate),
		})
		.map(|(node, _)| node)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::map_view::transform::SurfaceSize;

	fn frame(nodes: &[(&str, f64, f64)]) -> FrameLayout {
		let mut frame = FrameLayout::new(SurfaceSize::new(100.0, 100.0), None);
		for (id, x, y) in nodes {
			frame.push(ScreenNode {
				id: (*id).into(),
				label: None,
				position: Vec2::new(*x, *y),
				hit_radius: 5.0,
				filtered: false,
			});
		}
		frame
	}

	fn hit_id(frame: &FrameLayout, x: f64, y: f64) -> Option<&str> {
		node_at(frame, Vec2::new(x, y)).map(|node| node.id.as_str())
	}

	#[test]
	fn radius_boundary_is_inclusive() {
		let frame = frame(&[("A", 10.0, 10.0)]);
		assert_eq!(hit_id(&frame, 15.0, 10.0), Some("A"));
		assert_eq!(hit_id(&frame, 15.01, 10.0), None);
		assert_eq!(hit_id(&frame, 13.0, 14.0), Some("A"));
	}

	#[test]
	fn overlapping_circles_return_nearest() {
		let frame = frame(&[("A", 10.0, 10.0), ("B", 16.0, 10.0)]);
		assert_eq!(hit_id(&frame, 12.0, 10.0), Some("A"));
		assert_eq!(hit_id(&frame, 14.0, 10.0), Some("B"));
	}

	#[test]
	fn ties_go_to_first_drawn() {
		let frame = frame(&[("A", 10.0, 10.0), ("B", 16.0, 10.0)]);
		assert_eq!(hit_id(&frame, 13.0, 10.0), Some("A"));
	}

	#[test]
	fn misses_and_bad_input_return_none() {
		let frame = frame(&[("A", 10.0, 10.0)]);
		assert_eq!(hit_id(&frame, 80.0, 80.0), None);
		assert_eq!(hit_id(&frame, f64::NAN, 10.0), None);
		assert_eq!(hit_id(&FrameLayout::default(), 10.0, 10.0), None);
	}
}
