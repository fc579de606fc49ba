//! Interactive 2D waypoint map: fitting, projection, filtering, hit testing,
//! pan/zoom input handling and layered canvas rendering.

pub mod bounds;
mod component;
pub mod filter;
pub mod frame;
pub mod hit;
pub mod render;
pub mod state;
pub mod style;
pub mod surface;
pub mod transform;
mod types;

pub use component::{MapCanvas, MapViewHandle};
pub use frame::Tooltip;
pub use state::Viewport;
pub use style::MapStyle;
pub use types::{Edge, GraphSnapshot, Marker, Node, SnapshotError, Vec2};

#[cfg(test)]
mod tests {
	use super::frame::FrameLayout;
	use super::render::{FrameInput, render};
	use super::state::{PointerEvent, SelectionState, ViewportController};
	use super::surface::{DrawError, RasterSurface};
	use super::transform::SurfaceSize;
	use super::*;

	struct NullSurface;

	impl RasterSurface for NullSurface {
		fn resize(&mut self, _: SurfaceSize) {}
		fn clear(&mut self) {}
		fn begin_path(&mut self) {}
		fn move_to(&mut self, _: Vec2) {}
		fn line_to(&mut self, _: Vec2) {}
		fn arc(&mut self, _: Vec2, _: f64) -> Result<(), DrawError> {
			Ok(())
		}
		fn rect(&mut self, _: Vec2, _: f64, _: f64) {}
		fn fill(&mut self, _: &str) {}
		fn stroke(&mut self, _: &str, _: f64) {}
		fn radial_glow(&mut self, _: Vec2, _: f64, _: f64, _: &[(f64, &str)]) -> Result<(), DrawError> {
			Ok(())
		}
		fn fill_text(&mut self, _: &str, _: Vec2, _: &str, _: &str) -> Result<(), DrawError> {
			Ok(())
		}
	}

	fn two_node_map() -> GraphSnapshot {
		GraphSnapshot::from_json(
			r#"{
				"waypoints": [
					{"id": "A", "position": [0, 0], "label": "start"},
					{"id": "B", "position": [10, 0], "objects": ["cup"]}
				],
				"edges": [
					{"from_id": "A", "to_id": "B", "from_position": [0, 0], "to_position": [10, 0]}
				]
			}"#,
		)
		.unwrap()
	}

	fn draw(snapshot: &GraphSnapshot, controller: &ViewportController, selection: &SelectionState) -> FrameLayout {
		render(
			&mut NullSurface,
			&FrameInput {
				snapshot,
				viewport: controller.viewport(),
				selection,
				size: SurfaceSize::new(200.0, 200.0),
				show_labels: true,
				style: &MapStyle::default(),
				time_ms: 0.0,
			},
		)
	}

	#[test]
	fn click_on_drawn_node_selects_it() {
		let snapshot = two_node_map();
		let mut controller = ViewportController::default();
		let frame = draw(&snapshot, &controller, &SelectionState::default());
		let b = frame.get("B").unwrap().position;

		controller.handle(PointerEvent::Move(b + Vec2::new(2.0, 1.0)), &frame);
		assert_eq!(controller.hovered(), Some("B"));

		let tooltip = frame.tooltip(controller.hovered()).unwrap();
		assert!(!tooltip.filtered);
		assert_eq!(tooltip.node_position, b);

		controller.handle(PointerEvent::Down(b), &frame);
		let clicked = controller.handle(PointerEvent::Up(b + Vec2::new(1.0, 1.0)), &frame);
		assert_eq!(clicked.as_deref(), Some("B"));
	}

	#[test]
	fn hit_testing_follows_current_zoom() {
		let snapshot = two_node_map();
		let mut controller = ViewportController::default();
		let before = draw(&snapshot, &controller, &SelectionState::default());
		let old_b = before.get("B").unwrap().position;

		for _ in 0..5 {
			controller.zoom_in();
		}
		let after = draw(&snapshot, &controller, &SelectionState::default());
		let new_b = after.get("B").unwrap().position;
		assert!(old_b.distance(new_b) > 5.0);

		controller.handle(PointerEvent::Move(old_b), &after);
		assert_eq!(controller.hovered(), None);
		controller.handle(PointerEvent::Move(new_b), &after);
		assert_eq!(controller.hovered(), Some("B"));
	}

	#[test]
	fn wheel_zoom_moves_node_out_from_under_still_pointer() {
		let snapshot = two_node_map();
		let mut controller = ViewportController::default();
		let mut frame = draw(&snapshot, &controller, &SelectionState::default());
		let at = frame.get("B").unwrap().position + Vec2::new(4.0, 0.0);

		controller.handle(PointerEvent::Move(at), &frame);
		assert_eq!(controller.hovered(), Some("B"));

		for _ in 0..10 {
			controller.handle(
				PointerEvent::Wheel {
					position: at,
					delta_y: -1.0,
				},
				&frame,
			);
			frame = draw(&snapshot, &controller, &SelectionState::default());
		}
		let b = frame.get("B").unwrap().position;
		assert!(b.distance(at) > frame.get("B").unwrap().hit_radius);

		// Without a refresh the release is still checked against the new frame.
		controller.handle(PointerEvent::Down(at), &frame);
		assert_eq!(controller.handle(PointerEvent::Up(at), &frame), None);

		assert!(controller.refresh_hover(&frame));
		assert_eq!(controller.hovered(), None);
		assert_eq!(frame.tooltip(controller.hovered()), None);
	}

	#[test]
	fn viewport_survives_snapshot_replacement() {
		let mut controller = ViewportController::default();
		let frame = draw(&two_node_map(), &controller, &SelectionState::default());
		controller.handle(PointerEvent::Down(Vec2::new(10.0, 10.0)), &frame);
		controller.handle(PointerEvent::Move(Vec2::new(40.0, 10.0)), &frame);
		controller.handle(PointerEvent::Up(Vec2::new(40.0, 10.0)), &frame);
		let panned = controller.viewport();

		let _ = draw(&GraphSnapshot::default(), &controller, &SelectionState::default());
		assert_eq!(controller.viewport(), panned);
		assert_eq!(panned.offset, Vec2::new(30.0, 0.0));
	}

	#[test]
	fn filter_tags_may_change_between_frames() {
		let snapshot = two_node_map();
		let controller = ViewportController::default();
		let mut selection = SelectionState::default();

		selection.filter_tags = ["cup".to_string()].into();
		let first = draw(&snapshot, &controller, &selection);
		assert!(first.get("B").unwrap().filtered);

		selection.filter_tags = ["chair".to_string()].into();
		let second = draw(&snapshot, &controller, &selection);
		assert!(!second.get("B").unwrap().filtered);
	}
}
