use super::bounds::Bounds;
use super::state::Viewport;
use super::types::Vec2;

/// Pixel size of the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
	pub width: f64,
	pub height: f64,
}

impl SurfaceSize {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn center(&self) -> Vec2 {
		Vec2::new(self.width / 2.0, self.height / 2.0)
	}
}

/// World/screen mapping for one frame.
///
/// Built from the bounds, viewport and surface size of the frame being drawn;
/// never reuse one across a resize or a snapshot change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
	pub base_scale: f64,
	pub effective_scale: f64,
	/// World point drawn at `origin`.
	pub center: Vec2,
	/// Screen point where `center` lands: offset plus half the surface.
	pub origin: Vec2,
}

impl Projection {
	pub fn new(bounds: &Bounds, viewport: &Viewport, size: SurfaceSize, fit_margin: f64) -> Self {
		let base_scale = fit_scale(bounds, size, fit_margin);
		Self {
			base_scale,
			effective_scale: base_scale * viewport.scale,
			center: bounds.center(),
			origin: viewport.offset + size.center(),
		}
	}

	pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
		(world - self.center) * self.effective_scale + self.origin
	}

	pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
		(screen - self.origin) * self.effective_scale.recip() + self.center
	}
}

/// Largest scale at which `bounds` fits inside the surface minus `margin` on
/// every side. The available extent is floored at one pixel so tiny surfaces
/// still produce a positive scale.
pub fn fit_scale(bounds: &Bounds, size: SurfaceSize, margin: f64) -> f64 {
	let available_w = (size.width - 2.0 * margin).max(1.0);
	let available_h = (size.height - 2.0 * margin).max(1.0);
	(available_w / bounds.width()).min(available_h / bounds.height())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::map_view::types::Node;

	fn assert_close(actual: f64, expected: f64, tolerance: f64) {
		let diff = (actual - expected).abs();
		assert!(
			diff <= tolerance,
			"expected {expected}, got {actual} (diff: {diff})"
		);
	}

	fn node(id: &str, x: f64, y: f64) -> Node {
		Node {
			id: id.into(),
			position: Some(vec![x, y]),
			..Node::default()
		}
	}

	#[test]
	fn world_to_screen_and_back_roundtrip() {
		let bounds = Bounds::of_nodes(&[node("a", -40.0, 3.0), node("b", 12.5, 90.0)]);
		let viewports = [
			Viewport::default(),
			Viewport {
				scale: 0.1,
				offset: Vec2::new(-300.0, 48.0),
			},
			Viewport {
				scale: 10.0,
				offset: Vec2::new(1250.5, -7.25),
			},
		];
		let sizes = [SurfaceSize::new(800.0, 600.0), SurfaceSize::new(120.0, 90.0)];
		let samples = [
			Vec2::new(0.0, 0.0),
			Vec2::new(-40.0, 3.0),
			Vec2::new(13.5, 92.25),
			Vec2::new(-1e4, 5e3),
		];

		for viewport in &viewports {
			for size in sizes {
				let projection = Projection::new(&bounds, viewport, size, 50.0);
				for world in samples {
					let back = projection.screen_to_world(projection.world_to_screen(world));
					assert_close(back.x, world.x, 1e-6);
					assert_close(back.y, world.y, 1e-6);
				}
			}
		}
	}

	#[test]
	fn bounds_center_lands_on_surface_center_plus_offset() {
		let bounds = Bounds::of_nodes(&[node("a", 2.0, 2.0), node("b", 6.0, 10.0)]);
		let viewport = Viewport {
			scale: 3.0,
			offset: Vec2::new(15.0, -5.0),
		};
		let projection = Projection::new(&bounds, &viewport, SurfaceSize::new(400.0, 300.0), 50.0);
		let screen = projection.world_to_screen(bounds.center());
		assert_close(screen.x, 215.0, 1e-9);
		assert_close(screen.y, 145.0, 1e-9);
	}

	#[test]
	fn two_node_graph_fits_small_surface() {
		let bounds = Bounds::of_nodes(&[node("A", 0.0, 0.0), node("B", 10.0, 0.0)]);
		let size = SurfaceSize::new(200.0, 200.0);
		let projection = Projection::new(&bounds, &Viewport::default(), size, 50.0);

		assert_close(projection.base_scale, 100.0 / 12.0, 1e-9);
		for world in [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)] {
			let screen = projection.world_to_screen(world);
			assert!((0.0..=size.width).contains(&screen.x), "{screen:?}");
			assert!((0.0..=size.height).contains(&screen.y), "{screen:?}");
		}
	}

	#[test]
	fn tiny_surface_keeps_positive_scale() {
		let scale = fit_scale(&Bounds::default(), SurfaceSize::new(40.0, 0.0), 50.0);
		assert!(scale > 0.0);
		assert!(scale.is_finite());
	}
}
