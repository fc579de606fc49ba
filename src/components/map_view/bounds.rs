use super::types::{Node, Vec2};

/// World-space box returned when there is nothing valid to fit.
pub const DEFAULT_BOUNDS: Bounds = Bounds {
	min_x: -10.0,
	max_x: 10.0,
	min_y: -10.0,
	max_y: 10.0,
};

const PAD_FRACTION: f64 = 0.1;
const MIN_PAD: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub max_x: f64,
	pub min_y: f64,
	pub max_y: f64,
}

impl Default for Bounds {
	fn default() -> Self {
		DEFAULT_BOUNDS
	}
}

impl Bounds {
	/// Padded bounding box of every node with a usable position.
	///
	/// Each axis grows by `max(1, 10% of extent)` on both sides, so the box is
	/// never empty even for a single node or collinear nodes.
	pub fn of_nodes(nodes: &[Node]) -> Self {
		let mut points = nodes.iter().filter_map(Node::world_position);
		let Some(first) = points.next() else {
			return DEFAULT_BOUNDS;
		};

		let raw = points.fold(
			Bounds {
				min_x: first.x,
				max_x: first.x,
				min_y: first.y,
				max_y: first.y,
			},
			|b, p| Bounds {
				min_x: b.min_x.min(p.x),
				max_x: b.max_x.max(p.x),
				min_y: b.min_y.min(p.y),
				max_y: b.max_y.max(p.y),
			},
		);

		let pad_x = MIN_PAD.max((raw.max_x - raw.min_x) * PAD_FRACTION);
		let pad_y = MIN_PAD.max((raw.max_y - raw.min_y) * PAD_FRACTION);
		let padded = Bounds {
			min_x: raw.min_x - pad_x,
			max_x: raw.max_x + pad_x,
			min_y: raw.min_y - pad_y,
			max_y: raw.max_y + pad_y,
		};

		// Extents can still overflow to infinity for huge coordinates.
		if padded.width().is_finite() && padded.height().is_finite() {
			padded
		} else {
			DEFAULT_BOUNDS
		}
	}

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	pub fn center(&self) -> Vec2 {
		Vec2::new(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}
}
