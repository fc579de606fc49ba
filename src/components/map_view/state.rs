use std::collections::HashSet;

use super::frame::FrameLayout;
use super::hit;
use super::types::Vec2;

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 10.0;
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
pub const BUTTON_ZOOM_STEP: f64 = 1.2;
/// Pointer travel below this many pixels between press and release is a click.
pub const CLICK_THRESHOLD: f64 = 5.0;

/// User zoom and pan, applied on top of the fitted base scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Multiplier on the fitted base scale, within `[MIN_SCALE, MAX_SCALE]`.
	pub scale: f64,
	/// Screen-space pan in pixels.
	pub offset: Vec2,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			scale: 1.0,
			offset: Vec2::ZERO,
		}
	}
}

impl Viewport {
	/// Sets the scale, clamped to `[MIN_SCALE, MAX_SCALE]`. Non-finite values
	/// leave the scale untouched.
	pub fn set_scale(&mut self, scale: f64) {
		if scale.is_finite() {
			self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
		}
	}

	/// Shifts the view by `delta` pixels. Non-finite deltas are ignored.
	pub fn pan(&mut self, delta: Vec2) {
		if delta.is_finite() {
			self.offset = self.offset + delta;
		}
	}

	/// Multiplies the scale by `factor` while keeping the screen point
	/// `cursor` over the same world point.
	pub fn zoom_at(&mut self, factor: f64, cursor: Vec2, surface_center: Vec2) {
		let previous = self.scale;
		self.set_scale(previous * factor);
		let ratio = self.scale / previous;
		let anchor = cursor - surface_center;
		self.offset = anchor - (anchor - self.offset) * ratio;
	}

	/// One button step in, around the surface centre.
	pub fn zoom_in(&mut self) {
		self.set_scale(self.scale * BUTTON_ZOOM_STEP);
	}

	/// One button step out, around the surface centre.
	pub fn zoom_out(&mut self) {
		self.set_scale(self.scale / BUTTON_ZOOM_STEP);
	}

	/// Back to scale 1 with no pan.
	pub fn reset(&mut self) {
		*self = Viewport::default();
	}
}

/// Highlight inputs for a frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
	pub selected: Option<String>,
	pub hovered: Option<String>,
	pub filter_tags: HashSet<String>,
}

/// Pointer input in surface-relative pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
	Down(Vec2),
	Move(Vec2),
	Up(Vec2),
	Leave,
	Wheel { position: Vec2, delta_y: f64 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Gesture {
	#[default]
	Idle,
	Dragging {
		start: Vec2,
		last: Vec2,
	},
}

/// Owns the viewport and turns pointer input into pan, zoom, hover and
/// click decisions.
#[derive(Clone, Debug, Default)]
pub struct ViewportController {
	viewport: Viewport,
	gesture: Gesture,
	hovered: Option<String>,
	/// Last known pointer position over the surface.
	pointer: Option<Vec2>,
}

impl ViewportController {
	pub fn new(viewport: Viewport) -> Self {
		Self {
			viewport,
			..Self::default()
		}
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.gesture, Gesture::Dragging { .. })
	}

	/// CSS cursor for the current interaction.
	pub fn cursor(&self) -> &'static str {
		if self.is_dragging() {
			"grabbing"
		} else if self.hovered.is_some() {
			"pointer"
		} else {
			"grab"
		}
	}

	/// Applies one pointer event against the most recently drawn frame.
	///
	/// Returns the node id when the event commits a click.
	pub fn handle(&mut self, event: PointerEvent, frame: &FrameLayout) -> Option<String> {
		self.pointer = match event {
			PointerEvent::Down(at) | PointerEvent::Move(at) | PointerEvent::Up(at) => Some(at),
			PointerEvent::Wheel { position, .. } => Some(position),
			PointerEvent::Leave => None,
		};
		match (event, self.gesture) {
			(PointerEvent::Down(at), Gesture::Idle) => {
				self.gesture = Gesture::Dragging { start: at, last: at };
				None
			}
			(PointerEvent::Down(at), Gesture::Dragging { .. }) => {
				// Missed release (button let go outside the surface): restart.
				self.gesture = Gesture::Dragging { start: at, last: at };
				None
			}
			(PointerEvent::Move(at), Gesture::Dragging { start, last }) => {
				self.viewport.pan(at - last);
				self.gesture = Gesture::Dragging { start, last: at };
				None
			}
			(PointerEvent::Move(at), Gesture::Idle) => {
				self.hovered = hit::node_at(frame, at).map(|node| node.id.clone());
				None
			}
			(PointerEvent::Up(at), Gesture::Dragging { start, .. }) => {
				self.gesture = Gesture::Idle;
				if start.distance(at) >= CLICK_THRESHOLD {
					return None;
				}
				// The hover may predate a redraw; only commit what is still under the pointer.
				let under = hit::node_at(frame, at).map(|node| node.id.as_str());
				match (under, self.hovered.as_deref()) {
					(Some(under), Some(hovered)) if under == hovered => self.hovered.clone(),
					_ => None,
				}
			}
			(PointerEvent::Up(_), Gesture::Idle) => None,
			(PointerEvent::Leave, _) => {
				self.gesture = Gesture::Idle;
				self.hovered = None;
				None
			}
			(PointerEvent::Wheel { position, delta_y }, _) => {
				let factor = if delta_y < 0.0 {
					WHEEL_ZOOM_IN
				} else {
					WHEEL_ZOOM_OUT
				};
				self.viewport.zoom_at(factor, position, frame.size.center());
				None
			}
		}
	}

	/// Re-runs the hover hit test against a freshly drawn frame, since zoom
	/// and snapshot changes move nodes without any pointer motion.
	///
	/// Returns `true` when the hovered id changed.
	pub fn refresh_hover(&mut self, frame: &FrameLayout) -> bool {
		let next = match (self.gesture, self.pointer) {
			(Gesture::Idle, Some(at)) => hit::node_at(frame, at).map(|node| node.id.clone()),
			(Gesture::Idle, None) => None,
			(Gesture::Dragging { .. }, _) => self
				.hovered
				.clone()
				.filter(|id| frame.get(id).is_some()),
		};
		let changed = next != self.hovered;
		self.hovered = next;
		changed
	}

	pub fn zoom_in(&mut self) {
		self.viewport.zoom_in();
	}

	pub fn zoom_out(&mut self) {
		self.viewport.zoom_out();
	}

	pub fn reset_view(&mut self) {
		self.viewport.reset();
	}
}
