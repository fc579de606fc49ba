use std::collections::HashSet;

use leptos::ev;
use leptos::prelude::*;
use web_sys::{MouseEvent, WheelEvent};

use super::frame::{FrameLayout, Tooltip};
use super::render::{self, FrameInput};
use super::state::{PointerEvent, SelectionState, Viewport, ViewportController};
use super::style::MapStyle;
use super::surface::CanvasSurface;
use super::transform::SurfaceSize;
use super::types::{GraphSnapshot, Vec2};

/// Imperative view controls and interaction outputs shared between the
/// canvas and its host.
///
/// Create one with [`MapViewHandle::new`] and pass it to [`MapCanvas`] to
/// drive zoom and reset from outside the canvas, or to observe which
/// waypoint is hovered.
#[derive(Clone, Copy)]
pub struct MapViewHandle {
	controller: StoredValue<ViewportController>,
	viewport: RwSignal<Viewport>,
	hovered: RwSignal<Option<String>>,
	tooltip: RwSignal<Option<Tooltip>>,
	cursor: RwSignal<&'static str>,
}

impl Default for MapViewHandle {
	fn default() -> Self {
		Self::new()
	}
}

impl MapViewHandle {
	/// Creates a handle with the identity viewport and nothing hovered.
	pub fn new() -> Self {
		Self {
			controller: StoredValue::new(ViewportController::default()),
			viewport: RwSignal::new(Viewport::default()),
			hovered: RwSignal::new(None),
			tooltip: RwSignal::new(None),
			cursor: RwSignal::new("grab"),
		}
	}

	/// Current user zoom and pan.
	pub fn viewport(&self) -> Signal<Viewport> {
		self.viewport.into()
	}

	/// Id of the waypoint under the pointer, if any.
	pub fn hovered(&self) -> Signal<Option<String>> {
		self.hovered.into()
	}

	/// Tooltip for the hovered waypoint as of the last drawn frame.
	pub fn tooltip(&self) -> Signal<Option<Tooltip>> {
		self.tooltip.into()
	}

	/// CSS cursor for the current interaction.
	pub fn cursor(&self) -> Signal<&'static str> {
		self.cursor.into()
	}

	/// Zooms in one button step around the surface centre.
	pub fn zoom_in(&self) {
		self.mutate(ViewportController::zoom_in);
	}

	/// Zooms out one button step around the surface centre.
	pub fn zoom_out(&self) {
		self.mutate(ViewportController::zoom_out);
	}

	/// Restores the identity viewport.
	pub fn reset_view(&self) {
		self.mutate(ViewportController::reset_view);
		log::info!("map view reset");
	}

	/// Feeds one pointer event through the controller and publishes hover
	/// and cursor. Returns the clicked waypoint id, if the event committed one.
	pub(crate) fn pointer(&self, event: PointerEvent, frame: &FrameLayout) -> Option<String> {
		let clicked = self.mutate(|controller| controller.handle(event, frame)).flatten();
		self.publish_hover(frame);
		clicked
	}

	/// Revalidates the hover against a freshly drawn frame and republishes
	/// the hover outputs.
	pub(crate) fn sync_frame(&self, frame: &FrameLayout) {
		self.mutate(|controller| controller.refresh_hover(frame));
		self.publish_hover(frame);
	}

	fn publish_hover(&self, frame: &FrameLayout) {
		let Some((hovered, cursor)) = self.controller.try_with_value(|controller| {
			(controller.hovered().map(str::to_owned), controller.cursor())
		}) else {
			return;
		};
		let tooltip = frame.tooltip(hovered.as_deref());
		if self.hovered.get_untracked() != hovered {
			self.hovered.set(hovered);
		}
		if self.cursor.get_untracked() != cursor {
			self.cursor.set(cursor);
		}
		if self.tooltip.get_untracked() != tooltip {
			self.tooltip.set(tooltip);
		}
	}

	/// Runs `f` on the controller and publishes the viewport if it moved.
	fn mutate<R>(&self, f: impl FnOnce(&mut ViewportController) -> R) -> Option<R> {
		let mut outcome = None;
		self.controller.update_value(|controller| {
			outcome = Some((f(controller), controller.viewport()));
		});
		let (result, viewport) = outcome?;
		if self.viewport.get_untracked() != viewport {
			self.viewport.set(viewport);
		}
		Some(result)
	}
}

/// Canvas view of a waypoint map with pan, zoom, hover and click selection.
#[component]
pub fn MapCanvas(
	/// Map to draw. Replacing it keeps the current pan and zoom.
	#[prop(into)]
	snapshot: Signal<GraphSnapshot>,
	/// Id of the selected waypoint.
	#[prop(into)]
	selected: Signal<Option<String>>,
	/// Object tags to highlight. Empty means no filter.
	#[prop(into)]
	filter_tags: Signal<HashSet<String>>,
	/// Called with the waypoint id when a click lands on a waypoint.
	#[prop(into)]
	on_node_select: Callback<String>,
	/// Draw labels when zoomed in far enough.
	#[prop(into, default = true.into())]
	show_labels: Signal<bool>,
	/// Shared zoom controls and hover outputs.
	#[prop(optional)]
	handle: Option<MapViewHandle>,
	/// Sizes, thresholds and colours.
	#[prop(optional)]
	style: MapStyle,
	/// Fixed surface width in pixels. Defaults to the container width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed surface height in pixels. Defaults to the container height.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let handle = handle.unwrap_or_default();
	let frame = StoredValue::new(FrameLayout::default());
	let surface_epoch = RwSignal::new(0u32);

	let resize = window_event_listener(ev::resize, move |_| {
		surface_epoch.update(|epoch| *epoch = epoch.wrapping_add(1));
	});
	on_cleanup(move || resize.remove());

	Effect::new(move |_| {
		let viewport = handle.viewport.get();
		let selection = SelectionState {
			selected: selected.get(),
			hovered: handle.hovered.get(),
			filter_tags: filter_tags.get(),
		};
		let show_labels = show_labels.get();
		surface_epoch.track();

		let (Some(canvas), Some(container)) = (canvas_ref.get(), container_ref.get()) else {
			return;
		};
		let size = SurfaceSize::new(
			width.unwrap_or_else(|| container.client_width() as f64),
			height.unwrap_or_else(|| container.client_height() as f64),
		);
		let mut surface = match CanvasSurface::new(canvas) {
			Ok(surface) => surface,
			Err(err) => {
				log::error!("map canvas unavailable: {err}");
				return;
			}
		};

		let layout = snapshot.with(|snapshot| {
			render::render(
				&mut surface,
				&FrameInput {
					snapshot,
					viewport,
					selection: &selection,
					size,
					show_labels,
					style: &style,
					time_ms: js_sys::Date::now(),
				},
			)
		});
		// Nodes may have moved under a still pointer; a changed hover reruns this effect once.
		handle.sync_frame(&layout);
		frame.set_value(layout);
	});

	let pointer_position = move |ev: &MouseEvent| -> Option<Vec2> {
		let canvas = canvas_ref.get_untracked()?;
		let rect = canvas.get_bounding_client_rect();
		Some(Vec2::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let dispatch = move |event: PointerEvent| {
		let clicked = frame.with_value(|frame| handle.pointer(event, frame));
		if let Some(id) = clicked {
			log::info!("waypoint {id} selected");
			on_node_select.run(id);
		}
	};

	let on_mousedown = move |ev: MouseEvent| {
		if let Some(at) = pointer_position(&ev) {
			dispatch(PointerEvent::Down(at));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		if let Some(at) = pointer_position(&ev) {
			dispatch(PointerEvent::Move(at));
		}
	};

	let on_mouseup = move |ev: MouseEvent| {
		if let Some(at) = pointer_position(&ev) {
			dispatch(PointerEvent::Up(at));
		}
	};

	let on_mouseleave = move |_: MouseEvent| dispatch(PointerEvent::Leave);

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(at) = pointer_position(&ev) {
			dispatch(PointerEvent::Wheel {
				position: at,
				delta_y: ev.delta_y(),
			});
		}
	};

	view! {
		<div
			node_ref=container_ref
			class="map-view-container"
			style="position: relative; width: 100%; height: 100%; overflow: hidden;"
		>
			<canvas
				node_ref=canvas_ref
				class="map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block;"
				style:cursor=move || handle.cursor.get()
			/>

			<div class="map-controls">
				<button class="zoom-button" on:click=move |_| handle.zoom_in()>"+"</button>
				<button class="zoom-button" on:click=move |_| handle.zoom_out()>"−"</button>
				<button class="reset-button" on:click=move |_| handle.reset_view()>"Reset View"</button>
			</div>

			{move || {
				handle
					.tooltip
					.get()
					.map(|tip| {
						view! {
							<div
								class="waypoint-tooltip"
								class:filtered=tip.filtered
								style:left=format!("{}px", tip.anchor.x)
								style:top=format!("{}px", tip.anchor.y)
							>
								<div>
									<strong>"ID: "</strong>
									{tip.id}
								</div>
								{tip
									.label
									.map(|label| {
										view! {
											<div>
												<strong>"Label: "</strong>
												{label}
											</div>
										}
									})}
							</div>
						}
					})
			}}
		</div>
	}
}
