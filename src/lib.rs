//! Interactive waypoint map viewer for robot topological maps.
//!
//! [`MapCanvas`] draws a [`GraphSnapshot`] and reports clicks and hover;
//! this crate root wires it into a Leptos client-side app with a demo page.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
mod pages;

pub use components::map_view::{
	Edge, GraphSnapshot, MapCanvas, MapStyle, MapViewHandle, Marker, Node, SnapshotError,
	Tooltip, Vec2, Viewport,
};

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Most verbose level sent to the browser console. Frame summaries are logged
/// at debug, so release builds stop at info.
const LOG_LEVEL: Level = if cfg!(debug_assertions) {
	Level::Debug
} else {
	Level::Info
};

/// Initialize console logging and the panic hook for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(LOG_LEVEL);
	console_error_panic_hook::set_once();
	info!("Logging initialized at {LOG_LEVEL}");
}

/// Router serving the map page, with a 404 fallback.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Waypoint Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
