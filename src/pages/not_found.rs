use leptos::prelude::*;

/// Fallback page for unknown routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<h1>"Page not found"</h1>
		<a href="/">"Back to the map"</a>
	}
}
