/// Sizes, thresholds and colours used by the renderer.
///
/// All sizes are screen pixels and do not change with zoom.
#[derive(Clone, Debug, PartialEq)]
pub struct MapStyle {
	/// Drawn waypoint radius.
	pub node_radius: f64,
	/// Pointer distance that still counts as over a waypoint.
	pub hit_radius: f64,
	/// Half the side of a marker square.
	pub marker_half_size: f64,
	/// Space kept free on every side when fitting the map to the surface.
	pub fit_margin: f64,
	/// Labels are hidden at or below this user scale.
	pub label_min_scale: f64,
	/// Period of the selected waypoint's pulse ring.
	pub pulse_period_ms: f64,

	/// Neutral edge colour.
	pub edge: &'static str,
	/// Neutral edge line width.
	pub edge_width: f64,
	/// Colour of edges between two filtered waypoints.
	pub edge_highlight: &'static str,
	/// Highlighted edge line width.
	pub edge_highlight_width: f64,

	/// Waypoint fill.
	pub node_fill: &'static str,
	/// Waypoint outline.
	pub node_stroke: &'static str,
	/// Hovered waypoint fill.
	pub node_hover_fill: &'static str,
	/// Hovered waypoint outline.
	pub node_hover_stroke: &'static str,

	/// Filtered waypoint fill.
	pub filter_fill: &'static str,
	/// Filtered waypoint outline.
	pub filter_stroke: &'static str,
	/// Inner colour of the glow behind filtered waypoints.
	pub filter_glow: &'static str,

	/// Selected waypoint fill.
	pub selected_fill: &'static str,
	/// Selected waypoint outline.
	pub selected_stroke: &'static str,
	/// Halo behind the selected waypoint.
	pub selected_halo: &'static str,

	/// Marker fill.
	pub marker_fill: &'static str,
	/// Marker outline.
	pub marker_stroke: &'static str,

	/// Waypoint label font.
	pub label_font: &'static str,
	/// Marker label font.
	pub marker_label_font: &'static str,
	/// Waypoint label colour.
	pub label: &'static str,
	/// Label colour for filtered waypoints.
	pub filter_label: &'static str,
	/// Label colour for the selected waypoint.
	pub selected_label: &'static str,
	/// Marker label colour.
	pub marker_label: &'static str,
}

impl Default for MapStyle {
	fn default() -> Self {
		Self {
			node_radius: 5.0,
			hit_radius: 5.0,
			marker_half_size: 4.0,
			fit_margin: 50.0,
			label_min_scale: 0.5,
			pulse_period_ms: 2000.0,

			edge: "rgba(150, 150, 150, 0.6)",
			edge_width: 1.0,
			edge_highlight: "rgba(0, 150, 0, 0.8)",
			edge_highlight_width: 2.0,

			node_fill: "rgba(30, 136, 229, 0.7)",
			node_stroke: "rgb(21, 101, 192)",
			node_hover_fill: "rgba(100, 149, 237, 0.9)",
			node_hover_stroke: "rgb(70, 119, 207)",

			filter_fill: "green",
			filter_stroke: "darkgreen",
			filter_glow: "rgba(0, 200, 0, 0.35)",

			selected_fill: "red",
			selected_stroke: "darkred",
			selected_halo: "rgba(255, 0, 0, 0.2)",

			marker_fill: "rgba(0, 200, 0, 0.7)",
			marker_stroke: "darkgreen",

			label_font: "12px Arial",
			marker_label_font: "10px Arial",
			label: "black",
			filter_label: "darkgreen",
			selected_label: "red",
			marker_label: "darkgreen",
		}
	}
}
