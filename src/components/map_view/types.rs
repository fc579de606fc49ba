//! Graph snapshot model as delivered by the map data service.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// A 2D point or displacement, in world or screen space depending on use.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	/// Horizontal component.
	pub x: f64,
	/// Vertical component. Grows downward in screen space.
	pub y: f64,
}

impl Vec2 {
	/// The origin.
	pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

	/// Builds a vector from its components.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Vec2) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}

	/// Whether both components are finite.
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}

	/// Reads the x/y components of a raw position array.
	///
	/// Positions may carry a third (height) component which is ignored. Short
	/// or non-finite arrays yield `None`.
	pub fn from_slice(raw: &[f64]) -> Option<Self> {
		match raw {
			[x, y, ..] => Some(Vec2::new(*x, *y)).filter(|p| p.is_finite()),
			_ => None,
		}
	}
}

impl std::ops::Add for Vec2 {
	type Output = Vec2;

	fn add(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl std::ops::Sub for Vec2 {
	type Output = Vec2;

	fn sub(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl std::ops::Mul<f64> for Vec2 {
	type Output = Vec2;

	fn mul(self, rhs: f64) -> Vec2 {
		Vec2::new(self.x * rhs, self.y * rhs)
	}
}

/// A waypoint. `tags` name the objects visible from it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Node {
	/// Unique waypoint id.
	pub id: String,
	/// Raw world position; `null` components decode as NaN.
	#[serde(default, deserialize_with = "lenient_position")]
	pub position: Option<Vec<f64>>,
	/// Display name, if the waypoint has been labelled.
	#[serde(default)]
	pub label: Option<String>,
	/// Objects visible from this waypoint. Non-string entries are dropped.
	#[serde(default, rename = "objects", deserialize_with = "lenient_tags")]
	pub tags: Option<Vec<String>>,
}

impl Node {
	/// World x/y, or `None` when the position is missing, short or non-finite.
	pub fn world_position(&self) -> Option<Vec2> {
		self.position.as_deref().and_then(Vec2::from_slice)
	}
}

/// A connection between two waypoints with endpoint positions cached when
/// the snapshot was built.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Edge {
	/// Id of the source waypoint.
	pub from_id: String,
	/// Id of the target waypoint.
	pub to_id: String,
	/// Source position cached at snapshot build time.
	#[serde(default, deserialize_with = "lenient_position")]
	pub from_position: Option<Vec<f64>>,
	/// Target position cached at snapshot build time.
	#[serde(default, deserialize_with = "lenient_position")]
	pub to_position: Option<Vec<f64>>,
}

impl Edge {
	/// Both cached endpoints, or `None` if either is unusable.
	pub fn endpoints(&self) -> Option<(Vec2, Vec2)> {
		let from = self.from_position.as_deref().and_then(Vec2::from_slice)?;
		let to = self.to_position.as_deref().and_then(Vec2::from_slice)?;
		Some((from, to))
	}
}

/// A standalone point of interest.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Marker {
	/// Marker id, also drawn as its label.
	pub id: String,
	/// Raw world position.
	#[serde(default, deserialize_with = "lenient_position")]
	pub position: Option<Vec<f64>>,
}

impl Marker {
	/// World x/y, or `None` when the position is unusable.
	pub fn world_position(&self) -> Option<Vec2> {
		self.position.as_deref().and_then(Vec2::from_slice)
	}
}

/// Failure to decode a snapshot document.
#[derive(Debug, Error)]
pub enum SnapshotError {
	/// The document is not valid JSON or its top level is not an object.
	#[error("invalid map document: {0}")]
	Decode(#[from] serde_json::Error),
}

/// Immutable map state. Replaced wholesale on every refresh.
///
/// Entity lists decode one entry at a time: an entry that fails to decode is
/// logged and dropped, and a `null` or non-array list reads as empty.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphSnapshot {
	/// Waypoints in server order.
	#[serde(default, rename = "waypoints", deserialize_with = "lenient_list")]
	pub nodes: Vec<Node>,
	/// Edges in server order.
	#[serde(default, deserialize_with = "lenient_list")]
	pub edges: Vec<Edge>,
	/// Optional point-of-interest markers.
	#[serde(default, rename = "objects", deserialize_with = "lenient_markers")]
	pub markers: Option<Vec<Marker>>,
}

fn lenient_position<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<Value>::deserialize(deserializer)?;
	Ok(raw.and_then(|value| match value {
		Value::Array(items) => Some(
			items
				.iter()
				.map(|item| item.as_f64().unwrap_or(f64::NAN))
				.collect(),
		),
		_ => None,
	}))
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<Value>::deserialize(deserializer)?;
	Ok(raw.and_then(|value| match value {
		Value::Array(items) => Some(
			items
				.into_iter()
				.filter_map(|item| match item {
					Value::String(tag) => Some(tag),
					_ => None,
				})
				.collect(),
		),
		_ => None,
	}))
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	let items = match Option::<Value>::deserialize(deserializer)? {
		Some(Value::Array(items)) => items,
		Some(Value::Null) | None => return Ok(Vec::new()),
		Some(other) => {
			log::warn!("expected a list of map entries, got {other}");
			return Ok(Vec::new());
		}
	};
	Ok(items
		.into_iter()
		.enumerate()
		.filter_map(|(i, item)| match serde_json::from_value(item) {
			Ok(entry) => Some(entry),
			Err(err) => {
				log::warn!("dropping map entry {i}: {err}");
				None
			}
		})
		.collect())
}

fn lenient_markers<'de, D>(deserializer: D) -> Result<Option<Vec<Marker>>, D::Error>
where
	D: Deserializer<'de>,
{
	lenient_list(deserializer).map(Some)
}

impl GraphSnapshot {
	/// Decodes a map document. Only a syntax error or a non-object top level
	/// fails; bad entries inside the lists are dropped.
	pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
		Ok(serde_json::from_str(raw)?)
	}

	/// First waypoint with this id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Markers, or an empty slice when the document had none.
	pub fn markers(&self) -> &[Marker] {
		self.markers.as_deref().unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_server_field_names() {
		let raw = r#"{
			"waypoints": [
				{"id": "A", "position": [0.0, 0.0, 0.2], "label": "dock", "objects": ["cup"]},
				{"id": "B", "position": [10.0, 0.0, 0.0]}
			],
			"edges": [
				{"from_id": "A", "to_id": "B", "from_position": [0.0, 0.0, 0.2], "to_position": [10.0, 0.0, 0.0]}
			],
			"objects": [{"id": "fiducial_3", "position": [4.0, 2.0, 0.0]}]
		}"#;
		let snapshot = GraphSnapshot::from_json(raw).unwrap();

		assert_eq!(snapshot.nodes.len(), 2);
		assert_eq!(snapshot.nodes[0].tags.as_deref(), Some(&["cup".to_string()][..]));
		assert_eq!(snapshot.nodes[1].world_position(), Some(Vec2::new(10.0, 0.0)));
		assert_eq!(
			snapshot.edges[0].endpoints(),
			Some((Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)))
		);
		assert_eq!(snapshot.markers()[0].world_position(), Some(Vec2::new(4.0, 2.0)));
	}

	#[test]
	fn missing_arrays_decode_as_empty() {
		let snapshot = GraphSnapshot::from_json("{}").unwrap();
		assert!(snapshot.nodes.is_empty());
		assert!(snapshot.edges.is_empty());
		assert!(snapshot.markers().is_empty());
	}

	#[test]
	fn syntax_errors_are_reported() {
		assert!(matches!(
			GraphSnapshot::from_json("{\"waypoints\": ["),
			Err(SnapshotError::Decode(_))
		));
	}

	#[test]
	fn null_position_component_keeps_the_node() {
		let snapshot = GraphSnapshot::from_json(
			r#"{"waypoints": [{"id": "A", "position": [0, 0]}, {"id": "B", "position": [1, null]}]}"#,
		)
		.unwrap();
		assert_eq!(snapshot.nodes.len(), 2);
		assert_eq!(snapshot.nodes[0].world_position(), Some(Vec2::ZERO));
		assert_eq!(snapshot.node("B").unwrap().world_position(), None);
	}

	#[test]
	fn malformed_entries_are_dropped_one_at_a_time() {
		let snapshot = GraphSnapshot::from_json(
			r#"{
				"waypoints": [
					{"id": "A", "position": [0, 0], "objects": ["cup", 3]},
					{"position": [5, 5]},
					{"id": "C", "position": [2, 2]}
				],
				"edges": [{"from_id": "A"}, {"from_id": "A", "to_id": "C"}],
				"objects": "nope"
			}"#,
		)
		.unwrap();
		let ids: Vec<_> = snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["A", "C"]);
		assert_eq!(snapshot.nodes[0].tags.as_deref(), Some(&["cup".to_string()][..]));
		assert_eq!(snapshot.edges.len(), 1);
		assert!(snapshot.markers().is_empty());
	}

	#[test]
	fn null_lists_decode_as_empty() {
		let snapshot = GraphSnapshot::from_json(
			r#"{"waypoints": [{"id": "A", "position": [0, 0]}], "edges": null, "objects": null}"#,
		)
		.unwrap();
		assert_eq!(snapshot.nodes.len(), 1);
		assert!(snapshot.edges.is_empty());
		assert!(snapshot.markers().is_empty());
	}

	#[test]
	fn short_positions_have_no_world_position() {
		let node = Node {
			id: "A".into(),
			position: Some(vec![1.0]),
			..Node::default()
		};
		assert_eq!(node.world_position(), None);
		assert_eq!(Vec2::from_slice(&[f64::NAN, 1.0]), None);
	}
}
