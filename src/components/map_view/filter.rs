use std::collections::HashSet;

use super::types::{Edge, Node};

/// Which nodes and edges a tag selection highlights.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterMatch {
	pub nodes: HashSet<String>,
	/// Parallel to the snapshot's edge list.
	edges: Vec<bool>,
}

impl FilterMatch {
	pub fn compute(nodes: &[Node], edges: &[Edge], tags: &HashSet<String>) -> Self {
		if tags.is_empty() {
			return Self {
				nodes: HashSet::new(),
				edges: vec![false; edges.len()],
			};
		}

		let matched: HashSet<String> = nodes
			.iter()
			.filter(|node| node_matches(node, tags))
			.map(|node| node.id.clone())
			.collect();
		let edges = edges
			.iter()
			.map(|edge| matched.contains(&edge.from_id) || matched.contains(&edge.to_id))
			.collect();

		Self {
			nodes: matched,
			edges,
		}
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.contains(id)
	}

	pub fn is_edge_highlighted(&self, index: usize) -> bool {
		self.edges.get(index).copied().unwrap_or(false)
	}
}

/// Whether `node` carries at least one of `tags`. Untagged nodes never match.
pub fn node_matches(node: &Node, tags: &HashSet<String>) -> bool {
	node.tags
		.as_deref()
		.is_some_and(|own| own.iter().any(|tag| tags.contains(tag)))
}
