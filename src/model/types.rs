//! Knowledge graph data: nodes, parent-child links and the read-only view
//! handed to renderers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node. Allocated by the store, never reused.
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// A node of the knowledge graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Store-assigned identifier.
	pub id: NodeId,
	/// Display label.
	pub name: String,
	/// Free text. `None` only for the configured root.
	pub description: Option<String>,
	/// Fill color, inherited from the parent's `child_color` at creation.
	pub parent_color: String,
	/// Color handed down to this node's future children.
	pub child_color: String,
	/// Creating node. `None` only for the root.
	pub parent: Option<NodeId>,
	/// Hides this node and its incident links from the filtered view.
	#[serde(default)]
	pub collapsed: bool,
	/// Optional image drawn clipped to the node circle.
	#[serde(default)]
	pub avatar: Option<String>,
}

/// A parent -> child edge, stored as an id pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
	/// Parent.
	pub source: NodeId,
	/// Child.
	pub target: NodeId,
}

impl Link {
	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: NodeId) -> bool {
		self.source == id || self.target == id
	}
}

/// A link whose endpoints have been resolved against the node list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedLink<'a> {
	/// Parent node.
	pub source: &'a Node,
	/// Child node.
	pub target: &'a Node,
}

impl ResolvedLink<'_> {
	/// Midpoint label, e.g. `"Node 1 -> Child"`.
	pub fn label(&self) -> String {
		format!("{} -> {}", self.source.name, self.target.name)
	}
}

/// Visible subset of the graph, borrowed from the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphView<'a> {
	/// Nodes not collapsed.
	pub nodes: Vec<&'a Node>,
	/// Links between visible nodes.
	pub links: Vec<ResolvedLink<'a>>,
}

impl GraphView<'_> {
	/// Whether node `id` is visible.
	pub fn contains(&self, id: NodeId) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}
}
