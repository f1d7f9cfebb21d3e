//! Render-ready graph data consumed by the canvas.

use crate::model::{ColorSource, GraphStore, NodeId};

/// A node as drawn on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Model node id, reported back on click.
	pub id: NodeId,
	/// Text drawn on the node.
	pub label: String,
	/// CSS fill color.
	pub color: String,
	/// Image drawn clipped to the node circle instead of the fill.
	pub avatar: Option<String>,
	/// Some direct child is collapsed; drawn with a dashed ring.
	pub has_hidden_children: bool,
}

/// A link as drawn on the canvas, with its midpoint label.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Parent end.
	pub source: NodeId,
	/// Child end.
	pub target: NodeId,
	/// Midpoint text.
	pub label: String,
}

/// Everything the canvas draws.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Visible nodes.
	pub nodes: Vec<GraphNode>,
	/// Links between visible nodes.
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Project the store's filtered view into owned canvas data.
	pub fn project<C: ColorSource>(store: &GraphStore<C>) -> Self {
		let view = store.filtered_view();
		let nodes = view
			.nodes
			.iter()
			.map(|n| GraphNode {
				id: n.id,
				label: n.name.clone(),
				color: n.parent_color.clone(),
				avatar: n.avatar.clone(),
				has_hidden_children: store.has_hidden_children(n.id),
			})
			.collect();
		let links = view
			.links
			.iter()
			.map(|l| GraphLink {
				source: l.source.id,
				target: l.target.id,
				label: l.label(),
			})
			.collect();
		Self { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::GraphConfig;
	use crate::model::SequenceColors;

	#[test]
	fn projection_follows_filtered_view() {
		let mut store =
			GraphStore::with_color_source(&GraphConfig::default(), SequenceColors::default());
		let root = store.root().cloned().unwrap();
		let a = store.add_relationship(&root, "A", "desc").unwrap();
		let a_node = store.node(a).cloned().unwrap();
		let b = store.add_relationship(&a_node, "B", "desc").unwrap();

		let data = GraphData::project(&store);
		assert_eq!(data.nodes.len(), 3);
		assert_eq!(data.links.len(), 2);
		assert_eq!(data.links[1].label, "A -> B");
		assert_eq!(data.nodes[1].color, root.child_color);
		assert!(data.nodes.iter().all(|n| !n.has_hidden_children));

		store.toggle_expand_collapse(a);
		let data = GraphData::project(&store);
		assert!(data.nodes.iter().all(|n| n.id != b));
		assert_eq!(data.links.len(), 1);
		let a_drawn = data.nodes.iter().find(|n| n.id == a).unwrap();
		assert!(a_drawn.has_hidden_children);
	}
}
