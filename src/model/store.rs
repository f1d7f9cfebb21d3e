//! The authoritative node/link collection behind the knowledge graph.
//!
//! All mutation goes through [`GraphStore`]; renderers only ever see the
//! [`GraphView`] produced by [`GraphStore::filtered_view`], which is rebuilt
//! from scratch on each call.

use log::{debug, warn};

use super::error::ValidationError;
use super::palette::{ColorSource, Palette, RandomColors};
use super::types::{GraphView, Link, Node, NodeId, ResolvedLink};
use crate::config::GraphConfig;

const ROOT_ID: NodeId = NodeId(1);

/// Owns a single knowledge graph: one root plus everything added beneath it.
#[derive(Clone, Debug)]
pub struct GraphStore<C = RandomColors> {
	nodes: Vec<Node>,
	links: Vec<Link>,
	palette: Palette,
	colors: C,
	next_id: u64,
}

impl GraphStore<RandomColors> {
	/// Store holding only the configured root, with random child colors.
	pub fn new(config: &GraphConfig) -> Self {
		Self::with_color_source(config, RandomColors::from_entropy())
	}
}

impl<C: ColorSource> GraphStore<C> {
	/// Like [`GraphStore::new`], drawing child colors from `colors`.
	pub fn with_color_source(config: &GraphConfig, colors: C) -> Self {
		let root = Node {
			id: ROOT_ID,
			name: config.root.name.clone(),
			description: None,
			parent_color: config.root.parent_color.clone(),
			child_color: config.root.child_color.clone(),
			parent: None,
			collapsed: false,
			avatar: config.root.avatar.clone(),
		};
		Self {
			nodes: vec![root],
			links: Vec::new(),
			palette: config.palette.clone(),
			colors,
			next_id: ROOT_ID.0 + 1,
		}
	}

	/// Every node, collapsed ones included, in creation order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Every stored link.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Palette child colors are picked from.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Node with `id`, if it still exists.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// The root, unless it has been deleted.
	pub fn root(&self) -> Option<&Node> {
		self.node(ROOT_ID)
	}

	/// Nodes created under `id`.
	pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &Node> {
		self.nodes.iter().filter(move |n| n.parent == Some(id))
	}

	/// Whether any direct child of `id` is currently collapsed.
	pub fn has_hidden_children(&self, id: NodeId) -> bool {
		self.children_of(id).any(|n| n.collapsed)
	}

	/// Nodes whose parent has been deleted. They keep their stale `parent`
	/// id and stay in the view until deleted themselves.
	pub fn orphans(&self) -> impl Iterator<Item = &Node> {
		self.nodes
			.iter()
			.filter(|n| n.parent.is_some_and(|p| self.node(p).is_none()))
	}

	/// Create a child of `parent` joined to it by a new link.
	///
	/// `parent` is the caller's snapshot of the selected node; its id and
	/// `child_color` are all that is read from it.
	pub fn add_relationship(
		&mut self,
		parent: &Node,
		name: &str,
		description: &str,
	) -> Result<NodeId, ValidationError> {
		if name.is_empty() {
			warn!("add relationship under {}: missing name", parent.id);
			return Err(ValidationError::MissingName);
		}
		if description.is_empty() {
			warn!("add relationship under {}: missing description", parent.id);
			return Err(ValidationError::MissingDescription);
		}

		let id = NodeId(self.next_id);
		self.next_id += 1;
		let child_color = self.colors.pick(&self.palette);

		self.nodes.push(Node {
			id,
			name: name.to_string(),
			description: Some(description.to_string()),
			parent_color: parent.child_color.clone(),
			child_color,
			parent: Some(parent.id),
			collapsed: false,
			avatar: None,
		});
		self.links.push(Link {
			source: parent.id,
			target: id,
		});
		debug!("added node {} under {}", id, parent.id);
		Ok(id)
	}

	/// Replace the name and description of the node with `id`. Colors,
	/// topology and the collapsed flag are never touched.
	pub fn edit_relationship(&mut self, id: NodeId, name: &str, description: &str) {
		if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
			node.name = name.to_string();
			node.description = Some(description.to_string());
			debug!("edited node {}", id);
		}
	}

	/// Remove the node with `id` and every link touching it. Descendants are
	/// left in place.
	pub fn delete_relationship(&mut self, id: NodeId) -> Option<Node> {
		let pos = self.nodes.iter().position(|n| n.id == id)?;
		let removed = self.nodes.remove(pos);
		let before = self.links.len();
		self.links.retain(|l| !l.touches(id));
		debug!(
			"deleted node {} and {} link(s)",
			id,
			before - self.links.len()
		);
		Some(removed)
	}

	/// Flip `collapsed` on every direct child of `id`. Returns the number of
	/// children flipped.
	pub fn toggle_expand_collapse(&mut self, id: NodeId) -> usize {
		let mut flipped = 0;
		for node in self.nodes.iter_mut().filter(|n| n.parent == Some(id)) {
			node.collapsed = !node.collapsed;
			flipped += 1;
		}
		debug!("toggled {} child(ren) of {}", flipped, id);
		flipped
	}

	/// Visible nodes, plus links whose endpoints both exist and are visible.
	pub fn filtered_view(&self) -> GraphView<'_> {
		let nodes = self.nodes.iter().filter(|n| !n.collapsed).collect();
		let links = self
			.links
			.iter()
			.filter_map(|link| {
				let source = self.node(link.source)?;
				let target = self.node(link.target)?;
				(!source.collapsed && !target.collapsed).then_some(ResolvedLink { source, target })
			})
			.collect();
		GraphView { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::SequenceColors;

	fn store() -> GraphStore<SequenceColors> {
		GraphStore::with_color_source(&GraphConfig::default(), SequenceColors::default())
	}

	fn root(store: &GraphStore<SequenceColors>) -> Node {
		store.root().cloned().unwrap()
	}

	fn add(store: &mut GraphStore<SequenceColors>, parent: NodeId, name: &str) -> NodeId {
		let parent = store.node(parent).cloned().unwrap();
		store.add_relationship(&parent, name, "desc").unwrap()
	}

	#[test]
	fn starts_with_single_root() {
		let store = store();
		assert_eq!(store.nodes().len(), 1);
		assert!(store.links().is_empty());
		let root = root(&store);
		assert_eq!(root.id, NodeId(1));
		assert_eq!(root.parent, None);
		assert!(!root.collapsed);
	}

	#[test]
	fn add_with_valid_input() {
		let mut store = store();
		let root = root(&store);

		let id = store.add_relationship(&root, "A", "desc").unwrap();

		assert_eq!(store.nodes().len(), 2);
		assert_eq!(store.links().len(), 1);
		let child = store.node(id).unwrap();
		assert_eq!(child.parent, Some(NodeId(1)));
		assert_eq!(child.parent_color, root.child_color);
		assert_eq!(child.child_color, "#6aa84f");
		assert_eq!(child.description.as_deref(), Some("desc"));
		assert_eq!(
			store.links()[0],
			Link {
				source: NodeId(1),
				target: id
			}
		);
	}

	#[test]
	fn add_with_missing_fields_changes_nothing() {
		let mut store = store();
		let root = root(&store);

		assert_eq!(
			store.add_relationship(&root, "", "desc"),
			Err(ValidationError::MissingName)
		);
		assert_eq!(
			store.add_relationship(&root, "A", ""),
			Err(ValidationError::MissingDescription)
		);
		assert_eq!(store.nodes().len(), 1);
		assert!(store.links().is_empty());

		// A failed add must not consume an id.
		assert_eq!(add(&mut store, NodeId(1), "A"), NodeId(2));
	}

	#[test]
	fn add_stores_input_as_given() {
		let mut store = store();
		let root = root(&store);

		let blank = store.add_relationship(&root, " ", "desc").unwrap();
		assert_eq!(store.node(blank).unwrap().name, " ");

		let padded = store.add_relationship(&root, "  A  ", " d ").unwrap();
		let node = store.node(padded).unwrap();
		assert_eq!(node.name, "  A  ");
		assert_eq!(node.description.as_deref(), Some(" d "));
	}

	#[test]
	fn edit_preserves_topology_and_colors() {
		let mut store = store();
		let id = add(&mut store, NodeId(1), "A");
		let before = store.node(id).cloned().unwrap();

		store.edit_relationship(id, "Renamed", "new desc");

		let after = store.node(id).unwrap();
		assert_eq!(after.name, "Renamed");
		assert_eq!(after.description.as_deref(), Some("new desc"));
		assert_eq!(after.id, before.id);
		assert_eq!(after.parent, before.parent);
		assert_eq!(after.parent_color, before.parent_color);
		assert_eq!(after.child_color, before.child_color);
		assert_eq!(after.collapsed, before.collapsed);
		assert_eq!(store.links().len(), 1);
	}

	#[test]
	fn edit_does_not_validate() {
		let mut store = store();
		let id = add(&mut store, NodeId(1), "A");
		store.edit_relationship(id, "", "");
		assert_eq!(store.node(id).unwrap().name, "");
	}

	#[test]
	fn delete_removes_incident_links_only() {
		let mut store = store();
		let a = add(&mut store, NodeId(1), "A");
		let b = add(&mut store, NodeId(1), "B");
		let a1 = add(&mut store, a, "A1");
		let a2 = add(&mut store, a, "A2");
		let untouched: Vec<Link> = store
			.links()
			.iter()
			.copied()
			.filter(|l| !l.touches(a))
			.collect();
		let orphan_before = store.node(a1).cloned().unwrap();

		let removed = store.delete_relationship(a).unwrap();

		assert_eq!(removed.id, a);
		assert!(store.node(a).is_none());
		assert_eq!(store.links(), untouched.as_slice());
		assert_eq!(store.links().len(), 1);
		assert!(store.node(b).is_some());
		assert_eq!(store.node(a1), Some(&orphan_before));
		let orphans: Vec<NodeId> = store.orphans().map(|n| n.id).collect();
		assert_eq!(orphans, [a1, a2]);
	}

	#[test]
	fn delete_unknown_id_is_noop() {
		let mut store = store();
		add(&mut store, NodeId(1), "A");
		assert!(store.delete_relationship(NodeId(99)).is_none());
		assert_eq!(store.nodes().len(), 2);
		assert_eq!(store.links().len(), 1);
	}

	#[test]
	fn ids_are_not_reused_after_delete() {
		let mut store = store();
		let a = add(&mut store, NodeId(1), "A");
		let b = add(&mut store, NodeId(1), "B");
		store.delete_relationship(a);

		let c = add(&mut store, NodeId(1), "C");

		assert_ne!(c, a);
		assert_ne!(c, b);
		assert_eq!(c, NodeId(4));
	}

	#[test]
	fn collapse_toggles_only_direct_children() {
		let mut store = store();
		let p = add(&mut store, NodeId(1), "P");
		let sibling = add(&mut store, NodeId(1), "S");
		let c1 = add(&mut store, p, "C1");
		let c2 = add(&mut store, p, "C2");
		let grandchild = add(&mut store, c1, "G");

		assert_eq!(store.toggle_expand_collapse(p), 2);

		assert!(store.node(c1).unwrap().collapsed);
		assert!(store.node(c2).unwrap().collapsed);
		assert!(!store.node(p).unwrap().collapsed);
		assert!(!store.node(sibling).unwrap().collapsed);
		assert!(!store.node(grandchild).unwrap().collapsed);
		assert!(store.has_hidden_children(p));

		store.toggle_expand_collapse(p);
		assert!(!store.node(c1).unwrap().collapsed);
		assert!(!store.has_hidden_children(p));
	}

	#[test]
	fn toggle_on_leaf_flips_nothing() {
		let mut store = store();
		let a = add(&mut store, NodeId(1), "A");
		assert_eq!(store.toggle_expand_collapse(a), 0);
	}

	#[test]
	fn filtered_view_hides_collapsed_nodes_and_their_links() {
		let mut store = store();
		let p = add(&mut store, NodeId(1), "P");
		let c = add(&mut store, p, "C");
		let g = add(&mut store, c, "G");
		store.toggle_expand_collapse(p);

		let view = store.filtered_view();

		assert!(!view.contains(c));
		// Grandchildren keep their own flag and stay visible.
		assert!(view.contains(g));
		assert!(view.contains(p));
		assert_eq!(view.links.len(), 1);
		for link in &view.links {
			assert!(!link.source.collapsed && !link.target.collapsed);
			assert_ne!(link.source.id, c);
			assert_ne!(link.target.id, c);
		}
	}

	#[test]
	fn filtered_view_is_idempotent() {
		let mut store = store();
		let p = add(&mut store, NodeId(1), "P");
		add(&mut store, p, "C");
		store.toggle_expand_collapse(p);

		assert_eq!(store.filtered_view(), store.filtered_view());
		assert_eq!(store.nodes().len(), 3);
	}

	#[test]
	fn filtered_view_skips_links_to_missing_nodes() {
		let mut store = store();
		let a = add(&mut store, NodeId(1), "A");
		store.delete_relationship(NodeId(1));

		// The child still points at the deleted root, but no link survives.
		let view = store.filtered_view();
		assert_eq!(view.nodes.len(), 1);
		assert!(view.links.is_empty());
		assert_eq!(store.node(a).unwrap().parent, Some(NodeId(1)));
	}

	#[test]
	fn resolved_link_label_joins_names() {
		let mut store = store();
		add(&mut store, NodeId(1), "Child");
		let view = store.filtered_view();
		assert_eq!(view.links[0].label(), "Node 1 -> Child");
	}
}
