//! State of the relationship editor dialog.
//!
//! The dialog opens on a node click and then acts on that node snapshot:
//! add a child, edit it, delete it, or expand/collapse its children.

use log::debug;

use super::error::ValidationError;
use super::palette::ColorSource;
use super::store::GraphStore;
use super::types::{Node, NodeId};

/// What the dialog's form submits as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorAction {
	/// Create a child of the selected node.
	AddRelationship,
	/// Rename and redescribe the selected node.
	EditRelationship,
}

impl EditorAction {
	/// Form heading.
	pub fn title(self) -> &'static str {
		match self {
			EditorAction::AddRelationship => "Add Relationship",
			EditorAction::EditRelationship => "Edit Relationship",
		}
	}
}

/// Outcome of an accepted form submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
	/// A child node was created.
	Added(NodeId),
	/// The selection was renamed.
	Edited,
	/// Nothing to apply; the dialog just closed.
	Closed,
}

impl Submission {
	/// Whether the store was mutated.
	pub fn changed_graph(self) -> bool {
		!matches!(self, Submission::Closed)
	}
}

/// Relationship dialog state. Plain data, driven by the modal component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorState {
	/// Snapshot of the clicked node.
	pub selected: Option<Node>,
	/// Dialog visibility.
	pub open: bool,
	/// Chosen form, `None` while the action buttons are shown.
	pub action: Option<EditorAction>,
	/// Set when an add-mode submission lacked a name or description.
	pub validation_failed: bool,
}

impl EditorState {
	/// Record the clicked node and open the dialog. The graph is untouched.
	pub fn select_node(&mut self, node: Node) {
		debug!("selected node {}", node.id);
		self.selected = Some(node);
		self.open = true;
	}

	/// Switch from the action buttons to a form.
	pub fn choose(&mut self, action: EditorAction) {
		self.action = Some(action);
	}

	/// Return to the action buttons.
	pub fn go_back(&mut self) {
		self.action = None;
		self.validation_failed = false;
	}

	/// Hide the dialog. The selection is kept.
	pub fn close(&mut self) {
		self.open = false;
		self.action = None;
	}

	/// Id of the selected node, if any.
	pub fn selected_id(&self) -> Option<NodeId> {
		self.selected.as_ref().map(|n| n.id)
	}

	/// Apply the form for the current action.
	///
	/// A validation failure raises the flag and keeps the dialog open; the
	/// store is not touched.
	pub fn submit<C: ColorSource>(
		&mut self,
		store: &mut GraphStore<C>,
		name: &str,
		description: &str,
	) -> Result<Submission, ValidationError> {
		let Some(selected) = self.selected.as_ref() else {
			self.close();
			return Ok(Submission::Closed);
		};

		let submission = match self.action {
			Some(EditorAction::AddRelationship) => {
				match store.add_relationship(selected, name, description) {
					Ok(id) => Submission::Added(id),
					Err(err) => {
						self.validation_failed = true;
						return Err(err);
					}
				}
			}
			Some(EditorAction::EditRelationship) => {
				store.edit_relationship(selected.id, name, description);
				Submission::Edited
			}
			None => Submission::Closed,
		};

		self.validation_failed = false;
		self.close();
		Ok(submission)
	}

	/// Delete the selected node and close the dialog.
	pub fn delete<C: ColorSource>(&mut self, store: &mut GraphStore<C>) -> Option<Node> {
		let removed = self
			.selected_id()
			.and_then(|id| store.delete_relationship(id));
		self.close();
		removed
	}

	/// Toggle the selection's children. The dialog stays open.
	pub fn expand_collapse<C: ColorSource>(&mut self, store: &mut GraphStore<C>) -> usize {
		self.selected_id()
			.map(|id| store.toggle_expand_collapse(id))
			.unwrap_or(0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::GraphConfig;
	use crate::model::SequenceColors;

	fn setup() -> (GraphStore<SequenceColors>, EditorState) {
		let store =
			GraphStore::with_color_source(&GraphConfig::default(), SequenceColors::default());
		let mut editor = EditorState::default();
		editor.select_node(store.root().cloned().unwrap());
		(store, editor)
	}

	#[test]
	fn selecting_opens_without_mutating() {
		let (store, editor) = setup();
		assert!(editor.open);
		assert_eq!(editor.selected_id(), Some(NodeId(1)));
		assert_eq!(editor.action, None);
		assert_eq!(store.nodes().len(), 1);
	}

	#[test]
	fn invalid_add_keeps_dialog_open_with_flag() {
		let (mut store, mut editor) = setup();
		editor.choose(EditorAction::AddRelationship);

		let result = editor.submit(&mut store, "", "desc");

		assert_eq!(result, Err(ValidationError::MissingName));
		assert!(editor.open);
		assert!(editor.validation_failed);
		assert_eq!(editor.action, Some(EditorAction::AddRelationship));
		assert_eq!(store.nodes().len(), 1);

		editor.go_back();
		assert!(!editor.validation_failed);
		assert_eq!(editor.action, None);
	}

	#[test]
	fn valid_add_closes_and_clears_flag() {
		let (mut store, mut editor) = setup();
		editor.choose(EditorAction::AddRelationship);
		let _ = editor.submit(&mut store, "", "");

		let result = editor.submit(&mut store, "A", "desc");

		assert_eq!(result, Ok(Submission::Added(NodeId(2))));
		assert!(!editor.open);
		assert!(!editor.validation_failed);
		assert_eq!(editor.action, None);
		assert_eq!(store.links().len(), 1);
	}

	#[test]
	fn edit_submission_renames_selection() {
		let (mut store, mut editor) = setup();
		editor.choose(EditorAction::EditRelationship);

		assert_eq!(
			editor.submit(&mut store, "Root", "top"),
			Ok(Submission::Edited)
		);

		assert_eq!(store.root().unwrap().name, "Root");
		assert!(!editor.open);
	}

	#[test]
	fn submit_without_action_just_closes() {
		let (mut store, mut editor) = setup();
		let result = editor.submit(&mut store, "x", "y");
		assert_eq!(result, Ok(Submission::Closed));
		assert!(!result.unwrap().changed_graph());
		assert!(!editor.open);
		assert_eq!(store.root().unwrap().name, "Node 1");
	}

	#[test]
	fn only_applied_submissions_report_a_graph_change() {
		let (mut store, mut editor) = setup();
		editor.choose(EditorAction::AddRelationship);
		let before = store.nodes().to_vec();

		assert!(editor.submit(&mut store, "A", "").is_err());
		assert_eq!(store.nodes(), before.as_slice());

		let added = editor.submit(&mut store, "A", "desc").unwrap();
		assert!(added.changed_graph());

		editor.select_node(store.root().cloned().unwrap());
		editor.choose(EditorAction::EditRelationship);
		assert!(editor.submit(&mut store, "Root", "top").unwrap().changed_graph());
	}

	#[test]
	fn delete_removes_selection_and_closes() {
		let (mut store, mut editor) = setup();
		let child = {
			let root = store.root().cloned().unwrap();
			store.add_relationship(&root, "A", "desc").unwrap()
		};
		editor.select_node(store.node(child).cloned().unwrap());

		let removed = editor.delete(&mut store).map(|n| n.id);

		assert_eq!(removed, Some(child));
		assert!(!editor.open);
		assert!(store.links().is_empty());
	}

	#[test]
	fn expand_collapse_keeps_dialog_open() {
		let (mut store, mut editor) = setup();
		let root = store.root().cloned().unwrap();
		store.add_relationship(&root, "A", "desc").unwrap();

		assert_eq!(editor.expand_collapse(&mut store), 1);

		assert!(editor.open);
		assert_eq!(store.filtered_view().nodes.len(), 1);
	}

	#[test]
	fn action_titles() {
		assert_eq!(EditorAction::AddRelationship.title(), "Add Relationship");
		assert_eq!(EditorAction::EditRelationship.title(), "Edit Relationship");
	}
}
