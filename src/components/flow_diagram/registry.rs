use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

/// How nodes of one type are drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeTypeStyle {
	pub fill: String,
	pub stroke: String,
	pub text_color: String,
	pub width: f64,
	pub height: f64,
	/// Incoming edges attach to a handle on the top edge.
	pub target_handle: bool,
	/// Outgoing edges leave from a handle on the bottom edge.
	pub source_handle: bool,
}

impl Default for NodeTypeStyle {
	fn default() -> Self {
		Self {
			fill: "#ffffff".into(),
			stroke: "#1a192b".into(),
			text_color: "#222222".into(),
			width: 150.0,
			height: 40.0,
			target_handle: true,
			source_handle: true,
		}
	}
}

pub const DEFAULT_TYPE: &str = "default";

/// Node type name -> style. Always holds `input`, `default` and `output`.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeTypeRegistry {
	types: HashMap<String, NodeTypeStyle>,
}

impl Default for NodeTypeRegistry {
	fn default() -> Self {
		let mut types = HashMap::new();
		types.insert(
			"input".into(),
			NodeTypeStyle {
				stroke: "#0041d0".into(),
				target_handle: false,
				..NodeTypeStyle::default()
			},
		);
		types.insert(DEFAULT_TYPE.into(), NodeTypeStyle::default());
		types.insert(
			"output".into(),
			NodeTypeStyle {
				stroke: "#ff0072".into(),
				source_handle: false,
				..NodeTypeStyle::default()
			},
		);
		Self { types }
	}
}

impl NodeTypeRegistry {
	/// Built-in types plus `extra`, which may override them.
	pub fn with_types(extra: impl IntoIterator<Item = (String, NodeTypeStyle)>) -> Self {
		let mut registry = Self::default();
		for (name, style) in extra {
			registry.register(name, style);
		}
		registry
	}

	pub fn register(&mut self, name: impl Into<String>, style: NodeTypeStyle) {
		self.types.insert(name.into(), style);
	}

	pub fn get(&self, name: &str) -> Option<&NodeTypeStyle> {
		self.types.get(name)
	}

	/// Style for `name`, falling back to the default type.
	pub fn resolve(&self, name: &str) -> &NodeTypeStyle {
		self.get(name).unwrap_or_else(|| {
			warn!("unknown flow node type {name:?}, using {DEFAULT_TYPE:?}");
			&self.types[DEFAULT_TYPE]
		})
	}
}
