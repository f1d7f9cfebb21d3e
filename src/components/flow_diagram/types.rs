//! Flow diagram input, in the node/edge shape flow editors exchange.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::registry::NodeTypeStyle;

fn default_node_type() -> String {
	"default".into()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowNodeData {
	pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
	pub id: String,
	/// Key into the node-type registry.
	#[serde(rename = "type", default = "default_node_type")]
	pub node_type: String,
	pub position: Position,
	#[serde(default)]
	pub data: FlowNodeData,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub label: Option<String>,
	/// Drawn with a moving dash.
	#[serde(default)]
	pub animated: bool,
}

/// A complete diagram, optionally carrying extra node types.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowDiagram {
	pub nodes: Vec<FlowNode>,
	pub edges: Vec<FlowEdge>,
	pub node_types: HashMap<String, NodeTypeStyle>,
}

impl FlowDiagram {
	pub fn node(&self, id: &str) -> Option<&FlowNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Diagram shown when the page supplies none.
	pub fn sample() -> Self {
		let node = |id: &str, node_type: &str, x: f64, y: f64, label: &str| FlowNode {
			id: id.into(),
			node_type: node_type.into(),
			position: Position { x, y },
			data: FlowNodeData {
				label: label.into(),
			},
		};
		let edge = |source: &str, target: &str, label: Option<&str>, animated: bool| FlowEdge {
			id: format!("e{source}-{target}"),
			source: source.into(),
			target: target.into(),
			label: label.map(Into::into),
			animated,
		};

		Self {
			nodes: vec![
				node("1", "input", 250.0, 0.0, "Collect sources"),
				node("2", "default", 100.0, 120.0, "Extract entities"),
				node("3", "default", 400.0, 120.0, "Extract relations"),
				node("4", "default", 250.0, 240.0, "Merge into graph"),
				node("5", "output", 250.0, 360.0, "Knowledge graph"),
			],
			edges: vec![
				edge("1", "2", None, false),
				edge("1", "3", None, false),
				edge("2", "4", Some("entities"), true),
				edge("3", "4", Some("relations"), true),
				edge("4", "5", None, false),
			],
			node_types: HashMap::new(),
		}
	}
}
