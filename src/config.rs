//! Dashboard configuration.
//!
//! Everything has a default, so a page without a `dashboard-config` payload (or
//! with a partial one) still gets a working dashboard.

use serde::{Deserialize, Serialize};

use crate::model::Palette;

/// Top-level configuration, read from `<script id="dashboard-config">`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
	/// Knowledge graph seed.
	pub graph: GraphConfig,
	/// Canvas look and feel.
	pub canvas: CanvasConfig,
}

impl DashboardConfig {
	/// Parse a JSON payload; missing fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

/// Seed data and palette for a knowledge graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Colors new children pick from.
	pub palette: Palette,
	/// The initial node.
	pub root: RootConfig,
}

/// The single node every graph starts with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
	/// Root label.
	pub name: String,
	/// Root fill color.
	pub parent_color: String,
	/// Fill color of the root's children.
	pub child_color: String,
	/// Optional root image URL.
	pub avatar: Option<String>,
}

impl Default for RootConfig {
	fn default() -> Self {
		Self {
			name: "Node 1".into(),
			parent_color: "#735da5".into(),
			child_color: "#3d85c6".into(),
			avatar: None,
		}
	}
}

/// Visual tuning for the knowledge graph canvas. Sizes are in world units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
	/// Canvas clear color.
	pub background: String,
	/// Node circle radius.
	pub node_radius: f64,
	/// Label font size.
	pub font_size: f64,
	/// Node and link label color.
	pub label_color: String,
	/// Link stroke color.
	pub link_color: String,
	/// Link stroke width.
	pub link_width: f64,
	/// Zoom level the view starts at (clamped to 0.1..10.0 on interaction).
	pub initial_zoom: f64,
	/// Mouse travel in pixels below which a press-release counts as a click.
	pub click_tolerance: f64,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			background: "#ffffff".into(),
			node_radius: 10.0,
			font_size: 3.0,
			label_color: "black".into(),
			link_color: "black".into(),
			link_width: 0.5,
			initial_zoom: 3.0,
			click_tolerance: 4.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_yields_defaults() {
		let config = DashboardConfig::from_json("{}").unwrap();
		assert_eq!(config, DashboardConfig::default());
		assert_eq!(config.graph.root.name, "Node 1");
		assert_eq!(config.graph.palette.len(), 9);
	}

	#[test]
	fn partial_config_overrides_only_given_fields() {
		let config = DashboardConfig::from_json(
			r##"{
				"graph": { "palette": ["#000000"], "root": { "name": "Origin" } },
				"canvas": { "initial_zoom": 1.5 }
			}"##,
		)
		.unwrap();

		assert_eq!(config.graph.palette.colors(), ["#000000"]);
		assert_eq!(config.graph.root.name, "Origin");
		assert_eq!(config.graph.root.child_color, "#3d85c6");
		assert_eq!(config.canvas.initial_zoom, 1.5);
		assert_eq!(config.canvas.node_radius, 10.0);
	}

	#[test]
	fn empty_palette_fails_to_parse() {
		let err = DashboardConfig::from_json(r#"{ "graph": { "palette": [] } }"#).unwrap_err();
		assert!(err.to_string().contains("at least one color"));
	}
}
