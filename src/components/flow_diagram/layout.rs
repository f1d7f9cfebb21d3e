//! Geometry for the flow diagram: node boxes, edge curves and the viewBox.

use super::registry::NodeTypeRegistry;
use super::types::{FlowDiagram, FlowEdge, FlowNode};

pub const ZOOM_STEP: f64 = 1.2;
pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// Smallest rect containing both.
	pub fn union(&self, other: &Rect) -> Rect {
		let (x, y) = (self.x.min(other.x), self.y.min(other.y));
		let right = (self.x + self.width).max(other.x + other.width);
		let bottom = (self.y + self.height).max(other.y + other.height);
		Rect {
			x,
			y,
			width: right - x,
			height: bottom - y,
		}
	}

	/// Grow by `padding` on every side.
	pub fn inflate(&self, padding: f64) -> Rect {
		Rect {
			x: self.x - padding,
			y: self.y - padding,
			width: self.width + 2.0 * padding,
			height: self.height + 2.0 * padding,
		}
	}

	/// Same center, size divided by `zoom`.
	pub fn zoomed(&self, zoom: f64) -> Rect {
		let (cx, cy) = self.center();
		let (width, height) = (self.width / zoom, self.height / zoom);
		Rect {
			x: cx - width / 2.0,
			y: cy - height / 2.0,
			width,
			height,
		}
	}

	pub fn to_view_box(&self) -> String {
		format!("{} {} {} {}", self.x, self.y, self.width, self.height)
	}
}

pub fn node_rect(node: &FlowNode, registry: &NodeTypeRegistry) -> Rect {
	let style = registry.resolve(&node.node_type);
	Rect {
		x: node.position.x,
		y: node.position.y,
		width: style.width,
		height: style.height,
	}
}

/// Bounding box of every node, or `None` for an empty diagram.
pub fn bounds(diagram: &FlowDiagram, registry: &NodeTypeRegistry) -> Option<Rect> {
	diagram
		.nodes
		.iter()
		.map(|n| node_rect(n, registry))
		.reduce(|acc, r| acc.union(&r))
}

/// Padded bounds used as the initial viewBox. Empty diagrams get a unit box.
pub fn fit_view(diagram: &FlowDiagram, registry: &NodeTypeRegistry, padding: f64) -> Rect {
	bounds(diagram, registry)
		.map(|b| b.inflate(padding))
		.unwrap_or(Rect {
			x: 0.0,
			y: 0.0,
			width: 1.0,
			height: 1.0,
		})
}

pub fn clamp_zoom(zoom: f64) -> f64 {
	zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// A resolved edge ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeGeometry {
	/// SVG path data.
	pub path: String,
	pub label_at: (f64, f64),
}

/// Cubic curve from the bottom handle of `source` to the top handle of
/// `target`.
pub fn edge_path(source: &Rect, target: &Rect) -> EdgeGeometry {
	let (sx, sy) = (source.x + source.width / 2.0, source.y + source.height);
	let (tx, ty) = (target.x + target.width / 2.0, target.y);
	let bend = ((ty - sy).abs() / 2.0).max(25.0);
	EdgeGeometry {
		path: format!(
			"M {sx} {sy} C {sx} {c1}, {tx} {c2}, {tx} {ty}",
			c1 = sy + bend,
			c2 = ty - bend
		),
		label_at: ((sx + tx) / 2.0, (sy + ty) / 2.0),
	}
}

/// Geometry for `edge`, or `None` when an endpoint is missing.
pub fn edge_geometry(
	edge: &FlowEdge,
	diagram: &FlowDiagram,
	registry: &NodeTypeRegistry,
) -> Option<EdgeGeometry> {
	let source = diagram.node(&edge.source)?;
	let target = diagram.node(&edge.target)?;
	Some(edge_path(
		&node_rect(source, registry),
		&node_rect(target, registry),
	))
}
