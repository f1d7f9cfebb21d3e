use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;
use crate::config::CanvasConfig;
use crate::model::NodeId;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: String,
	pub color: String,
	pub avatar: Option<String>,
	pub has_hidden_children: bool,
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	/// Pointer left the click tolerance since the press.
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Saved placement of a node across simulation rebuilds.
#[derive(Clone, Copy, Debug)]
struct Placement {
	x: f32,
	y: f32,
	anchored: bool,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hovered: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub config: CanvasConfig,
	edges: Vec<EdgeInfo>,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, config: CanvasConfig) -> Self {
		let mut state = Self {
			graph: simulation(),
			edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: config.initial_zoom,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			animation_running: true,
			config,
		};
		state.load(data, &HashMap::new());
		state
	}

	/// Replace the drawn graph, keeping the positions of nodes that survive.
	pub fn sync(&mut self, data: &GraphData) {
		let mut previous = HashMap::new();
		self.graph.visit_nodes(|node| {
			previous.insert(
				node.data.user_data.id,
				Placement {
					x: node.x(),
					y: node.y(),
					anchored: node.data.is_anchor,
				},
			);
		});
		self.drag = DragState::default();
		self.hovered = None;
		self.load(data, &previous);
	}

	fn load(&mut self, data: &GraphData, previous: &HashMap<NodeId, Placement>) {
		let mut graph = simulation();
		let mut id_to_idx = HashMap::new();
		let mut placed: HashMap<NodeId, (f32, f32)> = HashMap::new();
		let count = data.nodes.len().max(1);
		let radius = self.config.node_radius;
		let ring = 3.0 * radius * (count as f64).sqrt();

		for (i, node) in data.nodes.iter().enumerate() {
			let placement = previous.get(&node.id).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count as f64;
				// New children spawn beside their parent rather than on the ring.
				let anchor = data
					.links
					.iter()
					.filter(|l| l.target == node.id)
					.find_map(|l| placed.get(&l.source));
				let (x, y) = match anchor {
					Some(&(px, py)) => (
						px as f64 + 3.0 * radius * angle.cos(),
						py as f64 + 3.0 * radius * angle.sin(),
					),
					None => (ring * angle.cos(), ring * angle.sin()),
				};
				Placement {
					x: x as f32,
					y: y as f32,
					anchored: false,
				}
			});
			placed.insert(node.id, (placement.x, placement.y));

			let idx = graph.add_node(NodeData {
				x: placement.x,
				y: placement.y,
				mass: 10.0,
				is_anchor: placement.anchored,
				user_data: NodeInfo {
					id: node.id,
					label: node.label.clone(),
					color: node.color.clone(),
					avatar: node.avatar.clone(),
					has_hidden_children: node.has_hidden_children,
				},
			});
			id_to_idx.insert(node.id, idx);
		}

		let mut edges = Vec::new();
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push(EdgeInfo {
					source: src,
					target: tgt,
					label: link.label.clone(),
				});
			}
		}

		self.graph = graph;
		self.edges = edges;
	}

	pub fn edges(&self) -> &[EdgeInfo] {
		&self.edges
	}

	/// World position of every node, keyed by simulation index.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let radius = self.config.node_radius;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < radius {
				found = Some(node.index());
			}
		});
		found
	}

	fn node_id(&self, idx: DefaultNodeIdx) -> Option<NodeId> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id);
			}
		});
		id
	}

	/// Press at screen position: grab a node or start panning.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				moved: false,
				start_x: x,
				start_y: y,
				..DragState::default()
			};
			let drag = &mut self.drag;
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			self.hovered = self.node_at_position(x, y);
		}

		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			let (sdx, sdy) = (x - self.drag.start_x, y - self.drag.start_y);
			if !self.drag.moved && (sdx * sdx + sdy * sdy).sqrt() <= self.config.click_tolerance {
				return;
			}
			self.drag.moved = true;
			let (nx, ny) = (
				self.drag.node_start_x + (sdx / self.transform.k) as f32,
				self.drag.node_start_y + (sdy / self.transform.k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Release the pointer. Returns the clicked node when the press landed on
	/// a node and never left the click tolerance.
	pub fn pointer_up(&mut self) -> Option<NodeId> {
		let clicked = match self.drag {
			DragState {
				active: true,
				node_idx: Some(idx),
				moved: false,
				..
			} => self.node_id(idx),
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn pointer_leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.hovered = None;
	}

	/// Zoom about the screen point `(x, y)`.
	pub fn zoom_at(&mut self, x: f64, y: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn node(id: u64, label: &str) -> GraphNode {
		GraphNode {
			id: NodeId(id),
			label: label.into(),
			color: "#3d85c6".into(),
			avatar: None,
			has_hidden_children: false,
		}
	}

	fn link(source: u64, target: u64) -> GraphLink {
		GraphLink {
			source: NodeId(source),
			target: NodeId(target),
			label: format!("{source} -> {target}"),
		}
	}

	fn single_root() -> ForceGraphState {
		let data = GraphData {
			nodes: vec![node(1, "Root")],
			links: vec![],
		};
		ForceGraphState::new(&data, 800.0, 600.0, CanvasConfig::default())
	}

	fn index_of(state: &ForceGraphState, id: u64) -> Option<DefaultNodeIdx> {
		let mut found = None;
		state.graph.visit_nodes(|n| {
			if n.data.user_data.id == NodeId(id) {
				found = Some(n.index());
			}
		});
		found
	}

	/// Screen coordinates of the node with `id`.
	fn screen_pos(state: &ForceGraphState, id: u64) -> (f64, f64) {
		let idx = index_of(state, id).unwrap();
		let (x, y) = state.positions()[&idx];
		(
			x * state.transform.k + state.transform.x,
			y * state.transform.k + state.transform.y,
		)
	}

	#[test]
	fn click_without_movement_reports_node() {
		let mut state = single_root();
		let (x, y) = screen_pos(&state, 1);

		state.pointer_down(x, y);
		state.pointer_move(x + 1.0, y);

		assert_eq!(state.pointer_up(), Some(NodeId(1)));
		assert!(!state.drag.active);
	}

	#[test]
	fn drag_is_not_a_click() {
		let mut state = single_root();
		let (x, y) = screen_pos(&state, 1);

		state.pointer_down(x, y);
		state.pointer_move(x + 50.0, y + 50.0);

		assert_eq!(state.pointer_up(), None);
		let idx = index_of(&state, 1).unwrap();
		let mut anchored = false;
		state.graph.visit_nodes(|n| {
			if n.index() == idx {
				anchored = n.data.is_anchor;
			}
		});
		assert!(anchored);
	}

	#[test]
	fn background_press_pans() {
		let mut state = single_root();
		let (x, y) = (5.0, 5.0);
		assert!(state.node_at_position(x, y).is_none());

		state.pointer_down(x, y);
		state.pointer_move(x + 20.0, y - 10.0);

		assert_eq!(state.transform.x, 400.0 + 20.0);
		assert_eq!(state.transform.y, 300.0 - 10.0);
		assert_eq!(state.pointer_up(), None);
		assert!(!state.pan.active);
	}

	#[test]
	fn sync_keeps_surviving_positions() {
		let mut state = single_root();
		let idx = index_of(&state, 1).unwrap();
		let before = state.positions()[&idx];

		state.sync(&GraphData {
			nodes: vec![node(1, "Root"), node(2, "Child")],
			links: vec![link(1, 2)],
		});

		let idx = index_of(&state, 1).unwrap();
		assert_eq!(state.positions()[&idx], before);
		assert!(index_of(&state, 2).is_some());
		assert_eq!(state.edges().len(), 1);
		assert_eq!(state.edges()[0].label, "1 -> 2");
	}

	#[test]
	fn sync_drops_links_to_hidden_nodes() {
		let mut state = single_root();
		state.sync(&GraphData {
			nodes: vec![node(1, "Root")],
			links: vec![link(1, 2)],
		});
		assert!(state.edges().is_empty());
		assert!(index_of(&state, 2).is_none());
	}

	#[test]
	fn zoom_is_clamped() {
		let mut state = single_root();
		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, true);
		}
		assert_eq!(state.transform.k, 10.0);
	}
}
