//! Force-directed canvas for the knowledge graph: physics via `force_graph`,
//! pan/zoom/drag, hover tooltips and node-click events.

mod component;
mod render;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use types::{GraphData, GraphLink, GraphNode};
