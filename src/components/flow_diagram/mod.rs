//! Static flow diagram rendered as SVG from externally supplied nodes, edges
//! and node types.

mod component;
mod layout;
mod registry;
mod types;

pub use component::FlowDiagramView;
pub use registry::{NodeTypeRegistry, NodeTypeStyle};
pub use types::{FlowDiagram, FlowEdge, FlowNode, FlowNodeData, Position};
