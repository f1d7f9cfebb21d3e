pub mod flow_diagram;
pub mod force_graph;
pub mod relationship_modal;
