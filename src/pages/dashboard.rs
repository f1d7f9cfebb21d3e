use leptos::prelude::*;
use log::{debug, info, warn};

use crate::components::flow_diagram::{FlowDiagram, FlowDiagramView, NodeTypeRegistry};
use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::components::relationship_modal::RelationshipModal;
use crate::config::{CanvasConfig, DashboardConfig};
use crate::loader::{LoadError, load_script_json};
use crate::model::{EditorState, GraphStore, NodeId};

const FLOW_DATA_ID: &str = "flow-data";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	KnowledgeGraph,
	FlowGraph,
}

impl Tab {
	fn title(self) -> &'static str {
		match self {
			Tab::KnowledgeGraph => "Knowledge Graph",
			Tab::FlowGraph => "Flow Graph",
		}
	}
}

/// Flow diagram from the page, or the built-in sample.
fn load_flow_diagram() -> FlowDiagram {
	match load_script_json::<FlowDiagram>(FLOW_DATA_ID) {
		Ok(diagram) => {
			info!(
				"loaded flow diagram: {} nodes, {} edges",
				diagram.nodes.len(),
				diagram.edges.len()
			);
			diagram
		}
		Err(LoadError::MissingElement(_)) => {
			debug!("no #{FLOW_DATA_ID} payload, using sample flow diagram");
			FlowDiagram::sample()
		}
		Err(e) => {
			warn!("using sample flow diagram: {e}");
			FlowDiagram::sample()
		}
	}
}

#[component]
fn KnowledgeGraph(
	store: RwSignal<GraphStore>,
	editor: RwSignal<EditorState>,
	canvas: CanvasConfig,
) -> impl IntoView {
	let data = Signal::derive(move || store.with(|s| GraphData::project(s)));
	let on_node_click = Callback::new(move |id: NodeId| {
		if let Some(node) = store.with_untracked(|s| s.node(id).cloned()) {
			editor.update(|e| e.select_node(node));
		}
	});

	view! {
		<div class="knowledge-graph">
			<span class="kg-info">
				"Click on the node to Add a new relationship or to delete the selected Node."
			</span>
			<ForceGraphCanvas data=data on_node_click=on_node_click config=canvas />
			<Show when=move || editor.with(|e| e.open)>
				<RelationshipModal store=store editor=editor />
			</Show>
		</div>
	}
}

/// Tabbed dashboard: the editable knowledge graph and the flow diagram.
///
/// The graph store lives here so edits survive switching tabs.
#[component]
pub fn Dashboard() -> impl IntoView {
	let config = use_context::<DashboardConfig>().unwrap_or_default();
	let store = RwSignal::new(GraphStore::new(&config.graph));
	let editor = RwSignal::new(EditorState::default());
	let active_tab = RwSignal::new(Tab::KnowledgeGraph);

	let flow = load_flow_diagram();
	let registry = NodeTypeRegistry::with_types(flow.node_types.clone());
	let canvas = config.canvas;

	let tab_button = move |tab: Tab| {
		view! {
			<div
				class="btn"
				class:active=move || active_tab.get() == tab
				on:click=move |_| active_tab.set(tab)
			>
				{tab.title()}
			</div>
		}
	};

	view! {
		<div class="dashboard-container">
			<div class="d-flex header-btns">
				{tab_button(Tab::KnowledgeGraph)}
				{tab_button(Tab::FlowGraph)}
			</div>
			{move || match active_tab.get() {
				Tab::KnowledgeGraph => {
					view! { <KnowledgeGraph store=store editor=editor canvas=canvas.clone() /> }
						.into_any()
				}
				Tab::FlowGraph => {
					view! { <FlowDiagramView diagram=flow.clone() registry=registry.clone() /> }
						.into_any()
				}
			}}
		</div>
	}
}
