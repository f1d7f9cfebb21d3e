use leptos::prelude::*;

use super::layout::{self, Rect, ZOOM_STEP};
use super::registry::NodeTypeRegistry;
use super::types::FlowDiagram;

const FIT_PADDING: f64 = 40.0;

/// Read-only SVG rendering of a flow diagram, fitted to its nodes, with a
/// dotted background and zoom controls.
#[component]
pub fn FlowDiagramView(diagram: FlowDiagram, registry: NodeTypeRegistry) -> impl IntoView {
	let fitted = layout::fit_view(&diagram, &registry, FIT_PADDING);
	let zoom = RwSignal::new(1.0_f64);
	let view_box = move || fitted.zoomed(zoom.get());
	// Background extends well past the fitted box so zooming out stays dotted.
	let backdrop = fitted.zoomed(layout::MIN_ZOOM);

	let edges = diagram
		.edges
		.iter()
		.filter_map(|edge| {
			let geometry = layout::edge_geometry(edge, &diagram, &registry)?;
			let (lx, ly) = geometry.label_at;
			let (dash, class) = if edge.animated {
				("5", "flow-edge flow-edge-animated")
			} else {
				("none", "flow-edge")
			};
			let label = edge.label.clone().map(|text| {
				view! {
					<text
						x=lx.to_string()
						y=ly.to_string()
						class="flow-edge-label"
						text-anchor="middle"
						dominant-baseline="middle"
						font-size="10"
					>
						{text}
					</text>
				}
			});
			Some(view! {
				<g class=class>
					<path
						d=geometry.path
						fill="none"
						stroke="#b1b1b7"
						stroke-width="1.5"
						stroke-dasharray=dash
						marker-end="url(#flow-arrow)"
					/>
					{label}
				</g>
			})
		})
		.collect_view();

	let nodes = diagram
		.nodes
		.iter()
		.map(|node| {
			let style = registry.resolve(&node.node_type);
			let Rect { x, y, width, height } = layout::node_rect(node, &registry);
			let (cx, cy) = (x + width / 2.0, y + height / 2.0);
			let target_handle = style.target_handle.then(|| {
				view! { <circle cx=cx.to_string() cy=y.to_string() r="3" fill="#1a192b" /> }
			});
			let source_handle = style.source_handle.then(|| {
				view! {
					<circle cx=cx.to_string() cy=(y + height).to_string() r="3" fill="#1a192b" />
				}
			});
			view! {
				<g class="flow-node" data-type=node.node_type.clone()>
					<rect
						x=x.to_string()
						y=y.to_string()
						width=width.to_string()
						height=height.to_string()
						rx="3"
						fill=style.fill.clone()
						stroke=style.stroke.clone()
						stroke-width="1"
					/>
					<text
						x=cx.to_string()
						y=cy.to_string()
						fill=style.text_color.clone()
						text-anchor="middle"
						dominant-baseline="middle"
						font-size="12"
					>
						{node.data.label.clone()}
					</text>
					{target_handle}
					{source_handle}
				</g>
			}
		})
		.collect_view();

	view! {
		<div class="flow-diagram">
			<svg
				class="flow-canvas"
				width="100%"
				height="100%"
				preserveAspectRatio="xMidYMid meet"
				viewBox=move || view_box().to_view_box()
			>
				<defs>
					<pattern id="flow-dots" width="20" height="20" patternUnits="userSpaceOnUse">
						<circle cx="1" cy="1" r="1" fill="#91919a" />
					</pattern>
					<marker
						id="flow-arrow"
						viewBox="0 0 10 10"
						refX="10"
						refY="5"
						markerWidth="6"
						markerHeight="6"
						orient="auto-start-reverse"
					>
						<path d="M 0 0 L 10 5 L 0 10 z" fill="#b1b1b7" />
					</marker>
				</defs>
				<rect
					x=backdrop.x.to_string()
					y=backdrop.y.to_string()
					width=backdrop.width.to_string()
					height=backdrop.height.to_string()
					fill="url(#flow-dots)"
				/>
				{edges}
				{nodes}
			</svg>
			<div class="flow-controls">
				<button
					title="Zoom in"
					on:click=move |_| zoom.update(|z| *z = layout::clamp_zoom(*z * ZOOM_STEP))
				>
					"+"
				</button>
				<button
					title="Zoom out"
					on:click=move |_| zoom.update(|z| *z = layout::clamp_zoom(*z / ZOOM_STEP))
				>
					"-"
				</button>
				<button title="Fit view" on:click=move |_| zoom.set(1.0)>
					"Fit"
				</button>
			</div>
		</div>
	}
}
