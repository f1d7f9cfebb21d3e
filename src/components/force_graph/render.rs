use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::state::{ForceGraphState, NodeInfo};

const TOOLTIP_FONT: &str = "12px sans-serif";

/// Avatar images keyed by URL, loaded on first use.
#[derive(Default)]
pub struct ImageCache {
	images: HashMap<String, HtmlImageElement>,
}

impl ImageCache {
	/// The image for `src`, once it has finished loading.
	fn ready(&mut self, src: &str) -> Option<&HtmlImageElement> {
		let image = match self.images.entry(src.to_string()) {
			Entry::Occupied(entry) => entry.into_mut(),
			Entry::Vacant(entry) => {
				let image = HtmlImageElement::new().ok()?;
				image.set_src(src);
				entry.insert(image)
			}
		};
		(image.complete() && image.natural_width() > 0).then_some(&*image)
	}
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, images: &mut ImageCache) {
	ctx.set_fill_style_str(&state.config.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	let positions = state.positions();
	draw_links(state, ctx, &positions);
	draw_nodes(state, ctx, images);
	ctx.restore();
	draw_tooltip(state, ctx, &positions);
}

fn draw_links(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
) {
	let config = &state.config;
	ctx.set_font(&format!("{}px sans-serif", config.font_size));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for edge in state.edges() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};

		ctx.set_fill_style_str("rgba(0, 0, 0, 0.8)");
		let _ = ctx.fill_text(&edge.label, (x1 + x2) / 2.0, (y1 + y2) / 2.0);

		ctx.set_line_width(config.link_width);
		ctx.set_stroke_style_str(&config.link_color);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, images: &mut ImageCache) {
	let config = &state.config;
	let radius = config.node_radius;

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;

		let avatar = match info.avatar.as_deref() {
			Some(src) => images.ready(src),
			None => None,
		};
		match avatar {
			Some(image) => {
				ctx.save();
				ctx.begin_path();
				let _ = ctx.ellipse(x, y, radius, radius, 0.0, 0.0, 2.0 * PI);
				ctx.clip();
				let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
					image,
					x - radius,
					y - radius,
					2.0 * radius,
					2.0 * radius,
				);
				ctx.restore();

				ctx.set_font(&format!("{}px Arial", config.font_size));
				ctx.set_fill_style_str(&config.label_color);
				ctx.set_text_align("center");
				ctx.set_text_baseline("alphabetic");
				let _ = ctx.fill_text(&info.label, x, y + radius + config.font_size);
			}
			None => {
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
				ctx.set_fill_style_str(&info.color);
				ctx.fill();

				ctx.set_font(&format!("bold {}px Arial", config.font_size));
				ctx.set_fill_style_str(&config.label_color);
				ctx.set_text_align("center");
				ctx.set_text_baseline("middle");
				let _ = ctx.fill_text(&info.label, x, y);
			}
		}

		if info.has_hidden_children {
			draw_collapsed_ring(ctx, x, y, radius, info);
		}
		if state.hovered == Some(node.index()) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 1.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(0, 0, 0, 0.6)");
			ctx.set_line_width(0.8);
			ctx.stroke();
		}
	});
}

/// Dashed outline marking a node whose children are collapsed.
fn draw_collapsed_ring(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, info: &NodeInfo) {
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(1.5),
		&JsValue::from_f64(1.0),
	));
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius + 2.0, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&info.color);
	ctx.set_line_width(0.6);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Node name tooltip, drawn in screen space above the hovered node.
fn draw_tooltip(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
) {
	let Some(idx) = state.hovered else {
		return;
	};
	let Some(&(x, y)) = positions.get(&idx) else {
		return;
	};
	let mut label = None;
	state.graph.visit_nodes(|node| {
		if node.index() == idx {
			label = Some(node.data.user_data.label.clone());
		}
	});
	let Some(label) = label.filter(|l| !l.is_empty()) else {
		return;
	};

	let (sx, sy) = (
		x * state.transform.k + state.transform.x,
		(y - state.config.node_radius) * state.transform.k + state.transform.y - 10.0,
	);
	ctx.set_font(TOOLTIP_FONT);
	let width = ctx
		.measure_text(&label)
		.map(|m| m.width())
		.unwrap_or(label.len() as f64 * 7.0);
	let (pad, height) = (6.0, 20.0);

	ctx.set_fill_style_str("rgba(32, 32, 32, 0.85)");
	ctx.fill_rect(sx - width / 2.0 - pad, sy - height, width + 2.0 * pad, height);
	ctx.set_fill_style_str("white");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&label, sx, sy - height / 2.0);
}
