use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render::{self, ImageCache};
use super::state::ForceGraphState;
use super::types::GraphData;
use crate::config::CanvasConfig;
use crate::model::NodeId;

struct GraphContext {
	state: ForceGraphState,
	images: ImageCache,
}

/// Shared stop flag for the frame loop. Set on unmount; the loop sees it on
/// its next frame and tears itself down.
#[derive(Clone, Debug, Default)]
struct LoopHandle {
	stopped: Arc<AtomicBool>,
}

impl LoopHandle {
	fn stop(&self) {
		self.stopped.store(true, Ordering::Relaxed);
	}

	fn is_stopped(&self) -> bool {
		self.stopped.load(Ordering::Relaxed)
	}
}

fn local_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> (f64, f64) {
	let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Interactive force-directed view of the knowledge graph.
///
/// The simulation is rebuilt whenever `data` changes; nodes that survive keep
/// their positions. A press and release on a node without dragging it calls
/// `on_node_click`.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	on_node_click: Callback<NodeId>,
	#[prop(optional)] config: CanvasConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	let frame_loop = LoopHandle::default();
	let frame_loop_stop = frame_loop.clone();
	on_cleanup(move || frame_loop_stop.stop());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(&data.get_untracked(), w, h, config.clone()),
			images: ImageCache::default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner, resize_anim) =
			(context_init.clone(), animate_init.clone(), resize_cb_init.clone());
		let frame_loop = frame_loop.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if frame_loop.is_stopped() {
				let window = web_sys::window().unwrap();
				if let Some(cb) = resize_anim.borrow_mut().take() {
					let _ = window
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				context_anim.borrow_mut().take();
				debug!("force graph frame loop stopped");
				// Breaks the self-reference; wasm-bindgen frees the closure once
				// this call returns.
				animate_inner.borrow_mut().take();
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.state.animation_running {
					c.state.tick(0.016);
				}
				render::render(&c.state, &ctx, &mut c.images);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_sync = context.clone();
	Effect::new(move |_| {
		let data = data.get();
		if let Some(ref mut c) = *context_sync.borrow_mut() {
			c.state.sync(&data);
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = local_position(canvas_ref, &ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = local_position(canvas_ref, &ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(x, y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		// Release the borrow before the callback mutates the graph.
		let clicked = context_mu
			.borrow_mut()
			.as_mut()
			.and_then(|c| c.state.pointer_up());
		if let Some(id) = clicked {
			on_node_click.run(id);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let (x, y) = local_position(canvas_ref, &ev);
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.zoom_at(x, y, ev.delta_y() <= 0.0);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stopping_one_handle_stops_its_clones() {
		let handle = LoopHandle::default();
		let in_loop = handle.clone();
		assert!(!in_loop.is_stopped());

		handle.stop();
		assert!(in_loop.is_stopped());
	}

	#[test]
	fn separate_mounts_have_independent_loops() {
		let first = LoopHandle::default();
		let second = LoopHandle::default();

		first.stop();
		assert!(first.is_stopped());
		assert!(!second.is_stopped());
	}
}
