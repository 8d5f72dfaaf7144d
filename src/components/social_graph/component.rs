use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::GraphConfig;
use super::legend::Legend;
use super::loader::fetch_dataset;
use super::popup::{NodePopup, PopupState};
use super::render;
use super::report::{ConsoleReporter, ErrorReporter, prepare_graph};
use super::state::SocialGraphState;

const FRAME_DT: f32 = 0.016;

type SharedState = Rc<RefCell<Option<SocialGraphState>>>;
type SharedCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Force-directed follow graph, loaded once from `config.dataset_path`.
#[component]
pub fn SocialGraphCanvas(
	#[prop(optional)] config: GraphConfig,
	#[prop(optional)] reporter: Option<Rc<dyn ErrorReporter>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: SharedCallback = Rc::new(RefCell::new(None));
	let resize_cb: SharedCallback = Rc::new(RefCell::new(None));
	let started = Rc::new(Cell::new(false));
	let popup = RwSignal::new(PopupState::default());
	let reporter: Rc<dyn ErrorReporter> =
		reporter.unwrap_or_else(|| Rc::new(ConsoleReporter) as Rc<dyn ErrorReporter>);
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		// The dataset is loaded exactly once per component.
		if started.replace(true) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window; social graph disabled");
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window).unwrap_or((800.0, 600.0))
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

		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas 2d context unavailable; social graph disabled");
			return;
		};

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (config, reporter) = (config.clone(), reporter.clone());
		let (state_load, animate_load) = (state_init.clone(), animate_init.clone());
		spawn_local(async move {
			let records = fetch_dataset(&config.dataset_path).await;
			let graph = prepare_graph(records, &config, reporter.as_ref());
			if graph.is_empty() {
				warn!("social graph is empty; nothing to draw");
			}
			// The window may have been resized while the fetch was in flight.
			let (w, h) = (canvas.width() as f64, canvas.height() as f64);
			let layout = SocialGraphState::new(&graph, &config, w, h);
			info!("social graph ready with {} nodes", layout.node_count());
			*state_load.borrow_mut() = Some(layout);
			start_animation(state_load, animate_load, ctx);
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		// Primary button only.
		if ev.button() != 0 {
			return;
		}
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if s.is_dragging() {
				return;
			}
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag_start(idx, x, y);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let mut guard = state_mm.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};
		if s.is_dragging() {
			s.drag_move(x, y);
			return;
		}
		let hovered = s.node_at_position(x, y);
		if !s.set_hover(hovered) {
			return;
		}
		match hovered.and_then(|idx| s.person(idx)) {
			Some(person) => popup.update(|p| p.show(&person, x, y)),
			None => popup.update(PopupState::hide),
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.drag_end();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag_end();
			if s.set_hover(None) {
				popup.update(PopupState::hide);
			}
		}
	};

	view! {
		<div class="social-graph" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="social-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				style="display: block; cursor: grab;"
			/>
			<Legend />
			<NodePopup state=popup />
		</div>
	}
}

fn start_animation(state: SharedState, animate: SharedCallback, ctx: CanvasRenderingContext2d) {
	let animate_inner = animate.clone();
	*animate.borrow_mut() = Some(Closure::new(move || {
		if let Some(ref mut s) = *state.borrow_mut() {
			s.tick(FRAME_DT);
			render::render(s, &ctx);
		}
		request_frame(&animate_inner);
	}));
	request_frame(&animate);
}

fn request_frame(callback: &SharedCallback) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *callback.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}
