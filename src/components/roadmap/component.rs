use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::controls::{LayoutPanel, ViewportControls};
use super::model::FlowModel;
use super::render;
use super::state::{CanvasState, PointerRelease, ViewportCommand};
use super::types::{Direction, FlowEdge, FlowNode};

const FALLBACK_WIDTH: f64 = 800.0;
const WHEEL_ZOOM: f64 = 1.1;

/// Browser setup failures that leave the canvas inert.
#[derive(Debug, Error)]
pub enum CanvasError {
	/// No global `window` (not running in a browser)
	#[error("browser window is not available")]
	NoWindow,
	/// The canvas refused a 2D context
	#[error("2d rendering context is not available")]
	NoContext,
	/// `requestAnimationFrame` threw
	#[error("animation frame request failed: {0}")]
	AnimationFrame(String),
}

type SharedState = Rc<RefCell<Option<CanvasState>>>;
type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Browser-side handles of one mounted canvas.
#[derive(Clone, Default)]
struct CanvasHandles {
	state: SharedState,
	animate: SharedClosure,
	resize: SharedClosure,
	frame: Rc<Cell<i32>>,
}

impl CanvasHandles {
	/// Stop the frame loop, detach the resize listener and drop the state.
	fn teardown(&self) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(self.frame.get());
			if let Some(cb) = self.resize.borrow().as_ref() {
				let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		self.animate.borrow_mut().take();
		self.resize.borrow_mut().take();
		self.state.borrow_mut().take();
	}
}

/// Diagram state owned by the component, shared with the canvas.
#[derive(Clone, Copy)]
struct FlowSignals {
	flow: RwSignal<FlowModel>,
	interactive: RwSignal<bool>,
}

impl FlowSignals {
	fn seed(&self, width: f64, height: f64) -> CanvasState {
		let mut state = CanvasState::new(width, height);
		state.interactive = self.interactive.get_untracked();
		let flow = self.flow.get_untracked();
		state.set_elements(flow.nodes, flow.edges, flow.direction);
		state
	}

	/// Write a drag back into the model; returns the clicked node, if any.
	fn release(&self, release: PointerRelease) -> Option<String> {
		if release.moved.is_some() {
			self.flow.try_update(|flow| flow.apply_release(release)).flatten()
		} else {
			release.clicked
		}
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
		.ok_or(CanvasError::NoContext)
}

fn request_frame(window: &Window, cb: &Closure<dyn FnMut()>) -> Result<i32, CanvasError> {
	window
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.map_err(|err| CanvasError::AnimationFrame(format!("{err:?}")))
}

fn container_width(canvas: &HtmlCanvasElement) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(FALLBACK_WIDTH)
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn set_cursor(canvas_ref: NodeRef<leptos::html::Canvas>, cursor: &str) {
	if let Some(canvas) = canvas_ref.get() {
		let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}

/// Size the canvas, seed its state and start the frame loop.
fn start_canvas(
	canvas: HtmlCanvasElement,
	height: f64,
	signals: FlowSignals,
	handles: &CanvasHandles,
) -> Result<(), CanvasError> {
	let window = web_sys::window().ok_or(CanvasError::NoWindow)?;
	let ctx = context_2d(&canvas)?;

	let width = container_width(&canvas);
	canvas.set_width(width as u32);
	canvas.set_height(height as u32);
	*handles.state.borrow_mut() = Some(signals.seed(width, height));

	let (state_resize, canvas_resize) = (handles.state.clone(), canvas.clone());
	*handles.resize.borrow_mut() = Some(Closure::new(move || {
		let width = container_width(&canvas_resize);
		canvas_resize.set_width(width as u32);
		if let Some(s) = state_resize.borrow_mut().as_mut() {
			s.resize(width, height);
		}
	}));
	if let Some(cb) = handles.resize.borrow().as_ref() {
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}

	let (state_anim, animate_inner, frame) = (
		handles.state.clone(),
		handles.animate.clone(),
		handles.frame.clone(),
	);
	*handles.animate.borrow_mut() = Some(Closure::new(move || {
		if let Some(s) = state_anim.borrow_mut().as_mut() {
			if s.dirty {
				render::render(s, &ctx);
				s.dirty = false;
			}
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(cb) = animate_inner.borrow().as_ref() {
			match request_frame(&window, cb) {
				Ok(id) => frame.set(id),
				Err(err) => error!("roadmap frame loop stopped: {err}"),
			}
		}
	}));
	if let Some(cb) = handles.animate.borrow().as_ref() {
		handles.frame.set(request_frame(&window, cb)?);
	}
	Ok(())
}

/// Interactive layered diagram of `initial_nodes` and `initial_edges`.
///
/// Every notification of either input signal triggers a fresh top-to-bottom
/// layout pass that replaces the drawn elements. The "Vertical" and
/// "Horizontal" buttons lay out the currently drawn elements again.
#[component]
pub fn RoadmapFlow(
	#[prop(into)] initial_nodes: Signal<Vec<FlowNode>>,
	#[prop(into)] initial_edges: Signal<Vec<FlowEdge>>,
	#[prop(optional, into)] on_node_click: Option<Callback<String>>,
	#[prop(default = 600.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let signals = FlowSignals {
		flow: RwSignal::new(FlowModel::default()),
		interactive: RwSignal::new(true),
	};
	let viewport_command = RwSignal::new(None::<ViewportCommand>);

	let handles = CanvasHandles::default();
	let state = handles.state.clone();
	let teardown = StoredValue::new_local(handles.clone());
	on_cleanup(move || {
		teardown.try_with_value(CanvasHandles::teardown);
	});

	Effect::new(move |_| {
		initial_nodes.with(|nodes| {
			initial_edges.with(|edges| signals.flow.update(|flow| flow.replace_input(nodes, edges)))
		});
	});

	let on_layout = Callback::new(move |direction: Direction| {
		signals.flow.update(|flow| flow.relayout(direction));
	});
	let on_command = Callback::new(move |command: ViewportCommand| {
		viewport_command.set(Some(command));
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if let Err(err) = start_canvas(canvas.into(), height, signals, &handles) {
			error!("roadmap canvas disabled: {err}");
		}
	});

	let state_sync = state.clone();
	Effect::new(move |_| {
		let flow = signals.flow.get();
		if let Some(s) = state_sync.borrow_mut().as_mut() {
			s.set_elements(flow.nodes, flow.edges, flow.direction);
		}
	});

	let state_lock = state.clone();
	Effect::new(move |_| {
		let interactive = signals.interactive.get();
		if let Some(s) = state_lock.borrow_mut().as_mut() {
			s.interactive = interactive;
		}
	});

	let state_cmd = state.clone();
	Effect::new(move |_| {
		let Some(command) = viewport_command.get() else {
			return;
		};
		if let Some(s) = state_cmd.borrow_mut().as_mut() {
			s.apply(command);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(s) = state_md.borrow_mut().as_mut() {
			s.begin_pointer(x, y);
			set_cursor(canvas_ref, s.cursor());
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(s) = state_mm.borrow_mut().as_mut() {
			s.move_pointer(x, y);
			set_cursor(canvas_ref, s.cursor());
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let release = match state_mu.borrow_mut().as_mut() {
			Some(s) => {
				let release = s.end_pointer(x, y);
				set_cursor(canvas_ref, s.cursor());
				release
			}
			None => return,
		};

		if let Some(id) = signals.release(release) {
			debug!("node clicked: {id}");
			if let Some(on_node_click) = on_node_click {
				on_node_click.run(id);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let release = match state_ml.borrow_mut().as_mut() {
			Some(s) => {
				let release = s.cancel_pointer();
				set_cursor(canvas_ref, s.cursor());
				release
			}
			None => return,
		};
		signals.release(release);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(s) = state_wh.borrow_mut().as_mut() {
			let factor = if ev.delta_y() > 0.0 {
				1.0 / WHEEL_ZOOM
			} else {
				WHEEL_ZOOM
			};
			s.zoom_by(factor, x, y);
		}
	};

	view! {
		<div class="roadmap-flow" style=format!("position: relative; width: 100%; height: {height}px;")>
			<canvas
				node_ref=canvas_ref
				class="roadmap-flow-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<ViewportControls on_command=on_command interactive=signals.interactive />
			<LayoutPanel on_layout=on_layout />
		</div>
	}
}
