//! Leptos component wrapping the graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for hover, click, panning, and zooming. An animation loop runs via
//! `requestAnimationFrame`, advancing the fade animation and redrawing each
//! frame. The component never changes engine state itself: hovers and clicks
//! are reported through callbacks and come back as a new render model.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::GraphViewState;
use super::theme::Theme;
use crate::graph::RenderModel;

/// Pointer travel, in pixels, after which a press becomes a pan.
const CLICK_SLOP: f64 = 4.0;

/// Bundles view state with visual configuration.
struct GraphContext {
	state: GraphViewState,
	scale: ScaleConfig,
	theme: Theme,
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Pointer position relative to the canvas.
fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn set_cursor(canvas_ref: NodeRef<leptos::html::Canvas>, cursor: &str) {
	if let Some(canvas) = canvas_ref.get() {
		let canvas: HtmlCanvasElement = canvas.into();
		let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}

/// Renders a [`RenderModel`] on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize automatically with the
/// window. Explicit `width`/`height` override automatic sizing.
///
/// `on_hover` fires when the node under the pointer changes. `on_click` fires
/// with the clicked node, or `None` for a click on empty canvas. Dragging the
/// background pans; a press that turns into a pan is not a click.
#[component]
pub fn GraphCanvas(
	#[prop(into)] model: Signal<RenderModel>,
	#[prop(into)] on_hover: Callback<Option<String>>,
	#[prop(into)] on_click: Callback<Option<String>>,
	#[prop(default = Theme::default())] theme: Theme,
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

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
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

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("atlas-graph: canvas 2d context unavailable");
			return;
		};

		*context_init.borrow_mut() = Some(GraphContext {
			state: GraphViewState::new(model.get_untracked(), w, h),
			scale: ScaleConfig::default(),
			theme: theme.clone(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
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

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let mut last_frame = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			// Seconds, capped so a backgrounded tab doesn't jump on return.
			let dt = ((now - last_frame) / 1000.0).clamp(0.0, 0.1);
			last_frame = now;
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(dt);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_model = context.clone();
	Effect::new(move |_| {
		let next = model.get();
		if let Some(ref mut c) = *context_model.borrow_mut() {
			if c.state.set_model(next) {
				if let Some(key) = c.state.model.selected.clone() {
					c.state.center_on(&key);
				}
			}
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pan.active = true;
			c.state.pan.moved = false;
			c.state.pan.start_x = x;
			c.state.pan.start_y = y;
			c.state.pan.transform_start_x = c.state.transform.x;
			c.state.pan.transform_start_y = c.state.transform.y;
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let changed_hover = {
			let mut guard = context_mm.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			let pan = &mut c.state.pan;
			if pan.active {
				let (dx, dy) = (x - pan.start_x, y - pan.start_y);
				pan.moved |= dx.hypot(dy) > CLICK_SLOP;
				if pan.moved {
					c.state.transform.x = pan.transform_start_x + dx;
					c.state.transform.y = pan.transform_start_y + dy;
				}
				None
			} else {
				let hovered = c.state.node_at_position(x, y, &c.scale).map(str::to_string);
				(hovered != c.state.reported_hover).then(|| {
					c.state.reported_hover = hovered.clone();
					hovered
				})
			}
		};
		// Borrow released: the callback re-enters through the model effect.
		if let Some(hovered) = changed_hover {
			set_cursor(
				canvas_ref,
				if hovered.is_some() { "pointer" } else { "grab" },
			);
			on_hover.run(hovered);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let point = pointer(canvas_ref, &ev);
		let clicked = {
			let mut guard = context_mu.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			let was_click = c.state.pan.active && !c.state.pan.moved;
			c.state.pan.active = false;
			match (was_click, point) {
				(true, Some((x, y))) => {
					Some(c.state.node_at_position(x, y, &c.scale).map(str::to_string))
				}
				_ => None,
			}
		};
		if let Some(target) = clicked {
			on_click.run(target);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let had_hover = {
			let mut guard = context_ml.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			c.state.pan.active = false;
			c.state.reported_hover.take().is_some()
		};
		if had_hover {
			set_cursor(canvas_ref, "grab");
			on_hover.run(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
