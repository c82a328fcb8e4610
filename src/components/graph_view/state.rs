//! Canvas view state: the current render model, pan/zoom, and fade animation.
//!
//! The render model says where every node is and how opaque it should be;
//! this module adds the things that only exist on screen: the view transform,
//! an in-progress pan, and per-element intensities that ease towards the
//! model's targets so filter and hover changes fade instead of popping.

use std::collections::HashMap;

use crate::graph::RenderModel;

use super::scale::{ScaleConfig, ScaledValues};

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.05..20.0).
	pub k: f64,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	/// Set once the pointer moved far enough that release is not a click.
	pub moved: bool,
}

/// Per-node eased intensities, indexed like `RenderModel::nodes`.
///
/// Uses exponential smoothing for natural-feeling transitions that slow down
/// as they approach their target.
#[derive(Clone, Debug, Default)]
pub struct FadeState {
	/// Eased opacity, towards `NodeDraw::opacity`.
	opacity: Vec<f64>,
	/// Eased ring intensity, towards 1.0 for hovered or selected nodes.
	ring: Vec<f64>,
}

const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;

impl FadeState {
	/// Start at the targets, without animating in.
	fn settled(model: &RenderModel) -> Self {
		Self {
			opacity: model.nodes.iter().map(|n| n.opacity).collect(),
			ring: model
				.nodes
				.iter()
				.map(|n| ring_target(n.hovered, n.highlighted))
				.collect(),
		}
	}

	fn tick(&mut self, model: &RenderModel, dt: f64) {
		let fade_in_factor = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out_factor = 1.0 - (-FADE_OUT_SPEED * dt).exp();
		let ease = |value: &mut f64, target: f64| {
			let factor = if target > *value {
				fade_in_factor
			} else {
				fade_out_factor
			};
			*value += (target - *value) * factor;
			if (target - *value).abs() < 0.005 {
				*value = target;
			}
		};

		for (node, value) in model.nodes.iter().zip(self.opacity.iter_mut()) {
			ease(value, node.opacity);
		}
		for (node, value) in model.nodes.iter().zip(self.ring.iter_mut()) {
			ease(value, ring_target(node.hovered, node.highlighted));
		}
	}

	pub fn opacity(&self, idx: usize) -> f64 {
		self.opacity.get(idx).copied().unwrap_or(0.0)
	}

	pub fn ring(&self, idx: usize) -> f64 {
		self.ring.get(idx).copied().unwrap_or(0.0)
	}
}

fn ring_target(hovered: bool, highlighted: bool) -> f64 {
	if hovered || highlighted { 1.0 } else { 0.0 }
}

/// Screen-side state of one graph canvas.
///
/// Created once when the component mounts. The model is swapped whenever the
/// session produces a new one; `tick` advances the fade animation each frame.
pub struct GraphViewState {
	pub model: RenderModel,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub fade: FadeState,
	pub width: f64,
	pub height: f64,
	/// Node key -> index into `model.nodes`.
	index: HashMap<String, usize>,
	/// Last hover reported upwards, to avoid re-dispatching the same hover.
	pub reported_hover: Option<String>,
}

fn index_of(model: &RenderModel) -> HashMap<String, usize> {
	model
		.nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.key.clone(), i))
		.collect()
}

impl GraphViewState {
	pub fn new(model: RenderModel, width: f64, height: f64) -> Self {
		let mut state = Self {
			fade: FadeState::settled(&model),
			index: index_of(&model),
			model,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			width,
			height,
			reported_hover: None,
		};
		state.fit();
		state
	}

	/// Swap in a new model. Returns true when the selection moved to a
	/// different node.
	pub fn set_model(&mut self, model: RenderModel) -> bool {
		let selection_moved = model.selected.is_some() && model.selected != self.model.selected;
		if model.nodes.len() != self.model.nodes.len() {
			self.fade = FadeState::settled(&model);
			self.index = index_of(&model);
		}
		self.model = model;
		selection_moved
	}

	pub fn node_idx(&self, key: &str) -> Option<usize> {
		self.index.get(key).copied()
	}

	/// Zoom and pan so every visible node fits the canvas with some margin.
	pub fn fit(&mut self) {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		for n in self.model.nodes.iter().filter(|n| n.visible) {
			bounds = Some(match bounds {
				Some((x0, y0, x1, y1)) => (x0.min(n.x), y0.min(n.y), x1.max(n.x), y1.max(n.y)),
				None => (n.x, n.y, n.x, n.y),
			});
		}
		let Some((x0, y0, x1, y1)) = bounds else {
			return;
		};
		let margin = 0.1;
		let (span_x, span_y) = ((x1 - x0).max(1.0), (y1 - y0).max(1.0));
		let k = (self.width * (1.0 - 2.0 * margin) / span_x)
			.min(self.height * (1.0 - 2.0 * margin) / span_y)
			.clamp(0.05, 20.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - (x0 + x1) / 2.0 * k,
			y: self.height / 2.0 - (y0 + y1) / 2.0 * k,
			k,
		};
	}

	/// Pan so the given node sits in the middle of the canvas.
	pub fn center_on(&mut self, key: &str) {
		if let Some(node) = self.node_idx(key).map(|i| &self.model.nodes[i]) {
			self.transform.x = self.width / 2.0 - node.x * self.transform.k;
			self.transform.y = self.height / 2.0 - node.y * self.transform.k;
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost visible node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<&str> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		self.model
			.nodes
			.iter()
			.rev()
			.filter(|n| n.visible)
			.find(|n| {
				let (dx, dy) = (n.x - gx, n.y - gy);
				(dx * dx + dy * dy).sqrt() < scale.node_radius(n.size) + scale.hit_padding
			})
			.map(|n| n.key.as_str())
	}

	/// Zoom by `factor` keeping the screen point `(x, y)` fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.05, 20.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f64) {
		self.fade.tick(&self.model, dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
