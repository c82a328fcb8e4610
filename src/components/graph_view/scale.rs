//! Zoom-dependent sizing for graph visuals.
//!
//! Node positions and sizes in the render model are world-space values taken
//! from the dataset. The canvas draws in world space after applying the view
//! transform, so anything that should look the same at every zoom level
//! (line widths, fonts, hit slack) is divided by the zoom factor `k` here.
//!
//! Node radii follow the world but are held between a minimum and maximum
//! on-screen size ([`PixelClamp`]), so tiny nodes stay clickable and huge ones
//! don't swallow the view when zoomed in.

/// World-space size bounded to an on-screen pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelClamp {
	pub min_px: f64,
	pub max_px: f64,
}

impl PixelClamp {
	/// World-space value for `world` at zoom `k`.
	pub fn apply(&self, world: f64, k: f64) -> f64 {
		world.clamp(self.min_px / k, self.max_px / k)
	}
}

/// Linear fade-in over a zoom range: invisible at or below `hidden_k`, fully
/// opaque at or above `opaque_k`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomFade {
	pub hidden_k: f64,
	pub opaque_k: f64,
}

impl ZoomFade {
	pub fn alpha(&self, k: f64) -> f64 {
		if self.opaque_k <= self.hidden_k {
			return 1.0;
		}
		((k - self.hidden_k) / (self.opaque_k - self.hidden_k)).clamp(0.0, 1.0)
	}
}

/// Tunables for drawing at any zoom level. Pixel values are on-screen sizes.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node_radius: PixelClamp,
	/// Extra hit-test slack around each node.
	pub hit_padding_px: f64,
	pub label_px: f64,
	/// Below this zoom the label font stops shrinking.
	pub label_min_k: f64,
	/// Labels of ordinary nodes fade in as the view zooms in. Hovered and
	/// selected nodes always show theirs.
	pub label_fade: ZoomFade,
	pub edge_px: f64,
	/// Width multiplier for highlighted edges.
	pub highlight_mult: f64,
	/// Arrow head length in world units.
	pub arrow_size: f64,
	pub arrow_clamp: PixelClamp,
	pub arrow_fade: ZoomFade,
	/// Arrows fainter than this are skipped.
	pub arrow_cull: f64,
	pub ring_px: f64,
	/// Gap between a node and its hover/selection ring.
	pub ring_gap_px: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: PixelClamp {
				min_px: 2.5,
				max_px: 60.0,
			},
			hit_padding_px: 3.0,
			label_px: 11.0,
			label_min_k: 0.5,
			label_fade: ZoomFade {
				hidden_k: 0.35,
				opaque_k: 0.8,
			},
			edge_px: 1.0,
			highlight_mult: 2.0,
			arrow_size: 5.0,
			arrow_clamp: PixelClamp {
				min_px: 0.0,
				max_px: 14.0,
			},
			arrow_fade: ZoomFade {
				hidden_k: 0.0,
				opaque_k: 1.0,
			},
			arrow_cull: 0.05,
			ring_px: 1.5,
			ring_gap_px: 2.0,
		}
	}
}

/// Scale values resolved for one zoom level, in world space.
///
/// Build once per frame and pass to the drawing functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	node_radius: PixelClamp,
	pub hit_padding: f64,
	/// Canvas font string, e.g. "11px sans-serif" at k = 1.
	pub label_font: String,
	pub label_alpha: f64,
	pub edge_line_width: f64,
	pub highlight_width: f64,
	pub arrow_size: f64,
	pub arrow_alpha: f64,
	pub cull_arrows: bool,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let arrow_alpha = config.arrow_fade.alpha(k);
		Self {
			k,
			node_radius: config.node_radius,
			hit_padding: config.hit_padding_px / k,
			label_font: format!("{}px sans-serif", config.label_px / k.max(config.label_min_k)),
			label_alpha: config.label_fade.alpha(k),
			edge_line_width: config.edge_px / k,
			highlight_width: config.highlight_mult,
			arrow_size: config.arrow_clamp.apply(config.arrow_size, k),
			arrow_alpha,
			cull_arrows: arrow_alpha < config.arrow_cull,
			ring_width: config.ring_px / k,
			ring_offset: config.ring_gap_px / k,
		}
	}

	/// Drawn radius (world-space) of a node of the given model size.
	pub fn node_radius(&self, size: f64) -> f64 {
		self.node_radius.apply(size, self.k)
	}
}
