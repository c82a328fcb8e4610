//! Visual theming for the graph canvas.
//!
//! Node fill colors come from the dataset's clusters; the theme only decides
//! the surroundings (background, edges, labels) and how dimmed, hovered, and
//! selected nodes are set apart.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Channel-wise mix towards `other`; `t` = 0 keeps `self`, 1 gives `other`.
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t) as u8;
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a + (other.a - self.a) * t,
		}
	}

	/// Mix towards white, keeping alpha.
	pub fn lighten(self, t: f64) -> Self {
		self.lerp(Color::rgba(255, 255, 255, self.a), t)
	}

	/// Mix towards black, keeping alpha.
	pub fn darken(self, t: f64) -> Self {
		self.lerp(Color::rgba(0, 0, 0, self.a), t)
	}

	pub fn to_css(self) -> String {
		if self.a >= 0.999 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`, `#RGB`) and `rgb()`/`rgba()` functional notation;
	/// anything else falls back to mid gray.
	pub fn parse(color_str: &str) -> Self {
		let s = color_str.trim();
		let hex = |range: std::ops::Range<usize>| {
			s.get(range)
				.and_then(|h| u8::from_str_radix(h, 16).ok())
				.unwrap_or(128)
		};
		if s.starts_with('#') && s.len() == 7 {
			Color::rgb(hex(1..3), hex(3..5), hex(5..7))
		} else if s.starts_with('#') && s.len() == 4 {
			let short = |i: usize| {
				s.get(i..i + 1)
					.and_then(|h| u8::from_str_radix(h, 16).ok())
					.map(|v| v * 17)
					.unwrap_or(128)
			};
			Color::rgb(short(1), short(2), short(3))
		} else if s.starts_with("rgb") {
			let nums: Vec<&str> = s
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let channel = |i: usize| {
				nums.get(i)
					.and_then(|s| s.trim().parse::<u8>().ok())
					.unwrap_or(128)
			};
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse::<f64>().ok())
				.unwrap_or(1.0);
			Color::rgba(channel(0), channel(1), channel(2), a)
		} else {
			Color::rgb(128, 128, 128)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Base edge color
	pub color: Color,
	/// Color of edges touching the hovered or selected node
	pub highlight_color: Color,
	/// Alpha multiplier for dimmed edges
	pub dimmed_alpha: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Border color
	pub border_color: Color,
	/// Dimmed nodes are blended towards this color
	pub dimmed_color: Color,
	/// Ring drawn around the hovered node
	pub hover_ring: Color,
	/// Ring drawn around the selected node
	pub selection_ring: Color,
}

/// Label text style.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	pub color: Color,
	/// Backdrop behind labels of hovered and selected nodes
	pub backdrop: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub label: LabelStyle,
}

impl Theme {
	/// Dark canvas with subtle gradients (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
				vignette: 0.15,
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.5),
				highlight_color: Color::rgba(220, 230, 240, 0.9),
				dimmed_alpha: 0.15,
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
				dimmed_color: Color::rgb(60, 66, 76),
				hover_ring: Color::rgba(255, 255, 255, 0.8),
				selection_ring: Color::rgba(255, 214, 102, 0.95),
			},
			label: LabelStyle {
				color: Color::rgba(255, 255, 255, 0.85),
				backdrop: Color::rgba(22, 27, 34, 0.75),
			},
		}
	}

	/// Flat light canvas
	pub fn paper() -> Self {
		Self {
			name: "paper",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: false,
				vignette: 0.0,
			},
			edge: EdgeStyle {
				color: Color::rgba(160, 160, 160, 0.6),
				highlight_color: Color::rgba(60, 60, 60, 0.9),
				dimmed_alpha: 0.2,
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 1.0,
				border_color: Color::rgba(255, 255, 255, 1.0),
				dimmed_color: Color::rgb(246, 246, 246),
				hover_ring: Color::rgba(40, 40, 40, 0.8),
				selection_ring: Color::rgba(230, 81, 0, 0.95),
			},
			label: LabelStyle {
				color: Color::rgba(30, 30, 30, 0.9),
				backdrop: Color::rgba(255, 255, 255, 0.85),
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
