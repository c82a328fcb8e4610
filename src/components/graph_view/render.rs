//! Canvas rendering for the graph view.
//!
//! Draws one frame from [`GraphViewState`]. Rendering uses multiple passes for
//! correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges, dimmed first, then highlighted (world space)
//! 3. Ordinary nodes, then hovered/selected nodes with rings on top
//! 4. Labels
//!
//! Hidden elements are skipped entirely. Dimmed nodes are blended towards the
//! theme's dimmed color rather than only faded, so they recede on both dark and
//! light backgrounds.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::GraphViewState;
use super::theme::{Color, Theme};
use crate::graph::{EdgeDraw, NodeDraw};

/// Attempt to smooth values that would otherwise cause abrupt visual changes.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);
	draw_labels(state, ctx, &scale, theme);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
}

fn draw_background(state: &GraphViewState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gradient = theme
		.background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				(state.width.max(state.height)) * 0.8,
			)
			.ok()
		})
		.flatten();

	if let Some(gradient) = gradient {
		let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
		let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &GraphViewState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let Ok(gradient) = ctx.create_radial_gradient(
		state.width / 2.0,
		state.height / 2.0,
		state.width.min(state.height) * 0.3,
		state.width / 2.0,
		state.height / 2.0,
		state.width.max(state.height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(
		1.0,
		&format!("rgba(0, 0, 0, {})", theme.background.vignette),
	);

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Endpoints of a visible edge, with the fade of the fainter endpoint.
fn edge_endpoints<'a>(
	state: &'a GraphViewState,
	edge: &EdgeDraw,
) -> Option<(&'a NodeDraw, &'a NodeDraw, f64)> {
	let si = state.node_idx(&edge.source)?;
	let ti = state.node_idx(&edge.target)?;
	let fade = state.fade.opacity(si).min(state.fade.opacity(ti));
	Some((&state.model.nodes[si], &state.model.nodes[ti], fade))
}

fn draw_edges(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let visible = || state.model.edges.iter().filter(|e| e.visible);

	for edge in visible().filter(|e| !e.highlighted) {
		draw_edge(state, ctx, scale, theme, edge);
	}
	for edge in visible().filter(|e| e.highlighted) {
		draw_edge(state, ctx, scale, theme, edge);
	}
}

fn draw_edge(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	edge: &EdgeDraw,
) {
	let Some((source, target, fade)) = edge_endpoints(state, edge) else {
		return;
	};
	let (x1, y1, x2, y2) = (source.x, source.y, target.x, target.y);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 || fade < 0.01 {
		return;
	}

	let (color, width) = if edge.highlighted {
		(
			theme.edge.highlight_color,
			scale.edge_line_width * scale.highlight_width,
		)
	} else if edge.dimmed {
		let c = theme.edge.color;
		(c.with_alpha(c.a * theme.edge.dimmed_alpha), scale.edge_line_width)
	} else {
		(theme.edge.color, scale.edge_line_width)
	};
	let color = color.with_alpha(color.a * smooth_step(fade.min(1.0)));

	let (ux, uy) = (dx / dist, dy / dist);
	let source_r = scale.node_radius(source.size);
	let target_r = scale.node_radius(target.size);

	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	ctx.begin_path();
	ctx.move_to(x1 + ux * source_r, y1 + uy * source_r);
	ctx.line_to(
		x2 - ux * (target_r + scale.arrow_size),
		y2 - uy * (target_r + scale.arrow_size),
	);
	ctx.stroke();

	let arrow_alpha = color.a * scale.arrow_alpha;
	if scale.cull_arrows || arrow_alpha <= 0.0 {
		return;
	}
	ctx.set_fill_style_str(&color.with_alpha(arrow_alpha).to_css());

	let (tip_x, tip_y) = (x2 - ux * target_r, y2 - uy * target_r);
	let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
	let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let on_top = |n: &NodeDraw| n.hovered || n.highlighted;

	// Pass 1: ordinary and dimmed nodes
	for (idx, node) in state.model.nodes.iter().enumerate() {
		if node.visible && !on_top(node) {
			draw_node(state, ctx, scale, theme, idx, node);
		}
	}

	// Pass 2: hovered/selected nodes and their rings
	for (idx, node) in state.model.nodes.iter().enumerate() {
		if !node.visible || !on_top(node) {
			continue;
		}
		draw_node(state, ctx, scale, theme, idx, node);

		let ring_t = smooth_step(state.fade.ring(idx));
		if ring_t <= 0.01 {
			continue;
		}
		let ring = if node.highlighted {
			theme.node.selection_ring
		} else {
			theme.node.hover_ring
		};
		let radius = scale.node_radius(node.size) * (1.0 + 0.2 * ring_t);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius + scale.ring_offset, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&ring.with_alpha(ring.a * ring_t).to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius + scale.ring_offset * 2.5, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&ring.with_alpha(ring.a * 0.35 * ring_t).to_css());
		ctx.set_line_width(scale.ring_width * 0.5);
		ctx.stroke();
	}
}

fn draw_node(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	idx: usize,
	node: &NodeDraw,
) {
	let alpha = state.fade.opacity(idx);
	if alpha < 0.01 {
		return;
	}
	let ring_t = smooth_step(state.fade.ring(idx));
	let radius = scale.node_radius(node.size) * (1.0 + 0.2 * ring_t);

	// Fully dimmed at the model's dimmed opacity, untouched at 1.0.
	let dim_t = (1.0 - alpha).clamp(0.0, 1.0);
	let base = Color::parse(&node.color).lerp(theme.node.dimmed_color, dim_t);

	ctx.set_global_alpha(alpha.max(0.35));

	let gradient = theme
		.node
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				node.x - radius * 0.3,
				node.y - radius * 0.3,
				0.0,
				node.x,
				node.y,
				radius,
			)
			.ok()
		})
		.flatten();

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
	if let Some(gradient) = gradient {
		let _ = gradient.add_color_stop(0.0, &base.lighten(0.4).to_css());
		let _ = gradient.add_color_stop(0.7, &base.to_css());
		let _ = gradient.add_color_stop(1.0, &base.darken(0.2).to_css());
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&base.to_css());
	}
	ctx.fill();

	if theme.node.border_width > 0.0 {
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}

	ctx.set_global_alpha(1.0);
}

fn draw_labels(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	ctx.set_font(&scale.label_font);

	for (idx, node) in state.model.nodes.iter().enumerate() {
		if !node.visible || !node.show_label {
			continue;
		}
		let emphasized = node.hovered || node.highlighted;
		let alpha = if emphasized {
			1.0
		} else {
			scale.label_alpha * state.fade.opacity(idx)
		};
		if alpha < 0.05 {
			continue;
		}

		let radius = scale.node_radius(node.size);
		let (x, y) = (node.x + radius + 4.0 / scale.k, node.y + 3.0 / scale.k);

		if emphasized {
			if let Ok(metrics) = ctx.measure_text(&node.label) {
				let pad = 2.0 / scale.k;
				let font_px = (metrics.actual_bounding_box_ascent()
					+ metrics.actual_bounding_box_descent())
				.max(1.0);
				ctx.set_fill_style_str(&theme.label.backdrop.to_css());
				ctx.fill_rect(
					x - pad,
					y - metrics.actual_bounding_box_ascent() - pad,
					metrics.width() + 2.0 * pad,
					font_px + 2.0 * pad,
				);
			}
		}

		let color = theme.label.color;
		ctx.set_fill_style_str(&color.with_alpha(color.a * alpha).to_css());
		let _ = ctx.fill_text(&node.label, x, y);
	}
}
