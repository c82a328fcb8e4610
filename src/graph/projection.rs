//! Presentation adapter: engine state -> render-ready draw records.
//!
//! [`project`] is a pure data transform. It never draws; the canvas in
//! `components::graph_view` (or any other surface) consumes the resulting
//! [`RenderModel`].
//!
//! Hover and selection compose as follows:
//! - A visible hovered node focuses its neighborhood (itself plus visible
//!   neighbors). Every other visible node is dimmed and loses its label, and
//!   every visible edge not incident to the hovered node is dimmed.
//! - The selected node is always highlighted and never dimmed.
//! - Hovering a hidden node has no visual effect.

use std::collections::HashSet;

use serde::Deserialize;

use super::dataset::Dataset;
use super::selection::SelectionState;
use super::types::Node;
use super::visibility::Visibility;

/// Tunables for [`project`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
	/// Size of the lowest-scoring node.
	pub min_node_size: f64,
	/// Size of the highest-scoring node.
	pub max_node_size: f64,
	/// Opacity of nodes outside the hovered neighborhood.
	pub dimmed_opacity: f64,
}

impl Default for ProjectionConfig {
	fn default() -> Self {
		Self {
			min_node_size: 3.0,
			max_node_size: 15.0,
			dimmed_opacity: 0.2,
		}
	}
}

impl ProjectionConfig {
	/// Linear map of `score` from the dataset's score range onto
	/// `[min_node_size, max_node_size]`. A flat range maps to the minimum.
	pub fn node_size(&self, score: f64, (lo, hi): (f64, f64)) -> f64 {
		if hi > lo {
			self.min_node_size + (score - lo) / (hi - lo) * (self.max_node_size - self.min_node_size)
		} else {
			self.min_node_size
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeDraw {
	pub key: String,
	pub label: String,
	pub x: f64,
	pub y: f64,
	/// Cluster color, unchanged from the dataset.
	pub color: String,
	/// Tag image, unchanged from the dataset.
	pub image: String,
	pub url: String,
	/// Centrality score, unchanged from the dataset.
	pub score: f64,
	pub size: f64,
	pub opacity: f64,
	pub visible: bool,
	/// Selected node.
	pub highlighted: bool,
	pub hovered: bool,
	pub dimmed: bool,
	pub show_label: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeDraw {
	pub id: String,
	pub source: String,
	pub target: String,
	pub edge_type: String,
	pub label: String,
	pub visible: bool,
	/// Incident to the hovered or selected node.
	pub highlighted: bool,
	pub dimmed: bool,
}

/// Visible vs. total element counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
	pub visible_nodes: usize,
	pub total_nodes: usize,
	pub visible_edges: usize,
	pub total_edges: usize,
}

/// Everything a drawing surface needs for one frame, in dataset order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderModel {
	pub nodes: Vec<NodeDraw>,
	pub edges: Vec<EdgeDraw>,
	/// The selected node, when it is visible.
	pub selected: Option<String>,
}

impl RenderModel {
	pub fn node(&self, key: &str) -> Option<&NodeDraw> {
		self.nodes.iter().find(|n| n.key == key)
	}

	pub fn edge(&self, id: &str) -> Option<&EdgeDraw> {
		self.edges.iter().find(|e| e.id == id)
	}

	pub fn stats(&self) -> GraphStats {
		GraphStats {
			visible_nodes: self.nodes.iter().filter(|n| n.visible).count(),
			total_nodes: self.nodes.len(),
			visible_edges: self.edges.iter().filter(|e| e.visible).count(),
			total_edges: self.edges.len(),
		}
	}
}

fn project_node(
	node: &Node,
	dataset: &Dataset,
	visible: bool,
	config: &ProjectionConfig,
) -> NodeDraw {
	NodeDraw {
		key: node.key.clone(),
		label: node.label.clone(),
		x: node.x,
		y: node.y,
		color: dataset
			.cluster(&node.cluster)
			.map(|c| c.color.clone())
			.unwrap_or_default(),
		image: dataset
			.tag(&node.tag)
			.map(|t| t.image.clone())
			.unwrap_or_default(),
		url: node.url.clone(),
		score: node.score,
		size: config.node_size(node.score, dataset.score_range()),
		opacity: if visible { 1.0 } else { 0.0 },
		visible,
		highlighted: false,
		hovered: false,
		dimmed: false,
		show_label: visible,
	}
}

pub fn project(
	dataset: &Dataset,
	visibility: &Visibility,
	selection: &SelectionState,
	config: &ProjectionConfig,
) -> RenderModel {
	let hovered = selection
		.hovered()
		.filter(|key| visibility.is_node_visible(key));
	let selected = selection
		.selected()
		.filter(|key| visibility.is_node_visible(key));

	let neighborhood: HashSet<&str> = hovered
		.into_iter()
		.flat_map(|h| std::iter::once(h).chain(dataset.neighbors(h)))
		.filter(|key| visibility.is_node_visible(key))
		.collect();

	let nodes = dataset
		.nodes()
		.iter()
		.map(|node| {
			let visible = visibility.is_node_visible(&node.key);
			let mut draw = project_node(node, dataset, visible, config);
			if visible {
				draw.highlighted = selected == Some(node.key.as_str());
				draw.hovered = hovered == Some(node.key.as_str());
				draw.dimmed = hovered.is_some()
					&& !draw.highlighted
					&& !neighborhood.contains(node.key.as_str());
				if draw.dimmed {
					draw.opacity = config.dimmed_opacity;
					draw.show_label = false;
				}
			}
			draw
		})
		.collect();

	let edges = dataset
		.edges()
		.iter()
		.map(|edge| {
			let visible = visibility.is_edge_visible(&edge.id);
			let touches = |key: &str| edge.source == key || edge.target == key;
			let touches_hover = hovered.is_some_and(touches);
			EdgeDraw {
				id: edge.id.clone(),
				source: edge.source.clone(),
				target: edge.target.clone(),
				edge_type: edge.edge_type.clone(),
				label: edge.label.clone(),
				visible,
				highlighted: visible && (touches_hover || selected.is_some_and(touches)),
				dimmed: visible && hovered.is_some() && !touches_hover,
			}
		})
		.collect();

	RenderModel {
		nodes,
		edges,
		selected: selected.map(str::to_string),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::graph::filters::FiltersState;
	use crate::graph::fixtures::{atlas, pair};
	use crate::graph::visibility::compute_visible;

	fn render(ds: &Dataset, filters: &FiltersState, sel: &SelectionState) -> RenderModel {
		project(
			ds,
			&compute_visible(ds, filters),
			sel,
			&ProjectionConfig::default(),
		)
	}

	#[test]
	fn copies_dataset_inputs_unchanged() {
		let ds = atlas();
		let model = render(&ds, &FiltersState::new(&ds), &SelectionState::default());
		let risk = model.node("risk-1").unwrap();
		assert_eq!(risk.color, "#c62828");
		assert_eq!(risk.image, "risk.svg");
		assert_eq!(risk.score, 4.0);
		assert_eq!(risk.url, "https://atlas.example/risk-1");
		assert_eq!(model.edge("e1").unwrap().edge_type, "relatedTo");
	}

	#[test]
	fn sizes_follow_score_range() {
		let ds = atlas();
		let model = render(&ds, &FiltersState::new(&ds), &SelectionState::default());
		assert_eq!(model.node("act-2").unwrap().size, 3.0);
		assert_eq!(model.node("risk-1").unwrap().size, 15.0);
		assert_eq!(model.node("act-1").unwrap().size, 9.0);
	}

	#[test]
	fn flat_scores_use_minimum_size() {
		let config = ProjectionConfig::default();
		assert_eq!(config.node_size(2.0, (2.0, 2.0)), 3.0);
	}

	#[test]
	fn hidden_elements_are_flagged_not_dropped() {
		let ds = pair();
		let filters = FiltersState::new(&ds).toggle_cluster("c2").unwrap();
		let model = render(&ds, &filters, &SelectionState::default());
		assert_eq!(model.nodes.len(), 2);
		let b = model.node("B").unwrap();
		assert!(!b.visible);
		assert_eq!(b.opacity, 0.0);
		assert!(!b.show_label);
		assert!(!model.edge("e1").unwrap().visible);
		assert_eq!(
			model.stats(),
			GraphStats {
				visible_nodes: 1,
				total_nodes: 2,
				visible_edges: 0,
				total_edges: 1,
			}
		);
	}

	#[test]
	fn hover_dims_outside_neighborhood() {
		let ds = atlas();
		let sel = SelectionState::default().hover(&ds, Some("act-1")).unwrap();
		let model = render(&ds, &FiltersState::new(&ds), &sel);

		let act1 = model.node("act-1").unwrap();
		assert!(act1.hovered && !act1.dimmed);
		assert!(!model.node("risk-1").unwrap().dimmed);

		let far = model.node("bench-1").unwrap();
		assert!(far.dimmed);
		assert_eq!(far.opacity, 0.2);
		assert!(!far.show_label);

		assert!(model.edge("e1").unwrap().highlighted);
		assert!(model.edge("e3").unwrap().dimmed);
	}

	#[test]
	fn selected_node_is_never_dimmed_by_hover() {
		let ds = atlas();
		let sel = SelectionState::default()
			.select(&ds, "bench-1")
			.and_then(|s| s.hover(&ds, Some("act-1")))
			.unwrap();
		let model = render(&ds, &FiltersState::new(&ds), &sel);
		let bench = model.node("bench-1").unwrap();
		assert!(bench.highlighted);
		assert!(!bench.dimmed);
		assert!(bench.show_label);
		assert_eq!(bench.opacity, 1.0);
		assert_eq!(model.selected.as_deref(), Some("bench-1"));
		// e3 touches the selection, but not the hover
		let e3 = model.edge("e3").unwrap();
		assert!(e3.highlighted && e3.dimmed);
	}

	#[test]
	fn hovering_hidden_node_has_no_effect() {
		let ds = pair();
		let filters = FiltersState::new(&ds).toggle_cluster("c2").unwrap();
		let sel = SelectionState::default().hover(&ds, Some("B")).unwrap();
		let model = render(&ds, &filters, &sel);
		assert!(model.nodes.iter().all(|n| !n.dimmed && !n.hovered));
	}

	#[test]
	fn hidden_neighbors_stay_hidden_under_hover() {
		let ds = pair();
		let filters = FiltersState::new(&ds).toggle_cluster("c2").unwrap();
		let sel = SelectionState::default().hover(&ds, Some("A")).unwrap();
		let model = render(&ds, &filters, &sel);
		let b = model.node("B").unwrap();
		assert!(!b.visible && !b.dimmed);
		assert_eq!(b.opacity, 0.0);
	}
}
