//! Visibility engine: which nodes and edges pass the current filters.
//!
//! A node is visible iff its cluster AND its tag are enabled. An edge is
//! visible iff both of its endpoints are visible, so a visible edge never
//! dangles. [`compute_visible`] is pure; equal inputs give equal outputs, and
//! comparing two [`Visibility`] values with `==` is enough to skip redundant
//! render work.

use std::collections::{HashMap, HashSet};

use super::dataset::Dataset;
use super::filters::{Category, FiltersState};

/// Visible node counts per facet key. Keys with no visible node are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetCounts {
	clusters: HashMap<String, usize>,
	tags: HashMap<String, usize>,
}

impl FacetCounts {
	pub fn get(&self, category: Category, key: &str) -> usize {
		let counts = match category {
			Category::Clusters => &self.clusters,
			Category::Tags => &self.tags,
		};
		counts.get(key).copied().unwrap_or(0)
	}
}

/// Output of the visibility engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
	nodes: HashSet<String>,
	edges: HashSet<String>,
	counts: FacetCounts,
}

impl Visibility {
	pub fn is_node_visible(&self, key: &str) -> bool {
		self.nodes.contains(key)
	}

	pub fn is_edge_visible(&self, id: &str) -> bool {
		self.edges.contains(id)
	}

	pub fn nodes(&self) -> &HashSet<String> {
		&self.nodes
	}

	pub fn edges(&self) -> &HashSet<String> {
		&self.edges
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn counts(&self) -> &FacetCounts {
		&self.counts
	}
}

/// One pass over nodes (visibility + facet counts), one pass over edges.
pub fn compute_visible(dataset: &Dataset, filters: &FiltersState) -> Visibility {
	let mut visibility = Visibility::default();

	for node in dataset.nodes() {
		if filters.is_cluster_enabled(&node.cluster) && filters.is_tag_enabled(&node.tag) {
			visibility.nodes.insert(node.key.clone());
			*visibility
				.counts
				.clusters
				.entry(node.cluster.clone())
				.or_insert(0) += 1;
			*visibility.counts.tags.entry(node.tag.clone()).or_insert(0) += 1;
		}
	}

	for edge in dataset.edges() {
		if visibility.nodes.contains(&edge.source) && visibility.nodes.contains(&edge.target) {
			visibility.edges.insert(edge.id.clone());
		}
	}

	visibility
}
