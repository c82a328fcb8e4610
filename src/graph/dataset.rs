//! Immutable, key-indexed graph dataset.
//!
//! A [`Dataset`] is validated once at load and never mutated afterwards, so
//! every downstream component can treat it as a stable snapshot. All indexes
//! (key lookups, adjacency, facet totals, score range) are built in
//! [`Dataset::load`].

use std::collections::HashMap;

use log::info;

use super::error::{KeyKind, LoadError};
use super::types::{Cluster, Edge, Node, RawDataset, Tag};

/// Validated graph data with O(1) key lookups.
#[derive(Clone, Debug)]
pub struct Dataset {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	clusters: Vec<Cluster>,
	tags: Vec<Tag>,
	node_by_key: HashMap<String, usize>,
	edge_by_id: HashMap<String, usize>,
	cluster_by_key: HashMap<String, usize>,
	tag_by_key: HashMap<String, usize>,
	/// Node index -> sorted, deduplicated neighbor indexes (either direction).
	adjacency: Vec<Vec<usize>>,
	cluster_totals: Vec<usize>,
	tag_totals: Vec<usize>,
	score_range: (f64, f64),
}

/// Builds a key -> position map, rejecting repeated keys.
fn index_keys<'a>(
	kind: KeyKind,
	keys: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, usize>, LoadError> {
	let mut index = HashMap::new();
	for (i, key) in keys.enumerate() {
		if index.insert(key.to_string(), i).is_some() {
			return Err(LoadError::DuplicateKey {
				kind,
				key: key.to_string(),
			});
		}
	}
	Ok(index)
}

fn resolve(
	index: &HashMap<String, usize>,
	owner_kind: KeyKind,
	owner: &str,
	target_kind: KeyKind,
	target: &str,
) -> Result<usize, LoadError> {
	index
		.get(target)
		.copied()
		.ok_or_else(|| LoadError::DanglingReference {
			owner_kind,
			owner: owner.to_string(),
			target_kind,
			target: target.to_string(),
		})
}

impl Dataset {
	/// Validate a raw document and build all indexes.
	///
	/// Fails with [`LoadError::DanglingReference`] if an edge endpoint or a
	/// node's cluster/tag does not resolve, and with
	/// [`LoadError::DuplicateKey`] if a key repeats within a collection.
	pub fn load(raw: RawDataset) -> Result<Self, LoadError> {
		let RawDataset {
			nodes,
			edges,
			clusters,
			tags,
		} = raw;

		let cluster_by_key =
			index_keys(KeyKind::Cluster, clusters.iter().map(|c| c.key.as_str()))?;
		let tag_by_key = index_keys(KeyKind::Tag, tags.iter().map(|t| t.key.as_str()))?;
		let node_by_key = index_keys(KeyKind::Node, nodes.iter().map(|n| n.key.as_str()))?;
		let edge_by_id = index_keys(KeyKind::Edge, edges.iter().map(|e| e.id.as_str()))?;

		let mut cluster_totals = vec![0; clusters.len()];
		let mut tag_totals = vec![0; tags.len()];
		for node in &nodes {
			let c = resolve(
				&cluster_by_key,
				KeyKind::Node,
				&node.key,
				KeyKind::Cluster,
				&node.cluster,
			)?;
			let t = resolve(&tag_by_key, KeyKind::Node, &node.key, KeyKind::Tag, &node.tag)?;
			cluster_totals[c] += 1;
			tag_totals[t] += 1;
		}

		let mut adjacency = vec![Vec::new(); nodes.len()];
		for edge in &edges {
			let src = resolve(
				&node_by_key,
				KeyKind::Edge,
				&edge.id,
				KeyKind::Node,
				&edge.source,
			)?;
			let tgt = resolve(
				&node_by_key,
				KeyKind::Edge,
				&edge.id,
				KeyKind::Node,
				&edge.target,
			)?;
			if src != tgt {
				adjacency[src].push(tgt);
				adjacency[tgt].push(src);
			}
		}
		for neighbors in &mut adjacency {
			neighbors.sort_unstable();
			neighbors.dedup();
		}

		let score_range = nodes
			.iter()
			.map(|n| n.score)
			.fold(None, |range: Option<(f64, f64)>, s| match range {
				Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
				None => Some((s, s)),
			})
			.unwrap_or((0.0, 0.0));

		info!(
			"atlas-graph: loaded {} nodes, {} edges, {} clusters, {} tags",
			nodes.len(),
			edges.len(),
			clusters.len(),
			tags.len()
		);

		Ok(Self {
			nodes,
			edges,
			clusters,
			tags,
			node_by_key,
			edge_by_id,
			cluster_by_key,
			tag_by_key,
			adjacency,
			cluster_totals,
			tag_totals,
			score_range,
		})
	}

	/// Parse a JSON document and [`load`](Self::load) it.
	pub fn from_json(json: &str) -> Result<Self, LoadError> {
		let raw: RawDataset = serde_json::from_str(json)?;
		Self::load(raw)
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn clusters(&self) -> &[Cluster] {
		&self.clusters
	}

	pub fn tags(&self) -> &[Tag] {
		&self.tags
	}

	pub fn node(&self, key: &str) -> Option<&Node> {
		self.node_by_key.get(key).map(|&i| &self.nodes[i])
	}

	/// Position of a node in [`nodes`](Self::nodes).
	pub fn node_index(&self, key: &str) -> Option<usize> {
		self.node_by_key.get(key).copied()
	}

	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edge_by_id.get(id).map(|&i| &self.edges[i])
	}

	pub fn cluster(&self, key: &str) -> Option<&Cluster> {
		self.cluster_by_key.get(key).map(|&i| &self.clusters[i])
	}

	pub fn tag(&self, key: &str) -> Option<&Tag> {
		self.tag_by_key.get(key).map(|&i| &self.tags[i])
	}

	pub fn contains_node(&self, key: &str) -> bool {
		self.node_by_key.contains_key(key)
	}

	/// Keys of nodes sharing an edge with `key`, in either direction.
	/// Empty for unknown keys and isolated nodes.
	pub fn neighbors<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> + use<'a> {
		self.node_by_key
			.get(key)
			.map(|&i| self.adjacency[i].as_slice())
			.unwrap_or_default()
			.iter()
			.map(|&j| self.nodes[j].key.as_str())
	}

	/// Number of nodes in a cluster (regardless of filters).
	pub fn cluster_total(&self, key: &str) -> usize {
		self.cluster_by_key
			.get(key)
			.map(|&i| self.cluster_totals[i])
			.unwrap_or(0)
	}

	/// Number of nodes under a tag (regardless of filters).
	pub fn tag_total(&self, key: &str) -> usize {
		self.tag_by_key
			.get(key)
			.map(|&i| self.tag_totals[i])
			.unwrap_or(0)
	}

	/// `(min, max)` node score; `(0.0, 0.0)` for an empty dataset.
	pub fn score_range(&self) -> (f64, f64) {
		self.score_range
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::graph::fixtures::{atlas, pair, raw_atlas, raw_edge, raw_node};

	#[test]
	fn lookups_are_keyed() {
		let ds = atlas();
		assert_eq!(ds.node("risk-1").map(|n| n.label.as_str()), Some("Toxic output"));
		assert_eq!(ds.edge("e3").map(|e| e.source.as_str()), Some("bench-1"));
		assert_eq!(ds.cluster("c2").map(|c| c.label.as_str()), Some("Actions"));
		assert_eq!(ds.tag("t2").map(|t| t.image.as_str()), Some("action.svg"));
		assert_eq!(ds.node_index("act-1"), Some(2));
		assert!(ds.node("missing").is_none());
	}

	#[test]
	fn neighbors_cover_both_directions() {
		let ds = atlas();
		let mut n: Vec<&str> = ds.neighbors("risk-1").collect();
		n.sort();
		assert_eq!(n, vec!["act-1", "bench-1", "risk-2"]);
		assert_eq!(ds.neighbors("nope").count(), 0);
	}

	#[test]
	fn facet_totals_and_score_range() {
		let ds = atlas();
		assert_eq!(ds.cluster_total("c1"), 2);
		assert_eq!(ds.cluster_total("c4"), 0);
		assert_eq!(ds.tag_total("t1"), 3);
		assert_eq!(ds.score_range(), (0.0, 4.0));
	}

	#[test]
	fn dangling_edge_endpoint_fails() {
		let mut raw = raw_atlas();
		raw.edges.push(raw_edge("e9", "risk-1", "ghost"));
		assert_eq!(
			Dataset::load(raw).unwrap_err(),
			LoadError::DanglingReference {
				owner_kind: KeyKind::Edge,
				owner: "e9".into(),
				target_kind: KeyKind::Node,
				target: "ghost".into(),
			}
		);
	}

	#[test]
	fn undeclared_cluster_fails() {
		let mut raw = raw_atlas();
		raw.nodes.push(raw_node("x", "X", "c-unknown", "t1", 0.0));
		let err = Dataset::load(raw).unwrap_err();
		assert!(matches!(
			err,
			LoadError::DanglingReference {
				target_kind: KeyKind::Cluster,
				..
			}
		));
	}

	#[test]
	fn undeclared_tag_fails() {
		let mut raw = raw_atlas();
		raw.nodes.push(raw_node("x", "X", "c1", "t-unknown", 0.0));
		let err = Dataset::load(raw).unwrap_err();
		assert!(matches!(
			err,
			LoadError::DanglingReference {
				target_kind: KeyKind::Tag,
				..
			}
		));
	}

	#[test]
	fn duplicate_node_key_fails() {
		let mut raw = raw_atlas();
		raw.nodes.push(raw_node("risk-1", "Again", "c1", "t1", 0.0));
		assert_eq!(
			Dataset::load(raw).unwrap_err(),
			LoadError::DuplicateKey {
				kind: KeyKind::Node,
				key: "risk-1".into(),
			}
		);
	}

	#[test]
	fn parses_exporter_document() {
		let json = r##"{
			"nodes": [
				{"key": "A", "label": "A", "tag": "t1", "URL": "https://example.org/a", "cluster": "c1", "x": 1.5, "y": -2.0, "score": 0.3},
				{"key": "B", "label": "B", "tag": "t1", "URL": "", "cluster": "c2", "x": 0, "y": 0}
			],
			"edges": [{"id": "e1", "source": "A", "target": "B", "edge_type": "relatedTo", "label": "related"}],
			"clusters": [
				{"key": "c1", "color": "#1976d2", "clusterLabel": "One"},
				{"key": "c2", "color": "#7b1fa2", "clusterLabel": "Two"}
			],
			"tags": [{"key": "t1", "image": "risk.svg"}]
		}"##;
		let ds = Dataset::from_json(json).unwrap();
		let a = ds.node("A").unwrap();
		assert_eq!(a.url, "https://example.org/a");
		assert_eq!((a.x, a.y, a.score), (1.5, -2.0, 0.3));
		assert_eq!(ds.node("B").unwrap().score, 0.0);
		assert_eq!(ds.edge("e1").unwrap().edge_type, "relatedTo");
		assert_eq!(ds.cluster("c2").unwrap().label, "Two");
	}

	#[test]
	fn malformed_document_is_a_parse_error() {
		let err = Dataset::from_json(r#"{"nodes": [{"key": 1}]}"#).unwrap_err();
		assert_eq!(err.code(), "PARSE");
	}

	#[test]
	fn empty_document_loads() {
		let ds = Dataset::from_json("{}").unwrap();
		assert!(ds.nodes().is_empty());
		assert_eq!(ds.score_range(), (0.0, 0.0));
	}

	#[test]
	fn pair_fixture_is_valid() {
		let ds = pair();
		assert_eq!(ds.nodes().len(), 2);
		assert_eq!(ds.neighbors("A").collect::<Vec<_>>(), vec!["B"]);
	}
}
