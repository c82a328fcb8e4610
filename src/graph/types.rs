//! Graph document structures, as produced by the knowledge graph exporter.

use serde::Deserialize;

/// A graph entity with a pre-computed layout position.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
	/// Unique identifier. Edges reference nodes by this key.
	pub key: String,
	pub label: String,
	/// Key of the [`Tag`] this node is classified under.
	pub tag: String,
	/// Link opened when the node is clicked. May be empty.
	#[serde(rename = "URL", default)]
	pub url: String,
	/// Key of the [`Cluster`] this node belongs to.
	pub cluster: String,
	pub x: f64,
	pub y: f64,
	/// Pre-computed centrality score, used as the size hint.
	#[serde(default)]
	pub score: f64,
}

/// A typed relationship between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Edge {
	pub id: String,
	/// Source node key.
	pub source: String,
	/// Target node key.
	pub target: String,
	#[serde(default)]
	pub edge_type: String,
	#[serde(default)]
	pub label: String,
}

/// A coloring partition over nodes. One of the two filter facets.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Cluster {
	pub key: String,
	/// CSS color (e.g. "#1976d2").
	pub color: String,
	#[serde(rename = "clusterLabel")]
	pub label: String,
}

/// A secondary classification over nodes. The other filter facet.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Tag {
	pub key: String,
	/// Image file name shown next to the tag.
	#[serde(default)]
	pub image: String,
}

/// The unvalidated document: `{ nodes, edges, clusters, tags }`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawDataset {
	#[serde(default)]
	pub nodes: Vec<Node>,
	#[serde(default)]
	pub edges: Vec<Edge>,
	#[serde(default)]
	pub clusters: Vec<Cluster>,
	#[serde(default)]
	pub tags: Vec<Tag>,
}
