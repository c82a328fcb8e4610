//! Shared test datasets.

use std::sync::Arc;

use super::dataset::Dataset;
use super::types::{Cluster, Edge, Node, RawDataset, Tag};

pub fn raw_node(key: &str, label: &str, cluster: &str, tag: &str, score: f64) -> Node {
	Node {
		key: key.into(),
		label: label.into(),
		tag: tag.into(),
		url: format!("https://atlas.example/{key}"),
		cluster: cluster.into(),
		x: 0.0,
		y: 0.0,
		score,
	}
}

pub fn raw_edge(id: &str, source: &str, target: &str) -> Edge {
	Edge {
		id: id.into(),
		source: source.into(),
		target: target.into(),
		edge_type: "relatedTo".into(),
		label: String::new(),
	}
}

fn cluster(key: &str, color: &str, label: &str) -> Cluster {
	Cluster {
		key: key.into(),
		color: color.into(),
		label: label.into(),
	}
}

fn tag(key: &str, image: &str) -> Tag {
	Tag {
		key: key.into(),
		image: image.into(),
	}
}

/// Two nodes `A` (c1, t1) and `B` (c2, t1) joined by `A -> B`.
pub fn pair() -> Dataset {
	let raw = RawDataset {
		nodes: vec![
			raw_node("A", "A", "c1", "t1", 1.0),
			raw_node("B", "B", "c2", "t1", 0.0),
		],
		edges: vec![raw_edge("e1", "A", "B")],
		clusters: vec![
			cluster("c1", "#1976d2", "One"),
			cluster("c2", "#7b1fa2", "Two"),
		],
		tags: vec![tag("t1", "risk.svg")],
	};
	Dataset::load(raw).unwrap()
}

pub fn raw_atlas() -> RawDataset {
	RawDataset {
		nodes: vec![
			raw_node("risk-1", "Toxic output", "c1", "t1", 4.0),
			raw_node("risk-2", "Data poisoning", "c1", "t1", 1.0),
			raw_node("act-1", "Output filtering", "c2", "t2", 2.0),
			raw_node("act-2", "Data provenance", "c2", "t1", 0.0),
			raw_node("bench-1", "Toxicity benchmark", "c3", "t2", 3.0),
		],
		edges: vec![
			raw_edge("e1", "risk-1", "act-1"),
			raw_edge("e2", "risk-2", "act-2"),
			raw_edge("e3", "bench-1", "risk-1"),
			raw_edge("e4", "risk-1", "risk-2"),
		],
		clusters: vec![
			cluster("c1", "#c62828", "Risks"),
			cluster("c2", "#2e7d32", "Actions"),
			cluster("c3", "#e65100", "Benchmarks"),
		],
		tags: vec![tag("t1", "risk.svg"), tag("t2", "action.svg")],
	}
}

/// Five nodes over three clusters and two tags.
pub fn atlas() -> Dataset {
	Dataset::load(raw_atlas()).unwrap()
}

pub fn shared(ds: Dataset) -> Arc<Dataset> {
	Arc::new(ds)
}
