//! End-to-end behavior of the filtering and selection core, through the public
//! API only.

// Integration tests link every dependency of the library.
#![allow(unused_crate_dependencies)]

use std::sync::Arc;

use atlas_graph::graph::{
	Category, Cluster, Dataset, Edge, Event, FiltersState, Node, Phase, RawDataset, Session,
	SessionConfig, Tag, compute_visible, search,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const PAIR: &str = r##"{
	"nodes": [
		{"key": "A", "label": "A", "tag": "t1", "URL": "", "cluster": "c1", "x": 0, "y": 0},
		{"key": "B", "label": "B", "tag": "t1", "URL": "", "cluster": "c2", "x": 10, "y": 0}
	],
	"edges": [{"id": "e1", "source": "A", "target": "B", "edge_type": "relatedTo"}],
	"clusters": [
		{"key": "c1", "color": "#1976d2", "clusterLabel": "One"},
		{"key": "c2", "color": "#7b1fa2", "clusterLabel": "Two"}
	],
	"tags": [{"key": "t1", "image": "t1.svg"}]
}"##;

fn pair_session() -> Session {
	let dataset = Dataset::from_json(PAIR).unwrap();
	Session::new(Arc::new(dataset), SessionConfig::default())
}

#[test]
fn hiding_a_cluster_hides_its_nodes_and_their_edges() {
	let mut session = pair_session();
	session
		.dispatch(Event::ToggleCluster("c2".into()))
		.unwrap();

	let mut nodes: Vec<&str> = session
		.visibility()
		.nodes()
		.iter()
		.map(String::as_str)
		.collect();
	nodes.sort();
	assert_eq!(nodes, vec!["A"]);
	assert_eq!(session.visibility().edge_count(), 0);
}

#[test]
fn query_ranks_matching_visible_node_first() {
	let mut session = pair_session();
	session.dispatch(Event::Query("a".into())).unwrap();
	let suggestions = session.suggestions(10);
	assert_eq!(suggestions.first().map(|(key, _)| key.as_str()), Some("A"));
}

#[test]
fn hiding_the_selected_node_clears_the_selection() {
	let mut session = pair_session();
	session.dispatch(Event::Select("B".into())).unwrap();
	assert_eq!(session.selection().selected(), Some("B"));

	let outcome = session
		.dispatch(Event::ToggleCluster("c2".into()))
		.unwrap();
	assert!(outcome.selection_cleared);
	assert_eq!(session.selection().selected(), None);
	assert_eq!(session.render_model().selected, None);
}

#[test]
fn render_model_reflects_hover_and_filters() {
	let mut session = pair_session();
	session.dispatch(Event::Hover(Some("A".into()))).unwrap();
	let model = session.render_model();
	let a = model.node("A").unwrap();
	assert!(a.hovered && !a.dimmed);
	// B is a neighbor of A, so it stays in focus.
	assert!(!model.node("B").unwrap().dimmed);
	assert!(model.edge("e1").unwrap().highlighted);

	session
		.dispatch(Event::SetAll(Category::Clusters, false))
		.unwrap();
	let stats = session.render_model().stats();
	assert_eq!((stats.visible_nodes, stats.total_nodes), (0, 2));
	assert_eq!((stats.visible_edges, stats.total_edges), (0, 1));
}

#[test]
fn dangling_edges_fail_to_load() {
	let json = PAIR.replace(r#""target": "B""#, r#""target": "Z""#);
	let err = Dataset::from_json(&json).unwrap_err();
	assert_eq!(err.code(), "DANGLING_REFERENCE");
}

fn build(
	clusters: usize,
	tags: usize,
	nodes: Vec<(usize, usize, String, f64)>,
	edges: Vec<(usize, usize)>,
) -> RawDataset {
	RawDataset {
		nodes: nodes
			.into_iter()
			.enumerate()
			.map(|(i, (cluster, tag, label, score))| Node {
				key: format!("n{i}"),
				label,
				tag: format!("t{tag}"),
				url: String::new(),
				cluster: format!("c{cluster}"),
				x: i as f64,
				y: 0.0,
				score,
			})
			.collect(),
		edges: edges
			.into_iter()
			.enumerate()
			.map(|(i, (source, target))| Edge {
				id: format!("e{i}"),
				source: format!("n{source}"),
				target: format!("n{target}"),
				edge_type: String::new(),
				label: String::new(),
			})
			.collect(),
		clusters: (0..clusters)
			.map(|c| Cluster {
				key: format!("c{c}"),
				color: "#888888".into(),
				label: format!("Cluster {c}"),
			})
			.collect(),
		tags: (0..tags)
			.map(|t| Tag {
				key: format!("t{t}"),
				image: String::new(),
			})
			.collect(),
	}
}

fn arb_dataset() -> impl Strategy<Value = Dataset> {
	(1usize..4, 1usize..3, 1usize..12)
		.prop_flat_map(|(clusters, tags, nodes)| {
			(
				Just((clusters, tags)),
				prop::collection::vec((0..clusters, 0..tags, "[a-c ]{1,4}", 0.0f64..10.0), nodes),
				prop::collection::vec((0..nodes, 0..nodes), 0..20),
			)
		})
		.prop_map(|((clusters, tags), nodes, edges)| {
			Dataset::load(build(clusters, tags, nodes, edges)).unwrap()
		})
}

/// Filter toggles as (is_cluster, index); indices are reduced modulo the
/// number of declared keys.
fn arb_toggles() -> impl Strategy<Value = Vec<(bool, usize)>> {
	prop::collection::vec((any::<bool>(), 0usize..8), 0..10)
}

fn toggle_event(dataset: &Dataset, (is_cluster, idx): (bool, usize)) -> Event {
	if is_cluster {
		let clusters = dataset.clusters();
		Event::ToggleCluster(clusters[idx % clusters.len()].key.clone())
	} else {
		let tags = dataset.tags();
		Event::ToggleTag(tags[idx % tags.len()].key.clone())
	}
}

fn apply_toggles(dataset: &Dataset, toggles: &[(bool, usize)]) -> FiltersState {
	toggles
		.iter()
		.fold(FiltersState::new(dataset), |filters, &(is_cluster, idx)| {
			match toggle_event(dataset, (is_cluster, idx)) {
				Event::ToggleCluster(key) => filters.toggle_cluster(&key).unwrap(),
				Event::ToggleTag(key) => filters.toggle_tag(&key).unwrap(),
				_ => filters,
			}
		})
}

proptest! {
	#[test]
	fn visibility_is_deterministic(dataset in arb_dataset(), toggles in arb_toggles()) {
		let filters = apply_toggles(&dataset, &toggles);
		prop_assert_eq!(
			compute_visible(&dataset, &filters),
			compute_visible(&dataset, &filters)
		);
	}

	#[test]
	fn visible_edges_have_visible_endpoints(dataset in arb_dataset(), toggles in arb_toggles()) {
		let visibility = compute_visible(&dataset, &apply_toggles(&dataset, &toggles));
		for edge in dataset.edges() {
			if visibility.is_edge_visible(&edge.id) {
				prop_assert!(visibility.is_node_visible(&edge.source));
				prop_assert!(visibility.is_node_visible(&edge.target));
			}
		}
	}

	#[test]
	fn selection_never_outlives_visibility(
		dataset in arb_dataset(),
		pick in 0usize..12,
		toggles in arb_toggles(),
	) {
		let key = dataset.nodes()[pick % dataset.nodes().len()].key.clone();
		let dataset = Arc::new(dataset);
		let mut session = Session::new(dataset.clone(), SessionConfig::default());
		session.dispatch(Event::Select(key)).unwrap();
		for toggle in toggles {
			let outcome = session.dispatch(toggle_event(&dataset, toggle)).unwrap();
			prop_assert_eq!(outcome.path.last(), Some(&Phase::Idle));
			if let Some(selected) = session.selection().selected() {
				prop_assert!(session.visibility().is_node_visible(selected));
			}
		}
	}

	#[test]
	fn empty_query_matches_nothing(dataset in arb_dataset(), toggles in arb_toggles()) {
		let visibility = compute_visible(&dataset, &apply_toggles(&dataset, &toggles));
		prop_assert!(search("", &dataset, &visibility).is_empty());
	}

	#[test]
	fn search_ranks_by_length_then_key(
		dataset in arb_dataset(),
		toggles in arb_toggles(),
		query in "[a-c ]{1,2}",
	) {
		let visibility = compute_visible(&dataset, &apply_toggles(&dataset, &toggles));
		let mut expected: Vec<(usize, &str)> = dataset
			.nodes()
			.iter()
			.filter(|node| visibility.is_node_visible(&node.key))
			.filter(|node| node.label.to_lowercase().contains(&query))
			.map(|node| (node.label.chars().count(), node.key.as_str()))
			.collect();
		expected.sort();
		let expected: Vec<&str> = expected.into_iter().map(|(_, key)| key).collect();
		prop_assert_eq!(search(&query, &dataset, &visibility), expected);
	}

	#[test]
	fn search_stays_within_visible_set(
		dataset in arb_dataset(),
		toggles in arb_toggles(),
		query in "[a-c]{1,2}",
	) {
		let visibility = compute_visible(&dataset, &apply_toggles(&dataset, &toggles));
		for key in search(&query, &dataset, &visibility) {
			prop_assert!(visibility.is_node_visible(&key));
			let label = &dataset.node(&key).unwrap().label;
			prop_assert!(label.to_lowercase().contains(&query));
		}
	}

	#[test]
	fn toggling_twice_round_trips(dataset in arb_dataset(), toggles in arb_toggles(), idx in 0usize..8) {
		let filters = apply_toggles(&dataset, &toggles);
		let key = &dataset.clusters()[idx % dataset.clusters().len()].key;
		let back = filters.toggle_cluster(key).unwrap().toggle_cluster(key).unwrap();
		prop_assert_eq!(back, filters);
	}
}
