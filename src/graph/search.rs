//! Label search over the visible nodes.
//!
//! The index is rebuilt after each visibility change and holds only visible
//! nodes, pre-ordered by label length and then key. A query walks that order
//! lazily, so taking the first few suggestions is cheap and the same
//! (index, query) pair always yields the same sequence.

use std::slice;

use super::dataset::Dataset;
use super::visibility::Visibility;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
	key: String,
	label_lower: String,
	label_len: usize,
}

/// Ranked, case-insensitive label index over visible nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchIndex {
	entries: Vec<Entry>,
}

impl SearchIndex {
	pub fn build(dataset: &Dataset, visibility: &Visibility) -> Self {
		let mut entries: Vec<Entry> = dataset
			.nodes()
			.iter()
			.filter(|node| visibility.is_node_visible(&node.key))
			.map(|node| Entry {
				key: node.key.clone(),
				label_lower: node.label.to_lowercase(),
				label_len: node.label.chars().count(),
			})
			.collect();
		entries.sort_by(|a, b| a.label_len.cmp(&b.label_len).then_with(|| a.key.cmp(&b.key)));
		Self { entries }
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Keys of visible nodes whose label contains `query`, best match first.
	///
	/// The empty query matches nothing. Whitespace is matched literally.
	pub fn search(&self, query: &str) -> Matches<'_> {
		let needle = query.to_lowercase();
		let entries = if needle.is_empty() {
			self.entries[..0].iter()
		} else {
			self.entries.iter()
		};
		Matches { entries, needle }
	}

	/// The visible node whose label equals `query`, ignoring case.
	pub fn exact(&self, query: &str) -> Option<&str> {
		let needle = query.to_lowercase();
		if needle.is_empty() {
			return None;
		}
		self.entries
			.iter()
			.find(|e| e.label_lower == needle)
			.map(|e| e.key.as_str())
	}
}

/// Lazy iterator returned by [`SearchIndex::search`].
///
/// Clone it before advancing to walk the same matches again.
#[derive(Clone, Debug)]
pub struct Matches<'a> {
	entries: slice::Iter<'a, Entry>,
	needle: String,
}

impl<'a> Iterator for Matches<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		let needle = &self.needle;
		self.entries
			.by_ref()
			.find(|e| e.label_lower.contains(needle.as_str()))
			.map(|e| e.key.as_str())
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, Some(self.entries.len()))
	}
}

/// Ranked keys of visible nodes matching `query`.
///
/// Builds a transient index; callers issuing many queries against the same
/// visible set should keep a [`SearchIndex`] instead.
pub fn search(query: &str, dataset: &Dataset, visibility: &Visibility) -> Vec<String> {
	SearchIndex::build(dataset, visibility)
		.search(query)
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::graph::filters::FiltersState;
	use crate::graph::fixtures::{atlas, pair, raw_atlas, raw_node};
	use crate::graph::types::RawDataset;
	use crate::graph::visibility::compute_visible;

	fn index_for(ds: &Dataset, filters: &FiltersState) -> SearchIndex {
		SearchIndex::build(ds, &compute_visible(ds, filters))
	}

	#[test]
	fn case_insensitive_match_comes_first() {
		let ds = pair();
		let vis = compute_visible(&ds, &FiltersState::new(&ds));
		assert_eq!(search("a", &ds, &vis), vec!["A".to_string()]);
	}

	#[test]
	fn ranks_by_label_length_then_key() {
		let ds = atlas();
		let index = index_for(&ds, &FiltersState::new(&ds));
		// "Data poisoning" (14) and "Data provenance" (15)
		assert_eq!(
			index.search("data").collect::<Vec<_>>(),
			vec!["risk-2", "act-2"]
		);
		// "Toxic output" (12), "Output filtering" (16)
		assert_eq!(
			index.search("OUTPUT").collect::<Vec<_>>(),
			vec!["risk-1", "act-1"]
		);
	}

	#[test]
	fn empty_query_matches_nothing() {
		let ds = atlas();
		let index = index_for(&ds, &FiltersState::new(&ds));
		assert_eq!(index.search("").count(), 0);
		assert_eq!(index.exact(""), None);
	}

	/// Keys deliberately out of document order, labels of equal length.
	fn same_length_labels() -> Dataset {
		Dataset::load(RawDataset {
			nodes: vec![
				raw_node("z", "ab", "c1", "t1", 0.0),
				raw_node("m", "ba", "c1", "t1", 0.0),
				raw_node("a", "xa", "c1", "t1", 0.0),
				raw_node("q", "a b", "c1", "t1", 0.0),
				raw_node("r", "bxxxa", "c1", "t1", 0.0),
			],
			edges: Vec::new(),
			..raw_atlas()
		})
		.unwrap()
	}

	#[test]
	fn equal_length_labels_rank_by_key() {
		let ds = same_length_labels();
		let index = index_for(&ds, &FiltersState::new(&ds));
		assert_eq!(
			index.search("a").collect::<Vec<_>>(),
			vec!["a", "m", "z", "q", "r"]
		);
	}

	#[test]
	fn whitespace_is_matched_literally() {
		let ds = same_length_labels();
		let index = index_for(&ds, &FiltersState::new(&ds));
		assert_eq!(index.search(" b").collect::<Vec<_>>(), vec!["q"]);
		assert_eq!(index.search(" ").collect::<Vec<_>>(), vec!["q"]);
		assert_eq!(index.exact(" ab"), None);
		assert_eq!(index.exact("AB"), Some("z"));
	}

	#[test]
	fn hidden_nodes_are_never_suggested() {
		let ds = atlas();
		let filters = FiltersState::new(&ds).toggle_cluster("c1").unwrap();
		let index = index_for(&ds, &filters);
		assert_eq!(index.len(), 3);
		assert_eq!(index.search("tox").collect::<Vec<_>>(), vec!["bench-1"]);
	}

	#[test]
	fn lazy_take_and_repeatable() {
		let ds = atlas();
		let index = index_for(&ds, &FiltersState::new(&ds));
		let first: Vec<_> = index.search("o").take(2).collect();
		assert_eq!(first.len(), 2);
		let again: Vec<_> = index.search("o").take(2).collect();
		assert_eq!(first, again);
	}

	#[test]
	fn exact_label_ignores_case() {
		let ds = atlas();
		let index = index_for(&ds, &FiltersState::new(&ds));
		assert_eq!(index.exact("toxic OUTPUT"), Some("risk-1"));
		assert_eq!(index.exact("toxic"), None);
	}
}
