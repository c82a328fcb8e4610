//! Cluster and tag filter facets.
//!
//! [`FiltersState`] is an immutable snapshot: every operation returns a new,
//! complete state, so two states can be compared with `==` to decide whether
//! anything downstream needs recomputing.

use std::collections::BTreeMap;

use super::dataset::Dataset;
use super::error::{KeyKind, UnknownKeyError};

/// One of the two filter facets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	Clusters,
	Tags,
}

impl Category {
	fn key_kind(self) -> KeyKind {
		match self {
			Category::Clusters => KeyKind::Cluster,
			Category::Tags => KeyKind::Tag,
		}
	}
}

/// Enabled flag for every declared cluster and tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FiltersState {
	clusters: BTreeMap<String, bool>,
	tags: BTreeMap<String, bool>,
}

impl FiltersState {
	/// Everything enabled.
	pub fn new(dataset: &Dataset) -> Self {
		Self {
			clusters: dataset
				.clusters()
				.iter()
				.map(|c| (c.key.clone(), true))
				.collect(),
			tags: dataset.tags().iter().map(|t| (t.key.clone(), true)).collect(),
		}
	}

	fn facet(&self, category: Category) -> &BTreeMap<String, bool> {
		match category {
			Category::Clusters => &self.clusters,
			Category::Tags => &self.tags,
		}
	}

	fn facet_mut(&mut self, category: Category) -> &mut BTreeMap<String, bool> {
		match category {
			Category::Clusters => &mut self.clusters,
			Category::Tags => &mut self.tags,
		}
	}

	/// Flip one key of a facet.
	pub fn toggle(&self, category: Category, key: &str) -> Result<Self, UnknownKeyError> {
		let mut next = self.clone();
		let flag = next
			.facet_mut(category)
			.get_mut(key)
			.ok_or_else(|| UnknownKeyError::new(category.key_kind(), key))?;
		*flag = !*flag;
		Ok(next)
	}

	pub fn toggle_cluster(&self, key: &str) -> Result<Self, UnknownKeyError> {
		self.toggle(Category::Clusters, key)
	}

	pub fn toggle_tag(&self, key: &str) -> Result<Self, UnknownKeyError> {
		self.toggle(Category::Tags, key)
	}

	/// Enable or disable every key of a facet ("check all" / "uncheck all").
	pub fn set_all(&self, category: Category, enabled: bool) -> Self {
		let mut next = self.clone();
		next.facet_mut(category)
			.values_mut()
			.for_each(|flag| *flag = enabled);
		next
	}

	/// Unknown keys read as disabled.
	pub fn enabled(&self, category: Category, key: &str) -> bool {
		self.facet(category).get(key).copied().unwrap_or(false)
	}

	pub fn is_cluster_enabled(&self, key: &str) -> bool {
		self.enabled(Category::Clusters, key)
	}

	pub fn is_tag_enabled(&self, key: &str) -> bool {
		self.enabled(Category::Tags, key)
	}

	/// `(key, enabled)` pairs of a facet, ordered by key.
	pub fn entries(&self, category: Category) -> impl Iterator<Item = (&str, bool)> {
		self.facet(category).iter().map(|(k, &v)| (k.as_str(), v))
	}
}
