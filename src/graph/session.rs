//! Session state machine driving the core from discrete user events.
//!
//! The session owns the current snapshots (filters, visibility, search
//! index, selection, query) and replaces them on every event. Events are
//! applied strictly in the order they are dispatched:
//!
//! ```text
//! filter event:   Idle -> FilterChanging -> Recomputing -> Idle
//! query event:    Idle -> Searching -> Idle
//! hover / select: Idle -> Idle
//! ```
//!
//! Clearing a selection that became hidden happens inside `Recomputing`, so
//! no filter change can complete with a stale selection.

use std::sync::Arc;

use log::debug;

use super::dataset::Dataset;
use super::error::UnknownKeyError;
use super::filters::{Category, FiltersState};
use super::projection::{ProjectionConfig, RenderModel, project};
use super::search::SearchIndex;
use super::selection::SelectionState;
use super::visibility::{Visibility, compute_visible};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Idle,
	FilterChanging,
	Recomputing,
	Searching,
}

/// A user action, as reported by the filter panels, search field, or canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
	ToggleCluster(String),
	ToggleTag(String),
	SetAll(Category, bool),
	Query(String),
	Hover(Option<String>),
	Select(String),
	ClearSelection,
}

/// What a dispatched event did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
	/// Phases walked, starting and ending at [`Phase::Idle`].
	pub path: Vec<Phase>,
	/// Whether any snapshot differs from before the event.
	pub changed: bool,
	/// Whether recomputation dropped a selection that became hidden.
	pub selection_cleared: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionConfig {
	pub projection: ProjectionConfig,
}

/// One row of a filter panel.
#[derive(Clone, Debug, PartialEq)]
pub struct FacetRow {
	pub key: String,
	pub label: String,
	/// Cluster color or tag image.
	pub swatch: String,
	pub enabled: bool,
	pub visible: usize,
	pub total: usize,
}

#[derive(Debug)]
pub struct Session {
	dataset: Arc<Dataset>,
	config: SessionConfig,
	filters: FiltersState,
	visibility: Visibility,
	index: SearchIndex,
	selection: SelectionState,
	query: String,
	phase: Phase,
}

impl Session {
	pub fn new(dataset: Arc<Dataset>, config: SessionConfig) -> Self {
		let filters = FiltersState::new(&dataset);
		let visibility = compute_visible(&dataset, &filters);
		let index = SearchIndex::build(&dataset, &visibility);
		Self {
			dataset,
			config,
			filters,
			visibility,
			index,
			selection: SelectionState::default(),
			query: String::new(),
			phase: Phase::Idle,
		}
	}

	pub fn dataset(&self) -> &Dataset {
		&self.dataset
	}

	pub fn filters(&self) -> &FiltersState {
		&self.filters
	}

	pub fn visibility(&self) -> &Visibility {
		&self.visibility
	}

	pub fn selection(&self) -> &SelectionState {
		&self.selection
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	/// Always [`Phase::Idle`] between events.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Apply one event. On error nothing changes.
	pub fn dispatch(&mut self, event: Event) -> Result<Outcome, UnknownKeyError> {
		debug!("atlas-graph: dispatch {:?}", event);
		let mut path = vec![Phase::Idle];
		let result = match event {
			Event::ToggleCluster(key) => {
				self.change_filters(&mut path, |f| f.toggle_cluster(&key))
			}
			Event::ToggleTag(key) => self.change_filters(&mut path, |f| f.toggle_tag(&key)),
			Event::SetAll(category, enabled) => {
				self.change_filters(&mut path, |f| Ok(f.set_all(category, enabled)))
			}
			Event::Query(query) => {
				self.enter(&mut path, Phase::Searching);
				Ok(self.apply_query(query))
			}
			Event::Hover(key) => self
				.selection
				.hover(&self.dataset, key.as_deref())
				.map(|next| self.replace_selection(next)),
			Event::Select(key) => self
				.selection
				.select(&self.dataset, &key)
				.map(|next| self.replace_selection(next)),
			Event::ClearSelection => {
				let next = self.selection.clear_selection();
				Ok(self.replace_selection(next))
			}
		};
		self.enter(&mut path, Phase::Idle);

		let (changed, selection_cleared) = result?;
		Ok(Outcome {
			path,
			changed,
			selection_cleared,
		})
	}

	fn enter(&mut self, path: &mut Vec<Phase>, phase: Phase) {
		self.phase = phase;
		path.push(phase);
	}

	/// Returns `(changed, selection_cleared)`.
	fn change_filters(
		&mut self,
		path: &mut Vec<Phase>,
		update: impl FnOnce(&FiltersState) -> Result<FiltersState, UnknownKeyError>,
	) -> Result<(bool, bool), UnknownKeyError> {
		self.enter(path, Phase::FilterChanging);
		let filters = update(&self.filters)?;
		if filters == self.filters {
			return Ok((false, false));
		}
		self.filters = filters;

		self.enter(path, Phase::Recomputing);
		let visibility = compute_visible(&self.dataset, &self.filters);
		if visibility != self.visibility {
			self.index = SearchIndex::build(&self.dataset, &visibility);
			self.visibility = visibility;
		}
		let selection = self.selection.clear_selection_if_hidden(&self.visibility);
		let cleared = selection != self.selection;
		if cleared {
			debug!("atlas-graph: selection cleared, node no longer visible");
		}
		self.selection = selection;
		Ok((true, cleared))
	}

	fn apply_query(&mut self, query: String) -> (bool, bool) {
		let mut changed = query != self.query;
		if let Some(key) = self.index.exact(&query) {
			if self.selection.selected() != Some(key) {
				// The key comes from the index, so it exists in the dataset.
				if let Ok(next) = self.selection.select(&self.dataset, key) {
					self.selection = next;
					changed = true;
				}
			}
		}
		self.query = query;
		(changed, false)
	}

	fn replace_selection(&mut self, next: SelectionState) -> (bool, bool) {
		let changed = next != self.selection;
		self.selection = next;
		(changed, false)
	}

	/// First `limit` ranked matches for the current query, with labels.
	pub fn suggestions(&self, limit: usize) -> Vec<(String, String)> {
		self.index
			.search(&self.query)
			.take(limit)
			.filter_map(|key| self.dataset.node(key))
			.map(|node| (node.key.clone(), node.label.clone()))
			.collect()
	}

	pub fn render_model(&self) -> RenderModel {
		project(
			&self.dataset,
			&self.visibility,
			&self.selection,
			&self.config.projection,
		)
	}

	/// Rows for a filter panel. Clusters are listed by size (largest first),
	/// tags in document order.
	pub fn facet_rows(&self, category: Category) -> Vec<FacetRow> {
		let counts = self.visibility.counts();
		let mut rows: Vec<FacetRow> = match category {
			Category::Clusters => self
				.dataset
				.clusters()
				.iter()
				.map(|c| FacetRow {
					key: c.key.clone(),
					label: c.label.clone(),
					swatch: c.color.clone(),
					enabled: self.filters.is_cluster_enabled(&c.key),
					visible: counts.get(category, &c.key),
					total: self.dataset.cluster_total(&c.key),
				})
				.collect(),
			Category::Tags => self
				.dataset
				.tags()
				.iter()
				.map(|t| FacetRow {
					key: t.key.clone(),
					label: t.key.clone(),
					swatch: t.image.clone(),
					enabled: self.filters.is_tag_enabled(&t.key),
					visible: counts.get(category, &t.key),
					total: self.dataset.tag_total(&t.key),
				})
				.collect(),
		};
		if category == Category::Clusters {
			rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.key.cmp(&b.key)));
		}
		rows
	}
}
