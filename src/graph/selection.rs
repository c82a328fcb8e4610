//! Hovered and selected node tracking.
//!
//! Hover and selection are independent fields. Both only ever hold keys of
//! nodes that exist in the dataset; whether those nodes are currently visible
//! is a display concern, except that a selection pointing at a hidden node is
//! dropped by [`SelectionState::clear_selection_if_hidden`] after every
//! visibility change.

use super::dataset::Dataset;
use super::error::{KeyKind, UnknownKeyError};
use super::visibility::Visibility;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
	hovered: Option<String>,
	selected: Option<String>,
}

fn existing(dataset: &Dataset, key: &str) -> Result<String, UnknownKeyError> {
	if dataset.contains_node(key) {
		Ok(key.to_string())
	} else {
		Err(UnknownKeyError::new(KeyKind::Node, key))
	}
}

impl SelectionState {
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// Set or clear the hovered node. Hidden nodes may be hovered.
	pub fn hover(&self, dataset: &Dataset, key: Option<&str>) -> Result<Self, UnknownKeyError> {
		let hovered = key.map(|k| existing(dataset, k)).transpose()?;
		Ok(Self {
			hovered,
			..self.clone()
		})
	}

	pub fn select(&self, dataset: &Dataset, key: &str) -> Result<Self, UnknownKeyError> {
		Ok(Self {
			selected: Some(existing(dataset, key)?),
			..self.clone()
		})
	}

	pub fn clear_selection(&self) -> Self {
		Self {
			selected: None,
			..self.clone()
		}
	}

	/// Drop the selection if its node is no longer visible.
	pub fn clear_selection_if_hidden(&self, visibility: &Visibility) -> Self {
		match self.selected() {
			Some(key) if !visibility.is_node_visible(key) => self.clear_selection(),
			_ => self.clone(),
		}
	}
}
