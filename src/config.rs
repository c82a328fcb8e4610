//! Page-level configuration, read from `<script id="graph-config">`.
//!
//! Every field has a default, so the element may be omitted or partial.

use serde::Deserialize;

use crate::components::graph_view::Theme;
use crate::graph::{ProjectionConfig, SessionConfig};

/// Named canvas theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
	/// Dark canvas.
	#[default]
	Default,
	/// Light canvas.
	Paper,
}

/// Configuration for the whole explorer page.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Heading shown above the graph.
	pub title: String,
	/// Node sizing and dimming.
	pub projection: ProjectionConfig,
	/// Maximum number of search suggestions offered.
	pub suggestion_limit: usize,
	pub theme: ThemeName,
	/// Prefix prepended to tag image file names.
	pub image_base: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			title: "Knowledge Graph".to_string(),
			projection: ProjectionConfig::default(),
			suggestion_limit: 10,
			theme: ThemeName::Default,
			image_base: "images/".to_string(),
		}
	}
}

impl AppConfig {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	pub fn session(&self) -> SessionConfig {
		SessionConfig {
			projection: self.projection.clone(),
		}
	}

	pub fn theme(&self) -> Theme {
		match self.theme {
			ThemeName::Default => Theme::default_theme(),
			ThemeName::Paper => Theme::paper(),
		}
	}
}
