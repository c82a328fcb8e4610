//! atlas-graph: Interactive filtered graph explorer for knowledge graph exports.
//!
//! This crate provides a WASM-based explorer that renders a pre-laid-out
//! node-link graph, with cluster/tag filters, node search, hover focus, and
//! selection. The filtering and selection logic lives in [`graph`] and has no
//! DOM dependency; [`components`] wires it to a canvas and a few panels.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod graph;

pub use components::Explorer;
pub use config::AppConfig;
pub use graph::{Dataset, Event, LoadError, RenderModel, Session};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("atlas-graph: logging initialized");
}

/// Text of the `<script>` element with the given id, if present.
fn read_script(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load the dataset from a script element with id="graph-data".
/// Expected format: JSON with { nodes, edges, clusters, tags }.
fn load_dataset() -> Result<Dataset, LoadError> {
	let json = read_script("graph-data")
		.ok_or_else(|| LoadError::Parse("no #graph-data element on the page".into()))?;
	Dataset::from_json(&json)
}

/// Load the optional page configuration from id="graph-config".
/// A missing element means defaults; an invalid one is reported and ignored.
fn load_config() -> AppConfig {
	let Some(json) = read_script("graph-config") else {
		return AppConfig::default();
	};
	AppConfig::from_json(&json).unwrap_or_else(|e| {
		warn!("atlas-graph: ignoring invalid graph config: {}", e);
		AppConfig::default()
	})
}

#[component]
fn LoadFailure(error: LoadError) -> impl IntoView {
	view! {
		<div class="load-failure">
			<h1>"Unable to load graph"</h1>
			<p>{error.to_string()}</p>
			<p class="subtitle">{format!("Error code: {}", error.code())}</p>
		</div>
	}
}

/// Main application component.
/// Loads the dataset and configuration from the DOM and renders the explorer,
/// or an error view naming the load failure.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let title = config.title.clone();

	let body = match load_dataset() {
		Ok(dataset) => view! { <Explorer dataset=Arc::new(dataset) config=config /> }.into_any(),
		Err(error) => {
			warn!("atlas-graph: failed to load graph data: {}", error);
			view! { <LoadFailure error=error /> }.into_any()
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{body}
	}
}
