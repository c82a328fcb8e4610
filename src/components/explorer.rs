//! The explorer page: one [`Session`] driven by the canvas and the panels.
//!
//! All engine state lives in a single `RwSignal<Session>`. Widgets never touch
//! it directly; they report [`Event`]s through `dispatch`, and read derived
//! memos that only notify when their value actually changed.

use std::sync::Arc;

use leptos::prelude::*;
use log::warn;

use super::details::{DetailsCard, NodeDetails};
use super::filter_panel::FacetPanel;
use super::graph_title::GraphTitle;
use super::graph_view::GraphCanvas;
use super::search_field::SearchField;
use crate::config::AppConfig;
use crate::graph::{Category, Dataset, Event, Session};

/// Card contents for the selected node as drawn. `selected` comes from the
/// render model, so a node hidden by the filters has no card.
fn node_details(dataset: &Dataset, selected: Option<&str>) -> Option<NodeDetails> {
	let node = dataset.node(selected?)?;
	let cluster = dataset.cluster(&node.cluster);
	Some(NodeDetails {
		label: node.label.clone(),
		cluster: cluster.map(|c| c.label.clone()).unwrap_or_default(),
		color: cluster.map(|c| c.color.clone()).unwrap_or_default(),
		tag: node.tag.clone(),
		url: node.url.clone(),
		neighbors: dataset.neighbors(&node.key).count(),
	})
}

fn open_in_new_tab(url: &str) {
	if url.is_empty() {
		return;
	}
	if let Some(window) = web_sys::window() {
		if let Err(e) = window.open_with_url_and_target(url, "_blank") {
			warn!("atlas-graph: failed to open {}: {:?}", url, e);
		}
	}
}

/// Full-screen graph with filter panels, search, title, and details card.
#[component]
pub fn Explorer(dataset: Arc<Dataset>, config: AppConfig) -> impl IntoView {
	let session = RwSignal::new(Session::new(dataset, config.session()));

	let dispatch = Callback::new(move |event: Event| {
		session.maybe_update(|s| match s.dispatch(event) {
			Ok(outcome) => outcome.changed,
			Err(err) => {
				warn!("atlas-graph: rejected event [{}]: {}", err.code(), err);
				false
			}
		});
	});

	let model = Memo::new(move |_| session.with(|s| s.render_model()));
	let stats = Memo::new(move |_| model.with(|m| m.stats()));
	let cluster_rows = Memo::new(move |_| session.with(|s| s.facet_rows(Category::Clusters)));
	let tag_rows = Memo::new(move |_| session.with(|s| s.facet_rows(Category::Tags)));
	let limit = config.suggestion_limit;
	let suggestions = Memo::new(move |_| session.with(|s| s.suggestions(limit)));
	let details = Memo::new(move |_| {
		let selected = model.with(|m| m.selected.clone());
		session.with(|s| node_details(s.dataset(), selected.as_deref()))
	});

	let on_click = move |key: Option<String>| match key {
		Some(key) => {
			let url = session
				.with_untracked(|s| s.dataset().node(&key).map(|n| n.url.clone()))
				.unwrap_or_default();
			dispatch.run(Event::Select(key));
			open_in_new_tab(&url);
		}
		None => dispatch.run(Event::ClearSelection),
	};

	view! {
		<div class="fullscreen-graph">
			<GraphCanvas
				model=model
				on_hover={move |key: Option<String>| dispatch.run(Event::Hover(key))}
				on_click=on_click
				theme=config.theme()
				fullscreen=true
			/>
			<div class="graph-overlay">
				<GraphTitle title=config.title.clone() stats=stats />
				<SearchField
					suggestions=suggestions
					on_query=Callback::new(move |q: String| dispatch.run(Event::Query(q)))
				/>
			</div>
			<div class="graph-panels">
				<FacetPanel
					category=Category::Clusters
					title="Clusters"
					rows=cluster_rows
					on_toggle=Callback::new(move |key: String| dispatch.run(Event::ToggleCluster(key)))
					on_set_all=Callback::new(move |on: bool| {
						dispatch.run(Event::SetAll(Category::Clusters, on))
					})
				/>
				<FacetPanel
					category=Category::Tags
					title="Tags"
					rows=tag_rows
					on_toggle=Callback::new(move |key: String| dispatch.run(Event::ToggleTag(key)))
					on_set_all=Callback::new(move |on: bool| dispatch.run(Event::SetAll(Category::Tags, on)))
					image_base=config.image_base.clone()
				/>
			</div>
			<DetailsCard
				details=details
				on_close=Callback::new(move |_: ()| dispatch.run(Event::ClearSelection))
			/>
		</div>
	}
}
