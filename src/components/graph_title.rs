//! Graph heading with visible and total counts.

use leptos::prelude::*;

use crate::graph::GraphStats;

/// One-line summary of how much of the graph is on screen.
pub fn describe(stats: GraphStats) -> String {
	if stats.visible_nodes == stats.total_nodes {
		format!("{} nodes, {} edges", stats.total_nodes, stats.total_edges)
	} else {
		format!(
			"{} of {} nodes, {} of {} edges shown",
			stats.visible_nodes, stats.total_nodes, stats.visible_edges, stats.total_edges
		)
	}
}

/// Page heading with live visible/total counts.
#[component]
pub fn GraphTitle(title: String, #[prop(into)] stats: Signal<GraphStats>) -> impl IntoView {
	view! {
		<div class="graph-title">
			<h1>{title}</h1>
			<p class="subtitle">{move || describe(stats.get())}</p>
		</div>
	}
}
