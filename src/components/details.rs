//! Details card for the selected node.

use leptos::prelude::*;

/// What the details card shows about the selected node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetails {
	pub label: String,
	pub cluster: String,
	pub color: String,
	pub tag: String,
	pub url: String,
	pub neighbors: usize,
}

/// Card describing the selected node, with a link to its page and a button
/// to clear the selection.
#[component]
pub fn DetailsCard(
	#[prop(into)] details: Signal<Option<NodeDetails>>,
	on_close: Callback<()>,
) -> impl IntoView {
	move || {
		details.get().map(|d| {
			view! {
				<div class="details-card">
					<div class="details-header">
						<span class="facet-swatch" style:background-color=d.color></span>
						<span class="details-cluster">{d.cluster}</span>
						<button class="details-close" on:click=move |_| on_close.run(())>"×"</button>
					</div>
					<h2>{d.label}</h2>
					<p class="details-meta">
						{format!("{} · {} connections", d.tag, d.neighbors)}
					</p>
					{(!d.url.is_empty())
						.then(|| {
							view! {
								<a href=d.url target="_blank" rel="noopener">
									"Open page"
								</a>
							}
						})}
				</div>
			}
		})
	}
}
