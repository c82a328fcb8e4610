//! Cluster and tag filter panels.

use leptos::prelude::*;

use crate::graph::{Category, FacetRow};

/// Share of a facet's nodes that are currently visible, as a CSS width.
fn bar_width(row: &FacetRow) -> String {
	let pct = if row.total == 0 {
		0.0
	} else {
		100.0 * row.visible as f64 / row.total as f64
	};
	format!("{pct:.0}%")
}

/// Swatch for a row: a color dot for clusters, the tag's image for tags.
fn swatch(category: Category, row: &FacetRow, image_base: &str) -> AnyView {
	match category {
		Category::Clusters => view! {
			<span class="facet-swatch" style:background-color=row.swatch.clone()></span>
		}
		.into_any(),
		Category::Tags if row.swatch.is_empty() => {
			view! { <span class="facet-swatch"></span> }.into_any()
		}
		Category::Tags => view! {
			<img class="facet-image" src=format!("{image_base}{}", row.swatch) alt="" />
		}
		.into_any(),
	}
}

/// One collapsible filter panel listing every cluster or tag with a checkbox
/// and its visible/total node count.
#[component]
pub fn FacetPanel(
	category: Category,
	title: &'static str,
	#[prop(into)] rows: Signal<Vec<FacetRow>>,
	on_toggle: Callback<String>,
	on_set_all: Callback<bool>,
	#[prop(into, default = String::new())] image_base: String,
) -> impl IntoView {
	let summary = move || {
		let rows = rows.get();
		let enabled = rows.iter().filter(|r| r.enabled).count();
		format!("{enabled} / {}", rows.len())
	};

	view! {
		<details class="facet-panel" open=true>
			<summary>
				<span class="facet-title">{title}</span>
				<span class="facet-summary">{summary}</span>
			</summary>
			<div class="facet-actions">
				<button on:click=move |_| on_set_all.run(true)>"Check all"</button>
				<button on:click=move |_| on_set_all.run(false)>"Uncheck all"</button>
			</div>
			<ul class="facet-list">
				{move || {
					rows.get()
						.into_iter()
						.map(|row| {
							let key = row.key.clone();
							view! {
								<li class="facet-row" class:facet-disabled=!row.enabled>
									<label>
										<input
											type="checkbox"
											prop:checked=row.enabled
											on:change=move |_| on_toggle.run(key.clone())
										/>
										{swatch(category, &row, &image_base)}
										<span class="facet-label">{row.label.clone()}</span>
										<span class="facet-count">
											{format!("{} / {}", row.visible, row.total)}
										</span>
									</label>
									<div class="facet-bar">
										<div class="facet-bar-fill" style:width=bar_width(&row)></div>
									</div>
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</details>
	}
}
