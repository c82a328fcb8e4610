//! Search box feeding the session query.

use leptos::prelude::*;

/// Query sent to the session for the text in the box. Surrounding whitespace
/// is dropped here; the engine matches whatever it is given literally.
pub fn query_for_input(raw: &str) -> String {
	raw.trim().to_string()
}

/// Node search box. Every keystroke is reported as the new query; matching
/// labels are offered through a datalist so picking one completes the query
/// to an exact match.
///
/// The input keeps its own text so typing a space between words is not
/// undone by the trimmed query coming back.
#[component]
pub fn SearchField(
	#[prop(into)] suggestions: Signal<Vec<(String, String)>>,
	on_query: Callback<String>,
) -> impl IntoView {
	view! {
		<div class="search-field">
			<input
				type="search"
				list="node-suggestions"
				placeholder="Search nodes..."
				on:input=move |ev| on_query.run(query_for_input(&event_target_value(&ev)))
			/>
			<datalist id="node-suggestions">
				{move || {
					suggestions
						.get()
						.into_iter()
						.map(|(key, label)| view! { <option value=label>{key}</option> })
						.collect_view()
				}}
			</datalist>
		</div>
	}
}
