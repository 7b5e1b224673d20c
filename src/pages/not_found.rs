use leptos::prelude::*;

/// 404 fallback page.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="load-error">
			<h1>"Not Found"</h1>
			<p>"This page does not exist."</p>
		</div>
	}
}
