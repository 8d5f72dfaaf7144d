use leptos::prelude::*;

use crate::components::social_graph::SocialGraphCanvas;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<figure id="force-graph" class="fullscreen-graph" style="margin: 0; position: relative;">
				<SocialGraphCanvas fullscreen=true />
				<div class="graph-overlay" style="position: absolute; right: 16px; top: 8px; color: white; pointer-events: none;">
					<h1>"Who Follows Whom"</h1>
					<p class="subtitle">"Hover a person to see their links. Drag to rearrange."</p>
				</div>
			</figure>
		</ErrorBoundary>
	}
}
