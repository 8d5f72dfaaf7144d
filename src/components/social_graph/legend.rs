use leptos::prelude::*;

use super::style::{LabelStyle, LinkHighlight};
use super::types::Role;

const ROW_HEIGHT: f64 = 25.0;

/// Key for link colors, node size and label colors.
#[component]
pub fn Legend() -> impl IntoView {
	let link_rows = LinkHighlight::CATEGORIES
		.iter()
		.enumerate()
		.map(|(i, category)| {
			let y = i as f64 * ROW_HEIGHT;
			let line_style = format!(
				"stroke: {}; stroke-width: 3; opacity: 0.6;",
				category.style().color
			);
			view! {
				<g>
					<line x1="0" y1={y.to_string()} x2="25" y2={y.to_string()} style=line_style />
					<text x="35" y={(y + 5.0).to_string()} fill="white" stroke="none">
						{category.legend_label()}
					</text>
				</g>
			}
		})
		.collect_view();

	let role_rows = [Role::Participant, Role::RelatedContact]
		.into_iter()
		.enumerate()
		.map(|(i, role)| {
			let y = (4 + i) as f64 * ROW_HEIGHT + 5.0;
			view! {
				<text x="35" y={y.to_string()} fill={LabelStyle::for_role(role).color} stroke="none">
					{LabelStyle::legend_label(role)}
				</text>
			}
		})
		.collect_view();

	view! {
		<svg
			id="legend"
			width="260"
			height="150"
			style="position: absolute; left: 10px; top: 10px; font: 14px sans-serif; pointer-events: none;"
		>
			<g transform="translate(0, 10)">
				{link_rows}
				<circle r="4" cx="13" cy="75" style="fill: white; stroke-width: 0; opacity: 0.8;" />
				<text x="35" y="80" fill="white" stroke="none">
					"size based on # Tweets"
				</text>
				{role_rows}
			</g>
		</svg>
	}
}
