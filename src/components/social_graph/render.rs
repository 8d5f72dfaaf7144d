use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::SocialGraphState;
use super::style::{
	BACKGROUND, LABEL_BASELINE_EM, LABEL_OFFSET_X, LabelStyle, LinkHighlight, NODE_FILL,
	NODE_OPACITY, NODE_STROKE, NODE_STROKE_WIDTH, link_arc,
};

pub fn render(state: &SocialGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.width / 2.0, state.height / 2.0);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_links(state: &SocialGraphState, ctx: &CanvasRenderingContext2d) {
	let positions = state.positions();
	let highlighted: Vec<_> = state
		.links
		.iter()
		.map(|link| (link, state.link_highlight(link)))
		.collect();

	// Highlighted links go last so they sit above the default ones.
	let (plain, lit): (Vec<_>, Vec<_>) = highlighted
		.into_iter()
		.partition(|(_, h)| *h == LinkHighlight::None);

	for (link, highlight) in plain.into_iter().chain(lit) {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&link.source), positions.get(&link.target))
		else {
			continue;
		};
		let Some(arc) = link_arc(x1, y1, x2, y2) else {
			continue;
		};
		let style = highlight.style();
		ctx.set_global_alpha(style.opacity);
		ctx.set_stroke_style_str(style.color);
		ctx.set_line_width(style.width);
		ctx.begin_path();
		let _ = ctx.arc(arc.cx, arc.cy, arc.radius, arc.start_angle, arc.end_angle);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &SocialGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_cap("round");
	ctx.set_line_join("round");

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);

		ctx.set_global_alpha(NODE_OPACITY);
		ctx.begin_path();
		let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill();
		ctx.set_stroke_style_str(NODE_STROKE);
		ctx.set_line_width(NODE_STROKE_WIDTH);
		ctx.stroke();
		ctx.set_global_alpha(1.0);

		let Some(profile) = &info.person.profile else {
			return;
		};
		let label = LabelStyle::for_role(info.person.role());
		ctx.set_fill_style_str(label.color);
		ctx.set_font(&format!("{}px sans-serif", label.font_px));
		let _ = ctx.fill_text(
			&profile.username,
			x + LABEL_OFFSET_X,
			y + label.font_px * LABEL_BASELINE_EM,
		);
	});
}
