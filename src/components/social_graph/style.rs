use super::types::Role;

pub const BACKGROUND: &str = "#1a1a2e";
pub const NODE_FILL: &str = "#c8c8d0";
pub const NODE_STROKE: &str = "white";
pub const NODE_STROKE_WIDTH: f64 = 1.5;
pub const NODE_OPACITY: f64 = 0.8;
pub const MIN_NODE_RADIUS: f64 = 3.0;
pub const MAX_NODE_RADIUS: f64 = 15.0;
pub const TWEETS_PER_RADIUS_UNIT: f64 = 3000.0;
pub const LABEL_OFFSET_X: f64 = 8.0;
/// Baseline shift of a label, in ems.
pub const LABEL_BASELINE_EM: f64 = 0.31;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkStyle {
	pub color: &'static str,
	pub width: f64,
	pub opacity: f64,
}

impl LinkStyle {
	pub const DEFAULT: LinkStyle = LinkStyle {
		color: "steelblue",
		width: 1.5,
		opacity: 0.25,
	};
}

/// How a link relates to the hovered node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkHighlight {
	#[default]
	None,
	/// One-way, hovered node is the source.
	Following,
	/// One-way, hovered node is the target.
	FollowedBy,
	Reciprocal,
}

impl LinkHighlight {
	pub const CATEGORIES: [LinkHighlight; 3] = [
		LinkHighlight::Following,
		LinkHighlight::FollowedBy,
		LinkHighlight::Reciprocal,
	];

	pub fn style(self) -> LinkStyle {
		let color = match self {
			LinkHighlight::None => return LinkStyle::DEFAULT,
			LinkHighlight::Following => "red",
			LinkHighlight::FollowedBy => "blue",
			LinkHighlight::Reciprocal => "yellow",
		};
		LinkStyle {
			color,
			width: 5.0,
			opacity: 0.6,
		}
	}

	pub fn legend_label(self) -> &'static str {
		match self {
			LinkHighlight::None => "",
			LinkHighlight::Following => "following",
			LinkHighlight::FollowedBy => "followed by",
			LinkHighlight::Reciprocal => "following and followed by",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
	pub color: &'static str,
	pub font_px: f64,
}

impl LabelStyle {
	pub fn for_role(role: Role) -> Self {
		match role {
			Role::Participant => LabelStyle {
				color: "steelblue",
				font_px: 25.0,
			},
			Role::RelatedContact => LabelStyle {
				color: "white",
				font_px: 14.0,
			},
		}
	}

	pub fn legend_label(role: Role) -> &'static str {
		match role {
			Role::Participant => "participant",
			Role::RelatedContact => "related contact",
		}
	}
}

pub fn node_radius(tweets: Option<u64>) -> f64 {
	tweets
		.map(|t| (t as f64 / TWEETS_PER_RADIUS_UNIT).clamp(MIN_NODE_RADIUS, MAX_NODE_RADIUS))
		.unwrap_or(MIN_NODE_RADIUS)
}

/// Circular arc from one endpoint to the other, drawn clockwise on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
	pub cx: f64,
	pub cy: f64,
	pub radius: f64,
	pub start_angle: f64,
	pub end_angle: f64,
}

/// Arc whose radius equals the chord length, so it always spans 60 degrees.
/// Coincident endpoints have no arc.
pub fn link_arc(x1: f64, y1: f64, x2: f64, y2: f64) -> Option<ArcSegment> {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let radius = dx.hypot(dy);
	if radius < 1e-3 {
		return None;
	}
	let (ux, uy) = (dx / radius, dy / radius);
	// Distance from chord midpoint to center for r == chord.
	let h = radius * 3f64.sqrt() / 2.0;
	let (cx, cy) = ((x1 + x2) / 2.0 - uy * h, (y1 + y2) / 2.0 + ux * h);
	Some(ArcSegment {
		cx,
		cy,
		radius,
		start_angle: (y1 - cy).atan2(x1 - cx),
		end_angle: (y2 - cy).atan2(x2 - cx),
	})
}
