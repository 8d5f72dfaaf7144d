use leptos::prelude::*;

use super::types::PersonNode;

const POPUP_SHIFT_X: f64 = 210.0;
const POPUP_SHIFT_Y: f64 = 28.0;
/// Vertical shift used when the popup would leave the left edge.
const POPUP_SHIFT_Y_PINNED: f64 = 107.0;
const FADE_IN_MS: u32 = 200;
const FADE_OUT_MS: u32 = 350;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopupContent {
	pub header: String,
	pub tweets: String,
	pub followers: String,
	pub following: String,
}

impl PopupContent {
	pub fn for_node(node: &PersonNode) -> Self {
		let count = |value: Option<u64>| value.map(format_count).unwrap_or_else(|| "n/a".into());
		let profile = node.profile.as_ref();
		Self {
			header: profile
				.map(|p| p.username.clone())
				.unwrap_or_else(|| node.id.clone()),
			tweets: format!("# Tweets: {}", count(profile.map(|p| p.tweets))),
			followers: format!("# Followers: {}", count(profile.map(|p| p.followers))),
			following: format!("# Following: {}", count(profile.map(|p| p.following))),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopupState {
	pub visible: bool,
	pub left: f64,
	pub top: f64,
	pub content: PopupContent,
}

impl PopupState {
	pub fn show(&mut self, node: &PersonNode, pointer_x: f64, pointer_y: f64) {
		let (left, top) = popup_position(pointer_x, pointer_y);
		self.visible = true;
		self.left = left;
		self.top = top;
		self.content = PopupContent::for_node(node);
	}

	/// Content stays so it can fade out.
	pub fn hide(&mut self) {
		self.visible = false;
	}
}

/// Place the popup up and to the left of the pointer, keeping it on screen.
pub fn popup_position(x: f64, y: f64) -> (f64, f64) {
	let shifted = x - POPUP_SHIFT_X;
	if shifted < 0.0 {
		(0.0, (y - POPUP_SHIFT_Y_PINNED).max(0.0))
	} else {
		(shifted, (y - POPUP_SHIFT_Y).max(0.0))
	}
}

/// en-US grouping: 1234567 -> "1,234,567".
pub fn format_count(value: u64) -> String {
	let digits = value.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}

#[component]
pub fn NodePopup(#[prop(into)] state: Signal<PopupState>) -> impl IntoView {
	let style = move || {
		let s = state.get();
		let (opacity, fade) = if s.visible {
			(1, FADE_IN_MS)
		} else {
			(0, FADE_OUT_MS)
		};
		format!(
			"opacity: {opacity}; transition: opacity {fade}ms; left: {}px; top: {}px; \
			 pointer-events: none; position: absolute; width: 160px; background: #e5e500; \
			 border: 0px; border-radius: 8px; color: gray; padding: 5px 10px 5px 10px;",
			s.left, s.top
		)
	};

	view! {
		<div class="popup" style=style>
			<div class="popup-header" style="font-weight: 1000; font-size: 14px;">
				{move || state.get().content.header}
			</div>
			<div class="popup-body" style="font-size: 12px;">
				{move || state.get().content.tweets}
			</div>
			<div class="popup-body" style="font-size: 12px;">
				{move || state.get().content.followers}
			</div>
			<div class="popup-body" style="font-size: 12px;">
				{move || state.get().content.following}
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::social_graph::types::{PersonProfile, Role};

	#[test]
	fn counts_use_thousands_separators() {
		assert_eq!(format_count(0), "0");
		assert_eq!(format_count(999), "999");
		assert_eq!(format_count(1000), "1,000");
		assert_eq!(format_count(45_210), "45,210");
		assert_eq!(format_count(1_234_567), "1,234,567");
	}

	#[test]
	fn popup_sits_left_of_pointer() {
		assert_eq!(popup_position(500.0, 300.0), (290.0, 272.0));
	}

	#[test]
	fn popup_is_pinned_near_left_edge() {
		assert_eq!(popup_position(100.0, 300.0), (0.0, 193.0));
		assert_eq!(popup_position(100.0, 40.0), (0.0, 0.0));
	}

	#[test]
	fn content_formats_profile() {
		let node = PersonNode {
			id: "42".into(),
			profile: Some(PersonProfile {
				id: "42".into(),
				username: "datadan".into(),
				followers: 12_500,
				following: 310,
				tweets: 1_048_576,
				role: Role::Participant,
			}),
		};
		let content = PopupContent::for_node(&node);
		assert_eq!(content.header, "datadan");
		assert_eq!(content.tweets, "# Tweets: 1,048,576");
		assert_eq!(content.followers, "# Followers: 12,500");
		assert_eq!(content.following, "# Following: 310");
	}

	#[test]
	fn hide_keeps_content_for_fade_out() {
		let node = PersonNode {
			id: "7".into(),
			profile: None,
		};
		let mut popup = PopupState::default();
		popup.show(&node, 400.0, 100.0);
		popup.hide();
		assert!(!popup.visible);
		assert_eq!(popup.content.header, "7");
		assert_eq!(popup.content.tweets, "# Tweets: n/a");
	}
}
