use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::{debug, warn};

use super::config::GraphConfig;
use super::style::{LinkHighlight, node_radius};
use super::types::{PersonNode, RelationshipKind, SocialGraph};

/// Extra pick distance around a node's circle, in pixels.
pub const HIT_PADDING: f64 = 2.0;
const INITIAL_RING_RADIUS: f64 = 100.0;

pub const ALPHA_MIN: f64 = 0.001;
/// 1 - ALPHA_MIN^(1/300): cools from 1 to ALPHA_MIN in about 300 ticks.
pub const ALPHA_DECAY: f64 = 0.022_763;
pub const HEATED_ALPHA_TARGET: f64 = 0.3;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub person: PersonNode,
	pub radius: f64,
}

/// A link whose endpoints point into the layout's node storage.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedLink {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub kind: RelationshipKind,
}

impl ResolvedLink {
	pub fn highlight_for(&self, hovered: DefaultNodeIdx) -> LinkHighlight {
		match self.kind {
			RelationshipKind::Reciprocal if self.source == hovered || self.target == hovered => {
				LinkHighlight::Reciprocal
			}
			RelationshipKind::OneWay if self.source == hovered => LinkHighlight::Following,
			RelationshipKind::OneWay if self.target == hovered => LinkHighlight::FollowedBy,
			_ => LinkHighlight::None,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeatPhase {
	Cooling,
	Heated,
}

/// Simulation energy. Physics only runs while this is warm.
#[derive(Clone, Debug)]
pub struct Heat {
	pub alpha: f64,
	pub alpha_target: f64,
	active_drags: u32,
}

impl Default for Heat {
	fn default() -> Self {
		Self {
			alpha: 1.0,
			alpha_target: 0.0,
			active_drags: 0,
		}
	}
}

impl Heat {
	pub fn phase(&self) -> HeatPhase {
		if self.active_drags > 0 {
			HeatPhase::Heated
		} else {
			HeatPhase::Cooling
		}
	}

	pub fn begin_drag(&mut self) {
		if self.active_drags == 0 {
			self.alpha_target = HEATED_ALPHA_TARGET;
		}
		self.active_drags += 1;
	}

	pub fn end_drag(&mut self) {
		self.active_drags = self.active_drags.saturating_sub(1);
		if self.active_drags == 0 {
			self.alpha_target = 0.0;
		}
	}

	pub fn is_running(&self) -> bool {
		self.alpha >= ALPHA_MIN || self.alpha_target >= ALPHA_MIN
	}

	/// Advance alpha one tick. Returns whether physics should run this tick.
	pub fn step(&mut self) -> bool {
		if !self.is_running() {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;
		true
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Everything the canvas needs between frames. World origin is the viewport center.
pub struct SocialGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub links: Vec<ResolvedLink>,
	pub drag: DragState,
	pub hover: Option<DefaultNodeIdx>,
	pub heat: Heat,
	pub width: f64,
	pub height: f64,
	margin: f64,
	center: (f64, f64),
	axis_strength: f64,
	index: HashMap<String, DefaultNodeIdx>,
}

impl SocialGraphState {
	pub fn new(data: &SocialGraph, config: &GraphConfig, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(config.forces.simulation_parameters());
		let mut index = HashMap::new();
		let mut links = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (INITIAL_RING_RADIUS * angle.cos()) as f32,
				y: (INITIAL_RING_RADIUS * angle.sin()) as f32,
				mass: config.forces.node_mass,
				is_anchor: false,
				user_data: NodeInfo {
					radius: node_radius(node.profile.as_ref().map(|p| p.tweets)),
					person: node.clone(),
				},
			});
			index.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			let (Some(&source), Some(&target)) = (index.get(&link.source), index.get(&link.target))
			else {
				warn!(
					"skipping link {} -> {}: endpoint not in node set",
					link.source, link.target
				);
				continue;
			};
			// Springs need two distinct ends.
			if source != target {
				graph.add_edge(source, target, EdgeData::default());
			}
			links.push(ResolvedLink {
				source,
				target,
				kind: link.kind,
			});
		}
		debug!(
			"layout initialised with {} nodes and {} links in {}x{}",
			index.len(),
			links.len(),
			width,
			height
		);

		Self {
			graph,
			links,
			drag: DragState::default(),
			hover: None,
			heat: Heat::default(),
			width,
			height,
			margin: config.viewport_margin,
			center: config.center,
			axis_strength: config.forces.axis_strength,
			index,
		}
	}

	#[cfg(test)]
	pub fn index_of(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.index.get(id).copied()
	}

	pub fn node_count(&self) -> usize {
		self.index.len()
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(sx - self.width / 2.0, sy - self.height / 2.0)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (wx, wy) = self.screen_to_world(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - wx, node.y() as f64 - wy);
			// Later nodes are drawn on top, so they win.
			if dx.hypot(dy) < node.data.user_data.radius + HIT_PADDING {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x() as f64, node.y() as f64));
			}
		});
		pos
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::with_capacity(self.index.len());
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
	}

	pub fn person(&self, idx: DefaultNodeIdx) -> Option<PersonNode> {
		let mut person = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				person = Some(node.data.user_data.person.clone());
			}
		});
		person
	}

	/// Returns true when the hovered node changed.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		if self.hover == node {
			return false;
		}
		self.hover = node;
		true
	}

	pub fn link_highlight(&self, link: &ResolvedLink) -> LinkHighlight {
		self.hover
			.map(|idx| link.highlight_for(idx))
			.unwrap_or_default()
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.node_idx.is_some()
	}

	/// Pin `idx` where it is and heat the simulation.
	pub fn drag_start(&mut self, idx: DefaultNodeIdx, sx: f64, sy: f64) {
		let Some((x, y)) = self.node_position(idx) else {
			return;
		};
		// Only one pinned node at a time; a new grab releases the old one.
		self.drag_end();
		self.heat.begin_drag();
		self.drag = DragState {
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: x as f32,
			node_start_y: y as f32,
		};
		self.set_anchor(idx, true);
		debug!("drag started, simulation {:?}", self.heat.phase());
	}

	pub fn drag_move(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let (nx, ny) = (
			self.drag.node_start_x + (sx - self.drag.start_x) as f32,
			self.drag.node_start_y + (sy - self.drag.start_y) as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
			}
		});
	}

	/// Release the pin and let the simulation cool.
	pub fn drag_end(&mut self) {
		let Some(idx) = self.drag.node_idx.take() else {
			return;
		};
		self.set_anchor(idx, false);
		self.heat.end_drag();
	}

	fn set_anchor(&mut self, idx: DefaultNodeIdx, anchored: bool) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = anchored;
			}
		});
	}

	pub fn tick(&mut self, dt: f32) {
		if self.heat.step() {
			self.graph.update(dt);
			self.apply_centering();
		}
		self.clamp_to_viewport();
	}

	/// Shift the mean onto `center`, then pull each free node toward the axes.
	fn apply_centering(&mut self) {
		let (mut sum_x, mut sum_y, mut n) = (0.0, 0.0, 0usize);
		self.graph.visit_nodes(|node| {
			sum_x += node.x() as f64;
			sum_y += node.y() as f64;
			n += 1;
		});
		if n == 0 {
			return;
		}
		let (shift_x, shift_y) = (
			self.center.0 - sum_x / n as f64,
			self.center.1 - sum_y / n as f64,
		);
		let pull = self.axis_strength * self.heat.alpha;
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			let x = node.data.x as f64 + shift_x;
			let y = node.data.y as f64 + shift_y;
			node.data.x = (x - x * pull) as f32;
			node.data.y = (y - y * pull) as f32;
		});
	}

	fn clamp_to_viewport(&mut self) {
		let (lo_x, hi_x) = (-self.width / 2.0 + self.margin, self.width / 2.0 - self.margin);
		let (lo_y, hi_y) = (-self.height / 2.0 + self.margin, self.height / 2.0 - self.margin);
		self.graph.visit_nodes_mut(|node| {
			node.data.x = clamp_axis(node.data.x as f64, lo_x, hi_x) as f32;
			node.data.y = clamp_axis(node.data.y as f64, lo_y, hi_y) as f32;
		});
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Unlike `f64::clamp`, tolerates `lo > hi` on viewports smaller than the margins.
fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
	if v < lo {
		lo
	} else if v > hi {
		hi
	} else {
		v
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::social_graph::types::RelationshipLink;

	const W: f64 = 400.0;
	const H: f64 = 300.0;

	fn person(id: &str) -> PersonNode {
		PersonNode {
			id: id.into(),
			profile: None,
		}
	}

	fn link(source: &str, target: &str, kind: RelationshipKind) -> RelationshipLink {
		RelationshipLink {
			source: source.into(),
			target: target.into(),
			kind,
		}
	}

	fn triangle() -> SocialGraphState {
		let data = SocialGraph {
			nodes: vec![person("A"), person("B"), person("C")],
			links: vec![
				link("A", "B", RelationshipKind::OneWay),
				link("A", "C", RelationshipKind::Reciprocal),
				link("B", "C", RelationshipKind::OneWay),
			],
		};
		SocialGraphState::new(&data, &GraphConfig::default(), W, H)
	}

	fn highlights(state: &SocialGraphState) -> Vec<LinkHighlight> {
		state.links.iter().map(|l| state.link_highlight(l)).collect()
	}

	#[test]
	fn hover_highlights_only_incident_links() {
		let mut state = triangle();
		let a = state.index_of("A").unwrap();
		assert!(state.set_hover(Some(a)));
		assert_eq!(
			highlights(&state),
			vec![
				LinkHighlight::Following,
				LinkHighlight::Reciprocal,
				LinkHighlight::None
			]
		);

		let b = state.index_of("B").unwrap();
		state.set_hover(Some(b));
		assert_eq!(
			highlights(&state),
			vec![
				LinkHighlight::FollowedBy,
				LinkHighlight::None,
				LinkHighlight::Following
			]
		);

		let c = state.index_of("C").unwrap();
		state.set_hover(Some(c));
		assert_eq!(highlights(&state)[1], LinkHighlight::Reciprocal);
	}

	#[test]
	fn hover_exit_restores_defaults() {
		let mut state = triangle();
		let a = state.index_of("A").unwrap();
		state.set_hover(Some(a));
		assert!(!state.set_hover(Some(a)));
		assert!(state.set_hover(None));
		assert!(highlights(&state).iter().all(|h| *h == LinkHighlight::None));
	}

	#[test]
	fn picks_node_under_pointer() {
		let state = triangle();
		// A starts on the ring at angle zero.
		let a = state.index_of("A").unwrap();
		assert_eq!(state.node_at_position(W / 2.0 + 100.0, H / 2.0 + 1.0), Some(a));
		assert_eq!(state.node_at_position(W / 2.0, H / 2.0), None);
	}

	#[test]
	fn drag_pins_and_heats() {
		let mut state = triangle();
		let a = state.index_of("A").unwrap();
		let (sx, sy) = (W / 2.0 + 100.0, H / 2.0);
		state.drag_start(a, sx, sy);
		assert_eq!(state.heat.phase(), HeatPhase::Heated);
		assert_eq!(state.heat.alpha_target, HEATED_ALPHA_TARGET);

		state.drag_move(sx + 30.0, sy + 40.0);
		let (x, y) = state.node_position(a).unwrap();
		assert!((x - 130.0).abs() < 1e-3);
		assert!((y - 40.0).abs() < 1e-3);

		let mut anchored = false;
		state.graph.visit_nodes(|node| {
			if node.index() == a {
				anchored = node.data.is_anchor;
			}
		});
		assert!(anchored);

		state.drag_end();
		assert!(!state.is_dragging());
		assert_eq!(state.heat.phase(), HeatPhase::Cooling);
		assert_eq!(state.heat.alpha_target, 0.0);
		state.graph.visit_nodes(|node| assert!(!node.data.is_anchor));
	}

	#[test]
	fn regrab_releases_previous_pin() {
		let mut state = triangle();
		let a = state.index_of("A").unwrap();
		let b = state.index_of("B").unwrap();
		state.drag_start(a, W / 2.0 + 100.0, H / 2.0);
		state.drag_start(b, W / 2.0 - 50.0, H / 2.0 + 86.6);
		assert_eq!(state.drag.node_idx, Some(b));
		assert_eq!(state.heat.phase(), HeatPhase::Heated);

		state.drag_end();
		state.drag_end();
		assert_eq!(state.heat.phase(), HeatPhase::Cooling);
		assert_eq!(state.heat.alpha_target, 0.0);
		state.graph.visit_nodes(|node| assert!(!node.data.is_anchor));
	}

	#[test]
	fn positions_stay_inside_viewport() {
		let mut state = triangle();
		let a = state.index_of("A").unwrap();
		state.drag_start(a, W / 2.0 + 100.0, H / 2.0);
		state.drag_move(5000.0, -5000.0);
		state.tick(0.016);
		let (x, y) = state.node_position(a).unwrap();
		assert_eq!(x, W / 2.0 - 20.0);
		assert_eq!(y, -H / 2.0 + 20.0);

		state.drag_end();
		for _ in 0..50 {
			state.tick(0.016);
		}
		for (x, y) in state.positions().into_values() {
			assert!((-W / 2.0 + 20.0..=W / 2.0 - 20.0).contains(&x));
			assert!((-H / 2.0 + 20.0..=H / 2.0 - 20.0).contains(&y));
		}
	}

	#[test]
	fn tiny_viewport_does_not_panic() {
		let data = SocialGraph {
			nodes: vec![person("A"), person("B")],
			links: vec![link("A", "B", RelationshipKind::OneWay)],
		};
		let mut state = SocialGraphState::new(&data, &GraphConfig::default(), 10.0, 10.0);
		state.tick(0.016);
		assert!(state.positions().values().all(|(x, y)| x.is_finite() && y.is_finite()));
	}

	#[test]
	fn empty_graph_ticks() {
		let mut state =
			SocialGraphState::new(&SocialGraph::default(), &GraphConfig::default(), W, H);
		state.tick(0.016);
		assert_eq!(state.node_count(), 0);
		assert!(state.links.is_empty());
		assert_eq!(state.node_at_position(W / 2.0, H / 2.0), None);
	}

	#[test]
	fn links_with_unknown_endpoints_are_skipped() {
		let data = SocialGraph {
			nodes: vec![person("A")],
			links: vec![link("A", "ghost", RelationshipKind::OneWay)],
		};
		let state = SocialGraphState::new(&data, &GraphConfig::default(), W, H);
		assert!(state.links.is_empty());
	}

	#[test]
	fn heat_stays_up_until_last_drag_ends() {
		let mut heat = Heat::default();
		heat.begin_drag();
		heat.begin_drag();
		heat.end_drag();
		assert_eq!(heat.phase(), HeatPhase::Heated);
		assert_eq!(heat.alpha_target, HEATED_ALPHA_TARGET);
		heat.end_drag();
		assert_eq!(heat.phase(), HeatPhase::Cooling);
		heat.end_drag();
		assert_eq!(heat.phase(), HeatPhase::Cooling);
	}

	#[test]
	fn cooling_stops_and_drag_restarts() {
		let mut heat = Heat::default();
		let mut ticks = 0;
		while heat.step() {
			ticks += 1;
			assert!(ticks < 1000);
		}
		assert!((250..=350).contains(&ticks));
		assert!(!heat.is_running());

		heat.begin_drag();
		assert!(heat.step());
		for _ in 0..500 {
			heat.step();
		}
		assert!((heat.alpha - HEATED_ALPHA_TARGET).abs() < 1e-3);
	}
}
