use std::collections::HashSet;

use force_graph::SimulationParameters;

pub const DEFAULT_DATASET_PATH: &str = "assets/Twitter_D3.csv";

/// Knobs for data shaping and layout of the social graph.
#[derive(Clone, Debug)]
pub struct GraphConfig {
	/// Relative path of the CSV asset fetched at startup.
	pub dataset_path: String,
	/// Minimum source and target frequency a relationship needs to be drawn.
	pub cutoff: f64,
	/// Participant-A usernames whose rows are dropped.
	pub excluded_handles: HashSet<String>,
	/// Distance kept between any node and the viewport edge.
	pub viewport_margin: f64,
	/// Point the mean node position is pulled to.
	pub center: (f64, f64),
	pub forces: ForceSettings,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			dataset_path: DEFAULT_DATASET_PATH.into(),
			cutoff: 7.0,
			// Rows with a blank handle are noise in the export.
			excluded_handles: HashSet::from([String::new()]),
			viewport_margin: 20.0,
			center: (-1.0, 1.0),
			forces: ForceSettings::default(),
		}
	}
}

impl GraphConfig {
	pub fn is_excluded(&self, handle: &str) -> bool {
		self.excluded_handles.contains(handle)
	}
}

#[derive(Clone, Debug)]
pub struct ForceSettings {
	pub charge: f32,
	pub spring: f32,
	pub max_force: f32,
	pub node_speed: f32,
	pub damping: f32,
	pub node_mass: f32,
	/// Strength of the per-axis pull toward the origin, before alpha scaling.
	pub axis_strength: f64,
}

impl Default for ForceSettings {
	fn default() -> Self {
		Self {
			charge: 825.0,
			spring: 0.05,
			max_force: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
			node_mass: 10.0,
			axis_strength: 0.1,
		}
	}
}

impl ForceSettings {
	pub fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.charge,
			force_spring: self.spring,
			force_max: self.max_force,
			node_speed: self.node_speed,
			damping_factor: self.damping,
		}
	}
}
