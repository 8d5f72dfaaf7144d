//! Flattens relationship rows into a deduplicated node list and a link list.

use std::collections::HashSet;

use log::{debug, info};

use super::config::GraphConfig;
use super::error::DataImportError;
use super::types::{PersonNode, PersonProfile, RelationshipLink, RelationshipRecord, SocialGraph};

/// Build the graph from imported rows.
///
/// Empty input is reported as [`DataImportError::NotImported`]; a non-empty
/// input that filters down to nothing is a valid, empty graph.
pub fn build_graph(
	records: &[RelationshipRecord],
	config: &GraphConfig,
) -> Result<SocialGraph, DataImportError> {
	if records.is_empty() {
		return Err(DataImportError::NotImported);
	}

	let filtered: Vec<&RelationshipRecord> = records
		.iter()
		.filter(|r| passes_filter(r, config))
		.collect();
	debug!(
		"kept {} of {} records (cutoff {})",
		filtered.len(),
		records.len(),
		config.cutoff
	);

	let profiles = flatten_profiles(&filtered);
	let nodes: Vec<PersonNode> = distinct_identities(&filtered)
		.into_iter()
		.map(|id| {
			let profile = profiles.iter().find(|p| p.id == id).cloned();
			PersonNode { id, profile }
		})
		.collect();
	let links = filtered.iter().map(|r| RelationshipLink::from(*r)).collect();

	let graph = SocialGraph { nodes, links };
	info!(
		"built social graph: {} nodes, {} links",
		graph.nodes.len(),
		graph.links.len()
	);
	Ok(graph)
}

pub fn passes_filter(record: &RelationshipRecord, config: &GraphConfig) -> bool {
	record.source_freq >= config.cutoff
		&& record.target_freq >= config.cutoff
		&& !config.is_excluded(&record.person_a_username)
}

fn distinct_identities(records: &[&RelationshipRecord]) -> Vec<String> {
	let mut seen = HashSet::new();
	records
		.iter()
		.flat_map(|r| [&r.source, &r.target])
		.filter(|&id| seen.insert(id.as_str()))
		.cloned()
		.collect()
}

/// Two profiles per record, A first. Duplicates are expected.
fn flatten_profiles(records: &[&RelationshipRecord]) -> Vec<PersonProfile> {
	records
		.iter()
		.flat_map(|r| [r.participant_a(), r.participant_b()])
		.collect()
}
