use log::error;

use super::builder::build_graph;
use super::config::GraphConfig;
use super::error::DataImportError;
use super::types::{RelationshipRecord, SocialGraph};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorReport {
	pub message: String,
}

/// Sink for failures that should reach someone other than the console.
pub trait ErrorReporter {
	fn report(&self, report: ErrorReport);
}

/// Default sink: the browser console via `log`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
	fn report(&self, report: ErrorReport) {
		error!("reported: {}", report.message);
	}
}

/// Turn loader output into a renderable graph.
///
/// Never fails: any import or shaping error is logged, reported once and
/// replaced by an empty graph so the canvas still comes up.
pub fn prepare_graph(
	records: Result<Vec<RelationshipRecord>, DataImportError>,
	config: &GraphConfig,
	reporter: &dyn ErrorReporter,
) -> SocialGraph {
	match records.and_then(|records| build_graph(&records, config)) {
		Ok(graph) => graph,
		Err(err) => {
			error!("{}", err);
			reporter.report(ErrorReport {
				message: err.to_string(),
			});
			SocialGraph::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::components::social_graph::builder::tests::record;
	use crate::components::social_graph::types::RelationshipKind;

	#[derive(Default)]
	struct RecordingReporter {
		reports: RefCell<Vec<ErrorReport>>,
	}

	impl ErrorReporter for RecordingReporter {
		fn report(&self, report: ErrorReport) {
			self.reports.borrow_mut().push(report);
		}
	}

	#[test]
	fn empty_input_reports_once_and_renders_nothing() {
		let reporter = RecordingReporter::default();
		let graph = prepare_graph(Ok(Vec::new()), &GraphConfig::default(), &reporter);
		assert!(graph.is_empty());
		assert_eq!(
			*reporter.reports.borrow(),
			vec![ErrorReport {
				message: "Data not imported.".into()
			}]
		);
	}

	#[test]
	fn fetch_failure_is_reported() {
		let reporter = RecordingReporter::default();
		let err = DataImportError::Status {
			path: "assets/missing.csv".into(),
			status: 404,
		};
		let graph = prepare_graph(Err(err), &GraphConfig::default(), &reporter);
		assert!(graph.is_empty());
		let reports = reporter.reports.borrow();
		assert_eq!(reports.len(), 1);
		assert!(reports[0].message.contains("404"));
	}

	#[test]
	fn good_data_is_not_reported() {
		let reporter = RecordingReporter::default();
		let records = vec![record("A", "B", RelationshipKind::Reciprocal, 9.0, 9.0)];
		let graph = prepare_graph(Ok(records), &GraphConfig::default(), &reporter);
		assert_eq!(graph.nodes.len(), 2);
		assert!(reporter.reports.borrow().is_empty());
	}
}
