use thiserror::Error;

/// Everything that can leave the graph without data.
#[derive(Debug, Error)]
pub enum DataImportError {
	#[error("Data not imported.")]
	NotImported,

	#[error("failed to fetch dataset {path}: {reason}")]
	Fetch { path: String, reason: String },

	#[error("dataset {path} returned HTTP {status}")]
	Status { path: String, status: u16 },

	#[error("malformed dataset: {0}")]
	Csv(#[from] csv::Error),
}
