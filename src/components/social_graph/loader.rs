use log::{debug, info};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::error::DataImportError;
use super::types::RelationshipRecord;

/// Parse the CSV export into records. Unknown columns are ignored.
pub fn parse_records(text: &str) -> Result<Vec<RelationshipRecord>, DataImportError> {
	let mut reader = csv::ReaderBuilder::new()
		.trim(csv::Trim::All)
		.from_reader(text.as_bytes());
	let records = reader
		.deserialize()
		.collect::<Result<Vec<RelationshipRecord>, _>>()?;
	debug!("parsed {} relationship records", records.len());
	Ok(records)
}

/// Fetch the dataset from the host page's origin and parse it.
pub async fn fetch_dataset(path: &str) -> Result<Vec<RelationshipRecord>, DataImportError> {
	let fetch_err = |reason: String| DataImportError::Fetch {
		path: path.to_string(),
		reason,
	};

	let window = web_sys::window().ok_or_else(|| fetch_err("no window".into()))?;
	let response: Response = JsFuture::from(window.fetch_with_str(path))
		.await
		.map_err(|e| fetch_err(describe(e)))?
		.dyn_into()
		.map_err(|e| fetch_err(describe(e)))?;

	if !response.ok() {
		return Err(DataImportError::Status {
			path: path.to_string(),
			status: response.status(),
		});
	}

	let text = JsFuture::from(response.text().map_err(|e| fetch_err(describe(e)))?)
		.await
		.map_err(|e| fetch_err(describe(e)))?
		.as_string()
		.ok_or_else(|| fetch_err("response body is not text".into()))?;
	info!("fetched {} ({} bytes)", path, text.len());

	parse_records(&text)
}

fn describe(err: JsValue) -> String {
	err.dyn_ref::<js_sys::Error>()
		.map(|e| String::from(e.message()))
		.or_else(|| err.as_string())
		.unwrap_or_else(|| format!("{:?}", err))
}
