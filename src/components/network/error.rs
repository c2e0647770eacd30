use thiserror::Error;
use wasm_bindgen::JsValue;

/// Reasons the widget declines to start. The rest of the page keeps working.
#[derive(Debug, Error)]
pub enum MountError {
	#[error("no browser window")]
	NoWindow,
	#[error("2d canvas context unavailable")]
	NoContext,
	#[error("browser call failed: {0}")]
	Js(String),
}

impl From<JsValue> for MountError {
	fn from(value: JsValue) -> Self {
		MountError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}
