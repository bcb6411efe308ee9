//! Setup failures for animated surfaces.
//!
//! None of these ever reach the page: components log them and render nothing.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Reasons an animated surface could not be brought up.
#[derive(Debug, Error)]
pub enum MotionError {
	#[error("no global window")]
	NoWindow,
	#[error("window has no document")]
	NoDocument,
	#[error("canvas has no 2d rendering context")]
	NoContext,
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for MotionError {
	fn from(value: JsValue) -> Self {
		MotionError::Js(
			value
				.as_string()
				.unwrap_or_else(|| format!("{value:?}")),
		)
	}
}
