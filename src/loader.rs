//! JSON payloads embedded in the host page as `<script>` elements.

use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

/// Why a page payload could not be read.
#[derive(Error, Debug)]
pub enum LoadError {
	/// Not running in a browser.
	#[error("no browser window available")]
	NoWindow,

	/// No element with the id; callers treat this as "use defaults".
	#[error("element #{0} not found")]
	MissingElement(String),

	/// The id belongs to some other element.
	#[error("element #{0} is not a <script>")]
	NotAScript(String),

	/// Malformed payload.
	#[error("invalid JSON payload: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Parse the text of `<script id="{id}">` as `T`.
pub fn load_script_json<T: DeserializeOwned>(id: &str) -> Result<T, LoadError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(LoadError::NoWindow)?;
	let element = document
		.get_element_by_id(id)
		.ok_or_else(|| LoadError::MissingElement(id.to_string()))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| LoadError::NotAScript(id.to_string()))?;
	let text = script
		.text()
		.map_err(|_| LoadError::NotAScript(id.to_string()))?;
	Ok(serde_json::from_str(&text)?)
}
