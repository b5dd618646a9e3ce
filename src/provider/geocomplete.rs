//! jQuery `geocomplete` plugin provider.
//!
//! Requires jQuery, the Google Maps Places script and `jquery.geocomplete` to
//! be loaded before registration (see [`crate::widget::AddressWidget::media`]).

use super::{AutocompleteProvider, ProviderOptions};
use crate::dom::web::WebDocument;
use crate::error::{AddressError, AddressResult};
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
	type JQuery;

	#[wasm_bindgen(catch, js_name = jQuery)]
	fn jquery(element: &Element) -> Result<JQuery, JsValue>;

	#[wasm_bindgen(method, catch)]
	fn geocomplete(this: &JQuery, options: &JsValue) -> Result<JQuery, JsValue>;
}

/// Registers inputs with `$(input).geocomplete(options)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeocompleteProvider;

impl GeocompleteProvider {
	/// Creates the provider.
	pub fn new() -> Self {
		Self
	}
}

impl AutocompleteProvider<WebDocument> for GeocompleteProvider {
	fn register(
		&self,
		_dom: &WebDocument,
		element: &Element,
		options: &ProviderOptions,
	) -> AddressResult<()> {
		let json = options.to_json().to_string();
		let js_options = js_sys::JSON::parse(&json)
			.map_err(|err| AddressError::Provider(format!("invalid options: {:?}", err)))?;

		jquery(element)
			.and_then(|wrapped| wrapped.geocomplete(&js_options))
			.map(|_| ())
			.map_err(|err| AddressError::Provider(format!("{:?}", err)))
	}
}
