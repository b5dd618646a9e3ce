//! WASM entry point
//!
//! Pages load the client bundle after jQuery and the geocomplete plugin and
//! call `initAddressFields()` once the DOM is ready:
//!
//! ```javascript
//! import init, { initAddressFields } from "./reinhardt_address.js";
//!
//! document.addEventListener("DOMContentLoaded", async () => {
//!     await init();
//!     initAddressFields({ provider: { types: ["geocode"] } });
//! });
//! ```
//!
//! The binder lives in a thread-local for the lifetime of the page. Calling
//! the entry point again binds inputs added since the last call and leaves
//! already bound ones alone. Settings are taken from the first call.
//!
//! Pages that insert markup later (formsets, partial renders) can bind just
//! the new fragment with `bindAddressFieldsIn(root)`.

use crate::binder::{AddressFieldBinder, SetupReport};
use crate::dom::web::WebDocument;
use crate::error::{AddressError, AddressResult};
use crate::provider::geocomplete::GeocompleteProvider;
use crate::settings::AddressSettings;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys::Element;

type PageBinder = AddressFieldBinder<WebDocument, GeocompleteProvider>;

thread_local! {
	static PAGE_BINDER: RefCell<Option<PageBinder>> = const { RefCell::new(None) };
}

/// Binds every address input of the current document.
///
/// `settings` is an optional plain object with the keys of
/// [`AddressSettings`]. Returns the number of inputs bound by this call.
#[wasm_bindgen(js_name = initAddressFields)]
pub fn init_address_fields(settings: JsValue) -> Result<usize, JsValue> {
	let settings = settings_from_js(&settings).map_err(to_js_error)?;
	let report = init_with_settings(settings).map_err(to_js_error)?;
	Ok(report.bound.len())
}

/// Binds the address inputs under `root`.
///
/// Returns the number of inputs bound by this call.
#[wasm_bindgen(js_name = bindAddressFieldsIn)]
pub fn bind_address_fields_in(root: &Element, settings: JsValue) -> Result<usize, JsValue> {
	let settings = settings_from_js(&settings).map_err(to_js_error)?;
	let report = init_in(Some(root), settings).map_err(to_js_error)?;
	Ok(report.bound.len())
}

/// Rust-side entry point: binds every address input of the current document.
pub fn init_with_settings(settings: AddressSettings) -> AddressResult<SetupReport> {
	init_in(None, settings)
}

/// Rust-side entry point: binds the address inputs under `scope`, or the
/// whole document when `None`.
pub fn init_in(scope: Option<&Element>, settings: AddressSettings) -> AddressResult<SetupReport> {
	PAGE_BINDER.with(|cell| {
		let mut slot = cell.borrow_mut();
		if slot.is_none() {
			let dom = WebDocument::new()?;
			*slot = Some(AddressFieldBinder::new(
				dom,
				GeocompleteProvider::new(),
				settings,
			));
		}
		Ok(slot
			.as_mut()
			.map(|binder| binder.setup_in(scope))
			.unwrap_or_default())
	})
}

fn settings_from_js(value: &JsValue) -> AddressResult<AddressSettings> {
	if value.is_undefined() || value.is_null() {
		return Ok(AddressSettings::default());
	}
	let json = js_sys::JSON::stringify(value)
		.map_err(|err| AddressError::Dom(format!("settings are not serializable: {:?}", err)))?;
	AddressSettings::from_json_str(&String::from(json))
}

fn to_js_error(err: AddressError) -> JsValue {
	crate::error_log!("address initialization failed: {}", err);
	JsValue::from_str(&err.to_string())
}
