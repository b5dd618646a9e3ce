//! Autocomplete provider seam
//!
//! The provider owns everything network related: it shows suggestions,
//! resolves the selected place and writes the resolved attributes into the
//! companion fields whose details attribute (`data-geo`) names them. This crate
//! only registers inputs with it.

use crate::dom::AddressDom;
use crate::error::AddressResult;
use serde_json::{Map, Value};

#[cfg(target_arch = "wasm32")]
pub mod geocomplete;

/// Registration options handed to the provider for one address input.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderOptions {
	/// Selector of the container holding the companion fields (`#N_components`).
	pub details: String,
	/// Attribute on companion fields naming the provider key (`data-geo`).
	pub details_attribute: String,
	/// Opaque settings, passed through unchanged.
	pub settings: Map<String, Value>,
}

impl ProviderOptions {
	/// Creates registration options.
	pub fn new(
		details: impl Into<String>,
		details_attribute: impl Into<String>,
		settings: Map<String, Value>,
	) -> Self {
		Self {
			details: details.into(),
			details_attribute: details_attribute.into(),
			settings,
		}
	}

	/// Builds the options object passed to the plugin.
	///
	/// `settings` keys are applied after `details` and `detailsAttribute` and
	/// win on conflict.
	pub fn to_json(&self) -> Value {
		let mut object = Map::new();
		object.insert("details".to_string(), Value::String(self.details.clone()));
		object.insert(
			"detailsAttribute".to_string(),
			Value::String(self.details_attribute.clone()),
		);
		for (key, value) in &self.settings {
			object.insert(key.clone(), value.clone());
		}
		Value::Object(object)
	}
}

/// External autocomplete provider.
pub trait AutocompleteProvider<D: AddressDom> {
	/// Registers `element` so that selections are written into the companion
	/// fields described by `options`.
	fn register(
		&self,
		dom: &D,
		element: &D::Element,
		options: &ProviderOptions,
	) -> AddressResult<()>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_to_json_fixed_keys() {
		let options = ProviderOptions::new("#addr1_components", "data-geo", Map::new());
		assert_eq!(
			options.to_json(),
			json!({"details": "#addr1_components", "detailsAttribute": "data-geo"})
		);
	}

	#[rstest]
	fn test_to_json_settings_pass_through() {
		let mut settings = Map::new();
		settings.insert("types".to_string(), json!(["geocode"]));
		settings.insert("componentRestrictions".to_string(), json!({"country": "gb"}));

		let value = ProviderOptions::new("#a_components", "data-geo", settings).to_json();

		assert_eq!(value["types"], json!(["geocode"]));
		assert_eq!(value["componentRestrictions"], json!({"country": "gb"}));
		assert_eq!(value["details"], json!("#a_components"));
	}

	#[rstest]
	fn test_to_json_settings_override_fixed_keys() {
		let mut settings = Map::new();
		settings.insert("detailsAttribute".to_string(), json!("data-place"));

		let value = ProviderOptions::new("#a_components", "data-geo", settings).to_json();

		assert_eq!(value["detailsAttribute"], json!("data-place"));
	}
}
