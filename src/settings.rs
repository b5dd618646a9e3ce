//! Address widget settings
//!
//! Every key has a default, so an empty document is a valid configuration.
//!
//! ```toml
//! marker_class = "address"
//! details_attribute = "data-geo"
//! components = ["country", "locality", "postal_code", "formatted", "latitude", "longitude"]
//! google_api_key = "..."
//! jquery_url = ""          # empty: the host page already loads jQuery
//!
//! [provider]               # passed to geocomplete unchanged
//! types = ["geocode"]
//! country = "gb"
//! ```

use crate::components::ComponentSet;
use crate::error::AddressResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default marker class identifying address inputs.
pub const DEFAULT_MARKER_CLASS: &str = "address";
/// Default attribute the provider reads component keys from.
pub const DEFAULT_DETAILS_ATTRIBUTE: &str = "data-geo";
/// Default jQuery script.
pub const DEFAULT_JQUERY_URL: &str = "https://ajax.googleapis.com/ajax/libs/jquery/2.2.0/jquery.min.js";

/// Settings for the address widget and binder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressSettings {
	/// Class marking address inputs.
	pub marker_class: String,
	/// Attribute carrying the provider key on companion fields.
	pub details_attribute: String,
	/// Companion fields cleared on edit and rendered by the widget.
	pub components: ComponentSet,
	/// Google Maps API key used for the Places script.
	pub google_api_key: Option<String>,
	/// jQuery script URL. `None` or empty means the page provides jQuery.
	pub jquery_url: Option<String>,
	/// Opaque provider settings, passed through unchanged.
	pub provider: Map<String, Value>,
}

impl Default for AddressSettings {
	fn default() -> Self {
		Self {
			marker_class: DEFAULT_MARKER_CLASS.to_string(),
			details_attribute: DEFAULT_DETAILS_ATTRIBUTE.to_string(),
			components: ComponentSet::standard(),
			google_api_key: None,
			jquery_url: Some(DEFAULT_JQUERY_URL.to_string()),
			provider: Map::new(),
		}
	}
}

impl AddressSettings {
	/// Parses settings from a TOML document.
	pub fn from_toml_str(source: &str) -> AddressResult<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Parses settings from a JSON document.
	pub fn from_json_str(source: &str) -> AddressResult<Self> {
		Ok(serde_json::from_str(source)?)
	}

	/// Converts an already-parsed JSON value.
	pub fn from_json_value(value: Value) -> AddressResult<Self> {
		Ok(serde_json::from_value(value)?)
	}

	/// Replaces the component list.
	pub fn with_components(mut self, components: ComponentSet) -> Self {
		self.components = components;
		self
	}

	/// Sets the Google Maps API key.
	pub fn with_google_api_key(mut self, key: impl Into<String>) -> Self {
		self.google_api_key = Some(key.into());
		self
	}

	/// Sets or clears the jQuery script URL.
	pub fn with_jquery_url(mut self, url: Option<String>) -> Self {
		self.jquery_url = url;
		self
	}

	/// Adds one provider setting.
	pub fn with_provider_setting(mut self, key: impl Into<String>, value: Value) -> Self {
		self.provider.insert(key.into(), value);
		self
	}

	/// jQuery URL to load, if any.
	pub fn jquery_url(&self) -> Option<&str> {
		self.jquery_url.as_deref().filter(|url| !url.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::AddressError;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_defaults() {
		let settings = AddressSettings::default();
		assert_eq!(settings.marker_class, "address");
		assert_eq!(settings.details_attribute, "data-geo");
		assert_eq!(settings.components, ComponentSet::standard());
		assert_eq!(settings.jquery_url(), Some(DEFAULT_JQUERY_URL));
		assert!(settings.provider.is_empty());
	}

	#[rstest]
	fn test_empty_toml_is_default() {
		let settings = AddressSettings::from_toml_str("").unwrap();
		assert_eq!(settings, AddressSettings::default());
	}

	#[rstest]
	fn test_toml_with_provider_table() {
		let settings = AddressSettings::from_toml_str(
			r#"
			components = ["country", "formatted"]
			google_api_key = "abc"
			jquery_url = ""

			[provider]
			types = ["geocode"]
			country = "gb"
			"#,
		)
		.unwrap();

		assert_eq!(settings.components.len(), 2);
		assert_eq!(settings.google_api_key.as_deref(), Some("abc"));
		assert_eq!(settings.jquery_url(), None);
		assert_eq!(settings.provider["types"], json!(["geocode"]));
		assert_eq!(settings.provider["country"], json!("gb"));
	}

	#[rstest]
	fn test_json_null_jquery() {
		let settings = AddressSettings::from_json_str(r#"{"jquery_url": null}"#).unwrap();
		assert_eq!(settings.jquery_url(), None);
	}

	#[rstest]
	fn test_invalid_toml() {
		let result = AddressSettings::from_toml_str("components = 3");
		assert!(matches!(result, Err(AddressError::SettingsToml(_))));
	}

	#[rstest]
	fn test_builder_methods() {
		let settings = AddressSettings::default()
			.with_components(ComponentSet::without_admin_area())
			.with_google_api_key("key")
			.with_jquery_url(None)
			.with_provider_setting("blur", json!(true));

		assert_eq!(settings.components.len(), 12);
		assert_eq!(settings.google_api_key.as_deref(), Some("key"));
		assert_eq!(settings.jquery_url(), None);
		assert_eq!(settings.provider["blur"], json!(true));
	}
}
