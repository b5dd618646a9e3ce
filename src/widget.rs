//! Server-side address widget
//!
//! Renders the DOM contract the binder expects: a visible text input carrying
//! the marker class, followed by a hidden `N_components` container with one
//! hidden input per component. Each hidden input names its provider key in the
//! details attribute so the autocomplete provider knows what to write there.
//!
//! ```text
//! <input type="text" name="home" value="221B Baker St, London" class="address" />
//! <div id="home_components" style="display: none;">
//! <input type="hidden" name="home_country" data-geo="country" value="United Kingdom" />
//! ...
//! </div>
//! ```

use crate::components::{ComponentSet, FORMATTED};
use crate::error::{AddressError, AddressResult};
use crate::naming::field_names_for;
use crate::settings::AddressSettings;
use crate::submission::AddressSubmission;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Path of the geocomplete plugin script.
pub const GEOCOMPLETE_SCRIPT: &str = "js/jquery.geocomplete.min.js";
/// Path of the client bundle calling `initAddressFields`.
pub const CLIENT_SCRIPT: &str = "address/js/address.js";
/// Google Maps JavaScript API with the Places library.
pub const GOOGLE_MAPS_SCRIPT: &str = "https://maps.googleapis.com/maps/api/js?libraries=places";

/// Resolved component values of an address, keyed by suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressValue {
	components: BTreeMap<String, String>,
}

impl AddressValue {
	/// Creates an empty value.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets one component.
	pub fn with(mut self, suffix: impl Into<String>, value: impl Into<String>) -> Self {
		self.set(suffix, value);
		self
	}

	/// Sets one component.
	pub fn set(&mut self, suffix: impl Into<String>, value: impl Into<String>) {
		self.components.insert(suffix.into(), value.into());
	}

	/// Returns one component.
	pub fn get(&self, suffix: &str) -> Option<&str> {
		self.components.get(suffix).map(String::as_str)
	}

	/// The resolved formatted address, empty if unset.
	pub fn formatted(&self) -> &str {
		self.get(FORMATTED).unwrap_or_default()
	}

	/// Iterates over `(suffix, value)` pairs in suffix order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.components
			.iter()
			.map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Returns true if no component is set.
	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}
}

impl<K, V> FromIterator<(K, V)> for AddressValue
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			components: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

/// Address input widget.
///
/// Renders and decodes `settings.components`, the same list the binder
/// clears, so a stale companion can never survive an edit. The default
/// [`ComponentSet::standard`] carries `administrative_area_level_3` and no
/// `sublocality`; forms that submit `N_sublocality` configure
/// [`ComponentSet::with_sublocality`] instead.
#[derive(Debug, Clone)]
pub struct AddressWidget {
	attrs: BTreeMap<String, String>,
	components: ComponentSet,
	details_attribute: String,
}

impl AddressWidget {
	/// Creates a widget from settings.
	pub fn new(settings: &AddressSettings) -> Self {
		Self::with_attrs(settings, std::iter::empty::<(String, String)>())
	}

	/// Creates a widget with extra attributes on the visible input.
	///
	/// The marker class is appended to any `class` given.
	pub fn with_attrs<I, K, V>(settings: &AddressSettings, attrs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let mut attrs: BTreeMap<String, String> = attrs
			.into_iter()
			.map(|(k, v)| (k.into(), v.into()))
			.collect();

		let class = attrs.entry("class".to_string()).or_default();
		if !class.is_empty() {
			class.push(' ');
		}
		class.push_str(&settings.marker_class);

		Self {
			attrs,
			components: settings.components.clone(),
			details_attribute: settings.details_attribute.clone(),
		}
	}

	/// Attributes of the visible input.
	pub fn attrs(&self) -> &BTreeMap<String, String> {
		&self.attrs
	}

	/// Components rendered as hidden inputs.
	pub fn components(&self) -> &ComponentSet {
		&self.components
	}

	/// Renders the visible input and the hidden companion fields.
	pub fn render(&self, name: &str, value: Option<&AddressValue>) -> String {
		let empty = AddressValue::new();
		let value = value.unwrap_or(&empty);
		let names = field_names_for(name, &self.components);

		let mut input = format!(r#"<input type="text" name="{}""#, html_escape(name));
		if !value.formatted().is_empty() {
			input.push_str(&format!(r#" value="{}""#, html_escape(value.formatted())));
		}
		for (key, val) in &self.attrs {
			input.push_str(&format!(r#" {}="{}""#, key, html_escape(val)));
		}
		input.push_str(" />");

		let mut elems = vec![
			input,
			format!(
				r#"<div id="{}" style="display: none;">"#,
				html_escape(&names.container_id)
			),
		];
		for (component, field) in self.components.iter().zip(&names.attribute_fields) {
			elems.push(format!(
				r#"<input type="hidden" name="{}" {}="{}" value="{}" />"#,
				html_escape(field),
				self.details_attribute,
				html_escape(component.provider_key()),
				html_escape(value.get(component.suffix()).unwrap_or_default())
			));
		}
		elems.push("</div>".to_string());

		elems.join("\n")
	}

	/// Decodes the submitted values for `name`.
	pub fn value_from_data(
		&self,
		data: &HashMap<String, String>,
		name: &str,
	) -> Option<AddressSubmission> {
		AddressSubmission::from_form_data(data, name, &self.components)
	}

	/// Scripts the page must load, in order.
	///
	/// Fails with [`AddressError::MissingApiKey`] if no Google Maps API key is
	/// configured.
	pub fn media(settings: &AddressSettings) -> AddressResult<Vec<String>> {
		let key = settings
			.google_api_key
			.as_deref()
			.filter(|key| !key.is_empty())
			.ok_or(AddressError::MissingApiKey)?;

		let mut scripts = Vec::with_capacity(4);
		if let Some(jquery) = settings.jquery_url() {
			scripts.push(jquery.to_string());
		}
		scripts.push(format!("{}&key={}", GOOGLE_MAPS_SCRIPT, key));
		scripts.push(GEOCOMPLETE_SCRIPT.to_string());
		scripts.push(CLIENT_SCRIPT.to_string());
		Ok(scripts)
	}

	/// Renders [`media`](Self::media) as `<script>` tags.
	pub fn render_media(settings: &AddressSettings) -> AddressResult<String> {
		Ok(Self::media(settings)?
			.iter()
			.map(|src| format!(r#"<script src="{}"></script>"#, html_escape(src)))
			.collect::<Vec<_>>()
			.join("\n"))
	}
}

/// HTML escape utility
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}
