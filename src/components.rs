//! Companion field suffixes
//!
//! Every address field `N` is accompanied by hidden fields `N_<suffix>`, one per
//! resolved place attribute. The suffix list differs between deployments (some
//! pages track `administrative_area_level_3` or `postal_town`, others do not),
//! so it is a value rather than a constant.
//!
//! Each suffix also knows the provider attribute it is filled from. The widget
//! renders that key as `data-geo="<key>"` and the provider writes the matching
//! attribute of the selected place into the field.

use serde::{Deserialize, Serialize};

/// Suffix of the field holding the resolved formatted address.
pub const FORMATTED: &str = "formatted";
/// Suffix of the latitude field.
pub const LATITUDE: &str = "latitude";
/// Suffix of the longitude field.
pub const LONGITUDE: &str = "longitude";

const STANDARD_SUFFIXES: &[&str] = &[
	"country",
	"country_code",
	"locality",
	"administrative_area_level_3",
	"postal_code",
	"postal_town",
	"route",
	"street_number",
	"state",
	"state_code",
	FORMATTED,
	LATITUDE,
	LONGITUDE,
];

/// Returns the provider attribute a suffix is filled from.
///
/// Unknown suffixes map to themselves.
pub fn provider_key_for(suffix: &str) -> &str {
	match suffix {
		"country_code" => "country_short",
		"state" => "administrative_area_level_1",
		"state_code" => "administrative_area_level_1_short",
		FORMATTED => "formatted_address",
		LATITUDE => "lat",
		LONGITUDE => "lng",
		other => other,
	}
}

/// One companion field: its suffix and the provider attribute feeding it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressComponent {
	suffix: String,
	provider_key: String,
}

impl AddressComponent {
	/// Creates a component using the default provider key for `suffix`.
	pub fn new(suffix: impl Into<String>) -> Self {
		let suffix = suffix.into();
		let provider_key = provider_key_for(&suffix).to_string();
		Self {
			suffix,
			provider_key,
		}
	}

	/// Creates a component with an explicit provider key.
	pub fn with_provider_key(suffix: impl Into<String>, provider_key: impl Into<String>) -> Self {
		Self {
			suffix: suffix.into(),
			provider_key: provider_key.into(),
		}
	}

	/// Field name suffix (`country`, `postal_code`, ...).
	pub fn suffix(&self) -> &str {
		&self.suffix
	}

	/// Provider attribute (`country_short`, `lat`, ...).
	pub fn provider_key(&self) -> &str {
		&self.provider_key
	}

	/// Full field name for the address field `name`.
	pub fn field_name(&self, name: &str) -> String {
		format!("{}_{}", name, self.suffix)
	}
}

/// Ordered, duplicate-free list of companion components.
///
/// Serializes as a plain list of suffixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ComponentSet {
	components: Vec<AddressComponent>,
}

impl ComponentSet {
	/// The full thirteen-suffix list.
	pub fn standard() -> Self {
		Self::from_suffixes(STANDARD_SUFFIXES.iter().copied())
	}

	/// The standard list without `administrative_area_level_3`.
	pub fn without_admin_area() -> Self {
		Self::from_suffixes(
			STANDARD_SUFFIXES
				.iter()
				.copied()
				.filter(|s| *s != "administrative_area_level_3"),
		)
	}

	/// The standard list with `sublocality` in place of
	/// `administrative_area_level_3`.
	///
	/// Matches the fields rendered by form widgets that decode `N_sublocality`
	/// on submission.
	pub fn with_sublocality() -> Self {
		Self::from_suffixes(STANDARD_SUFFIXES.iter().copied().map(|s| {
			if s == "administrative_area_level_3" {
				"sublocality"
			} else {
				s
			}
		}))
	}

	/// Builds a set from suffixes, dropping repeats and keeping first-seen order.
	pub fn from_suffixes<I, S>(suffixes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut set = Self {
			components: Vec::new(),
		};
		for suffix in suffixes {
			set.push(AddressComponent::new(suffix));
		}
		set
	}

	/// Appends a component unless its suffix is already present.
	pub fn push(&mut self, component: AddressComponent) {
		if !self.contains(component.suffix()) {
			self.components.push(component);
		}
	}

	/// Returns true if `suffix` is part of the set.
	pub fn contains(&self, suffix: &str) -> bool {
		self.components.iter().any(|c| c.suffix == suffix)
	}

	/// Looks up a component by suffix.
	pub fn get(&self, suffix: &str) -> Option<&AddressComponent> {
		self.components.iter().find(|c| c.suffix == suffix)
	}

	/// Iterates over the components in order.
	pub fn iter(&self) -> impl Iterator<Item = &AddressComponent> {
		self.components.iter()
	}

	/// Iterates over the suffixes in order.
	pub fn suffixes(&self) -> impl Iterator<Item = &str> {
		self.components.iter().map(|c| c.suffix.as_str())
	}

	/// Number of components.
	pub fn len(&self) -> usize {
		self.components.len()
	}

	/// Returns true if the set has no components.
	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}
}

impl Default for ComponentSet {
	fn default() -> Self {
		Self::standard()
	}
}

impl From<Vec<String>> for ComponentSet {
	fn from(suffixes: Vec<String>) -> Self {
		Self::from_suffixes(suffixes)
	}
}

impl From<ComponentSet> for Vec<String> {
	fn from(set: ComponentSet) -> Self {
		set.components.into_iter().map(|c| c.suffix).collect()
	}
}

impl<'a> IntoIterator for &'a ComponentSet {
	type Item = &'a AddressComponent;
	type IntoIter = std::slice::Iter<'a, AddressComponent>;

	fn into_iter(self) -> Self::IntoIter {
		self.components.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_standard_set_has_thirteen_suffixes() {
		let set = ComponentSet::standard();
		assert_eq!(set.len(), 13);
		assert!(set.contains("administrative_area_level_3"));
		assert!(set.contains("postal_town"));
		assert!(set.contains(FORMATTED));
	}

	#[rstest]
	fn test_without_admin_area() {
		let set = ComponentSet::without_admin_area();
		assert_eq!(set.len(), 12);
		assert!(!set.contains("administrative_area_level_3"));
		assert!(set.contains("postal_town"));
	}

	#[rstest]
	fn test_with_sublocality_keeps_position() {
		let set = ComponentSet::with_sublocality();
		let suffixes: Vec<_> = set.suffixes().collect();
		assert_eq!(set.len(), 13);
		assert_eq!(&suffixes[..5], &["country", "country_code", "locality", "sublocality", "postal_code"]);
		assert!(!set.contains("administrative_area_level_3"));
		assert_eq!(set.get("sublocality").unwrap().provider_key(), "sublocality");
	}

	#[rstest]
	#[case("country", "country")]
	#[case("country_code", "country_short")]
	#[case("state", "administrative_area_level_1")]
	#[case("state_code", "administrative_area_level_1_short")]
	#[case("formatted", "formatted_address")]
	#[case("latitude", "lat")]
	#[case("longitude", "lng")]
	#[case("sublocality", "sublocality")]
	fn test_provider_key_for(#[case] suffix: &str, #[case] expected: &str) {
		assert_eq!(provider_key_for(suffix), expected);
	}

	#[rstest]
	fn test_from_suffixes_drops_repeats() {
		let set = ComponentSet::from_suffixes(["route", "country", "route"]);
		let suffixes: Vec<_> = set.suffixes().collect();
		assert_eq!(suffixes, vec!["route", "country"]);
	}

	#[rstest]
	fn test_field_name() {
		let component = AddressComponent::new("postal_code");
		assert_eq!(component.field_name("addr1"), "addr1_postal_code");
	}

	#[rstest]
	fn test_serde_as_suffix_list() {
		let set: ComponentSet = serde_json::from_str(r#"["country", "latitude"]"#).unwrap();
		assert_eq!(set.get("latitude").unwrap().provider_key(), "lat");

		let json = serde_json::to_string(&set).unwrap();
		assert_eq!(json, r#"["country","latitude"]"#);
	}
}
