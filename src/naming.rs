//! Naming convention for address companion fields.

use crate::components::{ComponentSet, FORMATTED};

/// Suffix appended to the address name to form the container element id.
pub const CONTAINER_SUFFIX: &str = "_components";

/// Identifiers derived from an address field name `N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
	/// The address field name `N`.
	pub name: String,
	/// Id of the companion container element (`N_components`).
	pub container_id: String,
	/// Name of the formatted-address field (`N_formatted`).
	pub formatted_field: String,
	/// Names of all companion fields (`N_<suffix>`), in component order.
	pub attribute_fields: Vec<String>,
}

impl FieldNames {
	/// CSS selector of the companion container (`#N_components`).
	pub fn container_selector(&self) -> String {
		format!("#{}", self.container_id)
	}
}

/// Resolves the companion identifiers for the address field `name`.
///
/// `formatted_field` is always `N_formatted`, whether or not the component set
/// lists `formatted`; the set only decides which fields get cleared.
///
/// # Example
///
/// ```
/// use reinhardt_address::{ComponentSet, field_names_for};
///
/// let names = field_names_for("addr1", &ComponentSet::from_suffixes(["country", "route"]));
/// assert_eq!(names.container_id, "addr1_components");
/// assert_eq!(names.formatted_field, "addr1_formatted");
/// assert_eq!(names.attribute_fields, vec!["addr1_country", "addr1_route"]);
/// ```
pub fn field_names_for(name: &str, components: &ComponentSet) -> FieldNames {
	FieldNames {
		name: name.to_string(),
		container_id: format!("{}{}", name, CONTAINER_SUFFIX),
		formatted_field: format!("{}_{}", name, FORMATTED),
		attribute_fields: components.iter().map(|c| c.field_name(name)).collect(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_field_names_standard() {
		let names = field_names_for("home", &ComponentSet::standard());

		assert_eq!(names.name, "home");
		assert_eq!(names.container_id, "home_components");
		assert_eq!(names.container_selector(), "#home_components");
		assert_eq!(names.formatted_field, "home_formatted");
		assert_eq!(names.attribute_fields.len(), 13);
		assert_eq!(names.attribute_fields[0], "home_country");
		assert!(names.attribute_fields.contains(&"home_formatted".to_string()));
	}

	#[rstest]
	fn test_formatted_field_independent_of_components() {
		let names = field_names_for("a", &ComponentSet::from_suffixes(["route"]));
		assert_eq!(names.formatted_field, "a_formatted");
		assert_eq!(names.attribute_fields, vec!["a_route"]);
	}

	#[rstest]
	fn test_prefixed_form_name() {
		let names = field_names_for("billing-address", &ComponentSet::from_suffixes(["country"]));
		assert_eq!(names.container_id, "billing-address_components");
		assert_eq!(names.attribute_fields, vec!["billing-address_country"]);
	}
}
