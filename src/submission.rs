//! Decoding submitted address fields.
//!
//! A submitted address consists of the raw visible text plus the hidden
//! component values. The client clears the components when the text is edited
//! away from the resolved address; [`AddressSubmission::into_consistent`]
//! applies the same rule on the server for clients that did not run it.

use crate::binder::needs_clearing;
use crate::components::{ComponentSet, FORMATTED, LATITUDE, LONGITUDE};
use crate::error::{AddressError, AddressResult};
use crate::widget::AddressValue;
use std::collections::HashMap;

/// Parsed coordinates; `None` where the field was empty.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinates {
	/// Latitude in degrees.
	pub latitude: Option<f64>,
	/// Longitude in degrees.
	pub longitude: Option<f64>,
}

/// One submitted address field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSubmission {
	/// Visible text as typed or selected.
	pub raw: String,
	/// Submitted component values; missing fields are empty strings.
	pub components: AddressValue,
}

impl AddressSubmission {
	/// Extracts the submission for `name` from form data.
	///
	/// Returns `None` if the visible field is absent or empty.
	pub fn from_form_data(
		data: &HashMap<String, String>,
		name: &str,
		components: &ComponentSet,
	) -> Option<Self> {
		let raw = data.get(name).filter(|raw| !raw.is_empty())?;
		let values = components
			.iter()
			.map(|component| {
				let value = data
					.get(&component.field_name(name))
					.cloned()
					.unwrap_or_default();
				(component.suffix().to_string(), value)
			})
			.collect();

		Some(Self {
			raw: raw.clone(),
			components: values,
		})
	}

	/// Returns true if the raw text equals the resolved formatted address.
	pub fn is_consistent(&self) -> bool {
		!needs_clearing(&self.raw, self.components.get(FORMATTED))
	}

	/// Clears every component if the raw text no longer matches.
	pub fn into_consistent(self) -> Self {
		if self.is_consistent() {
			return self;
		}
		let components = self
			.components
			.iter()
			.map(|(suffix, _)| (suffix.to_string(), String::new()))
			.collect();
		Self {
			raw: self.raw,
			components,
		}
	}

	/// Parses latitude and longitude.
	///
	/// Empty values become `None`; anything else must parse as a float.
	pub fn coordinates(&self) -> AddressResult<Coordinates> {
		Ok(Coordinates {
			latitude: self.parse_coordinate(LATITUDE)?,
			longitude: self.parse_coordinate(LONGITUDE)?,
		})
	}

	fn parse_coordinate(&self, field: &str) -> AddressResult<Option<f64>> {
		match self.components.get(field) {
			None | Some("") => Ok(None),
			Some(raw) => raw
				.trim()
				.parse::<f64>()
				.ok()
				.filter(|value| value.is_finite())
				.map(Some)
				.ok_or_else(|| AddressError::InvalidCoordinate {
					field: field.to_string(),
				}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn form_data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[rstest]
	#[case(&[])]
	#[case(&[("home", "")])]
	fn test_empty_raw_is_none(#[case] pairs: &[(&str, &str)]) {
		let data = form_data(pairs);
		assert!(AddressSubmission::from_form_data(&data, "home", &ComponentSet::standard()).is_none());
	}

	#[rstest]
	fn test_missing_components_are_empty() {
		let data = form_data(&[("home", "Baker St"), ("home_route", "Baker St")]);
		let submission =
			AddressSubmission::from_form_data(&data, "home", &ComponentSet::standard()).unwrap();

		assert_eq!(submission.raw, "Baker St");
		assert_eq!(submission.components.get("route"), Some("Baker St"));
		assert_eq!(submission.components.get("country"), Some(""));
		assert_eq!(submission.components.iter().count(), 13);
	}

	#[rstest]
	fn test_coordinates() {
		let data = form_data(&[
			("home", "x"),
			("home_latitude", "51.5237"),
			("home_longitude", ""),
		]);
		let submission =
			AddressSubmission::from_form_data(&data, "home", &ComponentSet::standard()).unwrap();

		assert_eq!(
			submission.coordinates().unwrap(),
			Coordinates {
				latitude: Some(51.5237),
				longitude: None,
			}
		);
	}

	#[rstest]
	#[case("north")]
	#[case("NaN")]
	#[case("inf")]
	fn test_invalid_coordinate(#[case] latitude: &str) {
		let data = form_data(&[("home", "x"), ("home_latitude", latitude)]);
		let submission =
			AddressSubmission::from_form_data(&data, "home", &ComponentSet::standard()).unwrap();

		match submission.coordinates() {
			Err(AddressError::InvalidCoordinate { field }) => assert_eq!(field, "latitude"),
			other => panic!("expected InvalidCoordinate, got {:?}", other),
		}
	}

	#[rstest]
	fn test_into_consistent_keeps_matching() {
		let data = form_data(&[
			("home", "221B Baker St"),
			("home_formatted", "221B Baker St"),
			("home_country", "United Kingdom"),
		]);
		let submission =
			AddressSubmission::from_form_data(&data, "home", &ComponentSet::standard()).unwrap();

		assert!(submission.is_consistent());
		let submission = submission.into_consistent();
		assert_eq!(submission.components.get("country"), Some("United Kingdom"));
	}

	#[rstest]
	fn test_into_consistent_clears_stale() {
		let data = form_data(&[
			("home", "221B Baker"),
			("home_formatted", "221B Baker St"),
			("home_country", "United Kingdom"),
		]);
		let submission =
			AddressSubmission::from_form_data(&data, "home", &ComponentSet::standard()).unwrap();

		assert!(!submission.is_consistent());
		let submission = submission.into_consistent();
		assert_eq!(submission.raw, "221B Baker");
		assert!(submission.components.iter().all(|(_, v)| v.is_empty()));
		assert_eq!(submission.components.iter().count(), 13);
	}
}
