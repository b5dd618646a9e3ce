//! Error types for reinhardt-address.
//!
//! The binder itself never fails: missing elements are skipped and provider
//! failures are logged. Errors surface only from configuration, server-side
//! decoding and the WASM entry point.

/// Errors produced by reinhardt-address.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
	/// Settings could not be parsed from TOML.
	#[error("Invalid address settings (TOML): {0}")]
	SettingsToml(#[from] toml::de::Error),
	/// Settings could not be parsed from JSON.
	#[error("Invalid address settings (JSON): {0}")]
	SettingsJson(#[from] serde_json::Error),
	/// A submitted coordinate is not a number.
	#[error("Invalid value for {field}")]
	InvalidCoordinate {
		/// Component suffix holding the bad value (`latitude` or `longitude`).
		field: String,
	},
	/// Media generation requires a Google Maps API key.
	#[error("google_api_key is not configured")]
	MissingApiKey,
	/// The autocomplete provider rejected a registration.
	#[error("Autocomplete provider error: {0}")]
	Provider(String),
	/// A DOM operation failed.
	#[error("DOM error: {0}")]
	Dom(String),
}

/// Result alias used throughout the crate.
pub type AddressResult<T> = Result<T, AddressError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_invalid_coordinate_display() {
		let err = AddressError::InvalidCoordinate {
			field: "latitude".to_string(),
		};
		assert_eq!(err.to_string(), "Invalid value for latitude");
	}

	#[rstest]
	fn test_settings_json_from() {
		let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let err: AddressError = json_err.into();
		assert!(err.to_string().starts_with("Invalid address settings (JSON)"));
	}

	#[rstest]
	fn test_settings_toml_from() {
		let toml_err = toml::from_str::<toml::Value>("marker_class = ").unwrap_err();
		let err: AddressError = toml_err.into();
		assert!(matches!(err, AddressError::SettingsToml(_)));
		assert!(err.to_string().starts_with("Invalid address settings (TOML)"));
	}

	#[rstest]
	fn test_provider_display() {
		let err = AddressError::Provider("jQuery is not defined".to_string());
		assert!(err.to_string().contains("jQuery is not defined"));
	}
}
