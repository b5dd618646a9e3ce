//! Reinhardt Address - address autocomplete widget
//!
//! Binds a places-autocomplete provider (the jQuery `geocomplete` plugin) to
//! address inputs and keeps their hidden companion fields consistent with the
//! visible text.
//!
//! ## DOM contract
//!
//! An address input carries the marker class (`address` by default) and a
//! `name` attribute `N`. By convention it is accompanied by:
//!
//! - a container `<div id="N_components">` holding the companion fields,
//! - a hidden field `N_formatted` with the last resolved formatted address,
//! - one hidden field `N_<suffix>` per entry of the [`ComponentSet`].
//!
//! The provider fills the companion fields when the user picks a suggestion.
//! When the user edits the visible text away from `N_formatted`, the binder
//! clears every companion field so that stale coordinates and components are
//! never submitted with a hand-typed address.
//!
//! ## Architecture
//!
//! - [`components`]: configurable suffix list and provider keys
//! - [`naming`]: typed naming-convention lookup ([`field_names_for`])
//! - [`dom`]: DOM abstraction ([`AddressDom`]) with a `web-sys` adapter on WASM
//! - [`provider`]: autocomplete provider seam ([`AutocompleteProvider`])
//! - [`binder`]: [`AddressFieldBinder`] setup and change handling
//! - [`widget`]: server-side rendering of the DOM contract
//! - [`submission`]: server-side decoding of submitted companion values
//! - [`settings`]: [`AddressSettings`]
//! - [`client`]: `initAddressFields` WASM entry point
//! - [`testing`]: in-memory DOM and recording provider
//!
//! ## Example
//!
//! ```
//! use reinhardt_address::testing::{MemoryDocument, RecordingProvider};
//! use reinhardt_address::{AddressFieldBinder, AddressSettings, ComponentSet};
//!
//! let doc = MemoryDocument::new();
//! doc.add_address_field("addr1", "221B Baker St", &ComponentSet::standard());
//! doc.set_value("addr1_country", "United Kingdom");
//!
//! let mut binder = AddressFieldBinder::new(
//!     doc.clone(),
//!     RecordingProvider::new(),
//!     AddressSettings::default(),
//! );
//! binder.setup();
//!
//! doc.edit("addr1", "221B Baker");
//! assert_eq!(doc.value("addr1_country").as_deref(), Some(""));
//! ```

#![warn(missing_docs)]

// Core modules
pub mod components;
pub mod error;
pub mod logging;
pub mod naming;
pub mod settings;

// Client-side binding
pub mod binder;
pub mod dom;
pub mod provider;

// WASM entry point
#[cfg(target_arch = "wasm32")]
pub mod client;

// Server-side rendering and decoding
pub mod submission;
pub mod widget;

// Testing utilities (available on both WASM and native)
pub mod testing;

pub use binder::{AddressFieldBinder, ChangeOutcome, SetupReport, needs_clearing};
pub use components::{AddressComponent, ComponentSet};
pub use dom::{AddressDom, ChangeHandler, ListenerGuard};
pub use error::{AddressError, AddressResult};
pub use naming::{FieldNames, field_names_for};
pub use provider::{AutocompleteProvider, ProviderOptions};
pub use settings::AddressSettings;
pub use submission::{AddressSubmission, Coordinates};
pub use widget::{AddressValue, AddressWidget};

#[cfg(target_arch = "wasm32")]
pub use client::{bind_address_fields_in, init_address_fields, init_in, init_with_settings};
#[cfg(target_arch = "wasm32")]
pub use dom::web::WebDocument;
#[cfg(target_arch = "wasm32")]
pub use provider::geocomplete::GeocompleteProvider;

// Used by the logging macros
#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
