//! DOM abstraction for the address binder
//!
//! The binder only needs a handful of operations: find address inputs by
//! marker class, tell elements apart, read and write input values by `name`,
//! check that an element id exists, and listen for `change` events. [`AddressDom`] captures exactly
//! that, so the binding logic runs unchanged against the browser DOM
//! ([`web::WebDocument`], WASM only) and against the in-memory document in
//! [`crate::testing`].
//!
//! Lookups that find nothing return `None`/`false`; callers treat a missing
//! element as absent and move on.

use crate::error::AddressResult;
use std::any::Any;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Callback invoked when an address input fires `change`.
pub type ChangeHandler = Box<dyn Fn() + 'static>;

/// Keeps an event listener attached; dropping it detaches the listener.
pub type ListenerGuard = Box<dyn Any>;

/// DOM operations required by [`crate::AddressFieldBinder`].
///
/// Implementations are cheap handles (`Clone`) onto a shared document, since
/// every change handler keeps one.
pub trait AddressDom: Clone + 'static {
	/// Element handle type.
	type Element: Clone + 'static;

	/// Returns every `input` element carrying `marker_class`, in document order.
	///
	/// With a `scope`, only descendants of that element are returned.
	fn address_inputs(
		&self,
		scope: Option<&Self::Element>,
		marker_class: &str,
	) -> Vec<Self::Element>;

	/// Returns true if both handles refer to the same element.
	fn same_element(&self, a: &Self::Element, b: &Self::Element) -> bool;

	/// Returns true while `element` is part of the document.
	fn is_attached(&self, element: &Self::Element) -> bool;

	/// Returns the `name` attribute of `element`.
	fn element_name(&self, element: &Self::Element) -> Option<String>;

	/// Returns the current text value of `element`.
	fn element_value(&self, element: &Self::Element) -> String;

	/// Returns the value of the input named `name`, if it exists.
	fn field_value(&self, name: &str) -> Option<String>;

	/// Sets the value of the input named `name`.
	///
	/// Returns `false` if no such input exists.
	fn set_field_value(&self, name: &str, value: &str) -> bool;

	/// Returns true if an element with the given id exists.
	fn has_element_id(&self, id: &str) -> bool;

	/// Attaches `handler` to the `change` event of `element`.
	fn on_change(
		&self,
		element: &Self::Element,
		handler: ChangeHandler,
	) -> AddressResult<ListenerGuard>;
}
