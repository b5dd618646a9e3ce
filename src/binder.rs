//! Address field binding
//!
//! [`AddressFieldBinder`] wires every address input of a document to the
//! autocomplete provider and installs the change handler that keeps the
//! companion fields honest.
//!
//! ## Flow
//!
//! ```text
//! setup() / setup_in(scope)
//!   release bindings whose input left the document
//!   for each input.<marker_class> named N
//!     input already bound?  ──yes──► skip
//!         │ no
//!         ▼
//!     registry ◄── (input, N)
//!     provider.register(input, #N_components, data-geo, settings)
//!     input.on("change") ──► apply_change(N)
//!
//! apply_change(N)
//!   value(N) == value(N_formatted) ?  ──yes──► leave everything alone
//!         │ no
//!         ▼
//!     N_<suffix> = "" for every suffix
//! ```
//!
//! The registry is owned by the binder and keyed by element, so running
//! `setup()` again on the same document never attaches a second handler, while
//! an input re-rendered under the same name is bound afresh.

use crate::dom::{AddressDom, ChangeHandler, ListenerGuard};
use crate::naming::{FieldNames, field_names_for};
use crate::provider::{AutocompleteProvider, ProviderOptions};
use crate::settings::AddressSettings;
use crate::{debug_log, info_log, warn_log};

/// Returns true if the companion fields must be cleared.
///
/// Exact comparison: no trimming, no case folding. A missing formatted field
/// never matches.
pub fn needs_clearing(value: &str, formatted: Option<&str>) -> bool {
	formatted != Some(value)
}

/// Result of handling one change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
	/// The visible text still matches the formatted address.
	Unchanged,
	/// The companion fields were cleared.
	Cleared {
		/// Fields that were set to `""`.
		cleared: Vec<String>,
		/// Fields that do not exist in the document.
		missing: Vec<String>,
	},
}

impl ChangeOutcome {
	/// Returns true if the fields were cleared.
	pub fn is_cleared(&self) -> bool {
		matches!(self, Self::Cleared { .. })
	}
}

/// Applies the change rule for one address field.
///
/// `value` is the current text of the address input.
pub fn apply_change<D: AddressDom>(dom: &D, value: &str, names: &FieldNames) -> ChangeOutcome {
	let formatted = dom.field_value(&names.formatted_field);
	if !needs_clearing(value, formatted.as_deref()) {
		return ChangeOutcome::Unchanged;
	}

	let mut cleared = Vec::new();
	let mut missing = Vec::new();
	for field in &names.attribute_fields {
		if dom.set_field_value(field, "") {
			cleared.push(field.clone());
		} else {
			missing.push(field.clone());
		}
	}

	debug_log!(
		"address '{}' edited, cleared {} companion fields ({} missing)",
		names.name,
		cleared.len(),
		missing.len()
	);
	ChangeOutcome::Cleared { cleared, missing }
}

/// Summary of one `setup()` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupReport {
	/// Fields bound by this run.
	pub bound: Vec<String>,
	/// Fields skipped because an earlier run bound them.
	pub already_bound: Vec<String>,
	/// Address inputs skipped for lack of a `name` attribute.
	pub unnamed: usize,
	/// Earlier bindings dropped because their input left the document.
	pub released: usize,
}

/// One bound input and the listener keeping its handler alive.
struct Binding<E> {
	name: String,
	element: E,
	guard: Option<ListenerGuard>,
}

/// Bound inputs, keyed by element identity.
struct BindingRegistry<E> {
	bindings: Vec<Binding<E>>,
}

impl<E> Default for BindingRegistry<E> {
	fn default() -> Self {
		Self {
			bindings: Vec::new(),
		}
	}
}

impl<E> BindingRegistry<E> {
	fn contains<D>(&self, dom: &D, element: &E) -> bool
	where
		D: AddressDom<Element = E>,
	{
		self.bindings
			.iter()
			.any(|binding| dom.same_element(&binding.element, element))
	}

	fn insert(&mut self, name: &str, element: E, guard: Option<ListenerGuard>) {
		self.bindings.push(Binding {
			name: name.to_string(),
			element,
			guard,
		});
	}

	/// Drops bindings whose element is detached; their listeners go with them.
	fn release_detached<D>(&mut self, dom: &D) -> usize
	where
		D: AddressDom<Element = E>,
	{
		let before = self.bindings.len();
		self.bindings.retain(|binding| dom.is_attached(&binding.element));
		before - self.bindings.len()
	}

	fn is_bound(&self, name: &str) -> bool {
		self.bindings.iter().any(|binding| binding.name == name)
	}

	fn has_listener(&self, name: &str) -> bool {
		self.bindings
			.iter()
			.any(|binding| binding.name == name && binding.guard.is_some())
	}

	fn unregister(&mut self, name: &str) -> bool {
		let before = self.bindings.len();
		self.bindings.retain(|binding| binding.name != name);
		before != self.bindings.len()
	}

	fn names(&self) -> impl Iterator<Item = &String> {
		self.bindings.iter().map(|binding| &binding.name)
	}

	fn len(&self) -> usize {
		self.bindings.len()
	}
}

/// Binds address inputs to an autocomplete provider.
///
/// # Example
///
/// ```
/// use reinhardt_address::testing::{MemoryDocument, RecordingProvider};
/// use reinhardt_address::{AddressFieldBinder, AddressSettings, ComponentSet};
///
/// let doc = MemoryDocument::new();
/// doc.add_address_field("home", "", &ComponentSet::standard());
///
/// let mut binder = AddressFieldBinder::new(doc.clone(), RecordingProvider::new(), AddressSettings::default());
/// let report = binder.setup();
/// assert_eq!(report.bound, vec!["home".to_string()]);
///
/// // Running setup again is a no-op
/// let report = binder.setup();
/// assert!(report.bound.is_empty());
/// assert_eq!(doc.listener_count("home"), 1);
/// ```
pub struct AddressFieldBinder<D, P>
where
	D: AddressDom,
	P: AutocompleteProvider<D>,
{
	dom: D,
	provider: P,
	settings: AddressSettings,
	registry: BindingRegistry<D::Element>,
}

impl<D, P> AddressFieldBinder<D, P>
where
	D: AddressDom,
	P: AutocompleteProvider<D>,
{
	/// Creates a binder. Nothing is bound until [`setup`](Self::setup) runs.
	pub fn new(dom: D, provider: P, settings: AddressSettings) -> Self {
		Self {
			dom,
			provider,
			settings,
			registry: BindingRegistry::default(),
		}
	}

	/// Binds every address input of the document not bound yet.
	///
	/// Precondition: the document is fully parsed (DOM ready). Inputs added
	/// later are picked up by calling `setup()` again.
	pub fn setup(&mut self) -> SetupReport {
		self.setup_in(None)
	}

	/// Binds the address inputs found under `scope` (the whole document when
	/// `None`).
	///
	/// Bindings whose input has left the document are released first, wherever
	/// they are.
	pub fn setup_in(&mut self, scope: Option<&D::Element>) -> SetupReport {
		let mut report = SetupReport {
			released: self.registry.release_detached(&self.dom),
			..SetupReport::default()
		};
		if report.released > 0 {
			debug_log!("released {} detached address binding(s)", report.released);
		}

		for element in self.dom.address_inputs(scope, &self.settings.marker_class) {
			let name = match self.dom.element_name(&element) {
				Some(name) if !name.is_empty() => name,
				_ => {
					debug_log!("skipping address input without a name");
					report.unnamed += 1;
					continue;
				}
			};

			if self.registry.contains(&self.dom, &element) {
				report.already_bound.push(name);
				continue;
			}

			self.bind(&element, &name);
			report.bound.push(name);
		}

		if !report.bound.is_empty() {
			info_log!("bound {} address field(s)", report.bound.len());
		}
		report
	}

	fn bind(&mut self, element: &D::Element, name: &str) {
		let names = field_names_for(name, &self.settings.components);

		if !self.dom.has_element_id(&names.container_id) {
			debug_log!(
				"companion container '#{}' not found for '{}'",
				names.container_id,
				name
			);
		}

		let options = ProviderOptions::new(
			names.container_selector(),
			self.settings.details_attribute.clone(),
			self.settings.provider.clone(),
		);
		if let Err(err) = self.provider.register(&self.dom, element, &options) {
			warn_log!("autocomplete registration failed for '{}': {}", name, err);
		}

		let dom = self.dom.clone();
		let input = element.clone();
		let handler: ChangeHandler = Box::new(move || {
			let value = dom.element_value(&input);
			apply_change(&dom, &value, &names);
		});

		let guard = match self.dom.on_change(element, handler) {
			Ok(guard) => Some(guard),
			Err(err) => {
				warn_log!("change handler not attached for '{}': {}", name, err);
				None
			}
		};
		self.registry.insert(name, element.clone(), guard);
	}

	/// Runs the change rule for `name` without an event.
	///
	/// Returns `None` if no input named `name` exists.
	pub fn handle_change(&self, name: &str) -> Option<ChangeOutcome> {
		let value = self.dom.field_value(name)?;
		let names = field_names_for(name, &self.settings.components);
		Some(apply_change(&self.dom, &value, &names))
	}

	/// Returns true if an input named `name` has been bound.
	pub fn is_bound(&self, name: &str) -> bool {
		self.registry.is_bound(name)
	}

	/// Returns true if `name` has a live change listener.
	pub fn has_listener(&self, name: &str) -> bool {
		self.registry.has_listener(name)
	}

	/// Detaches the change listeners of inputs named `name` and forgets their
	/// bindings.
	///
	/// The provider registration is not undone.
	pub fn unbind(&mut self, name: &str) -> bool {
		self.registry.unregister(name)
	}

	/// Names of all bound inputs, in binding order.
	pub fn bound_names(&self) -> impl Iterator<Item = &String> {
		self.registry.names()
	}

	/// Number of bound inputs.
	pub fn bound_count(&self) -> usize {
		self.registry.len()
	}

	/// Settings in use.
	pub fn settings(&self) -> &AddressSettings {
		&self.settings
	}

	/// Document handle.
	pub fn dom(&self) -> &D {
		&self.dom
	}

	/// Provider in use.
	pub fn provider(&self) -> &P {
		&self.provider
	}
}
