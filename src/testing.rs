//! Testing utilities
//!
//! - [`MemoryDocument`]: an in-memory [`AddressDom`] with `change` dispatch
//! - [`RecordingProvider`]: an [`AutocompleteProvider`] that records
//!   registrations instead of talking to a plugin
//!
//! Both work on every target, so binder behavior can be tested without a
//! browser.

use crate::components::{ComponentSet, FORMATTED};
use crate::dom::{AddressDom, ChangeHandler, ListenerGuard};
use crate::error::{AddressError, AddressResult};
use crate::naming::field_names_for;
use crate::provider::{AutocompleteProvider, ProviderOptions};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryElement(usize);

#[derive(Debug, Default)]
struct MemoryNode {
	tag: &'static str,
	id: Option<String>,
	name: Option<String>,
	classes: Vec<String>,
	value: String,
	parent: Option<usize>,
	removed: bool,
}

struct MemoryListener {
	id: u64,
	element: MemoryElement,
	handler: Rc<dyn Fn()>,
}

#[derive(Default)]
struct DocumentState {
	nodes: Vec<MemoryNode>,
	listeners: Vec<MemoryListener>,
	next_listener_id: u64,
	writes: Vec<(String, String)>,
}

impl DocumentState {
	/// A node is attached while neither it nor any ancestor was removed.
	fn attached(&self, index: usize) -> bool {
		let mut current = Some(index);
		while let Some(i) = current {
			match self.nodes.get(i) {
				Some(node) if !node.removed => current = node.parent,
				_ => return false,
			}
		}
		true
	}

	fn descends_from(&self, index: usize, ancestor: usize) -> bool {
		let mut current = self.nodes.get(index).and_then(|n| n.parent);
		while let Some(i) = current {
			if i == ancestor {
				return true;
			}
			current = self.nodes.get(i).and_then(|n| n.parent);
		}
		false
	}

	fn input_by_name(&self, name: &str) -> Option<usize> {
		(0..self.nodes.len()).find(|&i| {
			let node = &self.nodes[i];
			node.tag == "input" && node.name.as_deref() == Some(name) && self.attached(i)
		})
	}
}

/// In-memory document implementing [`AddressDom`].
///
/// Clones share the same document.
#[derive(Clone, Default)]
pub struct MemoryDocument {
	state: Rc<RefCell<DocumentState>>,
}

impl std::fmt::Debug for MemoryDocument {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("MemoryDocument")
			.field("nodes", &state.nodes)
			.field("listeners", &state.listeners.len())
			.finish()
	}
}

impl MemoryDocument {
	/// Creates an empty document.
	pub fn new() -> Self {
		Self::default()
	}

	fn push(&self, node: MemoryNode) -> MemoryElement {
		let mut state = self.state.borrow_mut();
		state.nodes.push(node);
		MemoryElement(state.nodes.len() - 1)
	}

	fn push_in(&self, parent: Option<MemoryElement>, node: MemoryNode) -> MemoryElement {
		self.push(MemoryNode {
			parent: parent.map(|p| p.0),
			..node
		})
	}

	/// Adds a plain input named `name`.
	pub fn add_input(&self, name: &str, value: &str) -> MemoryElement {
		self.push(MemoryNode {
			tag: "input",
			name: Some(name.to_string()),
			value: value.to_string(),
			..Default::default()
		})
	}

	/// Adds a visible address input carrying `marker_class`.
	pub fn add_address_input(&self, name: &str, value: &str, marker_class: &str) -> MemoryElement {
		self.push(MemoryNode {
			tag: "input",
			name: Some(name.to_string()),
			classes: vec![marker_class.to_string()],
			value: value.to_string(),
			..Default::default()
		})
	}

	/// Adds an input carrying `marker_class` but no `name` attribute.
	pub fn add_unnamed_input(&self, marker_class: &str) -> MemoryElement {
		self.push(MemoryNode {
			tag: "input",
			classes: vec![marker_class.to_string()],
			..Default::default()
		})
	}

	/// Adds a `div` with the given id.
	pub fn add_container(&self, id: &str) -> MemoryElement {
		self.push(MemoryNode {
			tag: "div",
			id: Some(id.to_string()),
			..Default::default()
		})
	}

	/// Adds an empty `div` to insert markup into, as a page does when it
	/// renders a fragment.
	pub fn add_fragment(&self, id: &str) -> MemoryElement {
		self.add_container(id)
	}

	/// Adds a complete address field as the widget renders it: the visible
	/// input (class `address`, value `formatted`), the `N_components`
	/// container and one empty hidden input per component, with `N_formatted`
	/// set to `formatted`.
	pub fn add_address_field(
		&self,
		name: &str,
		formatted: &str,
		components: &ComponentSet,
	) -> MemoryElement {
		self.address_field(None, name, formatted, components)
	}

	/// Like [`add_address_field`](Self::add_address_field), but inside `scope`.
	pub fn add_address_field_in(
		&self,
		scope: MemoryElement,
		name: &str,
		formatted: &str,
		components: &ComponentSet,
	) -> MemoryElement {
		self.address_field(Some(scope), name, formatted, components)
	}

	fn address_field(
		&self,
		parent: Option<MemoryElement>,
		name: &str,
		formatted: &str,
		components: &ComponentSet,
	) -> MemoryElement {
		let names = field_names_for(name, components);
		let input = self.push_in(
			parent,
			MemoryNode {
				tag: "input",
				name: Some(name.to_string()),
				classes: vec![crate::settings::DEFAULT_MARKER_CLASS.to_string()],
				value: formatted.to_string(),
				..Default::default()
			},
		);
		let container = self.push_in(
			parent,
			MemoryNode {
				tag: "div",
				id: Some(names.container_id.clone()),
				..Default::default()
			},
		);
		let hidden = |field: &str| MemoryNode {
			tag: "input",
			name: Some(field.to_string()),
			..Default::default()
		};
		for field in &names.attribute_fields {
			self.push_in(Some(container), hidden(field));
		}
		if !components.contains(FORMATTED) {
			self.push_in(Some(container), hidden(&names.formatted_field));
		}
		self.set_value(&names.formatted_field, formatted);
		input
	}

	/// Removes the input named `name`, if present.
	pub fn remove_field(&self, name: &str) -> bool {
		let mut state = self.state.borrow_mut();
		match state.input_by_name(name) {
			Some(index) => {
				state.nodes[index].removed = true;
				true
			}
			None => false,
		}
	}

	/// Detaches `element` and everything inside it from the document.
	///
	/// Returns `false` if it was already detached.
	pub fn remove_element(&self, element: MemoryElement) -> bool {
		let mut state = self.state.borrow_mut();
		if !state.attached(element.0) {
			return false;
		}
		state.nodes[element.0].removed = true;
		true
	}

	/// Sets an input value without firing events or recording a write.
	pub fn set_value(&self, name: &str, value: &str) -> bool {
		let mut state = self.state.borrow_mut();
		match state.input_by_name(name) {
			Some(index) => {
				state.nodes[index].value = value.to_string();
				true
			}
			None => false,
		}
	}

	/// Returns the value of the input named `name`.
	pub fn value(&self, name: &str) -> Option<String> {
		let state = self.state.borrow();
		state.input_by_name(name).map(|i| state.nodes[i].value.clone())
	}

	/// Simulates the user typing `value` into `name` and leaving the field.
	pub fn edit(&self, name: &str, value: &str) {
		self.set_value(name, value);
		self.fire_change(name);
	}

	/// Dispatches `change` to every listener of the input named `name`.
	///
	/// Returns the number of handlers invoked.
	pub fn fire_change(&self, name: &str) -> usize {
		let handlers: Vec<Rc<dyn Fn()>> = {
			let state = self.state.borrow();
			let Some(index) = state.input_by_name(name) else {
				return 0;
			};
			state
				.listeners
				.iter()
				.filter(|l| l.element == MemoryElement(index))
				.map(|l| Rc::clone(&l.handler))
				.collect()
		};

		for handler in &handlers {
			handler();
		}
		handlers.len()
	}

	/// Number of `change` listeners on the input named `name`.
	pub fn listener_count(&self, name: &str) -> usize {
		let state = self.state.borrow();
		match state.input_by_name(name) {
			Some(index) => state
				.listeners
				.iter()
				.filter(|l| l.element == MemoryElement(index))
				.count(),
			None => 0,
		}
	}

	/// Writes performed through [`AddressDom::set_field_value`], in order.
	pub fn writes(&self) -> Vec<(String, String)> {
		self.state.borrow().writes.clone()
	}

	/// Forgets recorded writes.
	pub fn clear_writes(&self) {
		self.state.borrow_mut().writes.clear();
	}
}

impl AddressDom for MemoryDocument {
	type Element = MemoryElement;

	fn address_inputs(
		&self,
		scope: Option<&MemoryElement>,
		marker_class: &str,
	) -> Vec<MemoryElement> {
		let state = self.state.borrow();
		state
			.nodes
			.iter()
			.enumerate()
			.filter(|(_, n)| n.tag == "input" && n.classes.iter().any(|c| c == marker_class))
			.filter(|(i, _)| state.attached(*i))
			.filter(|(i, _)| scope.is_none_or(|root| state.descends_from(*i, root.0)))
			.map(|(i, _)| MemoryElement(i))
			.collect()
	}

	fn same_element(&self, a: &MemoryElement, b: &MemoryElement) -> bool {
		a == b
	}

	fn is_attached(&self, element: &MemoryElement) -> bool {
		self.state.borrow().attached(element.0)
	}

	fn element_name(&self, element: &MemoryElement) -> Option<String> {
		self.state
			.borrow()
			.nodes
			.get(element.0)
			.and_then(|n| n.name.clone())
	}

	fn element_value(&self, element: &MemoryElement) -> String {
		self.state
			.borrow()
			.nodes
			.get(element.0)
			.map(|n| n.value.clone())
			.unwrap_or_default()
	}

	fn field_value(&self, name: &str) -> Option<String> {
		self.value(name)
	}

	fn set_field_value(&self, name: &str, value: &str) -> bool {
		let found = self.set_value(name, value);
		if found {
			self.state
				.borrow_mut()
				.writes
				.push((name.to_string(), value.to_string()));
		}
		found
	}

	fn has_element_id(&self, id: &str) -> bool {
		let state = self.state.borrow();
		(0..state.nodes.len())
			.any(|i| state.nodes[i].id.as_deref() == Some(id) && state.attached(i))
	}

	fn on_change(
		&self,
		element: &MemoryElement,
		handler: ChangeHandler,
	) -> AddressResult<ListenerGuard> {
		let mut state = self.state.borrow_mut();
		if !state.attached(element.0) {
			return Err(AddressError::Dom(format!(
				"element {} is not in the document",
				element.0
			)));
		}

		let id = state.next_listener_id;
		state.next_listener_id += 1;
		state.listeners.push(MemoryListener {
			id,
			element: *element,
			handler: Rc::from(handler),
		});

		Ok(Box::new(MemoryListenerGuard {
			state: Rc::downgrade(&self.state),
			id,
		}))
	}
}

/// Removes its listener from the document on drop.
struct MemoryListenerGuard {
	state: Weak<RefCell<DocumentState>>,
	id: u64,
}

impl Drop for MemoryListenerGuard {
	fn drop(&mut self) {
		if let Some(state) = self.state.upgrade() {
			state.borrow_mut().listeners.retain(|l| l.id != self.id);
		}
	}
}

/// Provider that records registrations.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingProvider {
	registrations: Rc<RefCell<Vec<(String, ProviderOptions)>>>,
	failure: Option<String>,
}

impl RecordingProvider {
	/// Creates a provider accepting every registration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a provider rejecting every registration with `message`.
	pub fn failing(message: impl Into<String>) -> Self {
		Self {
			failure: Some(message.into()),
			..Self::default()
		}
	}

	/// Accepted registrations as `(input name, options)`.
	pub fn registrations(&self) -> Vec<(String, ProviderOptions)> {
		self.registrations.borrow().clone()
	}
}

impl<D: AddressDom> AutocompleteProvider<D> for RecordingProvider {
	fn register(
		&self,
		dom: &D,
		element: &D::Element,
		options: &ProviderOptions,
	) -> AddressResult<()> {
		if let Some(message) = &self.failure {
			return Err(AddressError::Provider(message.clone()));
		}
		let name = dom.element_name(element).unwrap_or_default();
		self.registrations
			.borrow_mut()
			.push((name, options.clone()));
		Ok(())
	}
}
