//! `web-sys` implementation of [`AddressDom`].

use super::{AddressDom, ChangeHandler, ListenerGuard};
use crate::error::{AddressError, AddressResult};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, Node};

/// Browser document handle.
#[derive(Debug, Clone)]
pub struct WebDocument {
	document: Document,
}

impl WebDocument {
	/// Wraps the document of the current window.
	pub fn new() -> AddressResult<Self> {
		let document = web_sys::window()
			.and_then(|window| window.document())
			.ok_or_else(|| AddressError::Dom("no document available".to_string()))?;
		Ok(Self { document })
	}

	/// Wraps an explicit document.
	pub fn from_document(document: Document) -> Self {
		Self { document }
	}

	fn input_by_name(&self, name: &str) -> Option<HtmlInputElement> {
		let selector = format!(r#"input[name="{}"]"#, escape_attr_value(name));
		self.document
			.query_selector(&selector)
			.ok()
			.flatten()
			.and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
	}
}

impl AddressDom for WebDocument {
	type Element = Element;

	fn address_inputs(&self, scope: Option<&Element>, marker_class: &str) -> Vec<Element> {
		let selector = format!("input.{}", marker_class);
		let nodes = match scope {
			Some(root) => root.query_selector_all(&selector),
			None => self.document.query_selector_all(&selector),
		};
		let Ok(nodes) = nodes else {
			crate::warn_log!("invalid address selector '{}'", selector);
			return Vec::new();
		};

		(0..nodes.length())
			.filter_map(|i| nodes.get(i))
			.filter_map(|node| node.dyn_into::<Element>().ok())
			.collect()
	}

	fn same_element(&self, a: &Element, b: &Element) -> bool {
		let other: &Node = b;
		a.is_same_node(Some(other))
	}

	fn is_attached(&self, element: &Element) -> bool {
		element.is_connected()
	}

	fn element_name(&self, element: &Element) -> Option<String> {
		element.get_attribute("name")
	}

	fn element_value(&self, element: &Element) -> String {
		match element.dyn_ref::<HtmlInputElement>() {
			Some(input) => input.value(),
			None => element.get_attribute("value").unwrap_or_default(),
		}
	}

	fn field_value(&self, name: &str) -> Option<String> {
		self.input_by_name(name).map(|input| input.value())
	}

	fn set_field_value(&self, name: &str, value: &str) -> bool {
		match self.input_by_name(name) {
			Some(input) => {
				input.set_value(value);
				true
			}
			None => false,
		}
	}

	fn has_element_id(&self, id: &str) -> bool {
		self.document.get_element_by_id(id).is_some()
	}

	fn on_change(&self, element: &Element, handler: ChangeHandler) -> AddressResult<ListenerGuard> {
		let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
			handler();
		});

		element
			.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
			.map_err(|err| AddressError::Dom(format!("failed to attach 'change': {:?}", err)))?;

		Ok(Box::new(WebListener {
			element: element.clone(),
			closure,
		}))
	}
}

/// Attached `change` listener; removed from the element on drop.
struct WebListener {
	element: Element,
	closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for WebListener {
	fn drop(&mut self) {
		let _ = self
			.element
			.remove_event_listener_with_callback("change", self.closure.as_ref().unchecked_ref());
	}
}

/// Escapes a value for use inside a double-quoted CSS attribute selector.
fn escape_attr_value(value: &str) -> String {
	value.replace('\\', "\\\\").replace('"', "\\\"")
}
