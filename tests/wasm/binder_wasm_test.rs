//! Browser tests for the `web-sys` binding.
//!
//! Run with:
//!   wasm-pack test --chrome --headless
//!
//! jQuery is not loaded on the test page, so provider registration fails and
//! is logged; the change handler must still be attached.

#![cfg(target_arch = "wasm32")]

use reinhardt_address::{
	AddressDom, AddressFieldBinder, AddressSettings, AddressWidget, GeocompleteProvider,
	WebDocument,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) -> web_sys::Element {
	let document = web_sys::window().unwrap().document().unwrap();
	let root = document.create_element("div").unwrap();
	root.set_inner_html(html);
	document.body().unwrap().append_child(&root).unwrap();
	root
}

fn input(name: &str) -> HtmlInputElement {
	let document = web_sys::window().unwrap().document().unwrap();
	document
		.query_selector(&format!(r#"input[name="{}"]"#, name))
		.unwrap()
		.unwrap()
		.dyn_into::<HtmlInputElement>()
		.unwrap()
}

fn change(name: &str) {
	let event = Event::new("change").unwrap();
	input(name).dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn test_edit_clears_rendered_widget() {
	let settings = AddressSettings::default();
	let widget = AddressWidget::new(&settings);
	let value = [
		("formatted", "221B Baker St"),
		("country", "United Kingdom"),
		("latitude", "51.5237"),
	]
	.into_iter()
	.collect();
	let root = mount(&widget.render("wasm_addr", Some(&value)));

	let dom = WebDocument::new().unwrap();
	let mut binder = AddressFieldBinder::new(dom.clone(), GeocompleteProvider::new(), settings);
	binder.setup();
	assert!(binder.has_listener("wasm_addr"));

	input("wasm_addr").set_value("221B Baker");
	change("wasm_addr");

	assert_eq!(dom.field_value("wasm_addr_country").as_deref(), Some(""));
	assert_eq!(dom.field_value("wasm_addr_latitude").as_deref(), Some(""));
	root.remove();
}

#[wasm_bindgen_test]
fn test_unchanged_text_keeps_values() {
	let settings = AddressSettings::default();
	let widget = AddressWidget::new(&settings);
	let value = [("formatted", "10 Downing St"), ("country", "United Kingdom")]
		.into_iter()
		.collect();
	let root = mount(&widget.render("wasm_same", Some(&value)));

	let dom = WebDocument::new().unwrap();
	let mut binder = AddressFieldBinder::new(dom.clone(), GeocompleteProvider::new(), settings);
	binder.setup();
	binder.setup();

	change("wasm_same");

	assert_eq!(
		dom.field_value("wasm_same_country").as_deref(),
		Some("United Kingdom")
	);
	root.remove();
}

#[wasm_bindgen_test]
fn test_rerendered_fragment_is_bound_again() {
	let settings = AddressSettings::default();
	let widget = AddressWidget::new(&settings);
	let value = [("formatted", "10 Downing St"), ("country", "United Kingdom")]
		.into_iter()
		.collect();
	let first = mount(&widget.render("wasm_again", Some(&value)));

	let dom = WebDocument::new().unwrap();
	let mut binder = AddressFieldBinder::new(dom.clone(), GeocompleteProvider::new(), settings);
	binder.setup();
	first.remove();

	let second = mount(&widget.render("wasm_again", Some(&value)));
	let report = binder.setup_in(Some(&second));
	assert_eq!(report.bound, vec!["wasm_again".to_string()]);
	assert_eq!(report.released, 1);

	input("wasm_again").set_value("10 Downing");
	change("wasm_again");

	assert_eq!(dom.field_value("wasm_again_country").as_deref(), Some(""));
	second.remove();
}
