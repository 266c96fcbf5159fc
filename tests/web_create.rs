#![cfg(target_arch = "wasm32")]

use toy_dom::{h, props, reconcile, Host, Node, WebHost};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, HtmlBodyElement};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn text() {
	let (host, parent) = fresh_parent();

	reconcile(&host, &parent, Some(&Node::from("Hello toy-dom!")), None, 0).unwrap();

	assert_eq!(host.child_count(&parent), 1);
	let text = host.child_at(&parent, 0).unwrap();
	assert!(text.dyn_ref::<web_sys::Text>().is_some());
	assert_eq!(host.text(&text).as_deref(), Some("Hello toy-dom!"));
}

#[wasm_bindgen_test]
fn element() {
	let (host, parent) = fresh_parent();

	let vdom = h!("button", props! { "className" => "primary", "disabled" => true }, "Click me");
	reconcile(&host, &parent, Some(&vdom), None, 0).unwrap();

	let button = host.child_at(&parent, 0).unwrap();
	let element = button.dyn_ref::<web_sys::Element>().unwrap();
	assert_eq!(element.local_name(), "button");
	assert_eq!(element.get_attribute("class").as_deref(), Some("primary"));
	assert_eq!(element.get_attribute("disabled").as_deref(), Some("disabled"));
	assert!(host.state(&button, "disabled"));
	assert_eq!(element.outer_html(), r#"<button class="primary" disabled="disabled">Click me</button>"#);
}

fn fresh_parent() -> (WebHost, web_sys::Node) {
	let body = window().unwrap().document().unwrap().body().unwrap().dyn_into::<HtmlBodyElement>().unwrap();
	let host = WebHost::new().unwrap();
	let parent = host.create_element("div").unwrap();
	host.append_child(&body.into(), &parent);
	(host, parent)
}
