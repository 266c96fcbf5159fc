#![cfg(target_arch = "wasm32")]

use toy_dom::{h, Error, Host, Session, Target, WebHost};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn render_by_selector_then_without_target() {
	let host = WebHost::new().unwrap();
	let root = host.create_element("div").unwrap();
	root.dyn_ref::<web_sys::Element>().unwrap().set_id("toy-dom-root");
	host.append_child(&host.document().body().unwrap().into(), &root);
	host.append_child(&root, &host.create_text_node("server content"));

	let mut session = Session::new(host.clone());
	session.render(h!("p", None, "hello"), Some(Target::Selector("#toy-dom-root"))).unwrap();
	assert_eq!(root.dyn_ref::<web_sys::Element>().unwrap().inner_html(), "<p>hello</p>");

	session.render(h!("p", None, "goodbye"), None).unwrap();
	assert_eq!(root.dyn_ref::<web_sys::Element>().unwrap().inner_html(), "<p>goodbye</p>");
}

#[wasm_bindgen_test]
fn missing_target() {
	let mut session = Session::new(WebHost::new().unwrap());
	assert!(matches!(
		session.render("hello", Some(Target::Selector("#missing-element"))),
		Err(Error::MissingRenderTarget)
	));
}
