#![cfg(target_arch = "wasm32")]

use toy_dom::{component, h, props, reconcile, Host, Node, Props, WebHost};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, HtmlBodyElement};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn text() {
	test_create_diff_identical_remove(Node::from("Hello toy-dom text!"), 1);
}

#[wasm_bindgen_test]
fn sequence() {
	test_create_diff_identical_remove(vec![Node::from("Hello toy-dom"), Node::from(" multiple "), Node::from("nodes!")].into(), 3);
}

#[wasm_bindgen_test]
fn minimal_div() {
	test_create_diff_identical_remove(h!("div"), 1);
}

#[wasm_bindgen_test]
fn checked_input() {
	test_create_diff_identical_remove(h!("input", props! { "type" => "checkbox", "checked" => true }), 1);
}

#[wasm_bindgen_test]
fn nested() {
	test_create_diff_identical_remove(h!("ul", props! { "id" => "list" }, h!("li", None, "a"), h!("li", None, "b")), 1);
}

#[wasm_bindgen_test]
fn component_output() {
	let wrapper = component(|props: &Props| h!("section", None, props.children().to_vec()));
	test_create_diff_identical_remove(h!(wrapper, None, "Hello component!"), 1);
}

static mut LOG_INITIALIZED: bool = false;

fn test_create_diff_identical_remove(vdom: Node, dom_len: usize) {
	unsafe {
		if !LOG_INITIALIZED {
			tracing_wasm::set_as_global_default();
			LOG_INITIALIZED = true;
		}
	}

	let body = window().unwrap().document().unwrap().body().unwrap().dyn_into::<HtmlBodyElement>().unwrap();
	let host = WebHost::new().unwrap();
	let parent = host.create_element("div").unwrap();
	host.append_child(&body.into(), &parent);

	reconcile(&host, &parent, Some(&vdom), None, 0).unwrap();
	assert_eq!(host.child_count(&parent), dom_len);
	let created: Vec<_> = (0..dom_len).map(|i| host.child_at(&parent, i).unwrap()).collect();
	let markup = parent.dyn_ref::<web_sys::Element>().unwrap().inner_html();

	reconcile(&host, &parent, Some(&vdom), Some(&vdom), 0).unwrap();
	assert_eq!(host.child_count(&parent), dom_len);
	for (i, node) in created.iter().enumerate() {
		assert!(host.child_at(&parent, i).unwrap().is_same_node(Some(node)));
	}
	assert_eq!(parent.dyn_ref::<web_sys::Element>().unwrap().inner_html(), markup);

	reconcile(&host, &parent, None, Some(&vdom), 0).unwrap();
	assert_eq!(host.child_count(&parent), 0);
}
