//! The browser DOM as [`Host`].

use crate::{
	error::HostError,
	host::{Host, NodeKind},
	logging,
};
use core::convert::TryFrom;
use tracing::{error, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node};

/// A [`web_sys::Document`] as host.
///
/// Failing mutations are logged and skipped. Live boolean state is read and written as plain properties on the element object.
#[derive(Debug, Clone)]
pub struct WebHost {
	document: Document,
}

impl WebHost {
	/// The current window's document, if there is one.
	#[must_use]
	pub fn new() -> Option<Self> {
		web_sys::window().and_then(|window| window.document()).map(Self::from_document)
	}

	#[must_use]
	pub fn from_document(document: Document) -> Self {
		Self { document }
	}

	#[must_use]
	pub fn document(&self) -> &Document {
		&self.document
	}
}

fn as_element<'a>(node: &'a Node, operation: &str) -> Option<&'a Element> {
	let element = node.dyn_ref::<Element>();
	if element.is_none() {
		error!("Expected `web_sys::Element` to {} but found {:?}.", operation, node);
	}
	element
}

impl Host for WebHost {
	type Node = Node;

	fn create_element(&self, tag: &str) -> Result<Node, HostError> {
		self.document
			.create_element(tag)
			.map(Into::into)
			.map_err(|error| HostError::new(format!("Failed to create element {:?}: {:?}", tag, error)))
	}

	fn create_text_node(&self, text: &str) -> Node {
		self.document.create_text_node(text).into()
	}

	fn attribute(&self, element: &Node, name: &str) -> Option<String> {
		element.dyn_ref::<Element>()?.get_attribute(name)
	}

	fn attributes(&self, element: &Node) -> Vec<(String, String)> {
		let attributes = match element.dyn_ref::<Element>() {
			Some(element) => element.attributes(),
			None => return Vec::new(),
		};
		(0..attributes.length())
			.filter_map(|i| attributes.item(i))
			.map(|attribute| (attribute.local_name(), attribute.value()))
			.collect()
	}

	fn set_attribute(&self, element: &Node, name: &str, value: &str) {
		if let Some(element) = as_element(element, "set an attribute") {
			if let Err(error) = element.set_attribute(name, value) {
				error!("Could not set attribute {:?}={:?}: {:?}", name, logging::content(value), error);
			}
		}
	}

	fn remove_attribute(&self, element: &Node, name: &str) {
		if let Some(element) = as_element(element, "remove an attribute") {
			if let Err(error) = element.remove_attribute(name) {
				warn!("Could not remove attribute {:?}: {:?}", name, error);
			}
		}
	}

	fn state(&self, element: &Node, name: &str) -> bool {
		js_sys::Reflect::get(element, &JsValue::from_str(name))
			.ok()
			.and_then(|value| value.as_bool())
			.unwrap_or(false)
	}

	fn set_state(&self, element: &Node, name: &str, value: bool) {
		if let Err(error) = js_sys::Reflect::set(element, &JsValue::from_str(name), &JsValue::from_bool(value)) {
			error!("Could not set property {:?} to {}: {:?}", name, value, error);
		}
	}

	fn append_child(&self, parent: &Node, child: &Node) {
		if let Err(error) = parent.append_child(child) {
			error!("Failed to append node: {:?}", error);
		}
	}

	fn insert_before(&self, parent: &Node, child: &Node, reference: Option<&Node>) {
		if let Err(error) = parent.insert_before(child, reference) {
			error!("Failed to insert node: {:?}", error);
		}
	}

	fn remove_child(&self, parent: &Node, child: &Node) {
		if let Err(error) = parent.remove_child(child) {
			error!("Failed to remove the node: {:?}", error);
		}
	}

	fn replace_child(&self, parent: &Node, new_child: &Node, old_child: &Node) {
		if let Err(error) = parent.replace_child(new_child, old_child) {
			error!("Failed to replace the node: {:?}", error);
		}
	}

	fn child_at(&self, parent: &Node, index: usize) -> Option<Node> {
		parent.child_nodes().item(u32::try_from(index).ok()?)
	}

	fn child_count(&self, parent: &Node) -> usize {
		parent.child_nodes().length() as usize
	}

	fn query_selector(&self, selector: &str) -> Option<Node> {
		match self.document.query_selector(selector) {
			Ok(element) => element.map(Into::into),
			Err(error) => {
				warn!("Invalid selector {:?}: {:?}", selector, error);
				None
			}
		}
	}

	fn kind(&self, node: &Node) -> NodeKind {
		match node.node_type() {
			Node::ELEMENT_NODE => NodeKind::Element,
			Node::TEXT_NODE => NodeKind::Text,
			_ => NodeKind::Other,
		}
	}

	fn tag_name(&self, node: &Node) -> Option<String> {
		node.dyn_ref::<Element>().map(Element::local_name)
	}

	fn text(&self, node: &Node) -> Option<String> {
		match self.kind(node) {
			NodeKind::Text => node.text_content(),
			NodeKind::Element | NodeKind::Other => None,
		}
	}

	fn outer_markup(&self, node: &Node) -> String {
		match node.dyn_ref::<Element>() {
			Some(element) => element.outer_html(),
			None => node.text_content().unwrap_or_default(),
		}
	}
}
