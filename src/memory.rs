//! An in-memory host document.
//!
//! [`MemoryHost`] behaves like a (very) small subset of a browser DOM and records every mutation made through [`Host`],
//! which makes it suitable for tests, static markup and running outside of a browser.

use crate::{
	error::HostError,
	host::{Host, NodeKind},
};
use core::fmt::{self, Debug, Formatter};
use hashbrown::HashMap;
use std::{
	cell::RefCell,
	rc::{Rc, Weak},
};
use tracing::warn;

/// A mutation of live host state, as recorded by [`MemoryHost`].
///
/// Only mutations of nodes connected to the document's body are recorded.
/// Building up a detached subtree isn't, since it isn't part of the document until it's inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
	SetAttribute { name: String, value: String },
	RemoveAttribute { name: String },
	SetState { name: String, value: bool },
	AppendChild,
	InsertBefore,
	RemoveChild,
	ReplaceChild,
}

/// A host document that lives in memory.
///
/// Clones share the same document and mutation log.
#[derive(Clone)]
pub struct MemoryHost(Rc<Document>);

struct Document {
	body: MemoryNode,
	mutations: RefCell<Vec<Mutation>>,
}

impl Default for MemoryHost {
	fn default() -> Self {
		Self::new()
	}
}

impl Debug for MemoryHost {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryHost")
			.field("body", &self.0.body)
			.field("mutations.len()", &self.0.mutations.borrow().len())
			.finish()
	}
}

impl MemoryHost {
	/// Creates an empty document with a `<body>`.
	#[must_use]
	pub fn new() -> Self {
		Self(Rc::new(Document {
			body: MemoryNode::element("body"),
			mutations: RefCell::default(),
		}))
	}

	/// The document's root element, which [`query_selector`](`Host::query_selector`) searches.
	#[must_use]
	pub fn body(&self) -> MemoryNode {
		self.0.body.clone()
	}

	/// All mutations recorded so far.
	#[must_use]
	pub fn mutations(&self) -> Vec<Mutation> {
		self.0.mutations.borrow().clone()
	}

	/// Returns and clears the recorded mutations.
	pub fn take_mutations(&self) -> Vec<Mutation> {
		self.0.mutations.borrow_mut().drain(..).collect()
	}

	fn record(&self, target: &MemoryNode, mutation: Mutation) {
		if target.root() == self.0.body {
			self.0.mutations.borrow_mut().push(mutation);
		}
	}
}

/// A node in a [`MemoryHost`] document. Clones refer to the same node.
#[derive(Clone)]
pub struct MemoryNode(Rc<RefCell<NodeData>>);

struct NodeData {
	content: Content,
	parent: Weak<RefCell<NodeData>>,
	children: Vec<MemoryNode>,
}

enum Content {
	Element {
		tag: String,
		attributes: Vec<(String, String)>,
		states: HashMap<String, bool>,
	},
	Text(String),
}

impl PartialEq for MemoryNode {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}
impl Eq for MemoryNode {}

impl Debug for MemoryNode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("MemoryNode").field(&self.outer_html()).finish()
	}
}

impl MemoryNode {
	fn new(content: Content) -> Self {
		Self(Rc::new(RefCell::new(NodeData {
			content,
			parent: Weak::new(),
			children: Vec::new(),
		})))
	}

	fn element(tag: &str) -> Self {
		Self::new(Content::Element {
			tag: tag.to_owned(),
			attributes: Vec::new(),
			states: HashMap::new(),
		})
	}

	#[must_use]
	pub fn is_element(&self) -> bool {
		matches!(self.0.borrow().content, Content::Element { .. })
	}

	#[must_use]
	pub fn is_text(&self) -> bool {
		matches!(self.0.borrow().content, Content::Text(_))
	}

	#[must_use]
	pub fn tag_name(&self) -> Option<String> {
		match &self.0.borrow().content {
			Content::Element { tag, .. } => Some(tag.clone()),
			Content::Text(_) => None,
		}
	}

	#[must_use]
	pub fn text(&self) -> Option<String> {
		match &self.0.borrow().content {
			Content::Text(text) => Some(text.clone()),
			Content::Element { .. } => None,
		}
	}

	#[must_use]
	pub fn attribute(&self, name: &str) -> Option<String> {
		match &self.0.borrow().content {
			Content::Element { attributes, .. } => attributes.iter().find(|(n, _)| n == name).map(|(_, value)| value.clone()),
			Content::Text(_) => None,
		}
	}

	#[must_use]
	pub fn has_attribute(&self, name: &str) -> bool {
		self.attribute(name).is_some()
	}

	#[must_use]
	pub fn attributes(&self) -> Vec<(String, String)> {
		match &self.0.borrow().content {
			Content::Element { attributes, .. } => attributes.clone(),
			Content::Text(_) => Vec::new(),
		}
	}

	/// A live boolean state field. Unset fields are `false`.
	#[must_use]
	pub fn state(&self, name: &str) -> bool {
		match &self.0.borrow().content {
			Content::Element { states, .. } => states.get(name).copied().unwrap_or(false),
			Content::Text(_) => false,
		}
	}

	#[must_use]
	pub fn parent(&self) -> Option<MemoryNode> {
		self.0.borrow().parent.upgrade().map(MemoryNode)
	}

	#[must_use]
	pub fn child_nodes(&self) -> Vec<MemoryNode> {
		self.0.borrow().children.clone()
	}

	#[must_use]
	pub fn child_count(&self) -> usize {
		self.0.borrow().children.len()
	}

	/// The node's markup, including itself.
	#[must_use]
	pub fn outer_html(&self) -> String {
		let mut html = String::new();
		self.write_html(&mut html);
		html
	}

	/// The markup of the node's children.
	#[must_use]
	pub fn inner_html(&self) -> String {
		let mut html = String::new();
		for child in &self.0.borrow().children {
			child.write_html(&mut html);
		}
		html
	}

	fn write_html(&self, html: &mut String) {
		let data = self.0.borrow();
		match &data.content {
			Content::Text(text) => html.push_str(&escape(text, false)),
			Content::Element { tag, attributes, .. } => {
				html.push('<');
				html.push_str(tag);
				for (name, value) in attributes {
					html.push(' ');
					html.push_str(name);
					html.push_str("=\"");
					html.push_str(&escape(value, true));
					html.push('"');
				}
				html.push('>');
				if is_void(tag) {
					return;
				}
				for child in &data.children {
					child.write_html(html);
				}
				html.push_str("</");
				html.push_str(tag);
				html.push('>');
			}
		}
	}

	fn root(&self) -> MemoryNode {
		let mut root = self.clone();
		while let Some(parent) = root.parent() {
			root = parent;
		}
		root
	}

	fn position_of(&self, child: &MemoryNode) -> Option<usize> {
		self.0.borrow().children.iter().position(|c| c == child)
	}

	fn detach(&self) {
		let parent = self.0.borrow_mut().parent.upgrade().map(MemoryNode);
		if let Some(parent) = parent {
			parent.0.borrow_mut().children.retain(|c| c != self);
		}
		self.0.borrow_mut().parent = Weak::new();
	}

	fn insert_at(&self, position: usize, child: &MemoryNode) {
		child.0.borrow_mut().parent = Rc::downgrade(&self.0);
		self.0.borrow_mut().children.insert(position, child.clone());
	}

	fn matches(&self, selector: &Selector<'_>) -> bool {
		match selector {
			Selector::Any => self.is_element(),
			Selector::Id(id) => self.attribute("id").as_deref() == Some(*id),
			Selector::Class(class) => self.attribute("class").map_or(false, |classes| classes.split_ascii_whitespace().any(|c| c == *class)),
			Selector::Tag(tag) => self.tag_name().map_or(false, |t| t.eq_ignore_ascii_case(tag)),
		}
	}

	fn find(&self, selector: &Selector<'_>) -> Option<MemoryNode> {
		if self.matches(selector) {
			return Some(self.clone());
		}
		self.child_nodes().iter().find_map(|child| child.find(selector))
	}
}

fn is_void(tag: &str) -> bool {
	matches!(
		tag.to_ascii_lowercase().as_str(),
		"area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "source" | "track" | "wbr"
	)
}

fn escape(text: &str, attribute: bool) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'"' if attribute => escaped.push_str("&quot;"),
			'<' if !attribute => escaped.push_str("&lt;"),
			'>' if !attribute => escaped.push_str("&gt;"),
			c => escaped.push(c),
		}
	}
	escaped
}

/// The single simple selectors understood by [`MemoryHost::query_selector`](`Host::query_selector`).
enum Selector<'a> {
	Any,
	Id(&'a str),
	Class(&'a str),
	Tag(&'a str),
}

impl<'a> Selector<'a> {
	fn parse(selector: &'a str) -> Option<Self> {
		let selector = selector.trim();
		let valid_name = |name: &str| !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
		if selector == "*" {
			Some(Self::Any)
		} else if let Some(id) = selector.strip_prefix('#') {
			valid_name(id).then(|| Self::Id(id))
		} else if let Some(class) = selector.strip_prefix('.') {
			valid_name(class).then(|| Self::Class(class))
		} else {
			valid_name(selector).then(|| Self::Tag(selector))
		}
	}
}

fn valid_tag_name(tag: &str) -> bool {
	tag.chars().next().map_or(false, |c| c.is_ascii_alphabetic()) && !tag.chars().any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '=' | '"' | '\'' | '&'))
}

impl Host for MemoryHost {
	type Node = MemoryNode;

	fn create_element(&self, tag: &str) -> Result<MemoryNode, HostError> {
		if valid_tag_name(tag) {
			Ok(MemoryNode::element(tag))
		} else {
			Err(HostError::new(format!("Invalid tag name: {:?}", tag)))
		}
	}

	fn create_text_node(&self, text: &str) -> MemoryNode {
		MemoryNode::new(Content::Text(text.to_owned()))
	}

	fn attribute(&self, element: &MemoryNode, name: &str) -> Option<String> {
		element.attribute(name)
	}

	fn attributes(&self, element: &MemoryNode) -> Vec<(String, String)> {
		element.attributes()
	}

	fn set_attribute(&self, element: &MemoryNode, name: &str, value: &str) {
		match &mut element.0.borrow_mut().content {
			Content::Element { attributes, .. } => match attributes.iter_mut().find(|(n, _)| n == name) {
				Some((_, existing)) => *existing = value.to_owned(),
				None => attributes.push((name.to_owned(), value.to_owned())),
			},
			Content::Text(_) => return warn!("Tried to set attribute {:?} on a text node. Ignoring.", name),
		}
		self.record(element, Mutation::SetAttribute {
			name: name.to_owned(),
			value: value.to_owned(),
		});
	}

	fn remove_attribute(&self, element: &MemoryNode, name: &str) {
		match &mut element.0.borrow_mut().content {
			Content::Element { attributes, .. } => attributes.retain(|(n, _)| n != name),
			Content::Text(_) => return warn!("Tried to remove attribute {:?} from a text node. Ignoring.", name),
		}
		self.record(element, Mutation::RemoveAttribute { name: name.to_owned() });
	}

	fn state(&self, element: &MemoryNode, name: &str) -> bool {
		element.state(name)
	}

	fn set_state(&self, element: &MemoryNode, name: &str, value: bool) {
		match &mut element.0.borrow_mut().content {
			Content::Element { states, .. } => {
				states.insert(name.to_owned(), value);
			}
			Content::Text(_) => return warn!("Tried to set state {:?} on a text node. Ignoring.", name),
		}
		self.record(element, Mutation::SetState { name: name.to_owned(), value });
	}

	fn append_child(&self, parent: &MemoryNode, child: &MemoryNode) {
		if parent.is_text() {
			return warn!("Tried to append a child to a text node. Ignoring.");
		}
		child.detach();
		parent.insert_at(parent.child_count(), child);
		self.record(parent, Mutation::AppendChild);
	}

	fn insert_before(&self, parent: &MemoryNode, child: &MemoryNode, reference: Option<&MemoryNode>) {
		if parent.is_text() {
			return warn!("Tried to insert a child into a text node. Ignoring.");
		}
		if reference == Some(child) {
			return;
		}
		child.detach();
		let position = match reference {
			None => parent.child_count(),
			Some(reference) => match parent.position_of(reference) {
				Some(position) => position,
				None => return warn!("Reference node for insertion is not a child of the given parent. Ignoring."),
			},
		};
		parent.insert_at(position, child);
		self.record(parent, Mutation::InsertBefore);
	}

	fn remove_child(&self, parent: &MemoryNode, child: &MemoryNode) {
		if parent.position_of(child).is_none() {
			return warn!("Node to remove is not a child of the given parent. Ignoring.");
		}
		child.detach();
		self.record(parent, Mutation::RemoveChild);
	}

	fn replace_child(&self, parent: &MemoryNode, new_child: &MemoryNode, old_child: &MemoryNode) {
		if new_child == old_child {
			return;
		}
		if parent.position_of(old_child).is_none() {
			return warn!("Node to replace is not a child of the given parent. Ignoring.");
		}
		new_child.detach();
		let position = match parent.position_of(old_child) {
			Some(position) => position,
			None => return,
		};
		old_child.detach();
		parent.insert_at(position, new_child);
		self.record(parent, Mutation::ReplaceChild);
	}

	fn child_at(&self, parent: &MemoryNode, index: usize) -> Option<MemoryNode> {
		parent.0.borrow().children.get(index).cloned()
	}

	fn child_count(&self, parent: &MemoryNode) -> usize {
		parent.child_count()
	}

	fn query_selector(&self, selector: &str) -> Option<MemoryNode> {
		match Selector::parse(selector) {
			Some(parsed) => self.0.body.find(&parsed),
			None => {
				warn!("Unsupported selector {:?}. Only `*`, `#id`, `.class` and `tag` are understood.", selector);
				None
			}
		}
	}

	fn kind(&self, node: &MemoryNode) -> NodeKind {
		if node.is_element() {
			NodeKind::Element
		} else {
			NodeKind::Text
		}
	}

	fn tag_name(&self, node: &MemoryNode) -> Option<String> {
		node.tag_name()
	}

	fn text(&self, node: &MemoryNode) -> Option<String> {
		node.text()
	}

	fn outer_markup(&self, node: &MemoryNode) -> String {
		node.text().unwrap_or_else(|| node.outer_html())
	}
}
