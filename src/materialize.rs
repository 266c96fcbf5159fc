//! Turns virtual nodes into new host nodes.
//!
//! This happens in two steps: `resolve` renders every component and flattens sequences,
//! which leaves one rendered item per host node, and `create` builds the host node for one of them.
//! The diff works on the same rendered form, so that virtual positions always line up with host positions.

use crate::{
	error::Error,
	host::Host,
	logging,
	node::{ComponentRef, Element, ElementType, Node, Props, CHILDREN},
	props,
};
use tracing::{error, instrument, trace_span};

/// Default maximum nesting of elements, sequences and component invocations.
pub const DEFAULT_DEPTH_LIMIT: usize = 1024;

/// The result of [`materialize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Materialized<N> {
	/// The node renders to nothing.
	Nothing,
	Node(N),
	/// Several nodes, from a sequence or a component that renders one.
	Nodes(Vec<N>),
}

impl<N> Materialized<N> {
	/// Whether no host node was created.
	#[must_use]
	pub fn is_nothing(&self) -> bool {
		match self {
			Self::Nothing => true,
			Self::Node(_) => false,
			Self::Nodes(nodes) => nodes.is_empty(),
		}
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<N> {
		match self {
			Self::Nothing => Vec::new(),
			Self::Node(node) => vec![node],
			Self::Nodes(nodes) => nodes,
		}
	}
}

impl<N> From<Vec<N>> for Materialized<N> {
	fn from(mut nodes: Vec<N>) -> Self {
		match nodes.len() {
			0 => Self::Nothing,
			1 => Self::Node(nodes.remove(0)),
			_ => Self::Nodes(nodes),
		}
	}
}

/// A virtual node with all components rendered. Stands for exactly one host node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rendered {
	/// The components whose output this is, outermost first.
	pub(crate) origin: Vec<ComponentRef>,
	pub(crate) content: Content,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Content {
	Text(String),
	Element {
		tag: String,
		props: Props,
		children: Vec<Rendered>,
	},
}

/// Creates the host node(s) described by `node`. Nothing is inserted into the live tree.
///
/// Components are invoked (repeatedly, if they return components) until an intrinsic element, text, a sequence or nothing remains.
///
/// # Errors
///
/// - [`Error::Component`] if a component fails,
/// - [`Error::Host`] if the host refuses to create an element,
/// - [`Error::DepthLimitReached`] after [`DEFAULT_DEPTH_LIMIT`] levels of nesting.
pub fn materialize<H: Host>(host: &H, node: &Node) -> Result<Materialized<H::Node>, Error> {
	materialize_with_depth_limit(host, node, DEFAULT_DEPTH_LIMIT)
}

/// [`materialize`] with a custom depth limit.
///
/// # Errors
///
/// See [`materialize`].
#[instrument(skip(host, node))]
pub fn materialize_with_depth_limit<H: Host>(host: &H, node: &Node, depth_limit: usize) -> Result<Materialized<H::Node>, Error> {
	let rendered = resolve(node, depth_limit)?;
	let nodes = rendered.iter().map(|rendered| create(host, rendered)).collect::<Result<Vec<_>, _>>()?;
	Ok(nodes.into())
}

/// Renders all components in `node` and flattens sequences. Empty nodes produce nothing.
///
/// Components fail here, before any host node is touched.
pub(crate) fn resolve(node: &Node, depth_limit: usize) -> Result<Vec<Rendered>, Error> {
	let mut rendered = Vec::new();
	resolve_into(node, depth_limit, &mut rendered)?;
	Ok(rendered)
}

fn resolve_into(node: &Node, depth_limit: usize, into: &mut Vec<Rendered>) -> Result<(), Error> {
	if depth_limit == 0 {
		error!("Depth limit reached");
		return Err(Error::DepthLimitReached);
	}

	match node {
		Node::Empty => (),

		Node::Text(text) => into.push(Rendered {
			origin: Vec::new(),
			content: Content::Text(text.clone()),
		}),

		Node::Sequence(nodes) => {
			for node in nodes {
				resolve_into(node, depth_limit - 1, into)?;
			}
		}

		Node::Element(Element {
			kind: ElementType::Component(component),
			props,
			children,
		}) => {
			let start = into.len();
			let output = render_component(component, props, children)?;
			resolve_into(&output, depth_limit - 1, into)?;
			for rendered in &mut into[start..] {
				rendered.origin.insert(0, component.clone());
			}
		}

		Node::Element(Element {
			kind: ElementType::Tag(tag),
			props,
			children,
		}) => {
			let mut rendered_children = Vec::with_capacity(children.len());
			for child in children {
				resolve_into(child, depth_limit - 1, &mut rendered_children)?;
			}
			into.push(Rendered {
				origin: Vec::new(),
				content: Content::Element {
					tag: tag.clone(),
					props: props.clone(),
					children: rendered_children,
				},
			});
		}
	}
	Ok(())
}

/// Builds the host node for `rendered`, including its subtree.
pub(crate) fn create<H: Host>(host: &H, rendered: &Rendered) -> Result<H::Node, Error> {
	match &rendered.content {
		Content::Text(text) => {
			let span = trace_span!("Creating text node", text = logging::content(text));
			let _enter = span.enter();
			Ok(host.create_text_node(text))
		}
		Content::Element { tag, props, children } => {
			let span = trace_span!("Creating element", tag = tag.as_str(), "children.len()" = children.len());
			let _enter = span.enter();
			let element = host.create_element(tag)?;
			props::set_props(host, &element, props);
			for child in children {
				let child = create(host, child)?;
				host.append_child(&element, &child);
			}
			Ok(element)
		}
	}
}

/// Invokes `component` with a copy of `props` that has `children` injected.
fn render_component(component: &ComponentRef, props: &Props, children: &[Node]) -> Result<Node, Error> {
	let span = trace_span!("Rendering component", component = component.name());
	let _enter = span.enter();
	let mut props = props.clone();
	props.insert(CHILDREN, children.to_vec());
	component.render(&props).map_err(Error::Component)
}
