//! Node construction, the target of declarative markup.

use crate::node::{ComponentRef, Element, ElementType, Node, Props};

/// Assembles an element node. Absent `props` become an empty bag.
///
/// A bare `None` needs a type here (`None::<Props>`). [`h!`] takes care of that.
///
/// Nothing is validated: any tag name and any property names are accepted.
///
/// ```
/// use toy_dom::{build, Node, Props};
///
/// let node = build("p", Props::new().with("className", "greeting"), vec![Node::from("Hello!")]);
/// assert_eq!(node.as_element().unwrap().children.len(), 1);
/// ```
#[must_use]
pub fn build(kind: impl Into<ElementType>, props: impl Into<Option<Props>>, children: Vec<Node>) -> Node {
	Node::Element(Element {
		kind: kind.into(),
		props: props.into().unwrap_or_default(),
		children,
	})
}

/// Wraps a function as a [`ComponentRef`].
///
/// Prefer this over [`ComponentRef::new`] for closures, since it lets the parameter type be inferred.
#[must_use]
pub fn component<F>(render: F) -> ComponentRef
where
	F: Fn(&Props) -> Node + 'static,
{
	ComponentRef::new(render)
}

/// [`build`] with variadic children.
///
/// Each child is converted with [`Node::from`], so string slices, [`String`]s, nodes, [`Option`]s and [`Vec`]s (sequences) can be mixed.
///
/// ```
/// use toy_dom::{h, props};
///
/// let node = h!("div", props! { "id" => "test" }, "hello ", h!("i", None, "world"));
/// let element = node.as_element().unwrap();
/// assert_eq!(element.kind.tag(), Some("div"));
/// assert_eq!(element.children.len(), 2);
/// ```
#[macro_export]
macro_rules! h {
	($kind:expr) => {
		$crate::build($kind, ::core::option::Option::<$crate::Props>::None, ::std::vec::Vec::new())
	};
	($kind:expr, None $(, $child:expr)* $(,)?) => {
		$crate::build($kind, ::core::option::Option::<$crate::Props>::None, ::std::vec![$($crate::Node::from($child)),*])
	};
	($kind:expr, $props:expr $(, $child:expr)* $(,)?) => {
		$crate::build($kind, $props, ::std::vec![$($crate::Node::from($child)),*])
	};
}

/// Creates a [`Props`] from `name => value` pairs.
///
/// ```
/// use toy_dom::{props, PropValue};
///
/// let props = props! { "className" => "big", "checked" => true };
/// assert_eq!(props.get("checked"), Some(&PropValue::Bool(true)));
/// ```
#[macro_export]
macro_rules! props {
	($($name:expr => $value:expr),* $(,)?) => {
		$crate::Props::new()$(.with($name, $value))*
	};
}
