//! The virtual node model.
//!
//! A [`Node`] tree is a plain description of what the host document should contain.
//! It is never mutated after construction: each render builds a fresh tree and the previous one is kept only to diff against.

use crate::error::BoxError;
use core::{
	any::{type_name, TypeId},
	fmt::{self, Debug, Formatter},
	iter::FromIterator,
};
use std::rc::Rc;

/// The name of the property that carries a component's children.
pub const CHILDREN: &str = "children";

/// One node of a virtual tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
	/// A text node.
	Text(String),
	/// An intrinsic element or a component invocation.
	Element(Element),
	/// Several sibling nodes without a wrapper, as returned by fragment-like components.
	///
	/// Materialized sequences are flattened into their parent.
	Sequence(Vec<Node>),
	/// Renders to nothing.
	Empty,
}

impl Default for Node {
	fn default() -> Self {
		Self::Empty
	}
}

impl Node {
	#[must_use]
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	#[must_use]
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Self::Element(element) => Some(element),
			_ => None,
		}
	}
}

impl From<&str> for Node {
	fn from(text: &str) -> Self {
		Self::Text(text.to_owned())
	}
}

impl From<String> for Node {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<Element> for Node {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}

impl From<Vec<Node>> for Node {
	fn from(nodes: Vec<Node>) -> Self {
		Self::Sequence(nodes)
	}
}

impl<T: Into<Node>> From<Option<T>> for Node {
	fn from(node: Option<T>) -> Self {
		node.map_or(Self::Empty, Into::into)
	}
}

/// An element description: `{ type, props, children }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
	pub kind: ElementType,
	pub props: Props,
	pub children: Vec<Node>,
}

/// What an [`Element`] stands for.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementType {
	/// An intrinsic host element, like `"div"`.
	Tag(String),
	/// A component that is rendered into another [`Node`].
	Component(ComponentRef),
}

impl ElementType {
	#[must_use]
	pub fn tag(&self) -> Option<&str> {
		match self {
			Self::Tag(tag) => Some(tag),
			Self::Component(_) => None,
		}
	}
}

impl From<&str> for ElementType {
	fn from(tag: &str) -> Self {
		Self::Tag(tag.to_owned())
	}
}

impl From<String> for ElementType {
	fn from(tag: String) -> Self {
		Self::Tag(tag)
	}
}

impl From<ComponentRef> for ElementType {
	fn from(component: ComponentRef) -> Self {
		Self::Component(component)
	}
}

/// A pure function (or function-like object) from [`Props`] to a [`Node`].
///
/// The props passed to [`render`](`Component::render`) always contain a [`CHILDREN`] entry.
///
/// Plain functions and closures of the shape `Fn(&Props) -> Node` are components.
/// Components that can fail are created with [`ComponentRef::fallible`] or by implementing this trait directly.
pub trait Component {
	/// # Errors
	///
	/// Errors are passed on to the caller of [`materialize`](`crate::materialize()`) or [`render`](`crate::Session::render`) unchanged.
	fn render(&self, props: &Props) -> Result<Node, BoxError>;
}

impl<F> Component for F
where
	F: Fn(&Props) -> Node,
{
	fn render(&self, props: &Props) -> Result<Node, BoxError> {
		Ok(self(props))
	}
}

struct Fallible<F>(F);
impl<F, E> Component for Fallible<F>
where
	F: Fn(&Props) -> Result<Node, E>,
	E: Into<BoxError>,
{
	fn render(&self, props: &Props) -> Result<Node, BoxError> {
		(self.0)(props).map_err(Into::into)
	}
}

/// A shared handle to a [`Component`].
///
/// Two references are the same component iff they were created from the same Rust type,
/// which for functions and closures means the same declaration site.
/// Behaviourally identical components declared in different places are different components.
#[derive(Clone)]
pub struct ComponentRef {
	component: Rc<dyn Component>,
	id: TypeId,
	name: &'static str,
}

impl ComponentRef {
	#[must_use]
	pub fn new<C: Component + 'static>(component: C) -> Self {
		Self {
			component: Rc::new(component),
			id: TypeId::of::<C>(),
			name: type_name::<C>(),
		}
	}

	/// Creates a component reference from a function that may fail.
	#[must_use]
	pub fn fallible<F, E>(render: F) -> Self
	where
		F: Fn(&Props) -> Result<Node, E> + 'static,
		E: Into<BoxError>,
	{
		Self {
			component: Rc::new(Fallible(render)),
			id: TypeId::of::<F>(),
			name: type_name::<F>(),
		}
	}

	/// The component's type name, for diagnostics.
	#[must_use]
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Invokes the component.
	///
	/// # Errors
	///
	/// Iff the component fails.
	pub fn render(&self, props: &Props) -> Result<Node, BoxError> {
		self.component.render(props)
	}
}

impl PartialEq for ComponentRef {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Debug for ComponentRef {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ComponentRef").field(&self.name).finish()
	}
}

/// A property value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
	Bool(bool),
	Str(String),
	/// Only used for the [`CHILDREN`] entry passed to components.
	Children(Vec<Node>),
}

impl PropValue {
	/// `false` and `""` are falsy, everything else is truthy.
	#[must_use]
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Bool(value) => *value,
			Self::Str(value) => !value.is_empty(),
			Self::Children(_) => true,
		}
	}
}

impl From<bool> for PropValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<&str> for PropValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}

impl From<String> for PropValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<Vec<Node>> for PropValue {
	fn from(value: Vec<Node>) -> Self {
		Self::Children(value)
	}
}

/// A property bag. Names are unique; inserting an existing name replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props(Vec<(String, PropValue)>);

impl Props {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
		self.insert(name, value);
		self
	}

	/// Returns the previous value, if any.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
		let name = name.into();
		let value = value.into();
		match self.0.iter_mut().find(|(n, _)| *n == name) {
			Some((_, existing)) => Some(std::mem::replace(existing, value)),
			None => {
				self.0.push((name, value));
				None
			}
		}
	}

	pub fn remove(&mut self, name: &str) -> Option<PropValue> {
		let position = self.0.iter().position(|(n, _)| n == name)?;
		Some(self.0.remove(position).1)
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<&PropValue> {
		self.0.iter().find(|(n, _)| n == name).map(|(_, value)| value)
	}

	#[must_use]
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// The [`CHILDREN`] entry, or an empty slice if it's missing or not a node list.
	#[must_use]
	pub fn children(&self) -> &[Node] {
		match self.get(CHILDREN) {
			Some(PropValue::Children(children)) => children,
			_ => &[],
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value))
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(name, _)| name.as_str())
	}
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut props = Self::new();
		for (name, value) in iter {
			props.insert(name, value);
		}
		props
	}
}
