//! The capability interface of a host document.
//!
//! Everything that touches actual display nodes goes through [`Host`].
//! [`MemoryHost`](`crate::memory::MemoryHost`) and [`WebHost`](`crate::web::WebHost`) are the two implementations shipped with this crate.

use crate::error::HostError;
use core::fmt::Debug;

/// Node kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
	Element,
	Text,
	/// Comments, document fragments etc., which this crate never creates.
	Other,
}

/// A host document.
///
/// Mutations are infallible at this level. Implementations that can fail on them should log and carry on.
pub trait Host {
	/// A handle to a live host node. Clones refer to the same node.
	type Node: Clone + Debug;

	/// # Errors
	///
	/// Iff the host refuses the tag name.
	fn create_element(&self, tag: &str) -> Result<Self::Node, HostError>;
	fn create_text_node(&self, text: &str) -> Self::Node;

	fn attribute(&self, element: &Self::Node, name: &str) -> Option<String>;
	/// All attributes of `element`, in host order.
	fn attributes(&self, element: &Self::Node) -> Vec<(String, String)>;
	fn set_attribute(&self, element: &Self::Node, name: &str, value: &str);
	fn remove_attribute(&self, element: &Self::Node, name: &str);

	/// Reads a live boolean state field, like `checked`. Distinct from attribute presence.
	fn state(&self, element: &Self::Node, name: &str) -> bool;
	fn set_state(&self, element: &Self::Node, name: &str, value: bool);

	fn append_child(&self, parent: &Self::Node, child: &Self::Node);
	/// Inserts `child` before `reference`, or appends it if there is no reference.
	fn insert_before(&self, parent: &Self::Node, child: &Self::Node, reference: Option<&Self::Node>);
	fn remove_child(&self, parent: &Self::Node, child: &Self::Node);
	fn replace_child(&self, parent: &Self::Node, new_child: &Self::Node, old_child: &Self::Node);

	fn child_at(&self, parent: &Self::Node, index: usize) -> Option<Self::Node>;
	fn child_count(&self, parent: &Self::Node) -> usize;

	/// Resolves a selector to the first matching element.
	fn query_selector(&self, selector: &str) -> Option<Self::Node>;

	fn kind(&self, node: &Self::Node) -> NodeKind;
	/// The local name of an element, as it would be passed to [`create_element`](`Host::create_element`).
	fn tag_name(&self, node: &Self::Node) -> Option<String>;
	/// The character data of a text node.
	fn text(&self, node: &Self::Node) -> Option<String>;
	/// The serialized markup of a node including itself. For text nodes, this is the unescaped text.
	fn outer_markup(&self, node: &Self::Node) -> String;
}
