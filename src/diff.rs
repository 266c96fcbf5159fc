//! Positional diffing of two virtual trees against one live host tree.
//!
//! Both trees are resolved first (components rendered, sequences flattened, empty nodes dropped),
//! so every item that is paired by index stands for exactly one host node.
//! There is no key-based matching: inserting at the front of a list rebuilds every following sibling.

use crate::{
	error::Error,
	host::{Host, NodeKind},
	logging,
	materialize::{create, resolve, Content, Rendered, DEFAULT_DEPTH_LIMIT},
	node::Node,
	props,
};
use tracing::{instrument, trace_span, warn};

/// Whether `old` and `new` can't be patched in place.
///
/// Nodes of different kinds always differ. Texts differ by value, elements by tag or component.
/// Components are compared by identity (see [`ComponentRef`](`crate::ComponentRef`)), never structurally.
///
/// Props and children are not considered here: same-type elements are always patched instead.
#[must_use]
pub fn changed(old: &Node, new: &Node) -> bool {
	match (old, new) {
		(Node::Text(old), Node::Text(new)) => old != new,
		(Node::Element(old), Node::Element(new)) => old.kind != new.kind,
		(Node::Sequence(_), Node::Sequence(_)) | (Node::Empty, Node::Empty) => false,
		_ => true,
	}
}

/// Updates the host children of `parent` from `index` on, which were created from `old`, to match `new`.
///
/// Both nodes are resolved into one item per host node first. Each pair of items at the same position is then handled like this,
/// taking the first match:
///
/// 1. No host child at that position: the new item is created and appended.
/// 2. Different component, text or tag: the host child is replaced by a freshly created one.
/// 3. Otherwise the host child is kept, its props are updated and its children are diffed the same way.
///
/// Additional new items are inserted before whatever host child follows, and surplus old items are removed back to front.
/// Without an `old` tree (or if it is [`Node::Empty`]), `new` is simply appended to `parent`.
///
/// # Errors
///
/// Like [`materialize`](`crate::materialize()`).
/// Components are rendered before the host tree is touched, so a failing component leaves it unchanged.
pub fn reconcile<H: Host>(host: &H, parent: &H::Node, new: Option<&Node>, old: Option<&Node>, index: usize) -> Result<(), Error> {
	reconcile_with_depth_limit(host, parent, new, old, index, DEFAULT_DEPTH_LIMIT)
}

/// [`reconcile`] with a custom depth limit.
///
/// # Errors
///
/// See [`reconcile`].
#[instrument(skip(host, parent, new, old))]
pub fn reconcile_with_depth_limit<H: Host>(host: &H, parent: &H::Node, new: Option<&Node>, old: Option<&Node>, index: usize, depth_limit: usize) -> Result<(), Error> {
	let new = match new {
		Some(new) => resolve(new, depth_limit)?,
		None => Vec::new(),
	};

	match old.filter(|old| !old.is_empty()) {
		Some(old) => {
			let old = resolve(old, depth_limit)?;
			reconcile_rendered(host, parent, &new, &old, index)
		}
		None => {
			let span = trace_span!("Inserting", index, "new.len()" = new.len());
			let _enter = span.enter();
			for rendered in &new {
				let node = create(host, rendered)?;
				host.append_child(parent, &node);
			}
			Ok(())
		}
	}
}

/// Pairs `new` and `old` by position, starting at the host child at `base`.
pub(crate) fn reconcile_rendered<H: Host>(host: &H, parent: &H::Node, new: &[Rendered], old: &[Rendered], base: usize) -> Result<(), Error> {
	for (i, new) in new.iter().enumerate() {
		let index = base + i;
		match (old.get(i), host.child_at(parent, index)) {
			(Some(old), Some(current)) => reconcile_item(host, parent, new, old, &current, index)?,
			(None, Some(following)) => {
				let span = trace_span!("Inserting", index);
				let _enter = span.enter();
				let node = create(host, new)?;
				host.insert_before(parent, &node, Some(&following));
			}
			(_, None) => {
				let span = trace_span!("Appending", index);
				let _enter = span.enter();
				let node = create(host, new)?;
				host.append_child(parent, &node);
			}
		}
	}

	for i in (new.len()..old.len()).rev() {
		if let Some(current) = host.child_at(parent, base + i) {
			let span = trace_span!("Removing", index = base + i);
			let _enter = span.enter();
			host.remove_child(parent, &current);
		}
	}
	Ok(())
}

fn reconcile_item<H: Host>(host: &H, parent: &H::Node, new: &Rendered, old: &Rendered, current: &H::Node, index: usize) -> Result<(), Error> {
	if new.origin != old.origin {
		let span = trace_span!("Replacing", index, component = ?new.origin.first());
		let _enter = span.enter();
		return replace(host, parent, new, current);
	}

	match (&old.content, &new.content) {
		(Content::Text(old_text), Content::Text(new_text)) if old_text == new_text => {
			let span = trace_span!("Keeping text", text = logging::content(new_text), index);
			let _enter = span.enter();
			Ok(())
		}

		(
			Content::Element {
				tag: old_tag,
				props: old_props,
				children: old_children,
			},
			Content::Element {
				tag: new_tag,
				props: new_props,
				children: new_children,
			},
		) if old_tag == new_tag => {
			let span = trace_span!("Patching element", tag = new_tag.as_str(), index);
			let _enter = span.enter();
			if host.kind(current) == NodeKind::Element {
				props::update_props(host, current, new_props, old_props);
			}
			reconcile_rendered(host, current, new_children, old_children, 0)
		}

		(old_content, new_content) => {
			let span = trace_span!("Replacing", index);
			let _enter = span.enter();
			if let (Content::Element { tag: old_tag, .. }, Content::Element { tag: new_tag, .. }) = (old_content, new_content) {
				if old_tag.eq_ignore_ascii_case(new_tag) {
					warn!("Recreating element due to different tag name casing: {:?} -> {:?}", old_tag, new_tag);
				}
			}
			replace(host, parent, new, current)
		}
	}
}

fn replace<H: Host>(host: &H, parent: &H::Node, new: &Rendered, current: &H::Node) -> Result<(), Error> {
	let replacement = create(host, new)?;
	host.replace_child(parent, &replacement, current);
	Ok(())
}
