//! Reads live host content back into virtual nodes, for diffing against markup that wasn't rendered by this crate.

use crate::{
	host::{Host, NodeKind},
	node::{Element, ElementType, Node, PropValue, Props},
};
use tracing::warn;

/// All children of `parent`, in order. Nodes other than elements and text are skipped.
pub fn load_child_nodes<H: Host>(host: &H, parent: &H::Node) -> Vec<Node> {
	(0..host.child_count(parent))
		.filter_map(|i| host.child_at(parent, i))
		.filter_map(|child| load_node(host, &child))
		.collect()
}

/// Reads `node` and its subtree.
///
/// The `class` attribute is read as `className`, all other attributes as string props of the same name.
/// Returns [`None`] for nodes other than elements and text.
pub fn load_node<H: Host>(host: &H, node: &H::Node) -> Option<Node> {
	match host.kind(node) {
		NodeKind::Text => host.text(node).map(Node::Text),
		NodeKind::Element => {
			let tag = host.tag_name(node)?;
			Some(Node::Element(Element {
				kind: ElementType::Tag(tag),
				props: load_props(host, node),
				children: load_child_nodes(host, node),
			}))
		}
		NodeKind::Other => {
			warn!("Unrecognised host node {:?}. Skipping.", node);
			None
		}
	}
}

fn load_props<H: Host>(host: &H, element: &H::Node) -> Props {
	host.attributes(element)
		.into_iter()
		.map(|(name, value)| {
			let name = if name == "class" { "className".to_owned() } else { name };
			(name, PropValue::Str(value))
		})
		.collect()
}
