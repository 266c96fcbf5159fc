//! Applies [`Props`] to host elements as attributes and live boolean state.
//!
//! # Boolean properties
//!
//! A boolean `true` sets the attribute to its own name (`checked="checked"`) *and* the element's live state of the same name to `true`.
//! A boolean `false` removes the attribute and sets the live state to `false`.
//!
//! Unrecognised value shapes are ignored.

use crate::{
	host::Host,
	logging,
	node::{PropValue, Props},
};
use hashbrown::HashSet;
use tracing::{instrument, trace, trace_span};

/// Whether `name` is reserved and must not reach the host. Currently nothing is.
#[must_use]
pub fn is_custom_prop(_name: &str) -> bool {
	false
}

fn attribute_name(name: &str) -> &str {
	if name == "className" {
		"class"
	} else {
		name
	}
}

pub fn set_boolean_prop<H: Host>(host: &H, element: &H::Node, name: &str, value: bool) {
	trace!(name, value, "Setting boolean property.");
	if value {
		host.set_attribute(element, name, name);
	} else {
		host.remove_attribute(element, name);
	}
	host.set_state(element, name, value);
}

pub fn remove_boolean_prop<H: Host>(host: &H, element: &H::Node, name: &str) {
	set_boolean_prop(host, element, name, false);
}

pub fn set_prop<H: Host>(host: &H, element: &H::Node, name: &str, value: &PropValue) {
	if is_custom_prop(name) {
		return;
	}

	match value {
		&PropValue::Bool(value) => set_boolean_prop(host, element, name, value),
		PropValue::Str(value) => {
			let name = attribute_name(name);
			trace!(name, value = logging::content(value), "Setting attribute.");
			host.set_attribute(element, name, value);
		}
		PropValue::Children(_) => (),
	}
}

/// Removes a property. The previous value decides whether it's treated as boolean.
pub fn remove_prop<H: Host>(host: &H, element: &H::Node, name: &str, previous: Option<&PropValue>) {
	if is_custom_prop(name) {
		return;
	}

	if let Some(PropValue::Bool(_)) = previous {
		remove_boolean_prop(host, element, name);
	} else {
		let name = attribute_name(name);
		trace!(name, "Removing attribute.");
		host.remove_attribute(element, name);
	}
}

pub fn set_props<H: Host>(host: &H, element: &H::Node, props: &Props) {
	for (name, value) in props.iter() {
		set_prop(host, element, name, value);
	}
}

/// Brings a single property from `old` to `new`.
///
/// Falsy or absent `new` values remove the property. Equal values are left alone.
pub fn update_prop<H: Host>(host: &H, element: &H::Node, name: &str, new: Option<&PropValue>, old: Option<&PropValue>) {
	if is_custom_prop(name) {
		return;
	}

	match new {
		Some(new) if new.is_truthy() => {
			if old.map_or(true, |old| !old.is_truthy() || old != new) {
				set_prop(host, element, name, new);
			}
		}
		_ => remove_prop(host, element, name, old),
	}
}

/// Updates every property named in either bag, in no particular order.
#[instrument(skip(host, element, new_props, old_props))]
pub fn update_props<H: Host>(host: &H, element: &H::Node, new_props: &Props, old_props: &Props) {
	let names: HashSet<&str> = new_props.names().chain(old_props.names()).collect();
	for name in names {
		let span = trace_span!("Updating property", name);
		let _enter = span.enter();
		update_prop(host, element, name, new_props.get(name), old_props.get(name));
	}
}
