#![doc(html_root_url = "https://docs.rs/toy-dom/0.1.0")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! A minimal virtual DOM.
//!
//! [`Node`] trees are built declaratively (see [`h!`] and [`build`]), turned into host nodes by [`materialize()`]
//! and kept up to date by a [`Session`], which diffs each new tree against the previous one by position.
//!
//! The host document is abstracted as [`Host`]. [`WebHost`] drives a browser DOM through [`web_sys`], [`MemoryHost`] keeps everything in memory.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod builder;
pub mod diff;
pub mod error;
pub mod host;
pub mod load;
mod logging;
pub mod materialize;
pub mod memory;
pub mod node;
pub mod props;
pub mod render;
pub mod web;

pub use builder::{build, component};
pub use diff::{changed, reconcile};
pub use error::{BoxError, Error, HostError};
pub use host::{Host, NodeKind};
pub use materialize::{materialize, Materialized};
pub use memory::{MemoryHost, MemoryNode, Mutation};
pub use node::{Component, ComponentRef, Element, ElementType, Node, PropValue, Props};
pub use render::{render_to_static_markup, render_to_static_markup_with, RenderOptions, Session, Target};
pub use web::WebHost;
