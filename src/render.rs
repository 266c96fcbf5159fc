//! Render entry points.

use crate::{
	diff::reconcile_rendered,
	error::Error,
	host::Host,
	load::load_child_nodes,
	materialize::{materialize, resolve, Materialized, Rendered, DEFAULT_DEPTH_LIMIT},
	memory::MemoryHost,
	node::Node,
};
use tracing::{debug, instrument, trace};

/// Where to render into.
#[derive(Debug, Clone)]
pub enum Target<'a, N> {
	/// Resolved through [`Host::query_selector`].
	Selector(&'a str),
	Node(N),
}

impl<'a, N> From<&'a str> for Target<'a, N> {
	fn from(selector: &'a str) -> Self {
		Self::Selector(selector)
	}
}

/// Options for a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
	/// Whether the first render removes any existing children of the target. Defaults to `true`.
	///
	/// If `false`, existing children are kept and the rendered content is appended after them.
	pub clear_existing: bool,
	/// Maximum nesting of elements, sequences and component invocations. Defaults to [`DEFAULT_DEPTH_LIMIT`].
	pub depth_limit: usize,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			clear_existing: true,
			depth_limit: DEFAULT_DEPTH_LIMIT,
		}
	}
}

impl RenderOptions {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Keeps existing children of the target on the first render.
	#[must_use]
	pub fn keep_existing(mut self) -> Self {
		self.clear_existing = false;
		self
	}

	#[must_use]
	pub fn depth_limit(mut self, depth_limit: usize) -> Self {
		self.depth_limit = depth_limit;
		self
	}
}

/// Remembers the last rendered tree and target, so that each [`render`](`Session::render`) only applies the difference.
///
/// The components of the last tree aren't rendered again: their output is kept from the previous render.
///
/// Use one session per independently rendered target.
#[derive(Debug)]
pub struct Session<H: Host> {
	host: H,
	options: RenderOptions,
	previous_node: Option<Node>,
	previous_rendered: Vec<Rendered>,
	previous_target: Option<H::Node>,
	/// Position of the first rendered node among the target's children.
	index: usize,
}

impl<H: Host> Session<H> {
	#[must_use]
	pub fn new(host: H) -> Self {
		Self::with_options(host, RenderOptions::default())
	}

	#[must_use]
	pub fn with_options(host: H, options: RenderOptions) -> Self {
		Self {
			host,
			options,
			previous_node: None,
			previous_rendered: Vec::new(),
			previous_target: None,
			index: 0,
		}
	}

	#[must_use]
	pub fn host(&self) -> &H {
		&self.host
	}

	#[must_use]
	pub fn options(&self) -> &RenderOptions {
		&self.options
	}

	/// The tree passed to the last successful [`render`](`Session::render`).
	#[must_use]
	pub fn previous_node(&self) -> Option<&Node> {
		self.previous_node.as_ref()
	}

	#[must_use]
	pub fn previous_target(&self) -> Option<&H::Node> {
		self.previous_target.as_ref()
	}

	/// Renders `node` into `target`, or into the previous target if `target` is [`None`] or can't be resolved.
	///
	/// The first render into a fresh session starts from an empty target.
	/// If [`RenderOptions::clear_existing`] is off, the existing children are kept instead and the tree goes after them, on every render.
	/// Later renders reconcile against the previous tree.
	///
	/// # Errors
	///
	/// - [`Error::MissingRenderTarget`] if there is neither a resolvable `target` nor a previous one.
	/// - Any error from a component or the depth limit.
	///
	/// Nothing is mutated and the session state is left unchanged in either case.
	/// [`Error::Host`] is raised only while the host tree is updated, which may then be partially done.
	#[instrument(skip(self, node, target))]
	pub fn render(&mut self, node: impl Into<Node>, target: Option<Target<'_, H::Node>>) -> Result<(), Error> {
		let node = node.into();
		let resolved = match target {
			Some(Target::Selector(selector)) => {
				let resolved = self.host.query_selector(selector);
				if resolved.is_none() {
					debug!(selector, "Render target selector matched nothing.");
				}
				resolved
			}
			Some(Target::Node(target)) => Some(target),
			None => None,
		};

		let target = match resolved.or_else(|| self.previous_target.clone()) {
			Some(target) => target,
			None => return Err(Error::MissingRenderTarget),
		};

		let rendered = resolve(&node, self.options.depth_limit)?;

		let index = if self.previous_node.is_some() {
			self.index
		} else if self.options.clear_existing {
			while let Some(child) = self.host.child_at(&target, 0) {
				trace!("Clearing existing child of render target.");
				self.host.remove_child(&target, &child);
			}
			0
		} else {
			self.host.child_count(&target)
		};

		reconcile_rendered(&self.host, &target, &rendered, &self.previous_rendered, index)?;

		self.previous_node = Some(node);
		self.previous_rendered = rendered;
		self.previous_target = Some(target);
		self.index = index;
		Ok(())
	}

	/// Records the current content of `target` as the previously rendered tree,
	/// so that the next [`render`](`Session::render`) diffs against it instead of starting over.
	///
	/// Useful to take over server-rendered markup.
	///
	/// # Errors
	///
	/// - [`Error::MissingRenderTarget`] if the target can't be resolved.
	/// - [`Error::DepthLimitReached`] if the existing markup is nested too deeply.
	pub fn adopt(&mut self, target: Target<'_, H::Node>) -> Result<(), Error> {
		let target = match target {
			Target::Selector(selector) => self.host.query_selector(selector),
			Target::Node(target) => Some(target),
		}
		.ok_or(Error::MissingRenderTarget)?;

		let existing = load_child_nodes(&self.host, &target);
		debug!("Adopted {} existing node(s).", existing.len());
		let existing = Node::Sequence(existing);
		self.previous_rendered = resolve(&existing, self.options.depth_limit)?;
		self.previous_node = Some(existing);
		self.previous_target = Some(target);
		self.index = 0;
		Ok(())
	}
}

/// Renders `node` into the string form of its host representation, without any session state.
///
/// Text serializes to itself (unescaped), elements to their markup, and nothing to an empty string.
/// Sequences are concatenated.
///
/// # Errors
///
/// Like [`materialize`].
pub fn render_to_static_markup_with<H: Host>(host: &H, node: &Node) -> Result<String, Error> {
	Ok(match materialize(host, node)? {
		Materialized::Nothing => String::new(),
		Materialized::Node(node) => host.outer_markup(&node),
		Materialized::Nodes(nodes) => nodes.iter().map(|node| host.outer_markup(node)).collect(),
	})
}

/// [`render_to_static_markup_with`] a fresh [`MemoryHost`].
///
/// # Errors
///
/// Like [`materialize`].
pub fn render_to_static_markup(node: &Node) -> Result<String, Error> {
	render_to_static_markup_with(&MemoryHost::new(), node)
}
