use thiserror::Error;

/// The error type components may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong while materializing, reconciling or rendering.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
	/// [`render`](`crate::Session::render`) was called without a resolvable target and without a previous one to fall back to.
	#[error("Missing/null render target")]
	MissingRenderTarget,

	/// A component failed to render. The component's error is passed through as-is.
	#[error(transparent)]
	Component(BoxError),

	/// Elements and component invocations were nested deeper than allowed.
	#[error("Depth limit reached")]
	DepthLimitReached,

	#[error(transparent)]
	Host(#[from] HostError),
}

/// A host document refused to create a node.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HostError(String);

impl HostError {
	#[must_use]
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}

	#[must_use]
	pub fn message(&self) -> &str {
		&self.0
	}
}
