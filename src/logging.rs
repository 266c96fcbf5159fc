//! Redaction of page content in log output.

/// Returns `content` if the `"dangerous-logging"` feature is enabled, and a placeholder otherwise.
///
/// Text and attribute values may contain personal data, so they're kept out of spans by default.
#[allow(clippy::non_ascii_literal)]
pub(crate) fn content(content: &str) -> &str {
	if cfg!(feature = "dangerous-logging") {
		content
	} else {
		"…"
	}
}
