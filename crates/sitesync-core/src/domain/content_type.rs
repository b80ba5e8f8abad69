//! Content-type inference for destination objects

use super::newtypes::SitePath;

/// Fallback when the extension is unknown or absent
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Infers a MIME type from the path's file extension.
///
/// Returns the bare type without a charset parameter, falling back to
/// [`DEFAULT_CONTENT_TYPE`] for unknown or missing extensions.
#[must_use]
pub fn content_type_for(path: &SitePath) -> &'static str {
    match path.extension() {
        Some(ext) => mime_guess::from_ext(ext)
            .first_raw()
            .unwrap_or(DEFAULT_CONTENT_TYPE),
        None => DEFAULT_CONTENT_TYPE,
    }
}
