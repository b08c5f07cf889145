//! Content-Type values used by the reply builder

pub const JSON: &str = "application/json; charset=utf-8";
pub const JAVASCRIPT: &str = "application/javascript; charset=utf-8";
pub const XML: &str = "application/xml; charset=utf-8";
pub const PLAIN_TEXT: &str = "text/plain; charset=utf-8";
pub const HTML: &str = "text/html; charset=utf-8";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// The media type without parameters, lower-cased
///
/// # Examples
///
/// ```
/// use reinhardt_http::content_type::essence;
///
/// assert_eq!(essence("Text/HTML; charset=utf-8"), "text/html");
/// assert_eq!(essence(""), "");
/// ```
pub fn essence(content_type: &str) -> String {
	content_type
		.split(';')
		.next()
		.unwrap_or_default()
		.trim()
		.to_ascii_lowercase()
}

/// Whether two Content-Type values name the same media type, ignoring parameters
pub fn same_media_type(a: &str, b: &str) -> bool {
	essence(a) == essence(b)
}

/// Content-Type guessed from a file extension
///
/// Falls back to `application/octet-stream` for unknown extensions.
pub fn guess_for_path(path: &std::path::Path) -> String {
	mime_guess::from_path(path)
		.first()
		.map_or_else(|| OCTET_STREAM.to_string(), |mime| mime.essence_str().to_string())
}
