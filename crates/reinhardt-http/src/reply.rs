//! The reply builder
//!
//! A [`Reply`] collects what a handler wants to send: status, headers, cookies,
//! a renderer for the body, a redirect or an error. Nothing is written while the
//! handler runs; the [`ReplyWriter`](crate::ReplyWriter) turns the finished
//! reply into transport calls afterwards.
//!
//! Every configuration method returns `&mut Self` so calls can be chained, and
//! none of them fail. Problems surface when the reply is written.

use cookie::Cookie;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reinhardt_renderers::{
	BinaryRenderer, Data, HTMLRenderer, JSONPRenderer, JSONRenderer, Renderer, SecureJSONRenderer,
	TextRenderer, ViewTarget, XMLRenderer,
};
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::body::BodyState;
use crate::content_type;
use crate::context::ReplyContext;
use crate::error::ReplyError;

/// Response builder for one request
///
/// # Examples
///
/// ```
/// use reinhardt_http::{Reply, content_type};
/// use serde_json::json;
///
/// let mut reply = Reply::default();
/// reply.created().json(json!({"id": 42})).header("X-Request-Id", "abc");
///
/// assert_eq!(reply.status_code(), 201);
/// assert_eq!(reply.content_type_value(), content_type::JSON);
/// assert_eq!(reply.headers()["x-request-id"], "abc");
/// ```
pub struct Reply {
	ctx: ReplyContext,
	status: u16,
	content_type: String,
	headers: HeaderMap,
	renderer: Option<Box<dyn Renderer>>,
	body: BodyState,
	cookies: Vec<Cookie<'static>>,
	redirect: Option<String>,
	done: bool,
	gzip: bool,
	error: Option<ReplyError>,
	view_target: ViewTarget,
}

impl Reply {
	/// New reply with status 200 and gzip eligible
	pub fn new(ctx: ReplyContext) -> Self {
		Self {
			ctx,
			status: 200,
			content_type: String::new(),
			headers: HeaderMap::new(),
			renderer: None,
			body: BodyState::Unrendered,
			cookies: Vec::new(),
			redirect: None,
			done: false,
			gzip: true,
			error: None,
			view_target: ViewTarget::default(),
		}
	}

	pub fn context(&self) -> &ReplyContext {
		&self.ctx
	}

	// Status

	/// Set the status code
	pub fn status(&mut self, code: u16) -> &mut Self {
		self.status = code;
		self
	}

	/// 200 OK
	pub fn ok(&mut self) -> &mut Self {
		self.status(200)
	}

	/// 201 Created
	pub fn created(&mut self) -> &mut Self {
		self.status(201)
	}

	/// 202 Accepted
	pub fn accepted(&mut self) -> &mut Self {
		self.status(202)
	}

	/// 204 No Content
	pub fn no_content(&mut self) -> &mut Self {
		self.status(204)
	}

	/// 301 Moved Permanently
	pub fn moved_permanently(&mut self) -> &mut Self {
		self.status(301)
	}

	/// 302 Found
	pub fn found(&mut self) -> &mut Self {
		self.status(302)
	}

	/// 307 Temporary Redirect
	pub fn temporary_redirect(&mut self) -> &mut Self {
		self.status(307)
	}

	/// 400 Bad Request
	pub fn bad_request(&mut self) -> &mut Self {
		self.status(400)
	}

	/// 401 Unauthorized
	pub fn unauthorized(&mut self) -> &mut Self {
		self.status(401)
	}

	/// 403 Forbidden
	pub fn forbidden(&mut self) -> &mut Self {
		self.status(403)
	}

	/// 404 Not Found
	pub fn not_found(&mut self) -> &mut Self {
		self.status(404)
	}

	/// 405 Method Not Allowed
	pub fn method_not_allowed(&mut self) -> &mut Self {
		self.status(405)
	}

	/// 406 Not Acceptable
	pub fn not_acceptable(&mut self) -> &mut Self {
		self.status(406)
	}

	/// 409 Conflict
	pub fn conflict(&mut self) -> &mut Self {
		self.status(409)
	}

	/// 415 Unsupported Media Type
	pub fn unsupported_media_type(&mut self) -> &mut Self {
		self.status(415)
	}

	/// 500 Internal Server Error
	pub fn internal_server_error(&mut self) -> &mut Self {
		self.status(500)
	}

	/// 503 Service Unavailable
	pub fn service_unavailable(&mut self) -> &mut Self {
		self.status(503)
	}

	// Content type

	/// Set the Content-Type unless one is already set
	///
	/// The value is stored lower-cased. The first non-empty value wins; later
	/// calls are ignored until the content type is cleared with
	/// `header("Content-Type", "")`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_http::Reply;
	///
	/// let mut reply = Reply::default();
	/// reply.content_type("Text/CSV").content_type("application/pdf");
	///
	/// assert_eq!(reply.content_type_value(), "text/csv");
	/// ```
	pub fn content_type(&mut self, value: &str) -> &mut Self {
		if self.content_type.is_empty() {
			self.content_type = value.to_lowercase();
		}
		self
	}

	pub fn is_content_type_set(&self) -> bool {
		!self.content_type.is_empty()
	}

	pub fn content_type_value(&self) -> &str {
		&self.content_type
	}

	/// Whether the Content-Type is HTML, ignoring parameters
	pub fn is_html(&self) -> bool {
		content_type::same_media_type(&self.content_type, content_type::HTML)
	}

	// Renderers

	/// Render `payload` as JSON
	pub fn json<T>(&mut self, payload: T) -> &mut Self
	where
		T: Serialize + Send + Sync + 'static,
	{
		self.content_type(content_type::JSON);
		self.render(JSONRenderer::new(payload))
	}

	/// Render `payload` as JSON behind the configured secure JSON prefix
	pub fn json_secure<T>(&mut self, payload: T) -> &mut Self
	where
		T: Serialize + Send + Sync + 'static,
	{
		let prefix = self.ctx.settings().render.secure_json.prefix.clone();
		self.content_type(content_type::JSON);
		self.render(SecureJSONRenderer::new(payload, prefix))
	}

	/// Render `payload` as JSONP wrapped in `callback`
	///
	/// An empty callback renders plain JSON, still with the JavaScript
	/// Content-Type.
	pub fn jsonp<T>(&mut self, payload: T, callback: impl Into<String>) -> &mut Self
	where
		T: Serialize + Send + Sync + 'static,
	{
		self.content_type(content_type::JAVASCRIPT);
		self.render(JSONPRenderer::new(payload, callback))
	}

	/// Render `payload` as XML
	pub fn xml<T>(&mut self, payload: T) -> &mut Self
	where
		T: Serialize + Send + Sync + 'static,
	{
		self.content_type(content_type::XML);
		self.render(XMLRenderer::new(payload))
	}

	/// Render `text` verbatim as plain text
	pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
		self.content_type(content_type::PLAIN_TEXT);
		self.render(TextRenderer::new(text))
	}

	/// Render plain text, replacing each `{}` in `format` with the next value
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_http::Reply;
	///
	/// let mut reply = Reply::default();
	/// reply.text_with("{} of {}", [1, 3]);
	///
	/// let mut out = Vec::new();
	/// reply.renderer().unwrap().render(&mut out).unwrap();
	/// assert_eq!(out, b"1 of 3");
	/// ```
	pub fn text_with<I, V>(&mut self, format: impl Into<String>, values: I) -> &mut Self
	where
		I: IntoIterator<Item = V>,
		V: ToString,
	{
		self.content_type(content_type::PLAIN_TEXT);
		self.render(TextRenderer::with_values(format, values))
	}

	/// Write `bytes` as the body
	pub fn binary(&mut self, bytes: impl Into<Vec<u8>>) -> &mut Self {
		self.render(BinaryRenderer::from_bytes(bytes))
	}

	/// Stream everything `reader` yields as the body, closing it afterwards
	pub fn from_reader<R: Read + Send + 'static>(&mut self, reader: R) -> &mut Self {
		self.render(BinaryRenderer::from_reader(reader))
	}

	/// Send a file
	///
	/// Relative paths are resolved against the configured base directory. The
	/// gzip policy is consulted while the reply is still gzip eligible; once
	/// the flag is off, by the policy or [`disable_gzip`](Self::disable_gzip),
	/// it stays off.
	pub fn file(&mut self, path: impl AsRef<Path>) -> &mut Self {
		let path = self.ctx.settings().resolve_path(path);
		self.gzip = self.gzip && self.ctx.gzip_policy().is_gzip_worthy(&path);
		tracing::trace!(path = %path.display(), gzip = self.gzip, "file reply");
		self.render(BinaryRenderer::from_path(path))
	}

	/// Send a file as an attachment saved under `name`
	pub fn file_download(&mut self, path: impl AsRef<Path>, name: &str) -> &mut Self {
		self.header(
			CONTENT_DISPOSITION.as_str(),
			&format!("attachment; filename={name}"),
		);
		self.file(path)
	}

	/// Send a file for inline display, named `name`
	pub fn file_inline(&mut self, path: impl AsRef<Path>, name: &str) -> &mut Self {
		self.header(
			CONTENT_DISPOSITION.as_str(),
			&format!("inline; filename={name}"),
		);
		self.file(path)
	}

	/// Render the view for the current controller action with the default layout
	pub fn html(&mut self, data: Data) -> &mut Self {
		self.html_lf("", "", data)
	}

	/// Render the view for the current action inside `layout`
	pub fn html_l(&mut self, layout: &str, data: Data) -> &mut Self {
		self.html_lf(layout, "", data)
	}

	/// Render the view file `filename` instead of the action's own view
	pub fn html_f(&mut self, filename: &str, data: Data) -> &mut Self {
		self.html_lf("", filename, data)
	}

	/// Render the view file `filename` inside `layout`
	///
	/// The template itself is resolved when the reply is written, from the
	/// reply's [`ViewTarget`] and the view settings.
	pub fn html_lf(&mut self, layout: &str, filename: &str, data: Data) -> &mut Self {
		self.content_type(content_type::HTML);
		self.render(HTMLRenderer::new(layout, filename, data))
	}

	/// Attach a custom renderer, replacing any previous one
	pub fn render(&mut self, renderer: impl Renderer + 'static) -> &mut Self {
		self.renderer = Some(Box::new(renderer));
		self
	}

	// Redirect, error, done

	/// Redirect to `url` with 302 Found
	pub fn redirect(&mut self, url: impl Into<String>) -> &mut Self {
		self.redirect_with_status(url, 302)
	}

	/// Redirect to `url` with the given status
	pub fn redirect_with_status(&mut self, url: impl Into<String>, code: u16) -> &mut Self {
		self.status(code);
		self.redirect = Some(url.into());
		self
	}

	/// Attach an error for the error handler to take over
	///
	/// The attached renderer, if any, is left in place.
	pub fn error(&mut self, error: ReplyError) -> &mut Self {
		self.error = Some(error);
		self
	}

	/// Mark the response as already written by the handler
	///
	/// The writer then leaves the transport alone entirely.
	pub fn done(&mut self) -> &mut Self {
		self.done = true;
		self
	}

	// Headers and cookies

	/// Set a header, replacing existing values; an empty value removes it
	///
	/// `Content-Type` is routed to [`content_type`](Self::content_type), and an
	/// empty value clears it. Invalid names or values are dropped with a warning.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_http::Reply;
	///
	/// let mut reply = Reply::default();
	/// reply.header("Cache-Control", "no-store");
	/// reply.header("Cache-Control", "");
	///
	/// assert!(reply.headers().get("cache-control").is_none());
	/// ```
	pub fn header(&mut self, key: &str, value: &str) -> &mut Self {
		let Some(name) = parse_header_name(key) else {
			return self;
		};

		if name == CONTENT_TYPE {
			if value.is_empty() {
				self.content_type.clear();
				return self;
			}
			return self.content_type(value);
		}

		if value.is_empty() {
			self.headers.remove(&name);
			return self;
		}

		if let Some(value) = parse_header_value(&name, value) {
			self.headers.insert(name, value);
		}
		self
	}

	/// Add a header value without replacing existing ones
	pub fn header_append(&mut self, key: &str, value: &str) -> &mut Self {
		let Some(name) = parse_header_name(key) else {
			return self;
		};

		if name == CONTENT_TYPE {
			return self.content_type(value);
		}

		if let Some(value) = parse_header_value(&name, value) {
			self.headers.append(name, value);
		}
		self
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// Append a cookie to send with the response
	pub fn cookie(&mut self, cookie: Cookie<'static>) -> &mut Self {
		self.cookies.push(cookie);
		self
	}

	pub fn cookies(&self) -> &[Cookie<'static>] {
		&self.cookies
	}

	// Gzip

	/// Never gzip this response, whatever [`file`](Self::file) decides
	pub fn disable_gzip(&mut self) -> &mut Self {
		self.gzip = false;
		self
	}

	pub fn is_gzip(&self) -> bool {
		self.gzip
	}

	// Views

	/// Controller and action used to find the view for `html*` replies
	pub fn set_view_target(&mut self, target: ViewTarget) -> &mut Self {
		self.view_target = target;
		self
	}

	pub fn view_target(&self) -> &ViewTarget {
		&self.view_target
	}

	// Observers

	pub fn status_code(&self) -> u16 {
		self.status
	}

	pub fn renderer(&self) -> Option<&dyn Renderer> {
		self.renderer.as_deref()
	}

	pub fn renderer_mut(&mut self) -> Option<&mut (dyn Renderer + 'static)> {
		self.renderer.as_deref_mut()
	}

	pub fn is_redirect(&self) -> bool {
		self.redirect.is_some()
	}

	pub fn redirect_url(&self) -> Option<&str> {
		self.redirect.as_deref()
	}

	pub fn is_done(&self) -> bool {
		self.done
	}

	pub fn attached_error(&self) -> Option<&ReplyError> {
		self.error.as_ref()
	}

	pub(crate) fn take_error(&mut self) -> Option<ReplyError> {
		self.error.take()
	}

	/// Buffered body bytes
	///
	/// `None` before anything was buffered, after the body was written and
	/// for files served directly; [`body_state`](Self::body_state) tells which.
	pub fn body(&self) -> Option<&[u8]> {
		self.body.bytes()
	}

	/// Raw body access; bytes written here are sent instead of the renderer's output
	pub fn body_mut(&mut self) -> &mut Vec<u8> {
		self.body.buffer_mut()
	}

	pub fn body_state(&self) -> &BodyState {
		&self.body
	}

	pub(crate) fn set_body_state(&mut self, state: BodyState) {
		self.body = state;
	}
}

impl Default for Reply {
	fn default() -> Self {
		Self::new(ReplyContext::default())
	}
}

impl fmt::Debug for Reply {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Reply")
			.field("status", &self.status)
			.field("content_type", &self.content_type)
			.field("headers", &self.headers)
			.field("has_renderer", &self.renderer.is_some())
			.field("body", &self.body)
			.field("cookies", &self.cookies)
			.field("redirect", &self.redirect)
			.field("done", &self.done)
			.field("gzip", &self.gzip)
			.field("error", &self.error)
			.finish()
	}
}

fn parse_header_name(key: &str) -> Option<HeaderName> {
	match HeaderName::from_bytes(key.as_bytes()) {
		Ok(name) => Some(name),
		Err(e) => {
			tracing::warn!(header = key, error = %e, "invalid header name dropped");
			None
		}
	}
}

fn parse_header_value(name: &HeaderName, value: &str) -> Option<HeaderValue> {
	match HeaderValue::from_str(value) {
		Ok(value) => Some(value),
		Err(e) => {
			tracing::warn!(header = %name, error = %e, "invalid header value dropped");
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_conf::ReplySettings;
	use rstest::rstest;
	use serde_json::json;
	use std::path::PathBuf;
	use std::sync::{Arc, Mutex};
	use tempfile::TempDir;

	fn rendered(reply: &Reply) -> Vec<u8> {
		let mut out = Vec::new();
		reply.renderer().unwrap().render(&mut out).unwrap();
		out
	}

	#[rstest]
	fn test_new_reply_defaults() {
		let reply = Reply::default();

		assert_eq!(reply.status_code(), 200);
		assert!(reply.is_gzip());
		assert!(!reply.is_content_type_set());
		assert!(reply.renderer().is_none());
		assert!(!reply.is_redirect());
		assert!(!reply.is_done());
		assert!(reply.attached_error().is_none());
		assert!(matches!(reply.body_state(), BodyState::Unrendered));
	}

	#[rstest]
	#[case(Reply::ok, 200)]
	#[case(Reply::created, 201)]
	#[case(Reply::accepted, 202)]
	#[case(Reply::no_content, 204)]
	#[case(Reply::moved_permanently, 301)]
	#[case(Reply::found, 302)]
	#[case(Reply::temporary_redirect, 307)]
	#[case(Reply::bad_request, 400)]
	#[case(Reply::unauthorized, 401)]
	#[case(Reply::forbidden, 403)]
	#[case(Reply::not_found, 404)]
	#[case(Reply::method_not_allowed, 405)]
	#[case(Reply::not_acceptable, 406)]
	#[case(Reply::conflict, 409)]
	#[case(Reply::unsupported_media_type, 415)]
	#[case(Reply::internal_server_error, 500)]
	#[case(Reply::service_unavailable, 503)]
	fn test_status_shortcuts(#[case] shortcut: fn(&mut Reply) -> &mut Reply, #[case] code: u16) {
		// Arrange
		let mut reply = Reply::default();

		// Act
		shortcut(&mut reply);

		// Assert
		assert_eq!(reply.status_code(), code);
	}

	#[rstest]
	fn test_status_last_write_wins() {
		let mut reply = Reply::default();

		reply.not_found().status(418);

		assert_eq!(reply.status_code(), 418);
	}

	#[rstest]
	fn test_content_type_first_write_wins() {
		let mut reply = Reply::default();

		reply.content_type("Application/CSV").content_type("text/plain");

		assert_eq!(reply.content_type_value(), "application/csv");
		assert!(reply.is_content_type_set());
	}

	#[rstest]
	fn test_explicit_content_type_survives_json() {
		let mut reply = Reply::default();

		reply
			.content_type("application/vnd.api+json")
			.json(json!({"a": 1}));

		assert_eq!(reply.content_type_value(), "application/vnd.api+json");
		assert_eq!(rendered(&reply), br#"{"a":1}"#);
	}

	#[rstest]
	#[case("Content-Type")]
	#[case("content-type")]
	#[case("CONTENT-TYPE")]
	fn test_content_type_header_routes_to_content_type(#[case] key: &str) {
		// Arrange
		let mut reply = Reply::default();

		// Act
		reply.header(key, "Text/Markdown");

		// Assert
		assert_eq!(reply.content_type_value(), "text/markdown");
		assert!(reply.headers().get(CONTENT_TYPE).is_none());
	}

	#[rstest]
	fn test_empty_content_type_header_clears() {
		let mut reply = Reply::default();
		reply.json(json!(null));

		reply.header("Content-Type", "");
		reply.content_type("text/csv");

		assert_eq!(reply.content_type_value(), "text/csv");
	}

	#[rstest]
	fn test_header_append_content_type_is_first_write_wins() {
		let mut reply = Reply::default();

		reply.header_append("Content-Type", "text/html").header_append("Content-Type", "text/css");

		assert_eq!(reply.content_type_value(), "text/html");
	}

	#[rstest]
	fn test_header_set_replaces_and_append_accumulates() {
		let mut reply = Reply::default();

		reply
			.header("X-Tag", "one")
			.header("X-Tag", "two")
			.header_append("X-Tag", "three");

		let values: Vec<_> = reply.headers().get_all("x-tag").iter().collect();
		assert_eq!(values, ["two", "three"]);
	}

	#[rstest]
	fn test_empty_header_value_removes_header() {
		let mut reply = Reply::default();
		reply.header_append("X-Tag", "a").header_append("X-Tag", "b");

		reply.header("X-Tag", "");

		assert!(reply.headers().get("x-tag").is_none());
	}

	#[rstest]
	#[case("bad header", "v")]
	#[case("X-Ok", "line\nbreak")]
	fn test_invalid_headers_are_dropped(#[case] key: &str, #[case] value: &str) {
		let mut reply = Reply::default();

		reply.header(key, value).header_append(key, value);

		assert!(reply.headers().is_empty());
	}

	#[rstest]
	fn test_json_sets_content_type_and_renderer() {
		let mut reply = Reply::default();

		reply.json(json!({"ok": true}));

		assert_eq!(reply.content_type_value(), content_type::JSON);
		assert_eq!(rendered(&reply), br#"{"ok":true}"#);
	}

	#[rstest]
	fn test_json_secure_uses_configured_prefix() {
		// Arrange
		let mut settings = ReplySettings::default();
		settings.render.secure_json.prefix = "while(1);".to_string();
		let mut reply = Reply::new(ReplyContext::new(settings));

		// Act
		reply.json_secure(json!([1]));

		// Assert
		assert_eq!(reply.content_type_value(), content_type::JSON);
		assert_eq!(rendered(&reply), b"while(1);[1]");
	}

	#[rstest]
	fn test_jsonp_sets_javascript_content_type() {
		let mut reply = Reply::default();

		reply.jsonp(json!({"a": 1}), "cb");

		assert_eq!(reply.content_type_value(), content_type::JAVASCRIPT);
		assert_eq!(rendered(&reply), br#"cb({"a":1});"#);
	}

	#[rstest]
	fn test_xml_sets_content_type_and_header() {
		let mut reply = Reply::default();

		reply.xml(Data::new().with("name", "x"));

		assert_eq!(reply.content_type_value(), content_type::XML);
		let body = String::from_utf8(rendered(&reply)).unwrap();
		assert!(body.starts_with(reinhardt_renderers::XML_HEADER));
		assert!(body.ends_with("<Data><Name>x</Name></Data>"));
	}

	#[rstest]
	fn test_text_is_verbatim_without_values() {
		let mut reply = Reply::default();

		reply.text("50% {} off");

		assert_eq!(reply.content_type_value(), content_type::PLAIN_TEXT);
		assert_eq!(rendered(&reply), b"50% {} off");
	}

	#[rstest]
	fn test_binary_leaves_content_type_unset() {
		let mut reply = Reply::default();

		reply.binary(vec![0u8, 1, 2]);

		assert!(!reply.is_content_type_set());
		assert_eq!(rendered(&reply), [0u8, 1, 2]);
	}

	#[rstest]
	fn test_last_renderer_wins() {
		let mut reply = Reply::default();

		reply.text("first").binary(b"second".to_vec());

		assert_eq!(rendered(&reply), b"second");
	}

	#[rstest]
	fn test_file_resolves_against_base_dir() {
		// Arrange
		let dir = TempDir::new().unwrap();
		std::fs::write(dir.path().join("hello.txt"), b"hi").unwrap();
		let mut settings = ReplySettings::default();
		settings.base_dir = dir.path().to_path_buf();
		let mut reply = Reply::new(ReplyContext::new(settings));

		// Act
		reply.file("hello.txt");

		// Assert
		let renderer = reply.renderer().unwrap();
		assert_eq!(renderer.file_path(), Some(dir.path().join("hello.txt").as_path()));
		assert_eq!(rendered(&reply), b"hi");
	}

	#[rstest]
	fn test_file_gzip_follows_policy() {
		let seen = Arc::new(Mutex::new(Vec::<PathBuf>::new()));
		let recorder = Arc::clone(&seen);
		let ctx = ReplyContext::default().with_gzip_policy(move |path: &Path| {
			recorder.lock().unwrap().push(path.to_path_buf());
			path.extension().is_some_and(|ext| ext == "css")
		});
		let mut reply = Reply::new(ctx);

		reply.file("/srv/app.css");
		assert!(reply.is_gzip());
		reply.file("/srv/app.js");
		assert!(!reply.is_gzip());
		reply.file("/srv/theme.css");
		assert!(!reply.is_gzip());

		assert_eq!(
			*seen.lock().unwrap(),
			[PathBuf::from("/srv/app.css"), PathBuf::from("/srv/app.js")]
		);
	}

	#[rstest]
	fn test_disable_gzip_wins_over_file() {
		let ctx = ReplyContext::default().with_gzip_policy(|_: &Path| true);
		let mut reply = Reply::new(ctx);

		reply.file("/srv/app.css").disable_gzip();
		assert!(!reply.is_gzip());

		reply.file("/srv/other.css");
		assert!(!reply.is_gzip());
	}

	#[rstest]
	#[case(true, "attachment; filename=report.pdf")]
	#[case(false, "inline; filename=report.pdf")]
	fn test_file_disposition(#[case] download: bool, #[case] expected: &str) {
		let mut reply = Reply::default();

		if download {
			reply.file_download("/srv/r.pdf", "report.pdf");
		} else {
			reply.file_inline("/srv/r.pdf", "report.pdf");
		}

		assert_eq!(reply.headers()[CONTENT_DISPOSITION], expected);
		assert_eq!(
			reply.renderer().unwrap().file_path(),
			Some(Path::new("/srv/r.pdf"))
		);
	}

	#[rstest]
	fn test_html_variants_attach_unresolved_renderer() {
		let mut reply = Reply::default();

		reply.html_lf("docs.html", "faq.html", Data::new().with("q", 1));

		assert!(reply.is_html());
		let html = reply.renderer_mut().unwrap().as_html_mut().unwrap();
		assert_eq!(html.layout(), "docs.html");
		assert_eq!(html.filename(), "faq.html");
		assert!(!html.is_resolved());
	}

	#[rstest]
	#[case("", "")]
	#[case("admin.html", "")]
	#[case("", "page.html")]
	fn test_html_shortcuts(#[case] layout: &str, #[case] filename: &str) {
		let mut reply = Reply::default();

		match (layout.is_empty(), filename.is_empty()) {
			(true, true) => reply.html(Data::new()),
			(false, true) => reply.html_l(layout, Data::new()),
			_ => reply.html_f(filename, Data::new()),
		};

		let html = reply.renderer_mut().unwrap().as_html_mut().unwrap();
		assert_eq!(html.layout(), layout);
		assert_eq!(html.filename(), filename);
	}

	#[rstest]
	fn test_redirect_defaults_to_found() {
		let mut reply = Reply::default();

		reply.redirect("/login");

		assert!(reply.is_redirect());
		assert_eq!(reply.redirect_url(), Some("/login"));
		assert_eq!(reply.status_code(), 302);
	}

	#[rstest]
	fn test_redirect_with_status() {
		let mut reply = Reply::default();

		reply.redirect_with_status("/new", 301);

		assert_eq!(reply.status_code(), 301);
		assert_eq!(reply.redirect_url(), Some("/new"));
	}

	#[rstest]
	fn test_error_keeps_renderer() {
		let mut reply = Reply::default();

		reply.json(json!({})).error(ReplyError::not_found("missing"));

		assert_eq!(reply.attached_error().map(|e| e.code), Some(404));
		assert!(reply.renderer().is_some());
	}

	#[rstest]
	fn test_cookies_are_appended_in_order() {
		let mut reply = Reply::default();

		reply
			.cookie(Cookie::new("a", "1"))
			.cookie(Cookie::new("b", "2"));

		let names: Vec<_> = reply.cookies().iter().map(|c| c.name()).collect();
		assert_eq!(names, ["a", "b"]);
	}

	#[rstest]
	fn test_body_mut_buffers_bytes() {
		let mut reply = Reply::default();
		assert!(reply.body().is_none());

		reply.body_mut().extend_from_slice(b"raw");

		assert_eq!(reply.body(), Some(&b"raw"[..]));
		assert!(reply.body_state().is_buffered());
	}

	#[rstest]
	fn test_done_flag() {
		let mut reply = Reply::default();

		reply.text("ignored").done();

		assert!(reply.is_done());
	}

	#[rstest]
	fn test_view_target() {
		let mut reply = Reply::default();

		reply.set_view_target(ViewTarget::new("admin", "Users", "List"));

		assert_eq!(reply.view_target().controller, "Users");
	}
}
