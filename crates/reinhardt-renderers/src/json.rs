//! JSON family renderers
//!
//! All three write compact JSON without a trailing newline.

use reinhardt_conf::settings::DEFAULT_SECURE_JSON_PREFIX;
use reinhardt_utils::acquire_buffer;
use serde::Serialize;
use std::io::Write;

use crate::renderer::{RenderResult, Renderer};

/// Writes the payload as compact JSON
///
/// # Examples
///
/// ```
/// use reinhardt_renderers::{JSONRenderer, Renderer};
/// use serde_json::json;
///
/// let mut out = Vec::new();
/// JSONRenderer::new(json!({"message": "hello"})).render(&mut out).unwrap();
/// assert_eq!(out, br#"{"message":"hello"}"#);
/// ```
#[derive(Debug, Clone)]
pub struct JSONRenderer<T> {
	payload: T,
}

impl<T> JSONRenderer<T> {
	pub fn new(payload: T) -> Self {
		Self { payload }
	}

	pub fn payload(&self) -> &T {
		&self.payload
	}
}

impl<T: Serialize + Send + Sync> Renderer for JSONRenderer<T> {
	fn render(&self, w: &mut dyn Write) -> RenderResult<()> {
		serde_json::to_writer(w, &self.payload)?;
		Ok(())
	}
}

/// Writes the payload wrapped in a JavaScript callback
///
/// An empty callback writes the same bytes as [`JSONRenderer`]; otherwise
/// the output is `callback(json);`.
///
/// # Examples
///
/// ```
/// use reinhardt_renderers::{JSONPRenderer, Renderer};
/// use serde_json::json;
///
/// let mut out = Vec::new();
/// JSONPRenderer::new(json!({"a": 1}), "cb").render(&mut out).unwrap();
/// assert_eq!(out, br#"cb({"a":1});"#);
/// ```
#[derive(Debug, Clone)]
pub struct JSONPRenderer<T> {
	payload: T,
	callback: String,
}

impl<T> JSONPRenderer<T> {
	pub fn new(payload: T, callback: impl Into<String>) -> Self {
		Self {
			payload,
			callback: callback.into(),
		}
	}

	pub fn callback(&self) -> &str {
		&self.callback
	}
}

impl<T: Serialize + Send + Sync> Renderer for JSONPRenderer<T> {
	fn render(&self, w: &mut dyn Write) -> RenderResult<()> {
		let mut buf = acquire_buffer();
		serde_json::to_writer(&mut *buf, &self.payload)?;

		if self.callback.is_empty() {
			w.write_all(&buf)?;
			return Ok(());
		}

		w.write_all(self.callback.as_bytes())?;
		w.write_all(b"(")?;
		w.write_all(&buf)?;
		w.write_all(b");")?;
		Ok(())
	}
}

/// Writes a prefix followed by the payload as JSON
///
/// The prefix makes the body unparseable as a script, which stops other sites
/// from including the response with a `<script>` tag and reading the data.
///
/// # Examples
///
/// ```
/// use reinhardt_renderers::{Renderer, SecureJSONRenderer};
/// use serde_json::json;
///
/// let mut out = Vec::new();
/// SecureJSONRenderer::new(json!([1, 2]), "while(1);").render(&mut out).unwrap();
/// assert_eq!(out, b"while(1);[1,2]");
/// ```
#[derive(Debug, Clone)]
pub struct SecureJSONRenderer<T> {
	payload: T,
	prefix: String,
}

impl<T> SecureJSONRenderer<T> {
	pub fn new(payload: T, prefix: impl Into<String>) -> Self {
		Self {
			payload,
			prefix: prefix.into(),
		}
	}

	/// Renderer using the default `)]}',\n` prefix
	pub fn with_default_prefix(payload: T) -> Self {
		Self::new(payload, DEFAULT_SECURE_JSON_PREFIX)
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}
}

impl<T: Serialize + Send + Sync> Renderer for SecureJSONRenderer<T> {
	fn render(&self, w: &mut dyn Write) -> RenderResult<()> {
		w.write_all(self.prefix.as_bytes())?;
		serde_json::to_writer(w, &self.payload)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::renderer::RenderError;
	use rstest::rstest;
	use serde::ser::Error as _;
	use serde_json::json;
	use std::collections::BTreeMap;

	#[derive(Serialize)]
	struct User {
		id: u32,
		name: &'static str,
	}

	struct Unserializable;

	impl Serialize for Unserializable {
		fn serialize<S: serde::Serializer>(&self, _s: S) -> Result<S::Ok, S::Error> {
			Err(S::Error::custom("cannot encode"))
		}
	}

	fn render(renderer: &dyn Renderer) -> Vec<u8> {
		let mut out = Vec::new();
		renderer.render(&mut out).unwrap();
		out
	}

	#[rstest]
	fn test_json_is_compact_without_newline() {
		let renderer = JSONRenderer::new(User { id: 7, name: "ada" });

		assert_eq!(render(&renderer), br#"{"id":7,"name":"ada"}"#);
	}

	#[rstest]
	fn test_jsonp_wraps_in_callback() {
		// Arrange
		let renderer = JSONPRenderer::new(json!({"a": 1}), "cb");

		// Act
		let output = render(&renderer);

		// Assert
		assert_eq!(output, br#"cb({"a":1});"#);
	}

	#[rstest]
	#[case(json!({"a": 1}))]
	#[case(json!([1, "two", null]))]
	#[case(json!("plain"))]
	fn test_jsonp_without_callback_matches_json(#[case] payload: serde_json::Value) {
		let jsonp = render(&JSONPRenderer::new(payload.clone(), ""));
		let json = render(&JSONRenderer::new(payload.clone()));

		assert_eq!(jsonp, json);
		assert_eq!(jsonp, serde_json::to_vec(&payload).unwrap());
	}

	#[rstest]
	fn test_secure_json_writes_prefix_first() {
		let mut map = BTreeMap::new();
		map.insert("k", "v");

		let output = render(&SecureJSONRenderer::with_default_prefix(map));

		assert_eq!(output, b")]}',\n{\"k\":\"v\"}");
	}

	#[rstest]
	fn test_encoding_failure_is_reported() {
		let mut out = Vec::new();

		let result = JSONRenderer::new(Unserializable).render(&mut out);

		assert!(matches!(result, Err(RenderError::Json(_))));
	}

	#[rstest]
	fn test_jsonp_encoding_failure_writes_nothing() {
		let mut out = Vec::new();

		let result = JSONPRenderer::new(Unserializable, "cb").render(&mut out);

		assert!(matches!(result, Err(RenderError::Json(_))));
		assert!(out.is_empty());
	}
}
