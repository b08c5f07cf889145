//! # Reinhardt Renderers
//!
//! Renderers turn a reply's payload into bytes. Each one implements
//! [`Renderer`] and writes into any [`std::io::Write`] sink.
//!
//! ## Available Renderers
//!
//! - **TextRenderer**: plain text, optionally with `{}` placeholders
//! - **JSONRenderer**: compact JSON
//! - **JSONPRenderer**: JSON wrapped in a callback, `cb(json);`
//! - **SecureJSONRenderer**: JSON behind an anti-hijacking prefix
//! - **XMLRenderer**: XML declaration plus the encoded payload
//! - **BinaryRenderer**: byte streams and files
//! - **HTMLRenderer**: view templates with optional layouts
//! - **RenderFn**: any closure
//!
//! ## Example
//!
//! ```rust
//! use reinhardt_renderers::{JSONPRenderer, Renderer};
//! use serde_json::json;
//!
//! let renderer = JSONPRenderer::new(json!({"ok": true}), "handle");
//! let mut out = Vec::new();
//! renderer.render(&mut out).unwrap();
//! assert_eq!(out, br#"handle({"ok":true});"#);
//! ```

pub mod binary;
pub mod data;
pub mod html;
pub mod json;
pub mod renderer;
pub mod text;
pub mod xml;

pub use binary::BinaryRenderer;
pub use data::Data;
pub use html::{
	HTMLRenderer, TeraTemplate, TeraViewResolver, ViewLookup, ViewResolver, ViewTarget,
	ViewTemplate,
};
pub use json::{JSONPRenderer, JSONRenderer, SecureJSONRenderer};
pub use renderer::{RenderError, RenderFn, RenderResult, Renderer};
pub use text::TextRenderer;
pub use xml::{XML_HEADER, XMLRenderer};
