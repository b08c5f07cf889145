//! The render contract
//!
//! A renderer serializes one payload into a sink. Every built-in format and any
//! custom output implements [`Renderer`]; the reply holds at most one of them and
//! the transport invokes it once the handler has finished.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::html::HTMLRenderer;

/// Error produced while rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON encoding failed: {0}")]
	Json(serde_json::Error),

	#[error("XML encoding failed: {0}")]
	Xml(String),

	#[error("Template execution failed: {0}")]
	Template(#[from] tera::Error),

	#[error("template is nil")]
	MissingTemplate,

	#[error("View resolution failed: {0}")]
	View(String),

	#[error("'{}' is a directory", .0.display())]
	IsDirectory(PathBuf),

	#[error("Failed to open '{}': {source}", .path.display())]
	Open {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("Failed to stat '{}': {source}", .path.display())]
	Stat {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("reader has already been consumed")]
	ReaderConsumed,
}

impl From<serde_json::Error> for RenderError {
	fn from(error: serde_json::Error) -> Self {
		if error.is_io() {
			RenderError::Io(error.into())
		} else {
			RenderError::Json(error)
		}
	}
}

pub(crate) fn xml_error<E: std::fmt::Display>(error: E) -> RenderError {
	RenderError::Xml(error.to_string())
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Serializes a payload into a writable sink
///
/// Rendering is synchronous: `render` returns once everything has been written
/// or writing has failed.
///
/// # Examples
///
/// ```
/// use reinhardt_renderers::{Renderer, RenderResult};
/// use std::io::Write;
///
/// struct Ping;
///
/// impl Renderer for Ping {
///     fn render(&self, w: &mut dyn Write) -> RenderResult<()> {
///         w.write_all(b"pong")?;
///         Ok(())
///     }
/// }
///
/// let mut out = Vec::new();
/// Ping.render(&mut out).unwrap();
/// assert_eq!(out, b"pong");
/// ```
pub trait Renderer: Send + Sync {
	/// Write the payload into `w`
	fn render(&self, w: &mut dyn Write) -> RenderResult<()>;

	/// The file this renderer copies from, when it serves one
	///
	/// Lets a transport serve the file directly instead of calling `render`.
	fn file_path(&self) -> Option<&Path> {
		None
	}

	/// Access to the HTML renderer so its template can be resolved before rendering
	fn as_html_mut(&mut self) -> Option<&mut HTMLRenderer> {
		None
	}
}

/// Adapter that turns a function into a [`Renderer`]
///
/// # Examples
///
/// ```
/// use reinhardt_renderers::{RenderFn, Renderer};
///
/// let renderer = RenderFn::new(|w| {
///     w.write_all(b"custom")?;
///     Ok(())
/// });
///
/// let mut out = Vec::new();
/// renderer.render(&mut out).unwrap();
/// assert_eq!(out, b"custom");
/// ```
pub struct RenderFn<F>(F);

impl<F> RenderFn<F>
where
	F: Fn(&mut dyn Write) -> RenderResult<()> + Send + Sync,
{
	pub fn new(f: F) -> Self {
		Self(f)
	}
}

impl<F> Renderer for RenderFn<F>
where
	F: Fn(&mut dyn Write) -> RenderResult<()> + Send + Sync,
{
	fn render(&self, w: &mut dyn Write) -> RenderResult<()> {
		(self.0)(w)
	}
}
