//! Binary renderer for byte streams and files
//!
//! Both sources are closed at the end of the render whatever the outcome.
//! Closing happens by dropping the handle, so a failure while closing is never
//! reported and cannot hide the result of the copy.

use parking_lot::Mutex;
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};

use crate::renderer::{RenderError, RenderResult, Renderer};

enum Source {
	Reader(Mutex<Option<Box<dyn Read + Send>>>),
	Path(PathBuf),
}

/// Copies a byte stream or a file into the sink
///
/// A reader source can be rendered once; later renders fail with
/// [`RenderError::ReaderConsumed`]. A path source opens the file on every
/// render and refuses directories.
///
/// # Examples
///
/// ```
/// use reinhardt_renderers::{BinaryRenderer, Renderer};
///
/// let renderer = BinaryRenderer::from_bytes(b"\x89PNG".to_vec());
///
/// let mut out = Vec::new();
/// renderer.render(&mut out).unwrap();
/// assert_eq!(out, b"\x89PNG");
/// ```
pub struct BinaryRenderer {
	source: Source,
}

impl BinaryRenderer {
	/// Stream everything `reader` yields, then drop it
	pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
		Self {
			source: Source::Reader(Mutex::new(Some(Box::new(reader)))),
		}
	}

	/// Serve an in-memory byte slice
	pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
		Self::from_reader(Cursor::new(bytes.into()))
	}

	/// Serve the file at `path`
	pub fn from_path(path: impl Into<PathBuf>) -> Self {
		Self {
			source: Source::Path(path.into()),
		}
	}

	fn render_reader(
		slot: &Mutex<Option<Box<dyn Read + Send>>>,
		w: &mut dyn Write,
	) -> RenderResult<()> {
		let mut reader = slot.lock().take().ok_or(RenderError::ReaderConsumed)?;
		let copied = io::copy(&mut reader, w);
		drop(reader);
		tracing::trace!("reader closed after copy");
		copied?;
		Ok(())
	}

	fn render_path(path: &Path, w: &mut dyn Write) -> RenderResult<()> {
		let mut file = File::open(path).map_err(|source| RenderError::Open {
			path: path.to_path_buf(),
			source,
		})?;

		let meta = file.metadata().map_err(|source| RenderError::Stat {
			path: path.to_path_buf(),
			source,
		})?;
		if meta.is_dir() {
			return Err(RenderError::IsDirectory(path.to_path_buf()));
		}

		tracing::trace!(path = %path.display(), size = meta.len(), "serving file");
		io::copy(&mut file, w)?;
		Ok(())
	}
}

impl Renderer for BinaryRenderer {
	fn render(&self, w: &mut dyn Write) -> RenderResult<()> {
		match &self.source {
			Source::Reader(slot) => Self::render_reader(slot, w),
			Source::Path(path) => Self::render_path(path, w),
		}
	}

	fn file_path(&self) -> Option<&Path> {
		match &self.source {
			Source::Path(path) => Some(path.as_path()),
			Source::Reader(_) => None,
		}
	}
}

impl fmt::Debug for BinaryRenderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.source {
			Source::Reader(_) => f.debug_struct("BinaryRenderer").field("source", &"reader").finish(),
			Source::Path(path) => f.debug_struct("BinaryRenderer").field("path", path).finish(),
		}
	}
}
