//! The host side of a reply
//!
//! A [`Transport`] is whatever actually talks to the client. The reply layer
//! only sets status and headers, hands over cookies, asks for redirects and
//! writes body bytes through it; wire encoding is the host's business.

use cookie::Cookie;
use http::{HeaderMap, StatusCode};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Response writing surface provided by the host server
pub trait Transport {
	fn set_status(&mut self, status: StatusCode);

	fn headers_mut(&mut self) -> &mut HeaderMap;

	fn add_cookie(&mut self, cookie: &Cookie<'static>);

	/// Whether the host should gzip the body it is about to send
	fn set_gzip(&mut self, _eligible: bool) {}

	/// Send a redirect to `location` with `status`
	fn redirect(&mut self, location: &str, status: StatusCode);

	/// The sink body bytes go to
	fn sink(&mut self) -> &mut dyn Write;

	/// Serve a file directly, with the host's own content sniffing and ranges
	///
	/// Returns `Ok(false)` when the host cannot do that, in which case the file
	/// is copied through [`sink`](Self::sink) instead.
	fn serve_file(&mut self, _path: &Path) -> io::Result<bool> {
		Ok(false)
	}
}

/// In-memory [`Transport`] that records everything it is asked to do
///
/// # Examples
///
/// ```
/// use reinhardt_http::{MemoryTransport, Reply, ReplyWriter, WriteOutcome};
///
/// let mut reply = Reply::default();
/// reply.text("hello");
///
/// let mut transport = MemoryTransport::new();
/// let outcome = ReplyWriter::new().write(&mut reply, &mut transport).unwrap();
///
/// assert!(matches!(outcome, WriteOutcome::Written));
/// assert_eq!(transport.body, b"hello");
/// ```
#[derive(Debug, Default)]
pub struct MemoryTransport {
	pub status: Option<StatusCode>,
	pub headers: HeaderMap,
	/// Cookies in `Set-Cookie` form
	pub cookies: Vec<String>,
	pub gzip: Option<bool>,
	pub redirected_to: Option<(String, StatusCode)>,
	pub body: Vec<u8>,
	/// Files served directly; only recorded when `serves_files` is set
	pub served_files: Vec<PathBuf>,
	pub serves_files: bool,
	/// Number of calls of any kind
	pub calls: usize,
}

impl MemoryTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Transport that serves files itself instead of receiving their bytes
	pub fn serving_files() -> Self {
		Self {
			serves_files: true,
			..Self::default()
		}
	}

	pub fn body_str(&self) -> &str {
		std::str::from_utf8(&self.body).unwrap_or_default()
	}
}

impl Transport for MemoryTransport {
	fn set_status(&mut self, status: StatusCode) {
		self.calls += 1;
		self.status = Some(status);
	}

	fn headers_mut(&mut self) -> &mut HeaderMap {
		self.calls += 1;
		&mut self.headers
	}

	fn add_cookie(&mut self, cookie: &Cookie<'static>) {
		self.calls += 1;
		self.cookies.push(cookie.to_string());
	}

	fn set_gzip(&mut self, eligible: bool) {
		self.calls += 1;
		self.gzip = Some(eligible);
	}

	fn redirect(&mut self, location: &str, status: StatusCode) {
		self.calls += 1;
		self.status = Some(status);
		self.redirected_to = Some((location.to_string(), status));
	}

	fn sink(&mut self) -> &mut dyn Write {
		self.calls += 1;
		&mut self.body
	}

	fn serve_file(&mut self, path: &Path) -> io::Result<bool> {
		self.calls += 1;
		if !self.serves_files {
			return Ok(false);
		}
		self.served_files.push(path.to_path_buf());
		Ok(true)
	}
}
