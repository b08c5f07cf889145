//! Turning a finished reply into transport calls
//!
//! The order is fixed:
//!
//! 1. a reply marked done, or whose body already went out, is left alone and
//!    the transport is not touched;
//! 2. a redirect is handed to [`Transport::redirect`] along with the reply's
//!    headers and cookies, the renderer is ignored;
//! 3. an attached error is handed back to the caller for the error handler;
//! 4. otherwise status, headers, Content-Type, cookies and the gzip flag go to
//!    the transport, followed by the body.
//!
//! The body is the handler's buffered bytes if it wrote any, else a file the
//! transport serves itself, else the attached renderer's output.

use http::StatusCode;
use http::header::{CONTENT_TYPE, HeaderValue};
use reinhardt_renderers::{RenderError, RenderResult, ViewResolver};
use reinhardt_utils::{PooledBuffer, acquire_buffer};
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use crate::body::BodyState;
use crate::content_type;
use crate::error::ReplyError;
use crate::reply::Reply;
use crate::transport::Transport;

/// What [`ReplyWriter::write`] did with a reply
#[derive(Debug)]
pub enum WriteOutcome {
	/// The reply was marked done or already written; nothing was written
	Skipped,
	/// A redirect was issued
	Redirected,
	/// The reply carries an error for the error handler; nothing was written
	ErrorHandoff(ReplyError),
	/// Status, headers and body were written
	Written,
	/// Status and headers were written and the transport served the file itself
	Served,
}

/// Writes replies to a [`Transport`]
///
/// HTML replies need a [`ViewResolver`] to find their template; without one
/// they fail with [`RenderError::MissingTemplate`] before anything is written.
/// With [`buffered`](Self::buffered) the renderer's output is collected first,
/// so a failing render leaves the transport untouched. File bodies are always
/// streamed.
#[derive(Clone, Default)]
pub struct ReplyWriter {
	resolver: Option<Arc<dyn ViewResolver>>,
	buffered: bool,
}

impl ReplyWriter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_resolver(mut self, resolver: Arc<dyn ViewResolver>) -> Self {
		self.resolver = Some(resolver);
		self
	}

	pub fn buffered(mut self, buffered: bool) -> Self {
		self.buffered = buffered;
		self
	}

	/// Write `reply` to `transport`
	///
	/// Render and transport I/O failures are returned for the error handler;
	/// the reply itself is left with its body state unchanged in that case.
	pub fn write(
		&self,
		reply: &mut Reply,
		transport: &mut dyn Transport,
	) -> RenderResult<WriteOutcome> {
		if reply.is_done() {
			tracing::debug!("reply already written by handler, skipping");
			return Ok(WriteOutcome::Skipped);
		}
		if reply.body_state().is_written() {
			tracing::debug!("reply body already sent, skipping");
			return Ok(WriteOutcome::Skipped);
		}

		let status = status_code(reply.status_code());

		if let Some(location) = reply.redirect_url().map(str::to_string) {
			append_headers(reply, transport);
			for cookie in reply.cookies() {
				transport.add_cookie(cookie);
			}
			tracing::debug!(location = %location, status = status.as_u16(), "redirecting");
			transport.redirect(&location, status);
			return Ok(WriteOutcome::Redirected);
		}

		if let Some(error) = reply.take_error() {
			tracing::debug!(code = error.code, message = %error.message, "handing reply to error handler");
			return Ok(WriteOutcome::ErrorHandoff(error));
		}

		if !reply.body_state().is_buffered() {
			self.resolve_view(reply)?;
			guess_file_content_type(reply);
		}

		let prerendered = if self.buffered && !reply.body_state().is_buffered() {
			prerender(reply)?
		} else {
			None
		};

		write_head(reply, status, transport);

		if let Some(bytes) = reply.body() {
			transport.sink().write_all(bytes)?;
			finish(reply, transport)?;
			return Ok(WriteOutcome::Written);
		}

		if let Some(buf) = prerendered {
			transport.sink().write_all(&buf)?;
			finish(reply, transport)?;
			return Ok(WriteOutcome::Written);
		}

		let Some(renderer) = reply.renderer() else {
			finish(reply, transport)?;
			return Ok(WriteOutcome::Written);
		};

		if let Some(path) = renderer.file_path() {
			if transport.serve_file(path)? {
				tracing::trace!(path = %path.display(), "file served by transport");
				reply.set_body_state(BodyState::StaticallyServed);
				return Ok(WriteOutcome::Served);
			}
		}

		if let Err(e) = renderer.render(transport.sink()) {
			tracing::warn!(error = %e, "render failed");
			return Err(e);
		}
		finish(reply, transport)?;
		Ok(WriteOutcome::Written)
	}

	fn resolve_view(&self, reply: &mut Reply) -> RenderResult<()> {
		let ctx = reply.context().clone();
		let target = reply.view_target().clone();

		let Some(html) = reply.renderer_mut().and_then(|r| r.as_html_mut()) else {
			return Ok(());
		};
		if html.is_resolved() {
			return Ok(());
		}

		match &self.resolver {
			Some(resolver) => html.resolve(resolver.as_ref(), &target, &ctx.settings().view),
			None => Err(RenderError::MissingTemplate),
		}
	}
}

impl fmt::Debug for ReplyWriter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ReplyWriter")
			.field("has_resolver", &self.resolver.is_some())
			.field("buffered", &self.buffered)
			.finish()
	}
}

fn status_code(code: u16) -> StatusCode {
	StatusCode::from_u16(code).unwrap_or_else(|_| {
		tracing::warn!(code, "invalid status code, sending 500");
		StatusCode::INTERNAL_SERVER_ERROR
	})
}

fn guess_file_content_type(reply: &mut Reply) {
	if reply.is_content_type_set() {
		return;
	}
	let guessed = reply
		.renderer()
		.and_then(|r| r.file_path())
		.map(content_type::guess_for_path);
	if let Some(guessed) = guessed {
		reply.content_type(&guessed);
	}
}

fn prerender(reply: &Reply) -> RenderResult<Option<PooledBuffer>> {
	let Some(renderer) = reply.renderer() else {
		return Ok(None);
	};
	if renderer.file_path().is_some() {
		return Ok(None);
	}

	let mut buf = acquire_buffer();
	if let Err(e) = renderer.render(&mut *buf) {
		tracing::warn!(error = %e, "render failed");
		return Err(e);
	}
	Ok(Some(buf))
}

fn write_head(reply: &Reply, status: StatusCode, transport: &mut dyn Transport) {
	transport.set_status(status);

	append_headers(reply, transport);
	if reply.is_content_type_set() {
		match HeaderValue::from_str(reply.content_type_value()) {
			Ok(value) => {
				transport.headers_mut().insert(CONTENT_TYPE, value);
			}
			Err(e) => tracing::warn!(error = %e, "invalid content type dropped"),
		}
	}

	for cookie in reply.cookies() {
		transport.add_cookie(cookie);
	}
	transport.set_gzip(reply.is_gzip());
}

fn append_headers(reply: &Reply, transport: &mut dyn Transport) {
	let headers = transport.headers_mut();
	for (name, value) in reply.headers() {
		headers.append(name.clone(), value.clone());
	}
}

fn finish(reply: &mut Reply, transport: &mut dyn Transport) -> RenderResult<()> {
	transport.sink().flush()?;
	reply.set_body_state(BodyState::Flushed);
	Ok(())
}
