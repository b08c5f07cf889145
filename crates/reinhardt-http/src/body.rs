//! Where a reply's body currently is

use reinhardt_utils::{PooledBuffer, acquire_buffer};

/// State of a reply body
///
/// Only [`BodyState::Buffered`] carries bytes. The other states say why there
/// are none: nothing has been rendered yet, the bytes already went to the
/// client, or a file was served directly by the transport.
#[derive(Debug, Default)]
pub enum BodyState {
	#[default]
	Unrendered,
	/// Raw body written by the handler, held until the reply is written
	Buffered(PooledBuffer),
	/// Body has been written to the client
	Flushed,
	/// Body was a file the transport served on its own
	StaticallyServed,
}

impl BodyState {
	/// The buffered bytes, if any
	pub fn bytes(&self) -> Option<&[u8]> {
		match self {
			BodyState::Buffered(buf) => Some(buf.as_slice()),
			_ => None,
		}
	}

	/// Switch to [`BodyState::Buffered`] if needed and return the buffer
	///
	/// An existing buffer is kept as is; any other state starts from an empty
	/// pooled buffer.
	pub fn buffer_mut(&mut self) -> &mut Vec<u8> {
		if !matches!(self, BodyState::Buffered(_)) {
			*self = BodyState::Buffered(acquire_buffer());
		}
		match self {
			BodyState::Buffered(buf) => &mut **buf,
			_ => unreachable!("body state was just set to Buffered"),
		}
	}

	pub fn is_buffered(&self) -> bool {
		matches!(self, BodyState::Buffered(_))
	}

	/// Whether the body has left the reply, one way or another
	pub fn is_written(&self) -> bool {
		matches!(self, BodyState::Flushed | BodyState::StaticallyServed)
	}
}
