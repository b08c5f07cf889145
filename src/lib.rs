//! # Reinhardt Reply
//!
//! Response assembly for Reinhardt: a fluent reply builder, a set of renderers
//! that turn payloads into bytes, and the writer that sends a finished reply
//! through the host server.
//!
//! ## Crates
//!
//! - [`conf`]: reply settings (secure JSON prefix, base directory, gzip and view options)
//! - [`utils`]: buffer and string builder pools, gzip-worthiness policy
//! - [`renderers`]: the [`Renderer`] contract and the built-in renderers
//! - [`http`]: [`Reply`], [`ReplyWriter`] and the [`Transport`] contract
//!
//! ## Quick Start
//!
//! ```rust
//! use reinhardt_reply::prelude::*;
//!
//! let ctx = ReplyContext::new(ReplySettings::default());
//! let mut reply = Reply::new(ctx);
//! reply.created().xml(Data::new().with("id", 7));
//!
//! let mut transport = MemoryTransport::new();
//! let outcome = ReplyWriter::new().write(&mut reply, &mut transport).unwrap();
//!
//! assert!(matches!(outcome, WriteOutcome::Written));
//! assert!(transport.body_str().ends_with("<Data><Id>7</Id></Data>"));
//! ```

/// Reply settings
pub mod conf {
	pub use reinhardt_conf::*;
}

/// Pools and gzip policy
pub mod utils {
	pub use reinhardt_utils::*;
}

/// Render contract and built-in renderers
pub mod renderers {
	pub use reinhardt_renderers::*;
}

/// Reply builder, writer and transport contract
pub mod http {
	pub use reinhardt_http::*;
}

pub use reinhardt_conf::{ReplySettings, SettingsError};
pub use reinhardt_http::{
	BodyState, Cookie, MemoryTransport, Reply, ReplyContext, ReplyError, ReplyWriter, Transport,
	WriteOutcome,
};
pub use reinhardt_renderers::{Data, RenderError, RenderFn, RenderResult, Renderer};

/// Everything a handler usually needs
pub mod prelude {
	pub use reinhardt_conf::ReplySettings;
	pub use reinhardt_http::{
		Cookie, MemoryTransport, Reply, ReplyContext, ReplyError, ReplyWriter, Transport,
		WriteOutcome, content_type,
	};
	pub use reinhardt_renderers::{
		Data, RenderError, RenderFn, RenderResult, Renderer, TeraViewResolver, ViewResolver,
		ViewTarget,
	};
}
