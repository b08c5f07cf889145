//! # Reinhardt HTTP Replies
//!
//! The reply side of a request: [`Reply`] collects the handler's intent and
//! [`ReplyWriter`] writes it to the host's [`Transport`].
//!
//! ## Example
//!
//! ```rust
//! use reinhardt_http::{MemoryTransport, Reply, ReplyWriter, WriteOutcome};
//! use serde_json::json;
//!
//! let mut reply = Reply::default();
//! reply.ok().json(json!({"status": "up"}));
//!
//! let mut transport = MemoryTransport::new();
//! let outcome = ReplyWriter::new().write(&mut reply, &mut transport).unwrap();
//!
//! assert!(matches!(outcome, WriteOutcome::Written));
//! assert_eq!(transport.body_str(), r#"{"status":"up"}"#);
//! ```

pub mod body;
pub mod content_type;
pub mod context;
pub mod error;
pub mod reply;
pub mod transport;
pub mod writer;

pub use body::BodyState;
pub use context::ReplyContext;
pub use error::{Reason, ReplyError};
pub use reply::Reply;
pub use transport::{MemoryTransport, Transport};
pub use writer::{ReplyWriter, WriteOutcome};

pub use cookie::Cookie;
