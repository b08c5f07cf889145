//! # Reinhardt Reply Utilities
//!
//! Small shared pieces used across the reply layer:
//!
//! - [`pool`]: process-wide pools of reusable byte buffers and string builders
//! - [`gzip`]: the gzip-worthiness heuristic applied to file responses

pub mod gzip;
pub mod pool;

pub use gzip::{ExtensionGzipPolicy, GzipPolicy};
pub use pool::{
	DEFAULT_MAX_RETAINED, Pool, Pooled, PooledBuffer, PooledBuilder, Reusable, acquire_buffer,
	acquire_builder, release_buffer, release_builder,
};
