//! Object pools for byte buffers and string builders
//!
//! Rendering allocates a scratch buffer for almost every response. The pools
//! here keep released buffers around so the next response can reuse their
//! capacity. Pools are shared by every request for the lifetime of the
//! process. A released value whose capacity grew past the pool's limit is
//! dropped instead of kept, so one oversized response does not pin its memory.
//!
//! A value taken from a pool comes back wrapped in [`Pooled`]; dropping the
//! wrapper resets the value and returns it to the pool. Because the wrapper owns
//! the value, nothing can keep using it after it has been released.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// A value that can be reset and handed out again
pub trait Reusable: Default + Send {
	/// Clear the contents, keeping any allocated capacity
	fn reset(&mut self);

	/// Allocated capacity in bytes
	fn capacity(&self) -> usize;
}

impl Reusable for Vec<u8> {
	fn reset(&mut self) {
		self.clear();
	}

	fn capacity(&self) -> usize {
		Vec::capacity(self)
	}
}

impl Reusable for String {
	fn reset(&mut self) {
		self.clear();
	}

	fn capacity(&self) -> usize {
		String::capacity(self)
	}
}

/// Largest capacity a pool keeps on release by default (64 KiB)
pub const DEFAULT_MAX_RETAINED: usize = 64 * 1024;

/// Thread-safe pool of reusable values
///
/// # Examples
///
/// ```
/// use reinhardt_utils::Pool;
///
/// let pool: Pool<Vec<u8>> = Pool::new();
/// {
///     let mut buf = pool.acquire();
///     buf.extend_from_slice(b"hello");
/// }
/// assert_eq!(pool.idle(), 1);
/// assert!(pool.acquire().is_empty());
/// ```
pub struct Pool<T: Reusable> {
	free: Mutex<Vec<T>>,
	max_retained: usize,
}

impl<T: Reusable> Pool<T> {
	/// Create an empty pool keeping values up to [`DEFAULT_MAX_RETAINED`] bytes
	pub fn new() -> Self {
		Self::with_max_retained(DEFAULT_MAX_RETAINED)
	}

	/// Create an empty pool that drops released values larger than `max_retained` bytes
	pub fn with_max_retained(max_retained: usize) -> Self {
		Self {
			free: Mutex::new(Vec::new()),
			max_retained,
		}
	}

	/// Take a reset value from the pool, allocating only when the pool is empty
	pub fn acquire(&self) -> Pooled<'_, T> {
		let value = self.free.lock().pop().unwrap_or_default();
		Pooled { value, pool: self }
	}

	/// Reset a value and put it back into the pool
	///
	/// Values whose capacity exceeds the pool's limit are dropped.
	pub fn release(&self, mut value: T) {
		let capacity = value.capacity();
		if capacity > self.max_retained {
			tracing::trace!(capacity, max = self.max_retained, "oversized value not pooled");
			return;
		}
		value.reset();
		self.free.lock().push(value);
	}

	/// Number of values currently waiting in the pool
	pub fn idle(&self) -> usize {
		self.free.lock().len()
	}
}

impl<T: Reusable> Default for Pool<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// A value on loan from a [`Pool`]
///
/// Returned to its pool (after [`Reusable::reset`]) when dropped.
pub struct Pooled<'a, T: Reusable> {
	value: T,
	pool: &'a Pool<T>,
}

impl<T: Reusable> Pooled<'_, T> {
	/// Keep the value and never return it to the pool
	pub fn detach(mut self) -> T {
		let value = std::mem::take(&mut self.value);
		std::mem::forget(self);
		value
	}
}

impl<T: Reusable> Deref for Pooled<'_, T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.value
	}
}

impl<T: Reusable> DerefMut for Pooled<'_, T> {
	fn deref_mut(&mut self) -> &mut T {
		&mut self.value
	}
}

impl<T: Reusable> Drop for Pooled<'_, T> {
	fn drop(&mut self) {
		let value = std::mem::take(&mut self.value);
		self.pool.release(value);
	}
}

impl<T: Reusable + fmt::Debug> fmt::Debug for Pooled<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&self.value, f)
	}
}

/// Byte buffer borrowed from the process-wide buffer pool
pub type PooledBuffer = Pooled<'static, Vec<u8>>;

/// String builder borrowed from the process-wide builder pool
pub type PooledBuilder = Pooled<'static, String>;

static BUFFER_POOL: Lazy<Pool<Vec<u8>>> = Lazy::new(Pool::new);
static BUILDER_POOL: Lazy<Pool<String>> = Lazy::new(Pool::new);

/// Acquire an empty byte buffer from the process-wide pool
///
/// # Examples
///
/// ```
/// use std::io::Write;
///
/// let mut buf = reinhardt_utils::acquire_buffer();
/// buf.write_all(b"payload").unwrap();
/// assert_eq!(&buf[..], b"payload");
/// ```
pub fn acquire_buffer() -> PooledBuffer {
	BUFFER_POOL.acquire()
}

/// Return a detached byte buffer to the process-wide pool
pub fn release_buffer(buf: Vec<u8>) {
	BUFFER_POOL.release(buf);
}

/// Acquire an empty string builder from the process-wide pool
pub fn acquire_builder() -> PooledBuilder {
	BUILDER_POOL.acquire()
}

/// Return a detached string builder to the process-wide pool
pub fn release_builder(builder: String) {
	BUILDER_POOL.release(builder);
}
