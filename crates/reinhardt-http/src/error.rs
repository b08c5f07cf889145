//! Error object a handler attaches to a reply

use serde_json::Value;
use std::error::Error as StdError;
use std::sync::Arc;

/// Shared, type-erased cause of a [`ReplyError`]
pub type Reason = Arc<dyn StdError + Send + Sync>;

/// Error attached to a reply for the error handler to take over
///
/// Attaching one does not detach the reply's renderer; the writer simply
/// hands the error off instead of rendering.
///
/// # Examples
///
/// ```
/// use reinhardt_http::ReplyError;
/// use serde_json::json;
///
/// let error = ReplyError::new(404, "Not Found").with_data(json!({"id": 7}));
///
/// assert_eq!(error.code, 404);
/// assert_eq!(error.to_string(), "404 Not Found");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
#[error("{code} {message}")]
pub struct ReplyError {
	pub code: u16,
	pub message: String,
	#[source]
	pub reason: Option<Reason>,
	pub data: Option<Value>,
}

impl ReplyError {
	pub fn new(code: u16, message: impl Into<String>) -> Self {
		Self {
			code,
			message: message.into(),
			reason: None,
			data: None,
		}
	}

	pub fn with_reason<E>(mut self, reason: E) -> Self
	where
		E: StdError + Send + Sync + 'static,
	{
		self.reason = Some(Arc::new(reason));
		self
	}

	pub fn with_data(mut self, data: impl Into<Value>) -> Self {
		self.data = Some(data.into());
		self
	}

	pub fn bad_request(message: impl Into<String>) -> Self {
		Self::new(400, message)
	}

	pub fn not_found(message: impl Into<String>) -> Self {
		Self::new(404, message)
	}

	pub fn internal(message: impl Into<String>) -> Self {
		Self::new(500, message)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_reason_is_exposed_as_source() {
		// Arrange
		let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such user");

		// Act
		let error = ReplyError::not_found("User not found").with_reason(io);

		// Assert
		let source = error.source().unwrap();
		assert_eq!(source.to_string(), "no such user");
	}

	#[rstest]
	fn test_without_reason_has_no_source() {
		let error = ReplyError::internal("boom");

		assert!(error.source().is_none());
		assert_eq!(error.code, 500);
	}

	#[rstest]
	fn test_data_is_carried() {
		let error = ReplyError::bad_request("Invalid input").with_data(json!({"field": "email"}));

		assert_eq!(error.data, Some(json!({"field": "email"})));
		assert_eq!(error.to_string(), "400 Invalid input");
	}
}
