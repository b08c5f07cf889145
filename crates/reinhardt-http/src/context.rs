//! Per-application collaborators handed to every reply

use reinhardt_conf::ReplySettings;
use reinhardt_utils::{ExtensionGzipPolicy, GzipPolicy};
use std::fmt;
use std::sync::Arc;

/// Settings and gzip policy shared by the replies of one application
///
/// Cloning is cheap; every clone shares the same settings and policy.
///
/// # Examples
///
/// ```
/// use reinhardt_conf::ReplySettings;
/// use reinhardt_http::{Reply, ReplyContext};
///
/// let ctx = ReplyContext::new(ReplySettings::default());
/// let reply = Reply::new(ctx.clone());
///
/// assert_eq!(reply.status_code(), 200);
/// assert!(reply.is_gzip());
/// ```
#[derive(Clone)]
pub struct ReplyContext {
	settings: Arc<ReplySettings>,
	gzip_policy: Arc<dyn GzipPolicy>,
}

impl ReplyContext {
	/// Context using the extension based gzip policy built from `settings`
	///
	/// Accepts owned settings or an `Arc` already shared with other components.
	pub fn new(settings: impl Into<Arc<ReplySettings>>) -> Self {
		let settings = settings.into();
		let gzip_policy = Arc::new(ExtensionGzipPolicy::new(&settings.render.gzip));
		Self {
			settings,
			gzip_policy,
		}
	}

	/// Replace the gzip policy consulted when serving files
	pub fn with_gzip_policy(mut self, policy: impl GzipPolicy + 'static) -> Self {
		self.gzip_policy = Arc::new(policy);
		self
	}

	pub fn settings(&self) -> &ReplySettings {
		&self.settings
	}

	pub fn gzip_policy(&self) -> &dyn GzipPolicy {
		self.gzip_policy.as_ref()
	}
}

impl Default for ReplyContext {
	fn default() -> Self {
		Self::new(ReplySettings::default())
	}
}

impl fmt::Debug for ReplyContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ReplyContext")
			.field("settings", &self.settings)
			.finish_non_exhaustive()
	}
}
