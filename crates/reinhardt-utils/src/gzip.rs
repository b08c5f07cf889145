//! Gzip-worthiness heuristics
//!
//! The reply layer never compresses anything itself. When a handler serves a
//! file it asks a [`GzipPolicy`] whether compression is worth it and records the
//! answer on the reply; the transport acts on that flag.

use reinhardt_conf::GzipSettings;
use std::collections::HashSet;
use std::path::Path;

/// Decides whether a file is worth gzip-compressing
pub trait GzipPolicy: Send + Sync {
	fn is_gzip_worthy(&self, path: &Path) -> bool;
}

impl<F> GzipPolicy for F
where
	F: Fn(&Path) -> bool + Send + Sync,
{
	fn is_gzip_worthy(&self, path: &Path) -> bool {
		self(path)
	}
}

/// Extension and size based policy
///
/// A file is gzip-worthy when compression is enabled, its extension is in the
/// configured list (case-insensitive) and it is at least `min_size` bytes long.
/// Files whose metadata cannot be read are never gzip-worthy.
///
/// # Examples
///
/// ```
/// use reinhardt_conf::GzipSettings;
/// use reinhardt_utils::{ExtensionGzipPolicy, GzipPolicy};
/// use std::path::Path;
///
/// let policy = ExtensionGzipPolicy::new(&GzipSettings::default());
/// assert!(!policy.is_gzip_worthy(Path::new("/does/not/exist.css")));
/// assert!(!policy.is_gzip_worthy(Path::new("photo.jpg")));
/// ```
#[derive(Debug, Clone)]
pub struct ExtensionGzipPolicy {
	enabled: bool,
	min_size: u64,
	extensions: HashSet<String>,
}

impl ExtensionGzipPolicy {
	pub fn new(settings: &GzipSettings) -> Self {
		Self {
			enabled: settings.enabled,
			min_size: settings.min_size,
			extensions: settings
				.extensions
				.iter()
				.map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
				.collect(),
		}
	}

	fn has_worthy_extension(&self, path: &Path) -> bool {
		path.extension()
			.and_then(|ext| ext.to_str())
			.map(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
			.unwrap_or(false)
	}
}

impl Default for ExtensionGzipPolicy {
	fn default() -> Self {
		Self::new(&GzipSettings::default())
	}
}

impl GzipPolicy for ExtensionGzipPolicy {
	fn is_gzip_worthy(&self, path: &Path) -> bool {
		if !self.enabled || !self.has_worthy_extension(path) {
			return false;
		}

		match std::fs::metadata(path) {
			Ok(meta) => meta.is_file() && meta.len() >= self.min_size,
			Err(e) => {
				tracing::trace!(path = %path.display(), error = %e, "gzip check skipped");
				false
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tempfile::TempDir;

	fn settings(min_size: u64) -> GzipSettings {
		let mut settings = GzipSettings::default();
		settings.min_size = min_size;
		settings
	}

	#[rstest]
	#[case("app.js", true)]
	#[case("STYLE.CSS", true)]
	#[case("page.html", true)]
	#[case("image.png", false)]
	#[case("archive.gz", false)]
	#[case("Makefile", false)]
	fn test_extension_decides(#[case] name: &str, #[case] expected: bool) {
		// Arrange
		let dir = TempDir::new().unwrap();
		let path = dir.path().join(name);
		std::fs::write(&path, vec![b'a'; 64]).unwrap();
		let policy = ExtensionGzipPolicy::new(&settings(0));

		// Act
		let worthy = policy.is_gzip_worthy(&path);

		// Assert
		assert_eq!(worthy, expected);
	}

	#[rstest]
	fn test_small_files_are_not_worthy() {
		let dir = TempDir::new().unwrap();
		let small = dir.path().join("small.css");
		let large = dir.path().join("large.css");
		std::fs::write(&small, vec![b'a'; 100]).unwrap();
		std::fs::write(&large, vec![b'a'; 4096]).unwrap();

		let policy = ExtensionGzipPolicy::new(&settings(1024));

		assert!(!policy.is_gzip_worthy(&small));
		assert!(policy.is_gzip_worthy(&large));
	}

	#[rstest]
	fn test_disabled_policy_is_never_worthy() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("big.js");
		std::fs::write(&path, vec![b'a'; 4096]).unwrap();
		let mut gzip = settings(0);
		gzip.enabled = false;

		let policy = ExtensionGzipPolicy::new(&gzip);

		assert!(!policy.is_gzip_worthy(&path));
	}

	#[rstest]
	fn test_directories_and_missing_files_are_not_worthy() {
		let dir = TempDir::new().unwrap();
		let folder = dir.path().join("assets.css");
		std::fs::create_dir(&folder).unwrap();
		let policy = ExtensionGzipPolicy::new(&settings(0));

		assert!(!policy.is_gzip_worthy(&folder));
		assert!(!policy.is_gzip_worthy(&dir.path().join("missing.css")));
	}

	#[rstest]
	fn test_closure_policy() {
		let policy = |path: &Path| path.ends_with("yes.bin");

		assert!(policy.is_gzip_worthy(Path::new("/a/yes.bin")));
		assert!(!policy.is_gzip_worthy(Path::new("/a/no.bin")));
	}
}
