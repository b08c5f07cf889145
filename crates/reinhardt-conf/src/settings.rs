//! Reply settings
//!
//! Every field has a default, so a settings file only needs to name what it
//! changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default prefix written before secure JSON bodies.
pub const DEFAULT_SECURE_JSON_PREFIX: &str = ")]}',\n";

/// Default layout used when a handler does not name one.
pub const DEFAULT_LAYOUT: &str = "master.html";

/// Settings for the reply layer
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplySettings {
	/// Application base directory; relative file paths are joined onto it
	#[serde(default = "default_base_dir")]
	pub base_dir: PathBuf,

	/// Rendering options
	#[serde(default)]
	pub render: RenderSettings,

	/// View lookup options
	#[serde(default)]
	pub view: ViewSettings,
}

impl Default for ReplySettings {
	fn default() -> Self {
		Self {
			base_dir: default_base_dir(),
			render: RenderSettings::default(),
			view: ViewSettings::default(),
		}
	}
}

/// Rendering options
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSettings {
	#[serde(default)]
	pub secure_json: SecureJsonSettings,

	#[serde(default)]
	pub gzip: GzipSettings,
}

/// Secure JSON options
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecureJsonSettings {
	/// Bytes written before the JSON body
	#[serde(default = "default_secure_json_prefix")]
	pub prefix: String,
}

impl Default for SecureJsonSettings {
	fn default() -> Self {
		Self {
			prefix: default_secure_json_prefix(),
		}
	}
}

/// Gzip eligibility heuristics for file responses
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GzipSettings {
	/// Master switch; when false no file is ever gzip-worthy
	#[serde(default = "default_true")]
	pub enabled: bool,

	/// Files smaller than this many bytes are not worth compressing
	#[serde(default = "default_gzip_min_size")]
	pub min_size: u64,

	/// File extensions (without the dot) worth compressing
	#[serde(default = "default_gzip_extensions")]
	pub extensions: Vec<String>,
}

impl Default for GzipSettings {
	fn default() -> Self {
		Self {
			enabled: true,
			min_size: default_gzip_min_size(),
			extensions: default_gzip_extensions(),
		}
	}
}

/// Options handed to the view resolver
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettings {
	/// View file extension, including the leading dot
	#[serde(default = "default_view_ext")]
	pub ext: String,

	/// Whether view paths keep the controller/action case
	#[serde(default)]
	pub case_sensitive: bool,

	/// Layout used when the handler does not name one; empty disables layouts
	#[serde(default = "default_layout")]
	pub default_layout: String,
}

impl Default for ViewSettings {
	fn default() -> Self {
		Self {
			ext: default_view_ext(),
			case_sensitive: false,
			default_layout: default_layout(),
		}
	}
}

fn default_base_dir() -> PathBuf {
	PathBuf::from(".")
}

fn default_secure_json_prefix() -> String {
	DEFAULT_SECURE_JSON_PREFIX.to_string()
}

fn default_true() -> bool {
	true
}

fn default_gzip_min_size() -> u64 {
	1024
}

fn default_gzip_extensions() -> Vec<String> {
	[
		"css", "js", "json", "html", "htm", "xml", "txt", "csv", "svg", "ttf", "otf", "eot", "md",
	]
	.iter()
	.map(|ext| ext.to_string())
	.collect()
}

fn default_view_ext() -> String {
	".html".to_string()
}

fn default_layout() -> String {
	DEFAULT_LAYOUT.to_string()
}

impl ReplySettings {
	/// Parse settings from a TOML document
	///
	/// The result is validated and normalised before it is returned.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_conf::ReplySettings;
	///
	/// let settings = ReplySettings::from_toml_str("[view]\next = \"tmpl\"").unwrap();
	/// assert_eq!(settings.view.ext, ".tmpl");
	/// ```
	pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
		let settings: ReplySettings = toml::from_str(contents)
			.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?;
		settings.validated()
	}

	/// Load settings from a `.toml` or `.json` file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml_str(&contents),
			Some("json") => {
				let settings: ReplySettings = serde_json::from_str(&contents)
					.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e)))?;
				settings.validated()
			}
			_ => Err(SettingsError::UnsupportedFormat(
				"Supported formats: .toml, .json".to_string(),
			)),
		}
	}

	/// Load settings from `REINHARDT_*` environment variables on top of the defaults
	///
	/// Recognised variables: `REINHARDT_BASE_DIR`, `REINHARDT_SECURE_JSON_PREFIX`,
	/// `REINHARDT_GZIP_ENABLED`, `REINHARDT_GZIP_MIN_SIZE`, `REINHARDT_VIEW_EXT`,
	/// `REINHARDT_VIEW_CASE_SENSITIVE` and `REINHARDT_VIEW_DEFAULT_LAYOUT`.
	pub fn from_env() -> Result<Self, SettingsError> {
		let mut settings = Self::default();
		settings.apply_env(|key| std::env::var(key).ok())?;
		settings.validated()
	}

	/// Apply overrides from a variable lookup function
	///
	/// [`ReplySettings::from_env`] passes `std::env::var`; tests pass a map.
	pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), SettingsError>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(dir) = lookup("REINHARDT_BASE_DIR") {
			self.base_dir = PathBuf::from(dir);
		}

		if let Some(prefix) = lookup("REINHARDT_SECURE_JSON_PREFIX") {
			self.render.secure_json.prefix = prefix;
		}

		if let Some(enabled) = lookup("REINHARDT_GZIP_ENABLED") {
			self.render.gzip.enabled = parse_bool("REINHARDT_GZIP_ENABLED", &enabled)?;
		}

		if let Some(size) = lookup("REINHARDT_GZIP_MIN_SIZE") {
			self.render.gzip.min_size = size.trim().parse().map_err(|e| {
				SettingsError::ParseError(format!("REINHARDT_GZIP_MIN_SIZE: {}", e))
			})?;
		}

		if let Some(ext) = lookup("REINHARDT_VIEW_EXT") {
			self.view.ext = ext;
		}

		if let Some(flag) = lookup("REINHARDT_VIEW_CASE_SENSITIVE") {
			self.view.case_sensitive = parse_bool("REINHARDT_VIEW_CASE_SENSITIVE", &flag)?;
		}

		if let Some(layout) = lookup("REINHARDT_VIEW_DEFAULT_LAYOUT") {
			self.view.default_layout = layout;
		}

		Ok(())
	}

	/// Validate the settings
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.view.ext.trim_start_matches('.').is_empty() {
			return Err(SettingsError::ValidationError(
				"view.ext must not be empty".to_string(),
			));
		}

		Ok(())
	}

	/// Resolve a possibly relative path against `base_dir`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_conf::ReplySettings;
	/// use std::path::PathBuf;
	///
	/// let mut settings = ReplySettings::default();
	/// settings.base_dir = PathBuf::from("/srv/app");
	///
	/// assert_eq!(settings.resolve_path("static/a.css"), PathBuf::from("/srv/app/static/a.css"));
	/// assert_eq!(settings.resolve_path("/etc/hosts"), PathBuf::from("/etc/hosts"));
	/// ```
	pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
		let path = path.as_ref();
		if path.is_absolute() {
			path.to_path_buf()
		} else {
			self.base_dir.join(path)
		}
	}

	fn validated(mut self) -> Result<Self, SettingsError> {
		self.validate()?;

		if !self.view.ext.starts_with('.') {
			self.view.ext = format!(".{}", self.view.ext);
		}
		for ext in &mut self.render.gzip.extensions {
			*ext = ext.trim_start_matches('.').to_ascii_lowercase();
		}

		tracing::debug!(
			base_dir = %self.base_dir.display(),
			view_ext = %self.view.ext,
			gzip = self.render.gzip.enabled,
			"reply settings loaded"
		);
		Ok(self)
	}
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		other => Err(SettingsError::ParseError(format!(
			"{}: expected a boolean, got '{}'",
			key, other
		))),
	}
}

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
}
