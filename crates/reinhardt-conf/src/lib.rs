//! # Reinhardt Reply Settings
//!
//! Settings consumed by the reply layer: the secure JSON prefix, the base
//! directory relative file paths are resolved against, the gzip heuristics used
//! when serving files, and the view options handed to the view resolver.
//!
//! Settings are plain values. They are loaded once (from TOML/JSON files, from
//! environment variables, or built in code) and passed explicitly to whatever
//! needs them; nothing in this crate keeps process-wide state.
//!
//! ## Quick Start
//!
//! ```rust
//! use reinhardt_conf::ReplySettings;
//!
//! let settings = ReplySettings::from_toml_str(r#"
//! base_dir = "/srv/app"
//!
//! [render.secure_json]
//! prefix = "while(1);"
//! "#).unwrap();
//!
//! assert_eq!(settings.render.secure_json.prefix, "while(1);");
//! assert_eq!(settings.view.default_layout, "master.html");
//! ```

pub mod settings;

pub use settings::{
	GzipSettings, RenderSettings, ReplySettings, SecureJsonSettings, SettingsError, ViewSettings,
};
