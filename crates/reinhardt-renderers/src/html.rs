//! HTML rendering through view templates
//!
//! An [`HTMLRenderer`] is attached to a reply before its template is known.
//! The writer resolves the template through a [`ViewResolver`] using the
//! handler's [`ViewTarget`], the optional filename and layout overrides and the
//! configured [`ViewSettings`], then renders it.
//!
//! View paths follow `pages/<namespace>/<controller>/<action><ext>`, lower-cased
//! unless `view.case_sensitive` is set. When no layout is given the configured
//! default layout is used; an empty default disables layouts.

use reinhardt_conf::ViewSettings;
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use tera::{Context, Tera};

use crate::data::Data;
use crate::renderer::{RenderError, RenderResult, Renderer};

/// A compiled view template
pub trait ViewTemplate: Send + Sync {
	/// Render the template itself
	fn execute(&self, args: &Data, w: &mut dyn Write) -> RenderResult<()>;

	/// Render the template wrapped in the named layout
	fn execute_layout(&self, layout: &str, args: &Data, w: &mut dyn Write) -> RenderResult<()>;
}

/// Finds the compiled template for a view
pub trait ViewResolver: Send + Sync {
	fn resolve(
		&self,
		lookup: &ViewLookup,
		settings: &ViewSettings,
	) -> RenderResult<Arc<dyn ViewTemplate>>;
}

/// Controller and action a reply is rendered for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewTarget {
	/// Controller namespace or sub-package, possibly with `/` separators
	pub namespace: String,
	pub controller: String,
	pub action: String,
}

impl ViewTarget {
	pub fn new(
		namespace: impl Into<String>,
		controller: impl Into<String>,
		action: impl Into<String>,
	) -> Self {
		Self {
			namespace: namespace.into(),
			controller: controller.into(),
			action: action.into(),
		}
	}
}

/// Everything a [`ViewResolver`] needs to find one view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewLookup {
	pub namespace: String,
	pub controller: String,
	pub action: String,
	/// Overrides `<action><ext>` when non-empty
	pub filename: String,
	/// Effective layout; empty renders without one
	pub layout: String,
}

impl ViewLookup {
	/// Path of the page template relative to the views root
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_conf::ViewSettings;
	/// use reinhardt_renderers::ViewLookup;
	///
	/// let lookup = ViewLookup {
	///     namespace: "frontend".into(),
	///     controller: "App".into(),
	///     action: "Login".into(),
	///     ..Default::default()
	/// };
	///
	/// assert_eq!(
	///     lookup.template_path(&ViewSettings::default()),
	///     "pages/frontend/app/login.html"
	/// );
	/// ```
	pub fn template_path(&self, settings: &ViewSettings) -> String {
		let mut path = String::from("pages");
		for segment in [&self.namespace, &self.controller] {
			let segment = segment.trim_matches('/');
			if !segment.is_empty() {
				path.push('/');
				path.push_str(segment);
			}
		}

		path.push('/');
		if self.filename.is_empty() {
			path.push_str(&self.action);
			path.push_str(&settings.ext);
		} else {
			path.push_str(self.filename.trim_start_matches('/'));
		}

		if settings.case_sensitive {
			path
		} else {
			path.to_lowercase()
		}
	}
}

/// Renders view arguments through a template, optionally inside a layout
///
/// Rendering without a template fails with [`RenderError::MissingTemplate`].
///
/// # Examples
///
/// ```
/// use reinhardt_renderers::{Data, HTMLRenderer, Renderer, TeraTemplate};
/// use std::sync::Arc;
/// use tera::Tera;
///
/// let mut tera = Tera::default();
/// tera.add_raw_template("hello.html", "<p>Hello {{ name }}</p>").unwrap();
/// let template = TeraTemplate::new(Arc::new(tera), "hello.html");
///
/// let mut html = HTMLRenderer::new("", "", Data::new().with("name", "Ada"));
/// html.set_template(Arc::new(template));
///
/// let mut out = Vec::new();
/// html.render(&mut out).unwrap();
/// assert_eq!(out, b"<p>Hello Ada</p>");
/// ```
pub struct HTMLRenderer {
	template: Option<Arc<dyn ViewTemplate>>,
	layout: String,
	filename: String,
	view_args: Data,
}

impl HTMLRenderer {
	pub fn new(layout: impl Into<String>, filename: impl Into<String>, view_args: Data) -> Self {
		Self {
			template: None,
			layout: layout.into(),
			filename: filename.into(),
			view_args,
		}
	}

	pub fn layout(&self) -> &str {
		&self.layout
	}

	pub fn filename(&self) -> &str {
		&self.filename
	}

	pub fn view_args(&self) -> &Data {
		&self.view_args
	}

	pub fn is_resolved(&self) -> bool {
		self.template.is_some()
	}

	pub fn set_template(&mut self, template: Arc<dyn ViewTemplate>) {
		self.template = Some(template);
	}

	/// Build the lookup for `target`, applying the default layout when none was given
	pub fn lookup(&self, target: &ViewTarget, settings: &ViewSettings) -> ViewLookup {
		let layout = if self.layout.is_empty() {
			settings.default_layout.clone()
		} else {
			self.layout.clone()
		};

		ViewLookup {
			namespace: target.namespace.clone(),
			controller: target.controller.clone(),
			action: target.action.clone(),
			filename: self.filename.clone(),
			layout,
		}
	}

	/// Resolve and store the template, fixing the layout that will be used
	pub fn resolve(
		&mut self,
		resolver: &dyn ViewResolver,
		target: &ViewTarget,
		settings: &ViewSettings,
	) -> RenderResult<()> {
		let lookup = self.lookup(target, settings);
		let template = resolver.resolve(&lookup, settings)?;
		tracing::debug!(
			path = %lookup.template_path(settings),
			layout = %lookup.layout,
			"view resolved"
		);
		self.template = Some(template);
		self.layout = lookup.layout;
		Ok(())
	}
}

impl Renderer for HTMLRenderer {
	fn render(&self, w: &mut dyn Write) -> RenderResult<()> {
		let template = self.template.as_ref().ok_or(RenderError::MissingTemplate)?;

		if self.layout.is_empty() {
			template.execute(&self.view_args, w)
		} else {
			template.execute_layout(&self.layout, &self.view_args, w)
		}
	}

	fn as_html_mut(&mut self) -> Option<&mut HTMLRenderer> {
		Some(self)
	}
}

impl fmt::Debug for HTMLRenderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HTMLRenderer")
			.field("resolved", &self.is_resolved())
			.field("layout", &self.layout)
			.field("filename", &self.filename)
			.field("view_args", &self.view_args)
			.finish()
	}
}

/// [`ViewTemplate`] backed by a named template in a [`Tera`] instance
///
/// With a layout, the page is rendered first and handed to the layout as the
/// `body` variable (use `{{ body | safe }}` in the layout).
#[derive(Debug, Clone)]
pub struct TeraTemplate {
	tera: Arc<Tera>,
	name: String,
	layout_prefix: String,
}

impl TeraTemplate {
	pub fn new(tera: Arc<Tera>, name: impl Into<String>) -> Self {
		Self {
			tera,
			name: name.into(),
			layout_prefix: String::new(),
		}
	}

	/// Prefix prepended to layout names, e.g. `layouts/`
	pub fn with_layout_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.layout_prefix = prefix.into();
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

impl ViewTemplate for TeraTemplate {
	fn execute(&self, args: &Data, w: &mut dyn Write) -> RenderResult<()> {
		let context = Context::from_serialize(args)?;
		self.tera.render_to(&self.name, &context, w)?;
		Ok(())
	}

	fn execute_layout(&self, layout: &str, args: &Data, w: &mut dyn Write) -> RenderResult<()> {
		let mut context = Context::from_serialize(args)?;
		let body = self.tera.render(&self.name, &context)?;
		context.insert("body", &body);

		let layout = format!("{}{}", self.layout_prefix, layout);
		self.tera.render_to(&layout, &context, w)?;
		Ok(())
	}
}

/// [`ViewResolver`] over templates already loaded into a [`Tera`] instance
///
/// Pages are looked up by [`ViewLookup::template_path`]; layouts live under
/// `layouts/`.
#[derive(Debug, Clone)]
pub struct TeraViewResolver {
	tera: Arc<Tera>,
}

impl TeraViewResolver {
	pub const LAYOUT_PREFIX: &'static str = "layouts/";

	pub fn new(tera: Arc<Tera>) -> Self {
		Self { tera }
	}

	fn has_template(&self, name: &str) -> bool {
		self.tera.get_template_names().any(|n| n == name)
	}
}

impl ViewResolver for TeraViewResolver {
	fn resolve(
		&self,
		lookup: &ViewLookup,
		settings: &ViewSettings,
	) -> RenderResult<Arc<dyn ViewTemplate>> {
		let path = lookup.template_path(settings);
		if !self.has_template(&path) {
			return Err(RenderError::View(format!("view template '{path}' not found")));
		}

		if !lookup.layout.is_empty() {
			let layout = format!("{}{}", Self::LAYOUT_PREFIX, lookup.layout);
			if !self.has_template(&layout) {
				return Err(RenderError::View(format!("layout '{layout}' not found")));
			}
		}

		let template = TeraTemplate::new(Arc::clone(&self.tera), path)
			.with_layout_prefix(Self::LAYOUT_PREFIX);
		Ok(Arc::new(template))
	}
}
