//! Plain text renderer

use reinhardt_utils::acquire_builder;
use std::io::Write;

use crate::renderer::{RenderResult, Renderer};

/// Writes plain text, optionally expanding positional placeholders
///
/// Without values the format string is written verbatim, so a `{}` that came
/// from user input is never interpreted. With values every `{}` is replaced by
/// the next value in order; `{{` and `}}` produce literal braces.
///
/// # Examples
///
/// ```
/// use reinhardt_renderers::{Renderer, TextRenderer};
///
/// let mut out = Vec::new();
/// TextRenderer::with_values("Hello, {}! You have {} messages", ["Ada", "3"])
///     .render(&mut out)
///     .unwrap();
/// assert_eq!(out, b"Hello, Ada! You have 3 messages");
/// ```
#[derive(Debug, Clone)]
pub struct TextRenderer {
	format: String,
	values: Vec<String>,
}

impl TextRenderer {
	/// Text written exactly as given
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			format: text.into(),
			values: Vec::new(),
		}
	}

	/// Text with positional `{}` placeholders
	pub fn with_values<I, V>(format: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: ToString,
	{
		Self {
			format: format.into(),
			values: values.into_iter().map(|v| v.to_string()).collect(),
		}
	}
}

impl Renderer for TextRenderer {
	fn render(&self, w: &mut dyn Write) -> RenderResult<()> {
		if self.values.is_empty() {
			w.write_all(self.format.as_bytes())?;
			return Ok(());
		}

		let mut out = acquire_builder();
		expand(&self.format, &self.values, &mut out);
		w.write_all(out.as_bytes())?;
		Ok(())
	}
}

fn expand(format: &str, values: &[String], out: &mut String) {
	let mut values = values.iter();
	let mut chars = format.chars().peekable();

	while let Some(c) = chars.next() {
		match (c, chars.peek()) {
			('{', Some('{')) => {
				chars.next();
				out.push('{');
			}
			('}', Some('}')) => {
				chars.next();
				out.push('}');
			}
			('{', Some('}')) => {
				chars.next();
				match values.next() {
					Some(value) => out.push_str(value),
					None => out.push_str("{}"),
				}
			}
			_ => out.push(c),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn render(renderer: &TextRenderer) -> String {
		let mut out = Vec::new();
		renderer.render(&mut out).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[rstest]
	fn test_text_without_values_is_verbatim() {
		let renderer = TextRenderer::new("100% {} done {{not}} formatted");

		assert_eq!(render(&renderer), "100% {} done {{not}} formatted");
	}

	#[rstest]
	#[case("{} + {} = {}", vec!["1", "2", "3"], "1 + 2 = 3")]
	#[case("{{literal}} {}", vec!["x"], "{literal} x")]
	#[case("{} and {}", vec!["only"], "only and {}")]
	#[case("{}", vec!["a", "surplus"], "a")]
	#[case("no placeholders", vec!["ignored"], "no placeholders")]
	#[case("héllo {}", vec!["wörld"], "héllo wörld")]
	fn test_placeholder_expansion(
		#[case] format: &str,
		#[case] values: Vec<&str>,
		#[case] expected: &str,
	) {
		// Arrange
		let renderer = TextRenderer::with_values(format, values);

		// Act
		let output = render(&renderer);

		// Assert
		assert_eq!(output, expected);
	}

	#[rstest]
	fn test_values_accept_any_display() {
		let renderer = TextRenderer::with_values("{} items at {}", [3.to_string(), 1.5.to_string()]);

		assert_eq!(render(&renderer), "3 items at 1.5");
	}
}
