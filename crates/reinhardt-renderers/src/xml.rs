//! XML renderer

use quick_xml::Writer;
use reinhardt_utils::{acquire_buffer, acquire_builder};
use serde::Serialize;
use std::any::Any;
use std::io::Write;

use crate::data::Data;
use crate::renderer::{RenderResult, Renderer, xml_error};

/// Declaration written before every XML body
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Root element used for [`Data`] payloads
pub const DATA_ROOT: &str = "Data";

/// Writes the XML declaration followed by the payload encoded as XML
///
/// [`Data`] payloads go through [`Data::write_xml`] under a `<Data>` root.
/// Any other payload is encoded with `quick-xml`'s serde support; structs take
/// their type name as the root element unless [`XMLRenderer::with_root`] names
/// one. The body is encoded before anything is written, so an encoding error
/// leaves the sink untouched.
///
/// # Examples
///
/// ```
/// use reinhardt_renderers::{Data, Renderer, XMLRenderer, XML_HEADER};
///
/// let mut out = Vec::new();
/// XMLRenderer::new(Data::new().with("status", "ok")).render(&mut out).unwrap();
///
/// let xml = String::from_utf8(out).unwrap();
/// assert!(xml.starts_with(XML_HEADER));
/// assert!(xml.ends_with("<Data><Status>ok</Status></Data>"));
/// ```
#[derive(Debug, Clone)]
pub struct XMLRenderer<T> {
	payload: T,
	root: Option<String>,
}

impl<T> XMLRenderer<T> {
	pub fn new(payload: T) -> Self {
		Self {
			payload,
			root: None,
		}
	}

	/// Encode the payload inside an explicitly named root element
	pub fn with_root(payload: T, root: impl Into<String>) -> Self {
		Self {
			payload,
			root: Some(root.into()),
		}
	}
}

impl<T> XMLRenderer<T>
where
	T: Serialize + 'static,
{
	fn encode(&self) -> RenderResult<Vec<u8>> {
		if let Some(data) = (&self.payload as &dyn Any).downcast_ref::<Data>() {
			let mut buf = acquire_buffer();
			let mut writer = Writer::new(&mut *buf);
			data.write_xml(&mut writer, self.root.as_deref().unwrap_or(DATA_ROOT))?;
			return Ok(buf.to_vec());
		}

		let mut builder = acquire_builder();
		match &self.root {
			Some(root) => {
				quick_xml::se::to_writer_with_root(&mut *builder, root, &self.payload)
					.map_err(xml_error)?;
			}
			None => {
				quick_xml::se::to_writer(&mut *builder, &self.payload).map_err(xml_error)?;
			}
		}
		Ok(builder.as_bytes().to_vec())
	}
}

impl<T> Renderer for XMLRenderer<T>
where
	T: Serialize + Send + Sync + 'static,
{
	fn render(&self, w: &mut dyn Write) -> RenderResult<()> {
		let body = self.encode()?;
		w.write_all(XML_HEADER.as_bytes())?;
		w.write_all(&body)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::renderer::RenderError;
	use rstest::rstest;
	use serde_json::json;

	#[derive(Serialize)]
	struct Item {
		name: String,
		qty: u32,
	}

	fn render<T: Serialize + Send + Sync + 'static>(renderer: XMLRenderer<T>) -> String {
		let mut out = Vec::new();
		renderer.render(&mut out).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[rstest]
	fn test_struct_payload_uses_type_name_as_root() {
		// Arrange
		let item = Item {
			name: "pen".to_string(),
			qty: 2,
		};

		// Act
		let xml = render(XMLRenderer::new(item));

		// Assert
		assert_eq!(
			xml,
			format!("{XML_HEADER}<Item><name>pen</name><qty>2</qty></Item>")
		);
	}

	#[rstest]
	fn test_data_payload_goes_through_mapper() {
		let data = Data::new().with("b", 2).with("a", "one");

		let xml = render(XMLRenderer::new(data));

		assert_eq!(xml, format!("{XML_HEADER}<Data><A>one</A><B>2</B></Data>"));
	}

	#[rstest]
	fn test_explicit_root_for_data() {
		let data = Data::new().with("name", "x");

		let xml = render(XMLRenderer::with_root(data, "Root"));

		assert_eq!(xml, format!("{XML_HEADER}<Root><Name>x</Name></Root>"));
	}

	#[rstest]
	fn test_explicit_root_for_map_payload() {
		let payload = json!({"id": 1});

		let xml = render(XMLRenderer::with_root(payload, "user"));

		assert_eq!(xml, format!("{XML_HEADER}<user><id>1</id></user>"));
	}

	#[rstest]
	fn test_unencodable_payload_writes_nothing() {
		let mut out = Vec::new();

		// a bare map has no element name to use as root
		let result = XMLRenderer::new(json!({"id": 1})).render(&mut out);

		assert!(matches!(result, Err(RenderError::Xml(_))));
		assert!(out.is_empty());
	}

	#[rstest]
	fn test_data_with_unnamed_key_writes_nothing() {
		let mut out = Vec::new();
		let data = Data::new().with("", "x").with("first name", "y");

		let result = XMLRenderer::new(data).render(&mut out);

		assert!(matches!(result, Err(RenderError::Xml(_))));
		assert!(out.is_empty());
	}
}
