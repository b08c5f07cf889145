//! View arguments and their XML mapping
//!
//! [`Data`] is the string-keyed mapping handlers use for view arguments and
//! ad-hoc XML payloads. Keys are kept in ascending order so XML output is the
//! same on every run.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::io::Write;
use std::ops::{Deref, DerefMut};

use crate::renderer::{RenderError, RenderResult, xml_error};

/// String-keyed mapping of arbitrary values
///
/// # Examples
///
/// ```
/// use reinhardt_renderers::Data;
///
/// let data = Data::new().with("title", "Welcome").with("count", 3);
///
/// assert_eq!(data.len(), 2);
/// assert_eq!(data.get("count").and_then(|v| v.as_i64()), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Data(BTreeMap<String, Value>);

impl Data {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a value, returning the previous one for the key
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(key.into(), value.into())
	}

	/// Builder-style insert
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(key, value);
		self
	}

	/// Write the mapping as XML child elements wrapped in `root`
	///
	/// Each entry becomes an element named after the title-cased key whose
	/// character data is the value's plain string form. The writer's sink is
	/// flushed once every token has been written.
	///
	/// Fails with [`RenderError::Xml`] when `root` or a title-cased key is not
	/// a valid XML element name (empty, starting with a digit, or containing
	/// whitespace or markup characters).
	///
	/// # Examples
	///
	/// ```
	/// use quick_xml::Writer;
	/// use reinhardt_renderers::Data;
	///
	/// let data = Data::new().with("name", "x");
	/// let mut writer = Writer::new(Vec::new());
	/// data.write_xml(&mut writer, "Root").unwrap();
	///
	/// assert_eq!(writer.into_inner(), b"<Root><Name>x</Name></Root>");
	/// ```
	pub fn write_xml<W: Write>(&self, writer: &mut Writer<W>, root: &str) -> RenderResult<()> {
		check_element_name(root)?;
		writer
			.write_event(Event::Start(BytesStart::new(root)))
			.map_err(xml_error)?;

		for (key, value) in &self.0 {
			let name = title_case(key);
			check_element_name(&name)?;
			let text = plain_string(value);
			writer
				.write_event(Event::Start(BytesStart::new(name.as_str())))
				.map_err(xml_error)?;
			writer
				.write_event(Event::Text(BytesText::new(&text)))
				.map_err(xml_error)?;
			writer
				.write_event(Event::End(BytesEnd::new(name.as_str())))
				.map_err(xml_error)?;
		}

		writer
			.write_event(Event::End(BytesEnd::new(root)))
			.map_err(xml_error)?;

		writer.get_mut().flush()?;
		Ok(())
	}
}

impl Deref for Data {
	type Target = BTreeMap<String, Value>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Data {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl<K, V> FromIterator<(K, V)> for Data
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

impl From<serde_json::Map<String, Value>> for Data {
	fn from(map: serde_json::Map<String, Value>) -> Self {
		map.into_iter().collect()
	}
}

impl IntoIterator for Data {
	type Item = (String, Value);
	type IntoIter = btree_map::IntoIter<String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a Data {
	type Item = (&'a String, &'a Value);
	type IntoIter = btree_map::Iter<'a, String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// Upper-case the first letter of every word
///
/// A word starts after any character that is not alphanumeric or `_`, so
/// `user_name` stays one word while `first-name` becomes `First-Name`.
pub fn title_case(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	let mut at_word_start = true;
	for c in s.chars() {
		if at_word_start {
			out.extend(c.to_uppercase());
		} else {
			out.push(c);
		}
		at_word_start = !(c.is_alphanumeric() || c == '_');
	}
	out
}

fn check_element_name(name: &str) -> RenderResult<()> {
	let mut chars = name.chars();
	let valid = match chars.next() {
		None => false,
		Some(first) => {
			(first.is_alphabetic() || first == '_' || first == ':')
				&& chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
		}
	};
	if valid {
		Ok(())
	} else {
		Err(RenderError::Xml(format!("invalid element name {name:?}")))
	}
}

/// Plain string form of a value: strings unquoted, null empty, everything else as JSON
pub fn plain_string(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}
