use std::fmt;

use crate::ConvertError;
use crate::ConvertResult;

/// Separator between a header key and its value.
pub const FIELD_SEPARATOR: &str = ": ";

/// A single `Key: Value` line from a legacy header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
	/// The key, already lowercased.
	pub key: String,
	/// The raw value exactly as it appeared after the first `": "`.
	pub value: String,
}

impl HeaderField {
	/// Parse a header line. `line_number` is 1-indexed and only used for the
	/// error.
	pub fn parse(line: &str, line_number: usize) -> ConvertResult<Self> {
		let Some((key, value)) = line.split_once(FIELD_SEPARATOR) else {
			return Err(ConvertError::MalformedHeader {
				path: String::new(),
				line_number,
				line: line.to_string(),
			});
		};

		Ok(Self {
			key: key.to_lowercase(),
			value: value.to_string(),
		})
	}

	/// The value as it should appear in front matter.
	pub fn scalar(&self) -> String {
		quote_scalar(&self.value)
	}
}

impl fmt::Display for HeaderField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{FIELD_SEPARATOR}{}", self.key, self.scalar())
	}
}

/// Wrap a value in single quotes when it contains a colon, doubling any
/// embedded single quotes. Other values are returned unchanged.
pub fn quote_scalar(value: &str) -> String {
	if value.contains(':') {
		format!("'{}'", value.replace('\'', "''"))
	} else {
		value.to_string()
	}
}

/// Parse every line of a header block.
pub fn parse_header(header: &str) -> ConvertResult<Vec<HeaderField>> {
	header
		.split('\n')
		.enumerate()
		.map(|(index, line)| HeaderField::parse(line, index + 1))
		.collect()
}
