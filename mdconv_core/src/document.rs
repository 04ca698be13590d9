use crate::ConvertError;
use crate::ConvertResult;
use crate::body::fence_blocks;
use crate::header::parse_header;

/// Delimiter line that opens and closes front matter.
pub const FRONT_MATTER_DELIMITER: &str = "---";
/// Separator between the legacy header and the body.
pub const HEADER_SEPARATOR: &str = "\n\n";

/// Options that change how a single document is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
	/// Emit a closing fence when the body ends inside a `::` block. When
	/// false the block is left open, as the legacy converter did.
	pub close_unterminated_blocks: bool,
}

impl Default for ConvertOptions {
	fn default() -> Self {
		Self {
			close_unterminated_blocks: true,
		}
	}
}

/// Outcome of converting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
	/// The content already starts with front matter and must not be touched.
	AlreadyConverted,
	/// The rewritten content.
	Converted(ConvertedDocument),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
	pub content: String,
	/// Number of header fields written to the front matter.
	pub fields: usize,
	/// Number of `::` blocks turned into fenced code.
	pub blocks: usize,
	/// True when the body ended inside an open block.
	pub unterminated_block: bool,
}

/// Returns true when `content` already begins with front matter.
pub fn is_converted(content: &str) -> bool {
	content.starts_with(FRONT_MATTER_DELIMITER)
}

/// Convert a whole document from the legacy header format.
///
/// The result is fully built in memory. Nothing is returned for partially
/// converted input: the first malformed header line or a missing
/// header/body separator is an error.
pub fn convert_document(content: &str, options: &ConvertOptions) -> ConvertResult<Conversion> {
	if is_converted(content) {
		return Ok(Conversion::AlreadyConverted);
	}

	let Some((header, body)) = content.split_once(HEADER_SEPARATOR) else {
		return Err(ConvertError::MissingSeparator {
			path: String::new(),
		});
	};

	let fields = parse_header(header)?;
	let fenced = fence_blocks(body, options.close_unterminated_blocks);

	let mut output = String::with_capacity(content.len() + 32);
	output.push_str(FRONT_MATTER_DELIMITER);
	output.push('\n');
	for field in &fields {
		output.push_str(&field.to_string());
		output.push('\n');
	}
	output.push_str(FRONT_MATTER_DELIMITER);
	output.push_str(HEADER_SEPARATOR);
	output.push_str(&fenced.text);

	Ok(Conversion::Converted(ConvertedDocument {
		content: output,
		fields: fields.len(),
		blocks: fenced.blocks,
		unterminated_block: fenced.unterminated,
	}))
}
