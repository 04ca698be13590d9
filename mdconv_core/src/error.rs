use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ConvertError {
	#[error(transparent)]
	#[diagnostic(code(mdconv::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to {action} `{path}`: {source}")]
	#[diagnostic(code(mdconv::file_access))]
	FileAccess {
		action: &'static str,
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("malformed header line {line_number} in {path}: `{line}`")]
	#[diagnostic(
		code(mdconv::malformed_header),
		help("every header line must have the form `Key: Value`")
	)]
	MalformedHeader {
		path: String,
		line_number: usize,
		line: String,
	},

	#[error("missing blank line between header and body in {path}")]
	#[diagnostic(
		code(mdconv::missing_separator),
		help("separate the header block from the body with an empty line")
	)]
	MissingSeparator { path: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdconv::config_parse),
		help("check that mdconv.toml is valid TOML with an optional [exclude] section")
	)]
	ConfigParse(String),
}

impl ConvertError {
	pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
		Self::FileAccess {
			action: "read",
			path: path.display().to_string(),
			source,
		}
	}

	pub(crate) fn write(path: &std::path::Path, source: std::io::Error) -> Self {
		Self::FileAccess {
			action: "write",
			path: path.display().to_string(),
			source,
		}
	}

	/// Attach a file path to errors raised while converting in-memory content.
	pub(crate) fn with_path(self, path: &str) -> Self {
		match self {
			Self::MalformedHeader {
				line_number, line, ..
			} => {
				Self::MalformedHeader {
					path: path.to_string(),
					line_number,
					line,
				}
			}
			Self::MissingSeparator { .. } => {
				Self::MissingSeparator {
					path: path.to_string(),
				}
			}
			other => other,
		}
	}
}

pub type ConvertResult<T> = Result<T, ConvertError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
