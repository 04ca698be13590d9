use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::ConvertError;
use crate::ConvertResult;
use crate::config::MdconvConfig;
use crate::document::Conversion;
use crate::document::ConvertOptions;
use crate::document::ConvertedDocument;
use crate::document::convert_document;

/// Suffix of the file names that are converted.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Options for a directory run.
///
/// Use [`RunOptions::default()`] for the plain converter or
/// [`RunOptions::from_config`] to build them from an [`MdconvConfig`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
	/// Options applied to every document.
	pub convert: ConvertOptions,
	/// Gitignore-style patterns for files to leave untouched.
	pub exclude_patterns: Vec<String>,
	/// Compute conversions without writing any file.
	pub dry_run: bool,
	/// Record failures and continue with the next file instead of stopping.
	pub keep_going: bool,
}

impl RunOptions {
	pub fn from_config(config: Option<&MdconvConfig>) -> Self {
		let convert = config
			.map(MdconvConfig::convert_options)
			.unwrap_or_default();
		let exclude_patterns = config
			.map(|c| c.exclude.patterns.clone())
			.unwrap_or_default();

		Self {
			convert,
			exclude_patterns,
			..Self::default()
		}
	}
}

/// A file that was (or, in a dry run, would be) rewritten.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
	pub path: PathBuf,
	/// Content before conversion.
	pub original: String,
	pub document: ConvertedDocument,
}

/// A file whose conversion failed.
#[derive(Debug)]
pub struct FailedFile {
	pub path: PathBuf,
	pub error: ConvertError,
}

/// Result of converting a directory.
#[derive(Debug, Default)]
pub struct ConversionReport {
	/// Files rewritten, in processing order.
	pub converted: Vec<ConvertedFile>,
	/// Files that already started with front matter.
	pub skipped: Vec<PathBuf>,
	/// Failures, only populated when [`RunOptions::keep_going`] is set.
	pub failed: Vec<FailedFile>,
	/// True when nothing was written.
	pub dry_run: bool,
}

impl ConversionReport {
	/// Returns true if no file failed.
	pub fn is_ok(&self) -> bool {
		self.failed.is_empty()
	}

	/// Total number of markdown files looked at.
	pub fn total(&self) -> usize {
		self.converted.len() + self.skipped.len() + self.failed.len()
	}
}

/// Outcome of converting a single file in memory.
#[derive(Debug)]
pub enum FileOutcome {
	AlreadyConverted,
	Converted(ConvertedFile),
}

/// List the markdown files directly inside `root`, sorted by path.
///
/// Subdirectories are not descended into. Files matching any of
/// `exclude_patterns` are left out.
pub fn collect_markdown_files(
	root: &Path,
	exclude_patterns: &[String],
) -> ConvertResult<Vec<PathBuf>> {
	let exclude = build_exclude_matcher(root, exclude_patterns)?;
	let mut files = Vec::new();

	for entry in std::fs::read_dir(root)? {
		let entry = entry?;
		let path = entry.path();

		if !is_markdown_file(&path) {
			continue;
		}

		if exclude.matched(&path, false).is_ignore() {
			tracing::debug!(path = %path.display(), "excluded");
			continue;
		}

		files.push(path);
	}

	files.sort();
	Ok(files)
}

fn is_markdown_file(path: &Path) -> bool {
	path.is_file()
		&& path
			.file_name()
			.and_then(|name| name.to_str())
			.is_some_and(|name| name.ends_with(MARKDOWN_EXTENSION))
}

/// Build a `Gitignore` matcher from the `[exclude]` patterns of
/// `mdconv.toml`.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> ConvertResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			ConvertError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| ConvertError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Read and convert one file without writing it.
pub fn convert_file(path: &Path, options: &ConvertOptions) -> ConvertResult<FileOutcome> {
	let original =
		std::fs::read_to_string(path).map_err(|e| ConvertError::read(path, e))?;
	let conversion = convert_document(&original, options)
		.map_err(|e| e.with_path(&path.display().to_string()))?;

	Ok(match conversion {
		Conversion::AlreadyConverted => FileOutcome::AlreadyConverted,
		Conversion::Converted(document) => {
			FileOutcome::Converted(ConvertedFile {
				path: path.to_path_buf(),
				original,
				document,
			})
		}
	})
}

/// Write a converted file back in place.
pub fn write_conversion(file: &ConvertedFile) -> ConvertResult<()> {
	std::fs::write(&file.path, &file.document.content)
		.map_err(|e| ConvertError::write(&file.path, e))?;
	Ok(())
}

/// Convert every markdown file in `root`.
///
/// Files are processed one at a time in path order. Each file is converted
/// completely in memory before it is written, so a malformed file is never
/// left half written. Unless `keep_going` is set, the first failure is
/// returned immediately; files converted before it stay converted.
pub fn convert_directory(root: &Path, options: &RunOptions) -> ConvertResult<ConversionReport> {
	let files = collect_markdown_files(root, &options.exclude_patterns)?;
	let mut report = ConversionReport {
		dry_run: options.dry_run,
		..ConversionReport::default()
	};

	for path in files {
		match convert_file(&path, &options.convert) {
			Ok(FileOutcome::AlreadyConverted) => {
				tracing::debug!(path = %path.display(), "already converted, skipping");
				report.skipped.push(path);
			}
			Ok(FileOutcome::Converted(file)) => {
				if file.document.unterminated_block {
					tracing::warn!(
						path = %path.display(),
						closed = options.convert.close_unterminated_blocks,
						"file ends inside a `::` block"
					);
				}

				if !options.dry_run {
					if let Err(error) = write_conversion(&file) {
						if !options.keep_going {
							return Err(error);
						}
						tracing::error!(path = %path.display(), %error, "write failed");
						report.failed.push(FailedFile { path, error });
						continue;
					}
				}

				tracing::info!(
					path = %path.display(),
					fields = file.document.fields,
					blocks = file.document.blocks,
					dry_run = options.dry_run,
					"converted"
				);
				report.converted.push(file);
			}
			Err(error) => {
				if !options.keep_going {
					return Err(error);
				}
				tracing::error!(path = %path.display(), %error, "conversion failed");
				report.failed.push(FailedFile { path, error });
			}
		}
	}

	Ok(report)
}

/// Result of checking a directory for files that still need converting.
#[derive(Debug, Default)]
pub struct CheckResult {
	/// Files that would be rewritten.
	pub pending: Vec<PathBuf>,
	/// Files that would fail to convert.
	pub invalid: Vec<FailedFile>,
	/// Files that already start with front matter.
	pub converted: Vec<PathBuf>,
}

impl CheckResult {
	/// Returns true when every markdown file is already converted.
	pub fn is_ok(&self) -> bool {
		self.pending.is_empty() && self.invalid.is_empty()
	}
}

/// Report which markdown files in `root` are not yet converted. Nothing is
/// written.
pub fn check_directory(root: &Path, options: &RunOptions) -> ConvertResult<CheckResult> {
	let files = collect_markdown_files(root, &options.exclude_patterns)?;
	let mut result = CheckResult::default();

	for path in files {
		match convert_file(&path, &options.convert) {
			Ok(FileOutcome::AlreadyConverted) => result.converted.push(path),
			Ok(FileOutcome::Converted(_)) => result.pending.push(path),
			Err(error) => result.invalid.push(FailedFile { path, error }),
		}
	}

	Ok(result)
}
