use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ConvertError;
use crate::ConvertResult;
use crate::document::ConvertOptions;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["mdconv.toml", ".mdconv.toml", ".config/mdconv.toml"];

/// Configuration loaded from an `mdconv.toml` file.
///
/// ```toml
/// close_unterminated_blocks = true
///
/// [exclude]
/// patterns = ["drafts-*.md", "CHANGELOG.md"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct MdconvConfig {
	/// Emit a closing fence when a file ends inside a `::` block. Set to
	/// `false` to keep the legacy behaviour of leaving the block open.
	#[serde(default = "default_close_unterminated_blocks")]
	pub close_unterminated_blocks: bool,
	/// Files to leave alone, using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
}

impl Default for MdconvConfig {
	fn default() -> Self {
		Self {
			close_unterminated_blocks: default_close_unterminated_blocks(),
			exclude: ExcludeConfig::default(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeConfig {
	/// Gitignore-style patterns, relative to the converted directory.
	#[serde(default)]
	pub patterns: Vec<String>,
}

fn default_close_unterminated_blocks() -> bool {
	true
}

impl MdconvConfig {
	/// Resolve the config file path in `root`, if any.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> ConvertResult<Option<MdconvConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: MdconvConfig =
			toml::from_str(&content).map_err(|e| ConvertError::ConfigParse(e.to_string()))?;

		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// The per-document options described by this config.
	pub fn convert_options(&self) -> ConvertOptions {
		ConvertOptions {
			close_unterminated_blocks: self.close_unterminated_blocks,
		}
	}
}
