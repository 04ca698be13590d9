use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Convert legacy markdown headers and `::lang` blocks into front matter and fenced code.",
	long_about = "mdconv rewrites every `*.md` file in a directory in place.\n\nThe leading `Key: \
	              Value` header becomes a `---` front matter block with lowercase keys, and \
	              four-space indented `::lang` blocks become ```lang fenced code blocks. Files \
	              that already start with `---` are left untouched.\n\nQuick start:\n  mdconv \
	              convert --dry-run   Preview which files change\n  mdconv convert             \
	              Rewrite the files\n  mdconv check               Fail if any file still needs \
	              converting"
)]
pub struct MdconvCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Directory containing the markdown files. Defaults to the current
	/// directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Convert every markdown file in the directory in place. This is the
	/// default when no subcommand is given.
	///
	/// Each file is converted completely in memory before it is written. By
	/// default the run stops at the first file that cannot be converted;
	/// files converted before it stay converted.
	Convert {
		/// Preview changes without writing files.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Show a unified diff for every converted file.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Report files that fail to convert and continue with the rest.
		#[arg(long, default_value_t = false)]
		keep_going: bool,
	},
	/// Check that every markdown file is already converted.
	///
	/// Nothing is written. Exits with a non-zero status code when a file
	/// still uses the legacy header, which makes it suitable for CI.
	Check,
}
