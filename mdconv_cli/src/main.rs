use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mdconv_cli::Commands;
use mdconv_cli::MdconvCli;
use mdconv_core::ConvertError;
use mdconv_core::config::MdconvConfig;
use mdconv_core::project::ConversionReport;
use mdconv_core::project::RunOptions;
use mdconv_core::project::check_directory;
use mdconv_core::project::convert_directory;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

/// Exit code for files that need attention (failed or unconverted).
const EXIT_FAILURES: i32 = 1;
/// Exit code for errors that aborted the run.
const EXIT_ERROR: i32 = 2;

fn main() {
	let args = MdconvCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match args.command {
		Some(Commands::Convert {
			dry_run,
			diff,
			keep_going,
		}) => run_convert(&args, dry_run, diff, keep_going),
		Some(Commands::Check) => run_check(&args),
		None => run_convert(&args, false, false, false),
	};

	match result {
		Ok(true) => {}
		Ok(false) => process::exit(EXIT_FAILURES),
		Err(e) => {
			// Render conversion errors through miette for help text and codes.
			match e.downcast::<ConvertError>() {
				Ok(convert_err) => {
					let report: miette::Report = (*convert_err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(EXIT_ERROR);
		}
	}
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &MdconvCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_options(root: &Path) -> Result<RunOptions, Box<dyn std::error::Error>> {
	let config = MdconvConfig::load(root)?;
	Ok(RunOptions::from_config(config.as_ref()))
}

/// Returns `Ok(false)` when some files could not be converted.
fn run_convert(
	args: &MdconvCli,
	dry_run: bool,
	diff: bool,
	keep_going: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let options = RunOptions {
		dry_run,
		keep_going,
		..run_options(&root)?
	};

	let report = convert_directory(&root, &options)?;

	if diff {
		for file in &report.converted {
			println!("{}", make_relative(&file.path, &root));
			print_diff(&file.original, &file.document.content);
		}
	}

	print_report(&report, &root, args.verbose);

	Ok(report.is_ok())
}

fn print_report(report: &ConversionReport, root: &Path, verbose: bool) {
	if report.total() == 0 {
		println!("No markdown files found in {}.", root.display());
		return;
	}

	if report.converted.is_empty() && report.failed.is_empty() {
		println!("All markdown files are already converted.");
		return;
	}

	if report.dry_run {
		println!(
			"Dry run: would convert {} file(s):",
			report.converted.len()
		);
		for file in &report.converted {
			println!("  {}", make_relative(&file.path, root));
		}
	} else if !report.converted.is_empty() {
		println!(
			"Converted {} file(s), {} already converted.",
			report.converted.len(),
			report.skipped.len()
		);

		if verbose {
			for file in &report.converted {
				println!(
					"  {} ({} field(s), {} block(s))",
					make_relative(&file.path, root),
					file.document.fields,
					file.document.blocks
				);
			}
		}
	}

	for failed in &report.failed {
		eprintln!(
			"{} {}: {}",
			colored!("failed:", red),
			make_relative(&failed.path, root),
			failed.error
		);
	}
}

/// Returns `Ok(false)` when any file still needs converting.
fn run_check(args: &MdconvCli) -> Result<bool, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let options = run_options(&root)?;
	let result = check_directory(&root, &options)?;

	if result.is_ok() {
		println!(
			"{} All {} markdown file(s) are converted.",
			colored!("✓", green),
			result.converted.len()
		);
		return Ok(true);
	}

	for path in &result.pending {
		println!(
			"{} {} needs converting",
			colored!("!", yellow),
			make_relative(path, &root)
		);
	}

	for failed in &result.invalid {
		eprintln!(
			"{} {}: {}",
			colored!("invalid:", red),
			make_relative(&failed.path, &root),
			failed.error
		);
	}

	println!(
		"\n{} file(s) need converting, {} cannot be converted. Run `mdconv convert` to update them.",
		result.pending.len(),
		result.invalid.len()
	);

	Ok(false)
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
