mod common;

use mdconv_core::AnyEmptyResult;
use predicates::prelude::*;

#[test]
fn convert_rewrites_files_in_place() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("post.md"), common::LEGACY_POST)?;

	common::mdconv_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Converted 1 file(s)"));

	let content = std::fs::read_to_string(tmp.path().join("post.md"))?;
	assert_eq!(content, common::CONVERTED_POST);

	Ok(())
}

#[test]
fn convert_is_the_default_command() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("post.md"), common::LEGACY_POST)?;

	common::mdconv_cmd()
		.current_dir(tmp.path())
		.assert()
		.success();

	let content = std::fs::read_to_string(tmp.path().join("post.md"))?;
	assert_eq!(content, common::CONVERTED_POST);

	Ok(())
}

#[test]
fn convert_noop_when_already_converted() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("post.md"), common::CONVERTED_POST)?;

	common::mdconv_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("already converted"));

	let content = std::fs::read_to_string(tmp.path().join("post.md"))?;
	assert_eq!(content, common::CONVERTED_POST);

	Ok(())
}

#[test]
fn convert_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("post.md"), common::LEGACY_POST)?;

	common::mdconv_cmd()
		.arg("convert")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("would convert 1 file(s)"))
		.stdout(predicate::str::contains("post.md"));

	let content = std::fs::read_to_string(tmp.path().join("post.md"))?;
	assert_eq!(content, common::LEGACY_POST);

	Ok(())
}

#[test]
fn convert_diff_shows_changes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("post.md"), common::LEGACY_POST)?;

	common::mdconv_cmd()
		.arg("convert")
		.arg("--dry-run")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("-Title: Hello"))
		.stdout(predicate::str::contains("+title: Hello"))
		.stdout(predicate::str::contains("+```python"));

	Ok(())
}

#[test]
fn convert_fails_on_malformed_header() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let bad = "Title: Hello\nBadLine\n\nBody.\n";
	std::fs::write(tmp.path().join("bad.md"), bad)?;

	common::mdconv_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicate::str::contains("malformed header line 2"))
		.stderr(predicate::str::contains("BadLine"));

	let content = std::fs::read_to_string(tmp.path().join("bad.md"))?;
	assert_eq!(content, bad);

	Ok(())
}

#[test]
fn convert_names_unreadable_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("a.md"), common::LEGACY_POST)?;
	std::fs::write(tmp.path().join("b.md"), b"\xff\xfe\n\nx")?;

	common::mdconv_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicate::str::contains("failed to read"))
		.stderr(predicate::str::contains("b.md"));

	let content = std::fs::read_to_string(tmp.path().join("a.md"))?;
	assert_eq!(content, common::CONVERTED_POST);

	Ok(())
}

#[test]
fn convert_diff_separates_files_without_trailing_newline() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("a.md"), "Title: A\n\nNo newline")?;
	std::fs::write(tmp.path().join("b.md"), common::LEGACY_POST)?;

	common::mdconv_cmd()
		.arg("convert")
		.arg("--dry-run")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("   No newline\nb.md\n"));

	Ok(())
}

#[test]
fn convert_keep_going_reports_failures() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("a.md"), "No separator\n")?;
	std::fs::write(tmp.path().join("b.md"), common::LEGACY_POST)?;

	common::mdconv_cmd()
		.arg("convert")
		.arg("--keep-going")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicate::str::contains("Converted 1 file(s)"))
		.stderr(predicate::str::contains("failed: a.md"));

	let content = std::fs::read_to_string(tmp.path().join("b.md"))?;
	assert_eq!(content, common::CONVERTED_POST);

	Ok(())
}

#[test]
fn convert_honours_config_exclusions() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("mdconv.toml"),
		"[exclude]\npatterns = [\"README.md\"]\n",
	)?;
	std::fs::write(tmp.path().join("README.md"), common::LEGACY_POST)?;
	std::fs::write(tmp.path().join("post.md"), common::LEGACY_POST)?;

	common::mdconv_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("README.md"))?,
		common::LEGACY_POST
	);
	assert_eq!(
		std::fs::read_to_string(tmp.path().join("post.md"))?,
		common::CONVERTED_POST
	);

	Ok(())
}

#[test]
fn convert_reports_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("mdconv.toml"), "not = [valid")?;

	common::mdconv_cmd()
		.arg("convert")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicate::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn convert_verbose_logs_skipped_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("done.md"), common::CONVERTED_POST)?;

	common::mdconv_cmd()
		.arg("convert")
		.arg("--verbose")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicate::str::contains("already converted, skipping"));

	Ok(())
}
