mod common;

use mdconv_core::AnyEmptyResult;
use predicates::prelude::*;

#[test]
fn check_passes_when_everything_is_converted() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("post.md"), common::CONVERTED_POST)?;

	common::mdconv_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("All 1 markdown file(s) are converted."));

	Ok(())
}

#[test]
fn check_fails_on_legacy_files_without_writing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("post.md"), common::LEGACY_POST)?;

	common::mdconv_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicate::str::contains("post.md needs converting"));

	let content = std::fs::read_to_string(tmp.path().join("post.md"))?;
	assert_eq!(content, common::LEGACY_POST);

	Ok(())
}

#[test]
fn check_reports_unconvertible_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("bad.md"), "BadLine\n\nBody.\n")?;

	common::mdconv_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicate::str::contains("invalid: bad.md"));

	Ok(())
}
