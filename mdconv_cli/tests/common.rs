use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const LEGACY_POST: &str = "Title: Hello\nDate: 2020-01-01\n\nSome text.\n\n    ::python\n    \
                               print('hi')\n\nMore text.\n";

pub const CONVERTED_POST: &str = "---\ntitle: Hello\ndate: 2020-01-01\n---\n\nSome \
                                  text.\n\n```python\nprint('hi')\n```\n\nMore text.\n";

pub fn mdconv_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("mdconv"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}
