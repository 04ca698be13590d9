//! Rewriting of indented `::lang` blocks into fenced code blocks.
//!
//! The legacy notation marks a code block with a four-space indented `::`
//! line, optionally followed by a language tag. Every following line that is
//! still indented by four spaces belongs to the block:
//!
//! ```text
//!     ::python
//!     print('hi')
//! ```
//!
//! [`FencedLines`] walks the body one line at a time and lazily yields the
//! rewritten lines.

use std::borrow::Cow;
use std::collections::VecDeque;

/// Indentation that marks block content.
pub const BLOCK_INDENT: &str = "    ";
/// Prefix of a line that opens a block.
pub const BLOCK_MARKER: &str = "    ::";
/// Fence emitted around converted blocks.
pub const FENCE: &str = "```";

/// Parser state carried between body lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
	/// Outside of any block. Lines pass through unchanged.
	#[default]
	Normal,
	/// Inside a block opened by a `::` marker.
	InBlock {
		/// Blank lines seen since the last content line. They are only known
		/// to belong to the block once more indented content follows.
		held_blanks: usize,
	},
}

/// Lazy line-by-line conversion of a document body.
///
/// Yields one output line per item, without trailing newlines.
#[derive(Debug)]
pub struct FencedLines<'a, I> {
	lines: I,
	state: BlockState,
	pending: VecDeque<Cow<'a, str>>,
	close_unterminated: bool,
	finished: bool,
	blocks: usize,
	unterminated: bool,
}

impl<'a, I> FencedLines<'a, I>
where
	I: Iterator<Item = &'a str>,
{
	pub fn new(lines: I, close_unterminated: bool) -> Self {
		Self {
			lines,
			state: BlockState::Normal,
			pending: VecDeque::new(),
			close_unterminated,
			finished: false,
			blocks: 0,
			unterminated: false,
		}
	}

	/// The current parser state.
	pub fn state(&self) -> BlockState {
		self.state
	}

	/// Number of blocks opened so far.
	pub fn blocks(&self) -> usize {
		self.blocks
	}

	/// Whether the input ended while a block was still open.
	pub fn unterminated(&self) -> bool {
		self.unterminated
	}

	fn step(&mut self, line: &'a str) {
		match self.state {
			BlockState::Normal => self.step_normal(line),
			BlockState::InBlock { held_blanks } => {
				if line.is_empty() {
					self.state = BlockState::InBlock {
						held_blanks: held_blanks + 1,
					};
				} else if let Some(content) = line.strip_prefix(BLOCK_INDENT) {
					self.push_blanks(held_blanks);
					self.pending.push_back(Cow::Borrowed(content));
					self.state = BlockState::InBlock { held_blanks: 0 };
				} else {
					self.pending.push_back(Cow::Borrowed(FENCE));
					self.push_blanks(held_blanks.max(1));
					self.state = BlockState::Normal;
					self.step_normal(line);
				}
			}
		}
	}

	fn step_normal(&mut self, line: &'a str) {
		if let Some(lang) = line.strip_prefix(BLOCK_MARKER) {
			self.pending
				.push_back(Cow::Owned(format!("{FENCE}{}", lang.trim())));
			self.state = BlockState::InBlock { held_blanks: 0 };
			self.blocks += 1;
		} else {
			self.pending.push_back(Cow::Borrowed(line));
		}
	}

	fn finish(&mut self) {
		self.finished = true;

		let BlockState::InBlock { held_blanks } = self.state else {
			return;
		};

		self.unterminated = true;
		if self.close_unterminated {
			self.pending.push_back(Cow::Borrowed(FENCE));
		}
		self.push_blanks(held_blanks);
		self.state = BlockState::Normal;
	}

	fn push_blanks(&mut self, count: usize) {
		self.pending
			.extend(std::iter::repeat_n(Cow::Borrowed(""), count));
	}
}

impl<'a, I> Iterator for FencedLines<'a, I>
where
	I: Iterator<Item = &'a str>,
{
	type Item = Cow<'a, str>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(line) = self.pending.pop_front() {
				return Some(line);
			}

			if self.finished {
				return None;
			}

			match self.lines.next() {
				Some(line) => self.step(line),
				None => self.finish(),
			}
		}
	}
}

/// The rewritten body together with what happened while rewriting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBody {
	pub text: String,
	/// Number of `::` blocks converted.
	pub blocks: usize,
	/// True when the body ended inside a block.
	pub unterminated: bool,
}

/// Convert every `::lang` block in `body` into a fenced code block.
///
/// Lines are split on `\n` and joined back with `\n`, so a trailing newline
/// in the input is kept in the output.
pub fn fence_blocks(body: &str, close_unterminated: bool) -> FencedBody {
	let mut lines = FencedLines::new(body.split('\n'), close_unterminated);
	let text = lines.by_ref().collect::<Vec<_>>().join("\n");

	FencedBody {
		text,
		blocks: lines.blocks(),
		unterminated: lines.unterminated(),
	}
}
