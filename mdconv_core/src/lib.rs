//! `mdconv_core` converts markdown files written with a legacy `Key: Value`
//! header and indented `::lang` code blocks into front matter and fenced code
//! blocks.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown file
//!   → front matter check (files starting with `---` are left alone)
//!   → header/body split on the first blank line
//!   → header fields (`Key: Value` → `key: value`, quoted when the value has a colon)
//!   → body state machine (`    ::lang` blocks → ```lang fences)
//!   → buffered write back in place
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Optional `mdconv.toml` loading.
//! - [`header`] — Header field parsing and scalar quoting.
//! - [`body`] — The lazy block-to-fence line transform.
//! - [`project`] — Directory discovery, conversion reports, and writing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdconv_core::project::RunOptions;
//! use mdconv_core::project::convert_directory;
//! use std::path::Path;
//!
//! let report = convert_directory(Path::new("."), &RunOptions::default()).unwrap();
//! println!("converted {} file(s)", report.converted.len());
//! ```
//!
//! Single documents can be converted without touching the filesystem:
//!
//! ```rust
//! use mdconv_core::Conversion;
//! use mdconv_core::ConvertOptions;
//! use mdconv_core::convert_document;
//!
//! let input = "Title: Hello\nNote: see: this\n\nBody.\n";
//! let Conversion::Converted(doc) = convert_document(input, &ConvertOptions::default()).unwrap()
//! else {
//! 	unreachable!()
//! };
//! assert_eq!(doc.content, "---\ntitle: Hello\nnote: 'see: this'\n---\n\nBody.\n");
//! ```

pub use document::*;
pub use error::*;
pub use header::HeaderField;

pub mod body;
pub mod config;
mod document;
#[allow(unused_assignments)]
mod error;
pub mod header;
pub mod project;
