//! Printer for parse-lite programs.
//!
//! Printing happens in two steps. [`to_doc`] maps the syntax tree to a [`Doc`], and [`render`]
//! picks line breaks for a target width. The same `Doc` renders as readable, width-fitted
//! source ([`Layout::Pretty`]) or as minimal source with only the whitespace needed to keep
//! tokens apart ([`Layout::Compact`]).
//!
//! ```
//! use emit_lite::{format, PrintOptions};
//!
//! let out = format("const x=1;const y=2;", &PrintOptions::default()).unwrap();
//! assert_eq!(out, "const x = 1;\nconst y = 2;\n");
//! ```

use parse_lite::ast::node::Node;
use parse_lite::ast::stx::TopLevel;
use parse_lite::error::SyntaxResult;
use print::Printer;
use serde::Deserialize;
use serde::Serialize;

pub mod doc;
pub mod emitter;
pub mod escape;
pub mod precedence;
mod print;
pub mod render;


pub use doc::Doc;
pub use render::render;
pub use render::render_width;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
  /// Width-fitted output with indentation and optional spaces.
  #[default]
  Pretty,
  /// Everything on one line with only the whitespace that separates tokens.
  Compact,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintOptions {
  pub indent_width: usize,
  pub print_width: usize,
  pub layout: Layout,
  /// Compact layout never prints comments.
  pub strip_comments: bool,
}

impl Default for PrintOptions {
  fn default() -> Self {
    Self {
      indent_width: 2,
      print_width: 80,
      layout: Layout::Pretty,
      strip_comments: false,
    }
  }
}

impl PrintOptions {
  /// Compact layout on an unbounded line.
  pub fn compact() -> Self {
    Self {
      indent_width: 0,
      print_width: usize::MAX,
      layout: Layout::Compact,
      strip_comments: true,
    }
  }
}

pub fn to_doc(top_level: &Node<TopLevel>, options: &PrintOptions) -> Doc {
  Printer::new(options).top_level(top_level)
}

/// Prints a whole program. Pretty output ends with a newline after the last statement, an
/// empty program prints as nothing.
pub fn print(top_level: &Node<TopLevel>, options: &PrintOptions) -> String {
  let _span = tracing::debug_span!("print", statements = top_level.stx.body.len()).entered();
  let mut out = render(&to_doc(top_level, options), options);
  if options.layout == Layout::Pretty && !out.is_empty() {
    out.push('\n');
  };
  tracing::debug!(bytes = out.len(), "printed");
  out
}

/// Parses `source` (keeping comments) and prints it back with `options`.
pub fn format(source: &str, options: &PrintOptions) -> SyntaxResult<String> {
  let top_level = parse_lite::parse_source_with_comments(source)?;
  Ok(print(&top_level, options))
}
