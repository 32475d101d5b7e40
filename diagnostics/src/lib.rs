//! Diagnostics shared by every stage of the pipeline.
//!
//! Lexing, parsing, scope resolution and transforms all report problems as a [`Diagnostic`]
//! with a stable code, so callers render them the same way.
//!
//! ```
//! use diagnostics::files::SimpleFiles;
//! use diagnostics::render::render_diagnostic;
//! use diagnostics::{Diagnostic, Span, TextRange};
//!
//! let mut files = SimpleFiles::new();
//! let file = files.add("main.js", "let a = 1;\nlet a = 2;");
//! let diag = Diagnostic::error("SY0001", "identifier `a` has already been declared", Span {
//!   file,
//!   range: TextRange::new(15, 16),
//! });
//!
//! let rendered = render_diagnostic(&files, &diag);
//! assert!(rendered.starts_with("error[SY0001]"));
//! assert!(rendered.contains("--> main.js:2:5"));
//! ```

pub mod files;
pub mod render;

use std::fmt::Display;
use std::fmt::Formatter;

/// A stable identifier for a file in a program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// A byte range in a file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TextRange {
  pub start: u32,
  pub end: u32,
}

impl TextRange {
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  /// Builds a range from `usize` byte offsets, saturating at `u32::MAX`.
  pub fn from_offsets(start: usize, end: usize) -> Self {
    Self {
      start: saturating_to_u32(start),
      end: saturating_to_u32(end),
    }
  }

  pub fn len(&self) -> u32 {
    self.end.saturating_sub(self.start)
  }

  pub fn is_empty(&self) -> bool {
    self.start >= self.end
  }
}

/// A span across a specific file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Span {
  pub file: FileId,
  pub range: TextRange,
}

impl Span {
  pub fn new(file: FileId, range: TextRange) -> Self {
    Self { file, range }
  }
}

/// Diagnostic severity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Severity {
  Error,
  Warning,
  Note,
  Help,
}

impl Severity {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
      Severity::Note => "note",
      Severity::Help => "help",
    }
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A label attached to a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
  pub span: Span,
  pub message: String,
  pub is_primary: bool,
}

impl Label {
  pub fn new(span: Span, message: impl Into<String>, is_primary: bool) -> Self {
    Self {
      span,
      message: message.into(),
      is_primary,
    }
  }

  pub fn primary(span: Span, message: impl Into<String>) -> Self {
    Self::new(span, message, true)
  }

  pub fn secondary(span: Span, message: impl Into<String>) -> Self {
    Self::new(span, message, false)
  }
}

/// A user-facing diagnostic with optional labels and notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub code: &'static str,
  pub severity: Severity,
  pub message: String,
  pub primary: Span,
  pub labels: Vec<Label>,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(
    severity: Severity,
    code: &'static str,
    message: impl Into<String>,
    primary: Span,
  ) -> Self {
    Self {
      code,
      severity,
      message: message.into(),
      primary,
      labels: Vec::new(),
      notes: Vec::new(),
    }
  }

  pub fn error(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Error, code, message, primary)
  }

  pub fn warning(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Warning, code, message, primary)
  }

  pub fn with_label(mut self, label: Label) -> Self {
    self.labels.push(label);
    self
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.notes.push(note.into());
    self
  }

  pub fn is_error(&self) -> bool {
    self.severity == Severity::Error
  }
}

fn saturating_to_u32(value: usize) -> u32 {
  u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::files::SimpleFiles;
  use crate::render::render_diagnostic;

  #[test]
  fn caret_spans_the_range() {
    let mut files = SimpleFiles::new();
    let file = files.add("str.js", "let s = \"abc;");
    let diagnostic = Diagnostic::error("PS0002", "unterminated string literal", Span {
      file,
      range: TextRange::new(8, 13),
    });

    let rendered = render_diagnostic(&files, &diagnostic);
    let expected = concat!(
      "error[PS0002]: unterminated string literal\n",
      " --> str.js:1:9\n",
      "  |\n",
      "1 | let s = \"abc;\n",
      "  |         ^^^^^ unterminated string literal\n",
    );
    assert_eq!(rendered, expected);
  }

  #[test]
  fn multi_line_span_marks_every_line() {
    let mut files = SimpleFiles::new();
    let text = "while (a) {\n  a = a - 1;\n}\n";
    let file = files.add("loop.js", text);
    let diagnostic = Diagnostic::error(
      "TEST0002",
      "loop body",
      Span::new(file, TextRange::from_offsets(0, text.len() - 1)),
    );

    let rendered = render_diagnostic(&files, &diagnostic);
    let expected = concat!(
      "error[TEST0002]: loop body\n",
      " --> loop.js:1:1\n",
      "  |\n",
      "1 | while (a) {\n",
      "  | ^^^^^^^^^^^ loop body\n",
      "2 |   a = a - 1;\n",
      "  | ^^^^^^^^^^^^\n",
      "3 | }\n",
      "  | ^\n",
    );
    assert_eq!(rendered, expected);
  }

  #[test]
  fn secondary_labels_and_notes_follow_primary() {
    let mut files = SimpleFiles::new();
    let file = files.add("dup.js", "let a = 1;\nlet a = 2;");
    let diagnostic = Diagnostic::error("TEST0003", "duplicate", Span {
      file,
      range: TextRange::new(15, 16),
    })
    .with_label(Label::secondary(
      Span::new(file, TextRange::new(4, 5)),
      "first declared here",
    ))
    .with_note("rename one of them");

    let rendered = render_diagnostic(&files, &diagnostic);
    let expected = concat!(
      "error[TEST0003]: duplicate\n",
      " --> dup.js:2:5\n",
      "  |\n",
      "2 | let a = 2;\n",
      "  |     ^ duplicate\n",
      "1 | let a = 1;\n",
      "  |     - first declared here\n",
      "= note: rename one of them\n",
    );
    assert_eq!(rendered, expected);
  }

  #[test]
  fn empty_range_still_gets_a_caret() {
    let mut files = SimpleFiles::new();
    let file = files.add("eof.js", "let x");
    let diagnostic = Diagnostic::warning("TEST0004", "ends here", Span {
      file,
      range: TextRange::new(5, 5),
    });
    let rendered = render_diagnostic(&files, &diagnostic);
    assert!(rendered.starts_with("warning[TEST0004]: ends here\n --> eof.js:1:6\n"));
    assert!(rendered.contains("  |      ^ ends here\n"));
  }

  #[test]
  fn offsets_saturate() {
    let range = TextRange::from_offsets(usize::MAX, usize::MAX);
    assert_eq!(range.start, u32::MAX);
    assert!(range.is_empty());
  }
}
