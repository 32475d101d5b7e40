//! The printer's layout IR.
//!
//! A [`Doc`] describes how text *could* be laid out. The line-breaking decision is made
//! later by [`crate::render`], so one tree serves every width and both layouts.

use crate::emitter::token_width;
use crate::emitter::Boundary;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Doc {
  /// A single token, or whitespace that only matters in pretty layout.
  Text(String),
  /// A space when the enclosing group is flat, otherwise a newline at the current indent.
  Line,
  /// Always a newline (nothing in compact layout).
  HardLine,
  /// Rendered flat if it fits in the remaining width, otherwise broken.
  Group(Vec<Doc>),
  /// Increases the indent of every newline rendered inside.
  Indent(Vec<Doc>),
}

pub fn text(text: impl Into<String>) -> Doc {
  Doc::Text(text.into())
}

pub fn space() -> Doc {
  Doc::Text(" ".to_string())
}

pub fn group(docs: impl IntoIterator<Item = Doc>) -> Doc {
  Doc::Group(docs.into_iter().collect())
}

pub fn indent(docs: impl IntoIterator<Item = Doc>) -> Doc {
  Doc::Indent(docs.into_iter().collect())
}

/// Plain sequencing. Represented as a group: a group with no direct `Line` child renders the
/// same whether it fits or not.
pub fn concat(docs: impl IntoIterator<Item = Doc>) -> Doc {
  Doc::Group(docs.into_iter().collect())
}

/// `items` separated by `,` and a `Line`.
pub fn comma_separated(items: impl IntoIterator<Item = Doc>) -> Vec<Doc> {
  let mut out = Vec::new();
  for (i, item) in items.into_iter().enumerate() {
    if i > 0 {
      out.push(text(","));
      out.push(Doc::Line);
    };
    out.push(item);
  }
  out
}

impl Doc {
  pub fn is_empty(&self) -> bool {
    match self {
      Doc::Text(t) => t.is_empty(),
      Doc::Line | Doc::HardLine => false,
      Doc::Group(docs) | Doc::Indent(docs) => docs.iter().all(Doc::is_empty),
    }
  }
}

/// Whether `docs` rendered flat take at most `remaining` columns when the output so far ends
/// in `trailing`. Tokens are measured with the separator spaces the emitter will insert, a
/// `Line` or whitespace text counts as one column, and any `HardLine` means the docs never
/// fit. Stops as soon as the budget is spent.
pub(crate) fn fits_flat(docs: &[Doc], remaining: usize, trailing: Boundary) -> bool {
  struct Budget {
    remaining: usize,
    trailing: Boundary,
  }

  fn measure(docs: &[Doc], budget: &mut Budget) -> bool {
    for doc in docs {
      let width = match doc {
        Doc::Text(t) if t.is_empty() => continue,
        Doc::Text(t) if t.chars().all(char::is_whitespace) => {
          budget.trailing = Boundary::None;
          1
        }
        Doc::Text(t) => {
          let (width, trailing) = token_width(budget.trailing, t);
          budget.trailing = trailing;
          width
        }
        Doc::Line => {
          budget.trailing = Boundary::None;
          1
        }
        Doc::HardLine => return false,
        Doc::Group(inner) | Doc::Indent(inner) => {
          if !measure(inner, budget) {
            return false;
          };
          continue;
        }
      };
      match budget.remaining.checked_sub(width) {
        Some(rest) => budget.remaining = rest,
        None => return false,
      };
    }
    true
  }
  measure(docs, &mut Budget { remaining, trailing })
}
