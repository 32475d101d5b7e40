use crate::loc::Loc;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  // Special token used to represent the end of the source code. Easier than using and handling Option everywhere.
  EOF,
  Identifier,
  Keyword,
  LiteralNumber,
  LiteralString,
  Operator,
  Punctuation,
}

/// A 1-based line and column (in chars), plus the 0-based byte offset.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize)]
pub struct Position {
  pub line: usize,
  pub column: usize,
  pub offset: usize,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct Token {
  pub typ: TT,
  /// The exact source slice, except for string literals where this is the decoded value.
  pub text: String,
  #[serde(skip)]
  pub loc: Loc,
  pub pos: Position,
}

impl Token {
  pub fn is(&self, typ: TT, text: &str) -> bool {
    self.typ == typ && self.text == text
  }

  pub fn is_punct(&self, text: &str) -> bool {
    self.is(TT::Punctuation, text)
  }

  pub fn is_operator(&self, text: &str) -> bool {
    self.is(TT::Operator, text)
  }

  pub fn is_keyword(&self, text: &str) -> bool {
    self.is(TT::Keyword, text)
  }
}

/// A `//` comment skipped by the lexer. `text` excludes the leading slashes.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct Comment {
  pub text: String,
  #[serde(skip)]
  pub loc: Loc,
}
