//! Boundary-aware text buffer.
//!
//! Every token written through [`Emitter::write_token`] is classified by its first and last
//! characters. A single space is inserted only when the previous token and the next one would
//! otherwise lex as something else (`returnx`, `a+ +b` collapsing, `//` starting a comment).
//! Newlines are written eagerly but indentation is deferred until the next token, so a line
//! never ends in whitespace.

use parse_lite::lex::is_id_continue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
  None,
  Word,
  Number,
  Plus,
  Minus,
  Slash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leading {
  Word,
  Number,
  Plus,
  Minus,
  Slash,
  Other,
}

fn needs_space(prev: Boundary, next: Leading) -> bool {
  matches!(
    (prev, next),
    (Boundary::Word, Leading::Word)
      | (Boundary::Word, Leading::Number)
      | (Boundary::Number, Leading::Word)
      | (Boundary::Number, Leading::Number)
      | (Boundary::Plus, Leading::Plus)
      | (Boundary::Minus, Leading::Minus)
      | (Boundary::Slash, Leading::Slash)
  )
}

fn classify_leading(ch: char) -> Leading {
  match ch {
    '0'..='9' => Leading::Number,
    '+' => Leading::Plus,
    '-' => Leading::Minus,
    '/' => Leading::Slash,
    c if is_id_continue(c) => Leading::Word,
    _ => Leading::Other,
  }
}

fn classify_trailing(ch: char) -> Boundary {
  match ch {
    '0'..='9' => Boundary::Number,
    '+' => Boundary::Plus,
    '-' => Boundary::Minus,
    '/' => Boundary::Slash,
    c if is_id_continue(c) => Boundary::Word,
    _ => Boundary::None,
  }
}

/// Columns taken by `token` when written after a token ending in `prev`, including any
/// separator space, and the boundary it leaves behind. Empty tokens take nothing.
pub(crate) fn token_width(prev: Boundary, token: &str) -> (usize, Boundary) {
  let (Some(first), Some(last)) = (token.chars().next(), token.chars().last()) else {
    return (0, prev);
  };
  let sep = usize::from(needs_space(prev, classify_leading(first)));
  (sep + token.chars().count(), classify_trailing(last))
}

#[derive(Debug, Default)]
pub struct Emitter {
  out: String,
  trailing: Option<Boundary>,
  column: usize,
  pending_indent: Option<usize>,
}

impl Emitter {
  pub fn new() -> Self {
    Self::default()
  }

  /// The column the next token will start at, counting indentation that is still pending.
  pub fn column(&self) -> usize {
    self.pending_indent.unwrap_or(self.column)
  }

  /// How the last written token ends.
  pub(crate) fn trailing(&self) -> Boundary {
    self.trailing.unwrap_or(Boundary::None)
  }

  pub fn write_token(&mut self, token: &str) {
    if token.is_empty() {
      return;
    };
    if let Some(indent) = self.pending_indent.take() {
      self.out.extend(std::iter::repeat(' ').take(indent));
      self.column = indent;
    };
    let (width, trailing) = token_width(self.trailing(), token);
    if width > token.chars().count() {
      self.out.push(' ');
    };
    self.out.push_str(token);
    self.column += width;
    self.trailing = Some(trailing);
  }

  /// An optional space. Never written at the start of a line.
  pub fn write_space(&mut self) {
    if self.pending_indent.is_some() || self.out.is_empty() {
      return;
    };
    self.out.push(' ');
    self.column += 1;
    self.trailing = Some(Boundary::None);
  }

  pub fn write_newline(&mut self, indent: usize) {
    while self.out.ends_with(' ') {
      self.out.pop();
    }
    self.out.push('\n');
    self.column = 0;
    self.pending_indent = Some(indent);
    self.trailing = Some(Boundary::None);
  }

  pub fn into_string(self) -> String {
    self.out
  }
}

#[cfg(test)]
mod tests {
  use super::token_width;
  use super::Boundary;
  use super::Emitter;

  fn emit(tokens: &[&str]) -> String {
    let mut emitter = Emitter::new();
    for token in tokens {
      emitter.write_token(token);
    }
    emitter.into_string()
  }

  #[test]
  fn test_separates_words() {
    assert_eq!(emit(&["return", "x", ";"]), "return x;");
    assert_eq!(emit(&["return", "1", ";"]), "return 1;");
    assert_eq!(emit(&["return", "(", "x", ")"]), "return(x)");
    assert_eq!(emit(&["else", "if"]), "else if");
  }

  #[test]
  fn test_separates_repeated_signs() {
    assert_eq!(emit(&["a", "+", "+", "b"]), "a+ +b");
    assert_eq!(emit(&["a", "-", "-1"]), "a- -1");
    assert_eq!(emit(&["a", "-", "+", "b"]), "a-+b");
    assert_eq!(emit(&["a", "/", "/", "b"]), "a/ /b");
  }

  #[test]
  fn test_token_width_counts_separator() {
    assert_eq!(token_width(Boundary::Minus, "-a"), (3, Boundary::Word));
    assert_eq!(token_width(Boundary::Minus, "+"), (1, Boundary::Plus));
    assert_eq!(token_width(Boundary::Number, "a"), (2, Boundary::Word));
    assert_eq!(token_width(Boundary::Word, ""), (0, Boundary::Word));
  }

  #[test]
  fn test_indent_is_lazy() {
    let mut emitter = Emitter::new();
    emitter.write_token("{");
    emitter.write_space();
    emitter.write_newline(2);
    assert_eq!(emitter.column(), 2);
    emitter.write_newline(2);
    emitter.write_token("x");
    emitter.write_newline(0);
    emitter.write_token("}");
    assert_eq!(emitter.into_string(), "{\n\n  x\n}");
  }
}
