use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::Comment;
use crate::token::Position;
use crate::token::Token;
use crate::token::TT;
use ahash::HashSet;
use ahash::HashSetExt;
use memchr::memchr;
use once_cell::sync::Lazy;

#[cfg(test)]
mod tests;

pub static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  let mut set = HashSet::<&'static str>::new();
  set.insert("const");
  set.insert("else");
  set.insert("false");
  set.insert("for");
  set.insert("function");
  set.insert("if");
  set.insert("let");
  set.insert("null");
  set.insert("return");
  set.insert("true");
  set.insert("var");
  set.insert("while");
  set
});

const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '%', '=', '<', '>', '!'];
const PUNCTUATION_CHARS: &[char] = &['(', ')', '{', '}', '[', ']', ';', ',', '.', ':'];

pub fn is_id_start(c: char) -> bool {
  c.is_alphabetic() || c == '_' || c == '$'
}

pub fn is_id_continue(c: char) -> bool {
  c.is_alphanumeric() || c == '_' || c == '$'
}

/// Whether `name` lexes as a single identifier token (not a keyword).
pub fn is_valid_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  chars.next().is_some_and(is_id_start) && chars.all(is_id_continue) && !KEYWORDS.contains(name)
}

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
  line: usize,
  column: usize,
  comments: Vec<Comment>,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Lexer<'a> {
    Lexer {
      source,
      next: 0,
      line: 1,
      column: 1,
      comments: Vec::new(),
    }
  }

  /// Comments skipped so far, in source order.
  pub fn take_comments(&mut self) -> Vec<Comment> {
    std::mem::take(&mut self.comments)
  }

  fn position(&self) -> Position {
    Position {
      line: self.line,
      column: self.column,
      offset: self.next,
    }
  }

  fn peek(&self, n: usize) -> Option<char> {
    self.source[self.next..].chars().nth(n)
  }

  fn advance(&mut self) -> Option<char> {
    let c = self.peek(0)?;
    self.next += c.len_utf8();
    if c == '\n' {
      self.line += 1;
      self.column = 1;
    } else {
      self.column += 1;
    }
    Some(c)
  }

  fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
    while self.peek(0).is_some_and(&pred) {
      self.advance();
    }
  }

  fn skip_comment(&mut self) {
    let start = self.next;
    // Skip the `//`.
    self.next += 2;
    self.column += 2;
    let rest = &self.source.as_bytes()[self.next..];
    let end = memchr(b'\n', rest).map_or(self.source.len(), |i| self.next + i);
    let text = &self.source[self.next..end];
    self.column += text.chars().count();
    self.next = end;
    self.comments.push(Comment {
      text: text.trim_end_matches('\r').to_string(),
      loc: Loc(start, end),
    });
  }

  fn token(&self, typ: TT, start: Position, text: String) -> Token {
    Token {
      typ,
      text,
      loc: Loc(start.offset, self.next),
      pos: start,
    }
  }

  fn lex_string(&mut self, quote: char, start: Position) -> SyntaxResult<Token> {
    let unterminated = |lexer: &Self| {
      Loc(start.offset, lexer.next).error(SyntaxErrorType::UnterminatedString, start, None)
    };
    let mut value = String::new();
    loop {
      match self.advance() {
        None | Some('\n') => return Err(unterminated(self)),
        Some(c) if c == quote => break,
        Some('\\') => match self.advance() {
          None => return Err(unterminated(self)),
          Some('n') => value.push('\n'),
          Some('t') => value.push('\t'),
          Some('r') => value.push('\r'),
          Some(other) => value.push(other),
        },
        Some(c) => value.push(c),
      };
    }
    Ok(self.token(TT::LiteralString, start, value))
  }

  /// Lexes the next significant token, skipping whitespace and comments.
  pub fn next_token(&mut self) -> SyntaxResult<Token> {
    loop {
      match self.peek(0) {
        Some(c) if c.is_whitespace() => {
          self.advance();
        }
        Some('/') if self.peek(1) == Some('/') => self.skip_comment(),
        _ => break,
      };
    }

    let start = self.position();
    let Some(c) = self.advance() else {
      return Ok(self.token(TT::EOF, start, String::new()));
    };
    let slice = |lexer: &Self| lexer.source[start.offset..lexer.next].to_string();

    let tok = match c {
      '0'..='9' => {
        self.advance_while(|c| c.is_ascii_digit());
        // Only treat `.` as a decimal point if a digit follows, so `1.x` is a member access.
        if self.peek(0) == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
          self.advance();
          self.advance_while(|c| c.is_ascii_digit());
        };
        self.token(TT::LiteralNumber, start, slice(self))
      }
      c if is_id_start(c) => {
        self.advance_while(is_id_continue);
        let text = slice(self);
        let typ = if KEYWORDS.contains(text.as_str()) {
          TT::Keyword
        } else {
          TT::Identifier
        };
        self.token(typ, start, text)
      }
      '"' | '\'' => self.lex_string(c, start)?,
      '=' if self.peek(0) == Some('>') => {
        self.advance();
        self.token(TT::Operator, start, slice(self))
      }
      c if OPERATOR_CHARS.contains(&c) => {
        if self.peek(0) == Some('=') {
          self.advance();
        };
        self.token(TT::Operator, start, slice(self))
      }
      c if PUNCTUATION_CHARS.contains(&c) => self.token(TT::Punctuation, start, slice(self)),
      c => {
        return Err(Loc(start.offset, self.next).error(
          SyntaxErrorType::UnrecognizedCharacter(c),
          start,
          None,
        ))
      }
    };
    Ok(tok)
  }
}

/// Lexes all of `source`, returning the skipped comments alongside the tokens.
pub fn tokenize_with_comments(source: &str) -> SyntaxResult<(Vec<Token>, Vec<Comment>)> {
  let _span = tracing::debug_span!("tokenize", len = source.len()).entered();
  let mut lexer = Lexer::new(source);
  let mut tokens = Vec::new();
  loop {
    let tok = lexer.next_token()?;
    let done = tok.typ == TT::EOF;
    tokens.push(tok);
    if done {
      break;
    };
  }
  tracing::trace!(tokens = tokens.len(), "tokenized");
  Ok((tokens, lexer.take_comments()))
}

/// Lexes all of `source`. The last token is always [`TT::EOF`].
pub fn tokenize(source: &str) -> SyntaxResult<Vec<Token>> {
  tokenize_with_comments(source).map(|(tokens, _)| tokens)
}
