use crate::loc::Loc;
use crate::token::Position;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use diagnostics::{Diagnostic, FileId};
use std::error::Error;
use std::fmt::Display;

/// A stable classification of syntax errors produced by the lexer and parser.
///
/// Diagnostic codes (prefix `PS`) are assigned per variant and are stable:
/// - `PS0001`: [`SyntaxErrorType::UnrecognizedCharacter`]
/// - `PS0002`: [`SyntaxErrorType::UnterminatedString`]
/// - `PS0003`: [`SyntaxErrorType::RequiredTokenNotFound`]
/// - `PS0004`: [`SyntaxErrorType::ExpectedSyntax`]
/// - `PS0005`: [`SyntaxErrorType::InvalidAssignmentTarget`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  UnrecognizedCharacter(char),
  UnterminatedString,
  RequiredTokenNotFound(TT, &'static str),
  ExpectedSyntax(&'static str),
  InvalidAssignmentTarget,
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub pos: Position,
  /// The token found instead of what was expected, with its source text.
  pub actual_token: Option<(TT, String)>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, pos: Position, actual_token: Option<(TT, String)>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      pos,
      actual_token,
    }
  }

  /// Errors raised while scanning characters, as opposed to while matching tokens.
  pub fn is_lex_error(&self) -> bool {
    matches!(
      self.typ,
      SyntaxErrorType::UnrecognizedCharacter(_) | SyntaxErrorType::UnterminatedString
    )
  }

  /// Convert this syntax error into a shared [`diagnostics::Diagnostic`].
  pub fn to_diagnostic(&self, file: FileId) -> Diagnostic {
    let mut diagnostic = Diagnostic::error(
      self.typ.code(),
      self.typ.message(),
      self.loc.to_diagnostics_span(file),
    );
    if let Some((typ, text)) = &self.actual_token {
      diagnostic = diagnostic.with_note(format!("found {:?} `{}`", typ, text));
    }
    diagnostic
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} at {}:{}",
      self.typ.message(),
      self.pos.line,
      self.pos.column
    )?;
    if let Some((typ, text)) = &self.actual_token {
      write!(f, " [found {:?} `{}`]", typ, text)?;
    }
    Ok(())
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

impl SyntaxErrorType {
  /// Stable diagnostic code for this syntax error variant.
  pub fn code(&self) -> &'static str {
    match self {
      SyntaxErrorType::UnrecognizedCharacter(_) => "PS0001",
      SyntaxErrorType::UnterminatedString => "PS0002",
      SyntaxErrorType::RequiredTokenNotFound(..) => "PS0003",
      SyntaxErrorType::ExpectedSyntax(_) => "PS0004",
      SyntaxErrorType::InvalidAssignmentTarget => "PS0005",
    }
  }

  /// Human-readable message describing this syntax error.
  pub fn message(&self) -> String {
    match self {
      SyntaxErrorType::UnrecognizedCharacter(c) => format!("unrecognized character {:?}", c),
      SyntaxErrorType::UnterminatedString => "unterminated string literal".into(),
      SyntaxErrorType::RequiredTokenNotFound(_, text) => format!("expected `{}`", text),
      SyntaxErrorType::ExpectedSyntax(expected) => format!("expected {}", expected),
      SyntaxErrorType::InvalidAssignmentTarget => "invalid assignment target".into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn codes_are_stable() {
    assert_eq!(SyntaxErrorType::UnrecognizedCharacter('#').code(), "PS0001");
    assert_eq!(SyntaxErrorType::UnterminatedString.code(), "PS0002");
    assert_eq!(
      SyntaxErrorType::RequiredTokenNotFound(TT::Punctuation, ";").code(),
      "PS0003"
    );
    assert_eq!(SyntaxErrorType::ExpectedSyntax("expression").code(), "PS0004");
    assert_eq!(SyntaxErrorType::InvalidAssignmentTarget.code(), "PS0005");
  }

  #[test]
  fn diagnostic_carries_found_token() {
    let err = SyntaxError::new(
      SyntaxErrorType::RequiredTokenNotFound(TT::Punctuation, ")"),
      Loc(3, 4),
      Position {
        line: 1,
        column: 4,
        offset: 3,
      },
      Some((TT::Punctuation, ";".into())),
    );
    let diagnostic = err.to_diagnostic(FileId(0));
    assert_eq!(diagnostic.code, "PS0003");
    assert_eq!(diagnostic.message, "expected `)`");
    assert_eq!(diagnostic.notes, vec!["found Punctuation `;`".to_string()]);
    assert!(!err.is_lex_error());
    assert_eq!(err.to_string(), "expected `)` at 1:4 [found Punctuation `;`]");
  }
}
