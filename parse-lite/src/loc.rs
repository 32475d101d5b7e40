use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::Position;
use crate::token::TT;
use diagnostics::FileId;
use diagnostics::Span;
use diagnostics::TextRange;
use serde::Serialize;

/// Byte offsets `[start, end)` into the source. Nodes built by transforms reuse the location of
/// the node they replace or sit next to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, pos: Position, actual_token: Option<(TT, String)>) -> SyntaxError {
    SyntaxError::new(typ, self, pos, actual_token)
  }

  pub fn to_diagnostics_span(&self, file: FileId) -> Span {
    Span::new(file, TextRange::from_offsets(self.0, self.1))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn diagnostics_span_keeps_offsets() {
    let span = Loc(2, 4).to_diagnostics_span(FileId(7));
    assert_eq!(span.file, FileId(7));
    assert_eq!(span.range, TextRange::new(2, 4));
  }

  #[test]
  fn error_records_found_token() {
    let pos = Position {
      line: 1,
      column: 5,
      offset: 4,
    };
    let err = Loc(4, 5).error(SyntaxErrorType::ExpectedSyntax("expression"), pos, Some((TT::Punctuation, ")".into())));
    assert_eq!(err.loc, Loc(4, 5));
    assert_eq!(err.typ.code(), "PS0004");
  }
}
