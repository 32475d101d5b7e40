use diagnostics::Diagnostic;
use diagnostics::FileId;
use parse_lite::error::SyntaxError;
use parse_lite::loc::Loc;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use symbol_lite::DuplicateBindingError;
use transform_lite::TransformError;

pub const STALE_SCOPES_CODE: &str = "MN0001";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MinifyError {
  Syntax(SyntaxError),
  Resolve(DuplicateBindingError),
  Transform(TransformError),
  /// An identifier carries no scope data, so the scope tree does not describe this program.
  /// Renaming would leave it behind under its old name.
  StaleScopes { name: String, loc: Loc },
}

pub type MinifyResult<T> = Result<T, MinifyError>;

impl MinifyError {
  pub fn code(&self) -> &'static str {
    match self {
      MinifyError::Syntax(err) => err.typ.code(),
      MinifyError::Resolve(err) => err.code(),
      MinifyError::Transform(err) => err.code(),
      MinifyError::StaleScopes { .. } => STALE_SCOPES_CODE,
    }
  }

  pub fn to_diagnostic(&self, file: FileId) -> Diagnostic {
    match self {
      MinifyError::Syntax(err) => err.to_diagnostic(file),
      MinifyError::Resolve(err) => err.to_diagnostic(file),
      MinifyError::Transform(err) => err.to_diagnostic(file),
      MinifyError::StaleScopes { loc, .. } => {
        Diagnostic::error(STALE_SCOPES_CODE, self.to_string(), loc.to_diagnostics_span(file))
          .with_note("resolve the program again after changing it")
      }
    }
  }
}

impl Display for MinifyError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      MinifyError::Syntax(err) => Display::fmt(err, f),
      MinifyError::Resolve(err) => Display::fmt(err, f),
      MinifyError::Transform(err) => Display::fmt(err, f),
      MinifyError::StaleScopes { name, .. } => {
        write!(f, "identifier `{name}` has no scope information")
      }
    }
  }
}

impl Error for MinifyError {}

impl From<SyntaxError> for MinifyError {
  fn from(value: SyntaxError) -> Self {
    MinifyError::Syntax(value)
  }
}

impl From<DuplicateBindingError> for MinifyError {
  fn from(value: DuplicateBindingError) -> Self {
    MinifyError::Resolve(value)
  }
}

impl From<TransformError> for MinifyError {
  fn from(value: TransformError) -> Self {
    MinifyError::Transform(value)
  }
}
