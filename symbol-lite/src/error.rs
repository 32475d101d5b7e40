use crate::scope::ScopeId;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use diagnostics::Label;
use parse_lite::loc::Loc;
use std::error::Error;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

pub const DUPLICATE_BINDING_CODE: &str = "SY0001";
pub const UNRESOLVED_REFERENCE_CODE: &str = "SY0002";

/// A `let` or `const` binding declared twice in the same scope, or colliding with a `var`,
/// function or parameter of the same name.
#[derive(Clone, PartialEq, Eq)]
pub struct DuplicateBindingError {
  pub name: String,
  pub scope: ScopeId,
  pub first: Loc,
  pub duplicate: Loc,
}

impl DuplicateBindingError {
  pub fn code(&self) -> &'static str {
    DUPLICATE_BINDING_CODE
  }

  pub fn to_diagnostic(&self, file: FileId) -> Diagnostic {
    Diagnostic::error(
      DUPLICATE_BINDING_CODE,
      format!("identifier `{}` has already been declared", self.name),
      self.duplicate.to_diagnostics_span(file),
    )
    .with_label(Label::secondary(
      self.first.to_diagnostics_span(file),
      "first declared here",
    ))
  }
}

impl Debug for DuplicateBindingError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "duplicate binding `{}` at {:?} (first at {:?})",
      self.name, self.duplicate, self.first
    )
  }
}

impl Display for DuplicateBindingError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "identifier `{}` has already been declared", self.name)
  }
}

impl Error for DuplicateBindingError {}

pub type ResolveResult<T> = Result<T, DuplicateBindingError>;
