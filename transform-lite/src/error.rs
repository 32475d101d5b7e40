use crate::kind::NodeKind;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use diagnostics::Span;
use diagnostics::TextRange;
use parse_lite::loc::Loc;
use std::error::Error;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use symbol_lite::DuplicateBindingError;

#[derive(Clone, PartialEq, Eq)]
pub enum TransformError {
  /// A reference survived the removal of its declaration and no enclosing declaration of the
  /// same name exists.
  DanglingReference { name: String, loc: Loc },
  /// `remove` on a node whose parent cannot do without it, e.g. the operand of a binary
  /// expression.
  RequiredSlot { kind: NodeKind, parent: Option<NodeKind>, loc: Loc },
  /// `insert_before`/`insert_after` on a node that is not in a statement list.
  NotInStatementList { kind: NodeKind, loc: Loc },
  /// `replace` with a node that cannot go in the slot, e.g. a statement where an expression is
  /// required.
  CategoryMismatch { expected: &'static str, found: &'static str, loc: Loc },
  /// `rename_binding` with a name that does not resolve from the current scope.
  UnknownBinding { name: String, loc: Loc },
  /// Rebuilding scopes after the traversal failed.
  Rebuild(DuplicateBindingError),
}

impl TransformError {
  pub fn code(&self) -> &'static str {
    match self {
      TransformError::DanglingReference { .. } => "TR0001",
      TransformError::RequiredSlot { .. } => "TR0002",
      TransformError::NotInStatementList { .. } => "TR0003",
      TransformError::CategoryMismatch { .. } => "TR0004",
      TransformError::UnknownBinding { .. } => "TR0005",
      TransformError::Rebuild(err) => err.code(),
    }
  }

  pub fn loc(&self) -> Loc {
    match self {
      TransformError::DanglingReference { loc, .. }
      | TransformError::RequiredSlot { loc, .. }
      | TransformError::NotInStatementList { loc, .. }
      | TransformError::CategoryMismatch { loc, .. }
      | TransformError::UnknownBinding { loc, .. } => *loc,
      TransformError::Rebuild(err) => err.duplicate,
    }
  }

  pub fn to_diagnostic(&self, file: FileId) -> Diagnostic {
    if let TransformError::Rebuild(err) = self {
      return err.to_diagnostic(file);
    };
    // Synthetic nodes may carry an empty location; point at its start rather than nowhere.
    let loc = self.loc();
    let span = Span::new(file, TextRange::from_offsets(loc.0, loc.1.max(loc.0)));
    Diagnostic::error(self.code(), self.to_string(), span)
  }
}

impl Display for TransformError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TransformError::DanglingReference { name, .. } => {
        write!(f, "reference to `{name}` has no declaration after transform")
      }
      TransformError::RequiredSlot { kind, parent, .. } => match parent {
        Some(parent) => write!(f, "cannot remove required {kind} from {parent}"),
        None => write!(f, "cannot remove {kind}"),
      },
      TransformError::NotInStatementList { kind, .. } => {
        write!(f, "cannot insert next to {kind} outside a statement list")
      }
      TransformError::CategoryMismatch {
        expected, found, ..
      } => write!(f, "expected {expected} replacement, found {found}"),
      TransformError::UnknownBinding { name, .. } => {
        write!(f, "no binding named `{name}` is visible here")
      }
      TransformError::Rebuild(err) => write!(f, "{err}"),
    }
  }
}

impl Debug for TransformError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} at {:?}", self, self.loc())
  }
}

impl Error for TransformError {}

impl From<DuplicateBindingError> for TransformError {
  fn from(value: DuplicateBindingError) -> Self {
    TransformError::Rebuild(value)
  }
}

pub type TransformResult<T> = Result<T, TransformError>;
