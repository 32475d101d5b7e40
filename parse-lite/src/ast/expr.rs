use derive_more::derive::{From, TryInto};
use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

use crate::loc::Loc;
use crate::operator::OperatorName;

use super::{func::Func, node::Node};

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Expr {
  ArrowFunc(Node<ArrowFuncExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Id(Node<IdExpr>),
  Member(Node<MemberExpr>),
  Unary(Node<UnaryExpr>),

  // Literals.
  LitArr(Node<LitArrExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitStr(Node<LitStrExpr>),
}

impl Expr {
  pub fn loc(&self) -> Loc {
    match self {
      Expr::ArrowFunc(n) => n.loc,
      Expr::Binary(n) => n.loc,
      Expr::Call(n) => n.loc,
      Expr::ComputedMember(n) => n.loc,
      Expr::Id(n) => n.loc,
      Expr::Member(n) => n.loc,
      Expr::Unary(n) => n.loc,
      Expr::LitArr(n) => n.loc,
      Expr::LitBool(n) => n.loc,
      Expr::LitNull(n) => n.loc,
      Expr::LitNum(n) => n.loc,
      Expr::LitObj(n) => n.loc,
      Expr::LitStr(n) => n.loc,
    }
  }

  /// Whether this expression can appear on the left of an assignment.
  pub fn is_assignment_target(&self) -> bool {
    matches!(self, Expr::Id(_) | Expr::Member(_) | Expr::ComputedMember(_))
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrowFuncExpr {
  pub func: Node<Func>, // Always arrow.
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ComputedMemberExpr {
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

/// An identifier in a read or write position.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

/// An identifier that declares a binding: a variable, function name or parameter.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MemberExpr {
  pub left: Node<Expr>,
  #[drive(skip)]
  pub right: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNullExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: f64,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjMember {
  // Property keys are not bindings, so they are never renamed. Numeric keys are stored in their canonical string form.
  #[drive(skip)]
  pub key: String,
  // `{ a }` is kept as written; `value` is then an `IdExpr` referencing `a`. Only a printing preference, so not part of the structure.
  #[drive(skip)]
  #[serde(skip)]
  pub shorthand: bool,
  pub value: Node<Expr>,
}
