use derive_more::derive::From;
use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

use super::{expr::IdPat, expr::Expr, node::Node, stmt::Stmt};

// Arrow functions and function declarations share this so downstream stages only need to handle one function shape.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub arrow: bool,
  pub parameters: Vec<Node<IdPat>>,
  pub body: FuncBody,
}

// A function body is different from a block statement, as the parameters and body share one scope.
#[derive(Debug, Drive, DriveMut, From, Serialize)]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  // If arrow function.
  Expression(Node<Expr>),
}
