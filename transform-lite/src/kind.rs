use parse_lite::ast::expr::Expr;
use parse_lite::ast::stmt::Stmt;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Every node kind a visitor can register callbacks for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub enum NodeKind {
  Program,
  VariableDeclaration,
  FunctionDeclaration,
  IfStatement,
  BlockStatement,
  ReturnStatement,
  ExpressionStatement,
  WhileStatement,
  ForStatement,
  ArrowFunction,
  BinaryExpression,
  UnaryExpression,
  CallExpression,
  MemberExpression,
  ComputedMemberExpression,
  Identifier,
  Literal,
  ObjectExpression,
  ArrayExpression,
}

impl NodeKind {
  pub fn of_stmt(stmt: &Stmt) -> NodeKind {
    match stmt {
      Stmt::Block(_) => NodeKind::BlockStatement,
      Stmt::Expr(_) => NodeKind::ExpressionStatement,
      Stmt::For(_) => NodeKind::ForStatement,
      Stmt::If(_) => NodeKind::IfStatement,
      Stmt::Return(_) => NodeKind::ReturnStatement,
      Stmt::While(_) => NodeKind::WhileStatement,
      Stmt::FunctionDecl(_) => NodeKind::FunctionDeclaration,
      Stmt::VarDecl(_) => NodeKind::VariableDeclaration,
    }
  }

  pub fn of_expr(expr: &Expr) -> NodeKind {
    match expr {
      Expr::ArrowFunc(_) => NodeKind::ArrowFunction,
      Expr::Binary(_) => NodeKind::BinaryExpression,
      Expr::Call(_) => NodeKind::CallExpression,
      Expr::ComputedMember(_) => NodeKind::ComputedMemberExpression,
      Expr::Id(_) => NodeKind::Identifier,
      Expr::Member(_) => NodeKind::MemberExpression,
      Expr::Unary(_) => NodeKind::UnaryExpression,
      Expr::LitArr(_) => NodeKind::ArrayExpression,
      Expr::LitObj(_) => NodeKind::ObjectExpression,
      Expr::LitBool(_) | Expr::LitNull(_) | Expr::LitNum(_) | Expr::LitStr(_) => NodeKind::Literal,
    }
  }

  pub fn is_statement(self) -> bool {
    matches!(
      self,
      NodeKind::VariableDeclaration
        | NodeKind::FunctionDeclaration
        | NodeKind::IfStatement
        | NodeKind::BlockStatement
        | NodeKind::ReturnStatement
        | NodeKind::ExpressionStatement
        | NodeKind::WhileStatement
        | NodeKind::ForStatement
    )
  }

  pub fn is_expression(self) -> bool {
    self != NodeKind::Program && !self.is_statement()
  }
}

impl Display for NodeKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}
