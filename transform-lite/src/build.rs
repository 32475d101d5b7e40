//! Constructors for nodes created by transforms. Synthetic nodes take the location of whatever
//! they replace or sit next to.

use parse_lite::ast::expr::BinaryExpr;
use parse_lite::ast::expr::CallExpr;
use parse_lite::ast::expr::Expr;
use parse_lite::ast::expr::IdExpr;
use parse_lite::ast::expr::IdPat;
use parse_lite::ast::expr::LitBoolExpr;
use parse_lite::ast::expr::LitNumExpr;
use parse_lite::ast::expr::LitStrExpr;
use parse_lite::ast::expr::MemberExpr;
use parse_lite::ast::node::Node;
use parse_lite::ast::stmt::BlockStmt;
use parse_lite::ast::stmt::ExprStmt;
use parse_lite::ast::stmt::Stmt;
use parse_lite::ast::stmt::VarDecl;
use parse_lite::ast::stmt::VarDeclMode;
use parse_lite::loc::Loc;
use parse_lite::operator::OperatorName;

pub fn id(loc: Loc, name: impl Into<String>) -> Node<Expr> {
  Node::new(loc, IdExpr { name: name.into() }).wrap(Expr::Id)
}

pub fn number(loc: Loc, value: f64) -> Node<Expr> {
  Node::new(loc, LitNumExpr { value }).wrap(Expr::LitNum)
}

pub fn string(loc: Loc, value: impl Into<String>) -> Node<Expr> {
  Node::new(loc, LitStrExpr {
    value: value.into(),
  })
  .wrap(Expr::LitStr)
}

pub fn boolean(loc: Loc, value: bool) -> Node<Expr> {
  Node::new(loc, LitBoolExpr { value }).wrap(Expr::LitBool)
}

pub fn binary(loc: Loc, operator: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  Node::new(loc, BinaryExpr {
    operator,
    left,
    right,
  })
  .wrap(Expr::Binary)
}

pub fn call(loc: Loc, callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  Node::new(loc, CallExpr { callee, arguments }).wrap(Expr::Call)
}

pub fn member(loc: Loc, object: Node<Expr>, property: impl Into<String>) -> Node<Expr> {
  Node::new(loc, MemberExpr {
    left: object,
    right: property.into(),
  })
  .wrap(Expr::Member)
}

pub fn expr_stmt(loc: Loc, expr: Node<Expr>) -> Node<Stmt> {
  Node::new(loc, ExprStmt { expr }).wrap(Stmt::Expr)
}

pub fn block(loc: Loc, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  Node::new(loc, BlockStmt { body }).wrap(Stmt::Block)
}

pub fn var_decl(
  loc: Loc,
  mode: VarDeclMode,
  name: impl Into<String>,
  initializer: Option<Node<Expr>>,
) -> Node<Stmt> {
  let name = Node::new(loc, IdPat { name: name.into() });
  Node::new(loc, VarDecl {
    mode,
    name,
    initializer,
  })
  .wrap(Stmt::VarDecl)
}
