use derive_more::derive::{From, TryInto};
use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

use crate::loc::Loc;
use crate::token::Comment;

use super::{expr::Expr, expr::IdPat, func::Func, node::Node};

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Expr(Node<ExprStmt>),
  For(Node<ForStmt>),
  If(Node<IfStmt>),
  Return(Node<ReturnStmt>),
  While(Node<WhileStmt>),

  FunctionDecl(Node<FuncDecl>),
  VarDecl(Node<VarDecl>),
}

impl Stmt {
  pub fn loc(&self) -> Loc {
    match self {
      Stmt::Block(n) => n.loc,
      Stmt::Expr(n) => n.loc,
      Stmt::For(n) => n.loc,
      Stmt::If(n) => n.loc,
      Stmt::Return(n) => n.loc,
      Stmt::While(n) => n.loc,
      Stmt::FunctionDecl(n) => n.loc,
      Stmt::VarDecl(n) => n.loc,
    }
  }

  /// An empty `{}` statement, used to fill required statement slots.
  pub fn empty_block(loc: Loc) -> Node<Stmt> {
    Node::new(loc, Stmt::Block(Node::new(loc, BlockStmt { body: Vec::new() })))
  }
}

/// `//` comments directly preceding a statement in the same statement list.
/// Stored in the statement node's associated data by the parser.
#[derive(Debug, Clone, Default)]
pub struct LeadingComments(pub Vec<Comment>);

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BlockStmt {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExprStmt {
  pub expr: Node<Expr>,
}

// The scope of a `for` statement starts before the braces, so its body block is a separate, nested scope.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForStmt {
  pub init: ForInit,
  pub cond: Option<Node<Expr>>,
  pub post: Option<Node<Expr>>,
  pub body: Node<Stmt>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ForInit {
  None,
  Expr(Node<Expr>),
  Decl(Node<VarDecl>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IfStmt {
  pub test: Node<Expr>,
  pub consequent: Node<Stmt>,
  pub alternate: Option<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ReturnStmt {
  pub value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct WhileStmt {
  pub condition: Node<Expr>,
  pub body: Node<Stmt>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncDecl {
  pub name: Node<IdPat>,
  pub function: Node<Func>,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize, Drive, DriveMut)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

impl VarDeclMode {
  pub fn keyword(self) -> &'static str {
    match self {
      VarDeclMode::Const => "const",
      VarDeclMode::Let => "let",
      VarDeclMode::Var => "var",
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDecl {
  pub mode: VarDeclMode,
  pub name: Node<IdPat>,
  pub initializer: Option<Node<Expr>>,
}
