use crate::error::TransformError;
use crate::error::TransformResult;
use crate::kind::NodeKind;
use parse_lite::ast::expr::Expr;
use parse_lite::ast::node::Node;
use parse_lite::ast::stmt::Stmt;
use parse_lite::ast::stmt::VarDecl;
use parse_lite::ast::stx::TopLevel;
use parse_lite::loc::Loc;
use symbol_lite::assoc::binding_of;
use symbol_lite::BindingId;
use symbol_lite::ScopeId;
use symbol_lite::ScopeTree;

/// An owned node handed to [`Path::replace`] or the insert operations.
#[derive(Debug)]
pub enum AnyNode {
  Stmt(Node<Stmt>),
  Expr(Node<Expr>),
}

impl AnyNode {
  pub fn kind(&self) -> NodeKind {
    match self {
      AnyNode::Stmt(n) => NodeKind::of_stmt(&n.stx),
      AnyNode::Expr(n) => NodeKind::of_expr(&n.stx),
    }
  }

  pub fn loc(&self) -> Loc {
    match self {
      AnyNode::Stmt(n) => n.loc,
      AnyNode::Expr(n) => n.loc,
    }
  }

  fn category(&self) -> &'static str {
    match self {
      AnyNode::Stmt(_) => "statement",
      AnyNode::Expr(_) => "expression",
    }
  }
}

impl From<Node<Stmt>> for AnyNode {
  fn from(value: Node<Stmt>) -> Self {
    AnyNode::Stmt(value)
  }
}

impl From<Node<Expr>> for AnyNode {
  fn from(value: Node<Expr>) -> Self {
    AnyNode::Expr(value)
  }
}

/// The node a path points at. `VarDecl` only occurs as the initializer of a `for` header; every
/// other declaration is a statement.
#[derive(Debug, Clone, Copy)]
pub enum AnyNodeRef<'a> {
  Program(&'a Node<TopLevel>),
  Stmt(&'a Node<Stmt>),
  Expr(&'a Node<Expr>),
  VarDecl(&'a Node<VarDecl>),
}

#[derive(Debug)]
pub enum AnyNodeMut<'a> {
  Program(&'a mut Node<TopLevel>),
  Stmt(&'a mut Node<Stmt>),
  Expr(&'a mut Node<Expr>),
  VarDecl(&'a mut Node<VarDecl>),
}

impl<'a> AnyNodeMut<'a> {
  pub fn kind(&self) -> NodeKind {
    match self {
      AnyNodeMut::Program(_) => NodeKind::Program,
      AnyNodeMut::Stmt(n) => NodeKind::of_stmt(&n.stx),
      AnyNodeMut::Expr(n) => NodeKind::of_expr(&n.stx),
      AnyNodeMut::VarDecl(_) => NodeKind::VariableDeclaration,
    }
  }

  pub fn loc(&self) -> Loc {
    match self {
      AnyNodeMut::Program(n) => n.loc,
      AnyNodeMut::Stmt(n) => n.loc,
      AnyNodeMut::Expr(n) => n.loc,
      AnyNodeMut::VarDecl(n) => n.loc,
    }
  }

  fn as_ref(&self) -> AnyNodeRef<'_> {
    match self {
      AnyNodeMut::Program(n) => AnyNodeRef::Program(n),
      AnyNodeMut::Stmt(n) => AnyNodeRef::Stmt(n),
      AnyNodeMut::Expr(n) => AnyNodeRef::Expr(n),
      AnyNodeMut::VarDecl(n) => AnyNodeRef::VarDecl(n),
    }
  }

  fn reborrow(&mut self) -> AnyNodeMut<'_> {
    match self {
      AnyNodeMut::Program(n) => AnyNodeMut::Program(n),
      AnyNodeMut::Stmt(n) => AnyNodeMut::Stmt(n),
      AnyNodeMut::Expr(n) => AnyNodeMut::Expr(n),
      AnyNodeMut::VarDecl(n) => AnyNodeMut::VarDecl(n),
    }
  }
}

/// Where a node sits in its parent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Slot {
  Field(&'static str),
  Index(&'static str, usize),
}

// What the parent slot accepts; decides which operations are legal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Role {
  Root,
  StmtList,
  RequiredStmt,
  OptionalStmt,
  ExprList,
  RequiredExpr,
  OptionalExpr,
  ForInit,
}

pub(crate) enum Change {
  Replace(AnyNode),
  Remove,
}

pub(crate) struct RenameRequest {
  pub binding: BindingId,
  pub from: String,
  pub to: String,
}

#[derive(Default)]
pub(crate) struct Edits {
  pub change: Option<Change>,
  pub before: Vec<Node<Stmt>>,
  pub after: Vec<Node<Stmt>>,
  pub renames: Vec<RenameRequest>,
}

/// A node together with its position in the tree, handed to visitor callbacks.
///
/// Operations are recorded, not applied immediately: every callback registered for the node
/// sees it unchanged, and the engine applies the recorded edits once they have all run. A later
/// `replace` or `remove` overrides an earlier one.
pub struct Path<'p> {
  pub(crate) node: AnyNodeMut<'p>,
  pub(crate) parent_kind: Option<NodeKind>,
  pub(crate) slot: Option<Slot>,
  pub(crate) role: Role,
  pub(crate) scope: ScopeId,
  pub(crate) tree: &'p ScopeTree,
  pub(crate) edits: Edits,
}

impl<'p> Path<'p> {
  pub fn node(&self) -> AnyNodeRef<'_> {
    self.node.as_ref()
  }

  /// In-place edits through this reference are not tracked. Scope data for edited identifiers
  /// goes stale until the next rebuild.
  pub fn node_mut(&mut self) -> AnyNodeMut<'_> {
    self.node.reborrow()
  }

  pub fn stmt(&self) -> Option<&Node<Stmt>> {
    match self.node() {
      AnyNodeRef::Stmt(n) => Some(n),
      _ => None,
    }
  }

  pub fn expr(&self) -> Option<&Node<Expr>> {
    match self.node() {
      AnyNodeRef::Expr(n) => Some(n),
      _ => None,
    }
  }

  pub fn kind(&self) -> NodeKind {
    self.node.kind()
  }

  pub fn loc(&self) -> Loc {
    self.node.loc()
  }

  pub fn parent_kind(&self) -> Option<NodeKind> {
    self.parent_kind
  }

  /// `None` for the program itself.
  pub fn slot(&self) -> Option<Slot> {
    self.slot
  }

  /// The innermost scope containing this node, as of the last scope build.
  pub fn scope(&self) -> ScopeId {
    self.scope
  }

  pub fn scopes(&self) -> &ScopeTree {
    self.tree
  }

  /// The binding an identifier expression refers to, if it is one and resolved.
  pub fn binding(&self) -> Option<BindingId> {
    match self.node() {
      AnyNodeRef::Expr(n) => match n.stx.as_ref() {
        Expr::Id(id) => binding_of(&id.assoc),
        _ => None,
      },
      _ => None,
    }
  }

  pub fn replace(&mut self, node: impl Into<AnyNode>) -> TransformResult<()> {
    let node = node.into();
    let accepted = match self.role {
      Role::Root => false,
      Role::StmtList | Role::RequiredStmt | Role::OptionalStmt => matches!(node, AnyNode::Stmt(_)),
      Role::ExprList | Role::RequiredExpr | Role::OptionalExpr => matches!(node, AnyNode::Expr(_)),
      Role::ForInit => match &node {
        AnyNode::Expr(_) => true,
        AnyNode::Stmt(s) => matches!(s.stx.as_ref(), Stmt::VarDecl(_)),
      },
    };
    if !accepted {
      return Err(TransformError::CategoryMismatch {
        expected: self.expected_category(),
        found: node.category(),
        loc: self.loc(),
      });
    };
    self.edits.change = Some(Change::Replace(node));
    Ok(())
  }

  /// Detaches the node. In a required statement slot the node is replaced by an empty block
  /// instead; in a required expression slot this fails.
  pub fn remove(&mut self) -> TransformResult<()> {
    if matches!(self.role, Role::Root | Role::RequiredExpr) {
      return Err(TransformError::RequiredSlot {
        kind: self.kind(),
        parent: self.parent_kind,
        loc: self.loc(),
      });
    };
    self.edits.change = Some(Change::Remove);
    Ok(())
  }

  pub fn insert_before(&mut self, stmt: Node<Stmt>) -> TransformResult<()> {
    self.check_in_list()?;
    self.edits.before.push(stmt);
    Ok(())
  }

  pub fn insert_after(&mut self, stmt: Node<Stmt>) -> TransformResult<()> {
    self.check_in_list()?;
    self.edits.after.push(stmt);
    Ok(())
  }

  /// Renames the binding `old` visible from this node: its declarations and every reference
  /// to it, but no other binding with the same name.
  pub fn rename_binding(&mut self, old: &str, new: impl Into<String>) -> TransformResult<()> {
    let Some(binding) = self.tree.lookup(self.scope, old) else {
      return Err(TransformError::UnknownBinding {
        name: old.to_string(),
        loc: self.loc(),
      });
    };
    self.edits.renames.push(RenameRequest {
      binding,
      from: old.to_string(),
      to: new.into(),
    });
    Ok(())
  }

  fn check_in_list(&self) -> TransformResult<()> {
    if self.role != Role::StmtList {
      return Err(TransformError::NotInStatementList {
        kind: self.kind(),
        loc: self.loc(),
      });
    };
    Ok(())
  }

  fn expected_category(&self) -> &'static str {
    match self.role {
      Role::Root => "no",
      Role::StmtList | Role::RequiredStmt | Role::OptionalStmt => "statement",
      Role::ExprList | Role::RequiredExpr | Role::OptionalExpr => "expression",
      Role::ForInit => "declaration or expression",
    }
  }
}
