use crate::error::TransformError;
use crate::error::TransformResult;
use crate::kind::NodeKind;
use crate::path::AnyNode;
use crate::path::AnyNodeMut;
use crate::path::Change;
use crate::path::Edits;
use crate::path::Path;
use crate::path::RenameRequest;
use crate::path::Role;
use crate::path::Slot;
use crate::report::TraceEvent;
use crate::report::TransformReport;
use crate::visitor::Phase;
use crate::visitor::Visitor;
use parse_lite::ast::expr::Expr;
use parse_lite::ast::func::Func;
use parse_lite::ast::func::FuncBody;
use parse_lite::ast::node::Node;
use parse_lite::ast::node::NodeAssocData;
use parse_lite::ast::stmt::ForInit;
use parse_lite::ast::stmt::Stmt;
use parse_lite::ast::stmt::VarDecl;
use parse_lite::ast::stx::TopLevel;
use parse_lite::loc::Loc;
use symbol_lite::assoc::introduced_scope;
use symbol_lite::ScopeId;
use symbol_lite::ScopeTree;

#[derive(Clone, Copy)]
struct Ctx {
  parent: Option<NodeKind>,
  slot: Option<Slot>,
  role: Role,
}

impl Ctx {
  fn field(parent: NodeKind, name: &'static str, role: Role) -> Ctx {
    Ctx {
      parent: Some(parent),
      slot: Some(Slot::Field(name)),
      role,
    }
  }

  fn index(parent: NodeKind, name: &'static str, i: usize, role: Role) -> Ctx {
    Ctx {
      parent: Some(parent),
      slot: Some(Slot::Index(name, i)),
      role,
    }
  }
}

// What the parent has to do after visiting a child.
#[derive(Default)]
struct Outcome {
  removed: bool,
  before: Vec<Node<Stmt>>,
  after: Vec<Node<Stmt>>,
}

/// One pre-order traversal over owned child slots. Callbacks see the scope data computed before
/// the traversal; structural edits are applied as they are collected.
pub(crate) struct Engine<'a, 'v> {
  visitor: &'a mut Visitor<'v>,
  tree: &'a ScopeTree,
  scopes: Vec<ScopeId>,
  pub report: TransformReport,
  pub renames: Vec<RenameRequest>,
}

impl<'a, 'v> Engine<'a, 'v> {
  pub fn new(visitor: &'a mut Visitor<'v>, tree: &'a ScopeTree) -> Engine<'a, 'v> {
    Engine {
      visitor,
      tree,
      scopes: vec![tree.root()],
      report: TransformReport::default(),
      renames: Vec::new(),
    }
  }

  fn scope(&self) -> ScopeId {
    *self.scopes.last().unwrap()
  }

  // Nodes created during this traversal have no scope of their own yet; they stay in the
  // enclosing one.
  fn enter_scope(&mut self, assoc: &NodeAssocData) -> bool {
    match introduced_scope(assoc) {
      Some(id) => {
        self.scopes.push(id);
        true
      }
      None => false,
    }
  }

  fn exit_scope(&mut self, pushed: bool) {
    if pushed {
      self.scopes.pop();
    };
  }

  fn run_callbacks(
    &mut self,
    phase: Phase,
    node: AnyNodeMut<'_>,
    ctx: Ctx,
  ) -> TransformResult<Edits> {
    let scope = self.scope();
    let tree = self.tree;
    let callbacks = self.visitor.callbacks_mut(phase, node.kind());
    if callbacks.is_empty() {
      return Ok(Edits::default());
    };
    let mut path = Path {
      node,
      parent_kind: ctx.parent,
      slot: ctx.slot,
      role: ctx.role,
      scope,
      tree,
      edits: Edits::default(),
    };
    for callback in callbacks.iter_mut() {
      callback(&mut path)?;
    }
    let edits = path.edits;
    for rename in edits.renames.iter() {
      tracing::trace!(from = %rename.from, to = %rename.to, "rename requested");
    }
    Ok(edits)
  }

  fn take_renames(&mut self, edits: &mut Edits) {
    self.renames.append(&mut edits.renames);
  }

  fn record_replace(&mut self, kind: NodeKind, with: NodeKind, loc: Loc) {
    self.report.replaced += 1;
    self.report.trace.push(TraceEvent::Replaced { kind, with, loc });
  }

  fn record_remove(&mut self, kind: NodeKind, loc: Loc) {
    self.report.removed += 1;
    self.report.trace.push(TraceEvent::Removed { kind, loc });
  }

  pub fn visit_program(&mut self, top: &mut Node<TopLevel>) -> TransformResult<()> {
    let ctx = Ctx {
      parent: None,
      slot: None,
      role: Role::Root,
    };
    // Paths at the root reject every structural operation, so only renames can come back.
    let mut edits = self.run_callbacks(Phase::Enter, AnyNodeMut::Program(&mut *top), ctx)?;
    self.take_renames(&mut edits);
    self.visit_stmt_list(&mut top.stx.body, NodeKind::Program)?;
    let mut edits = self.run_callbacks(Phase::Exit, AnyNodeMut::Program(&mut *top), ctx)?;
    self.take_renames(&mut edits);
    Ok(())
  }

  fn visit_stmt_list(&mut self, list: &mut Vec<Node<Stmt>>, parent: NodeKind) -> TransformResult<()> {
    let mut i = 0;
    let mut original = 0;
    while i < list.len() {
      let ctx = Ctx::index(parent, "body", original, Role::StmtList);
      let outcome = self.visit_stmt(&mut list[i], ctx)?;
      original += 1;
      for stmt in outcome.before.iter().chain(outcome.after.iter()) {
        self.report.inserted += 1;
        self.report.trace.push(TraceEvent::Inserted {
          kind: NodeKind::of_stmt(&stmt.stx),
          loc: stmt.loc,
        });
      }
      let before = outcome.before.len();
      let after = outcome.after.len();
      list.splice(i..i, outcome.before);
      i += before;
      if outcome.removed {
        list.remove(i);
      } else {
        i += 1;
      };
      list.splice(i..i, outcome.after);
      i += after;
    }
    Ok(())
  }

  fn visit_expr_list(
    &mut self,
    list: &mut Vec<Node<Expr>>,
    parent: NodeKind,
    name: &'static str,
  ) -> TransformResult<()> {
    let mut i = 0;
    let mut original = 0;
    while i < list.len() {
      let ctx = Ctx::index(parent, name, original, Role::ExprList);
      let outcome = self.visit_expr(&mut list[i], ctx)?;
      original += 1;
      if outcome.removed {
        list.remove(i);
      } else {
        i += 1;
      };
    }
    Ok(())
  }

  fn visit_opt_stmt(&mut self, slot: &mut Option<Node<Stmt>>, ctx: Ctx) -> TransformResult<()> {
    if let Some(stmt) = slot {
      if self.visit_stmt(stmt, ctx)?.removed {
        *slot = None;
      };
    };
    Ok(())
  }

  fn visit_opt_expr(&mut self, slot: &mut Option<Node<Expr>>, ctx: Ctx) -> TransformResult<()> {
    if let Some(expr) = slot {
      if self.visit_expr(expr, ctx)?.removed {
        *slot = None;
      };
    };
    Ok(())
  }

  // Applies a replace or remove recorded on a statement. Returns whether the node is gone.
  fn apply_stmt_change(
    &mut self,
    node: &mut Node<Stmt>,
    change: Change,
    ctx: Ctx,
  ) -> TransformResult<bool> {
    let kind = NodeKind::of_stmt(&node.stx);
    match change {
      Change::Remove => {
        self.record_remove(kind, node.loc);
        if ctx.role == Role::RequiredStmt {
          *node = Stmt::empty_block(node.loc);
          return Ok(false);
        };
        Ok(true)
      }
      Change::Replace(AnyNode::Stmt(new)) => {
        self.record_replace(kind, NodeKind::of_stmt(&new.stx), node.loc);
        *node = new;
        Ok(false)
      }
      Change::Replace(other) => Err(TransformError::CategoryMismatch {
        expected: "statement",
        found: "expression",
        loc: other.loc(),
      }),
    }
  }

  fn apply_expr_change(&mut self, node: &mut Node<Expr>, change: Change) -> TransformResult<bool> {
    let kind = NodeKind::of_expr(&node.stx);
    match change {
      Change::Remove => {
        self.record_remove(kind, node.loc);
        Ok(true)
      }
      Change::Replace(AnyNode::Expr(new)) => {
        self.record_replace(kind, NodeKind::of_expr(&new.stx), node.loc);
        *node = new;
        Ok(false)
      }
      Change::Replace(other) => Err(TransformError::CategoryMismatch {
        expected: "expression",
        found: "statement",
        loc: other.loc(),
      }),
    }
  }

  fn visit_stmt(&mut self, node: &mut Node<Stmt>, ctx: Ctx) -> TransformResult<Outcome> {
    let mut edits = self.run_callbacks(Phase::Enter, AnyNodeMut::Stmt(&mut *node), ctx)?;
    self.take_renames(&mut edits);
    let mut outcome = Outcome {
      removed: false,
      before: edits.before,
      after: edits.after,
    };
    let mut replaced = false;
    if let Some(change) = edits.change {
      replaced = matches!(change, Change::Replace(_));
      if self.apply_stmt_change(node, change, ctx)? {
        outcome.removed = true;
        return Ok(outcome);
      };
      if !replaced {
        // Removed from a required slot; the empty block needs no visiting.
        return Ok(outcome);
      };
    };
    self.visit_stmt_children(node)?;
    // The replacement is a different node; its own callbacks were never entered.
    if replaced {
      return Ok(outcome);
    };
    let mut edits = self.run_callbacks(Phase::Exit, AnyNodeMut::Stmt(&mut *node), ctx)?;
    self.take_renames(&mut edits);
    outcome.before.append(&mut edits.before);
    outcome.after.append(&mut edits.after);
    if let Some(change) = edits.change {
      outcome.removed = self.apply_stmt_change(node, change, ctx)?;
    };
    Ok(outcome)
  }

  fn visit_expr(&mut self, node: &mut Node<Expr>, ctx: Ctx) -> TransformResult<Outcome> {
    let mut edits = self.run_callbacks(Phase::Enter, AnyNodeMut::Expr(&mut *node), ctx)?;
    self.take_renames(&mut edits);
    let mut replaced = false;
    if let Some(change) = edits.change {
      if self.apply_expr_change(node, change)? {
        return Ok(Outcome {
          removed: true,
          ..Outcome::default()
        });
      };
      replaced = true;
    };
    self.visit_expr_children(node)?;
    if replaced {
      return Ok(Outcome::default());
    };
    let mut edits = self.run_callbacks(Phase::Exit, AnyNodeMut::Expr(&mut *node), ctx)?;
    self.take_renames(&mut edits);
    let removed = match edits.change {
      Some(change) => self.apply_expr_change(node, change)?,
      None => false,
    };
    Ok(Outcome {
      removed,
      ..Outcome::default()
    })
  }

  fn visit_func(&mut self, func: &mut Node<Func>, parent: NodeKind) -> TransformResult<()> {
    let pushed = self.enter_scope(&func.assoc);
    match &mut func.stx.body {
      FuncBody::Block(body) => self.visit_stmt_list(body, parent)?,
      FuncBody::Expression(expr) => {
        self.visit_expr(expr, Ctx::field(parent, "body", Role::RequiredExpr))?;
      }
    };
    self.exit_scope(pushed);
    Ok(())
  }

  fn visit_var_decl_children(
    &mut self,
    decl: &mut Node<VarDecl>,
  ) -> TransformResult<()> {
    let ctx = Ctx::field(NodeKind::VariableDeclaration, "init", Role::OptionalExpr);
    self.visit_opt_expr(&mut decl.stx.initializer, ctx)
  }

  fn visit_stmt_children(&mut self, node: &mut Node<Stmt>) -> TransformResult<()> {
    match node.stx.as_mut() {
      Stmt::Block(block) => {
        let pushed = self.enter_scope(&block.assoc);
        self.visit_stmt_list(&mut block.stx.body, NodeKind::BlockStatement)?;
        self.exit_scope(pushed);
      }
      Stmt::Expr(stmt) => {
        let ctx = Ctx::field(NodeKind::ExpressionStatement, "expression", Role::RequiredExpr);
        self.visit_expr(&mut stmt.stx.expr, ctx)?;
      }
      Stmt::For(stmt) => {
        let pushed = self.enter_scope(&stmt.assoc);
        let parent = NodeKind::ForStatement;
        let stmt = stmt.stx.as_mut();
        self.visit_for_init(&mut stmt.init)?;
        self.visit_opt_expr(&mut stmt.cond, Ctx::field(parent, "test", Role::OptionalExpr))?;
        self.visit_opt_expr(&mut stmt.post, Ctx::field(parent, "update", Role::OptionalExpr))?;
        self.visit_stmt(&mut stmt.body, Ctx::field(parent, "body", Role::RequiredStmt))?;
        self.exit_scope(pushed);
      }
      Stmt::If(stmt) => {
        let parent = NodeKind::IfStatement;
        let stmt = stmt.stx.as_mut();
        self.visit_expr(&mut stmt.test, Ctx::field(parent, "test", Role::RequiredExpr))?;
        self.visit_stmt(
          &mut stmt.consequent,
          Ctx::field(parent, "consequent", Role::RequiredStmt),
        )?;
        self.visit_opt_stmt(
          &mut stmt.alternate,
          Ctx::field(parent, "alternate", Role::OptionalStmt),
        )?;
      }
      Stmt::Return(stmt) => {
        let ctx = Ctx::field(NodeKind::ReturnStatement, "argument", Role::OptionalExpr);
        self.visit_opt_expr(&mut stmt.stx.value, ctx)?;
      }
      Stmt::While(stmt) => {
        let parent = NodeKind::WhileStatement;
        let stmt = stmt.stx.as_mut();
        self.visit_expr(&mut stmt.condition, Ctx::field(parent, "test", Role::RequiredExpr))?;
        self.visit_stmt(&mut stmt.body, Ctx::field(parent, "body", Role::RequiredStmt))?;
      }
      Stmt::FunctionDecl(decl) => {
        self.visit_func(&mut decl.stx.function, NodeKind::FunctionDeclaration)?;
      }
      Stmt::VarDecl(decl) => self.visit_var_decl_children(decl)?,
    };
    Ok(())
  }

  fn visit_expr_children(&mut self, node: &mut Node<Expr>) -> TransformResult<()> {
    match node.stx.as_mut() {
      Expr::ArrowFunc(arrow) => self.visit_func(&mut arrow.stx.func, NodeKind::ArrowFunction)?,
      Expr::Binary(binary) => {
        let parent = NodeKind::BinaryExpression;
        let binary = binary.stx.as_mut();
        self.visit_expr(&mut binary.left, Ctx::field(parent, "left", Role::RequiredExpr))?;
        self.visit_expr(&mut binary.right, Ctx::field(parent, "right", Role::RequiredExpr))?;
      }
      Expr::Call(call) => {
        let parent = NodeKind::CallExpression;
        let call = call.stx.as_mut();
        self.visit_expr(&mut call.callee, Ctx::field(parent, "callee", Role::RequiredExpr))?;
        self.visit_expr_list(&mut call.arguments, parent, "arguments")?;
      }
      Expr::ComputedMember(member) => {
        let parent = NodeKind::ComputedMemberExpression;
        let member = member.stx.as_mut();
        self.visit_expr(&mut member.object, Ctx::field(parent, "object", Role::RequiredExpr))?;
        self.visit_expr(&mut member.member, Ctx::field(parent, "property", Role::RequiredExpr))?;
      }
      Expr::Member(member) => {
        let ctx = Ctx::field(NodeKind::MemberExpression, "object", Role::RequiredExpr);
        self.visit_expr(&mut member.stx.left, ctx)?;
      }
      Expr::Unary(unary) => {
        let ctx = Ctx::field(NodeKind::UnaryExpression, "argument", Role::RequiredExpr);
        self.visit_expr(&mut unary.stx.argument, ctx)?;
      }
      Expr::LitArr(arr) => {
        self.visit_expr_list(&mut arr.stx.elements, NodeKind::ArrayExpression, "elements")?;
      }
      Expr::LitObj(obj) => {
        for (i, member) in obj.stx.members.iter_mut().enumerate() {
          let ctx = Ctx::index(NodeKind::ObjectExpression, "properties", i, Role::RequiredExpr);
          self.visit_expr(&mut member.stx.value, ctx)?;
        }
      }
      Expr::Id(_) | Expr::LitBool(_) | Expr::LitNull(_) | Expr::LitNum(_) | Expr::LitStr(_) => {}
    };
    Ok(())
  }

  fn visit_for_init(&mut self, init: &mut ForInit) -> TransformResult<()> {
    let ctx = Ctx::field(NodeKind::ForStatement, "init", Role::ForInit);
    let edits = match init {
      ForInit::None => return Ok(()),
      ForInit::Expr(expr) => self.run_callbacks(Phase::Enter, AnyNodeMut::Expr(expr), ctx)?,
      ForInit::Decl(decl) => self.run_callbacks(Phase::Enter, AnyNodeMut::VarDecl(decl), ctx)?,
    };
    let replaced = self.apply_for_init_edits(init, edits)?;
    match init {
      ForInit::None => return Ok(()),
      ForInit::Expr(expr) => self.visit_expr_children(expr)?,
      ForInit::Decl(decl) => self.visit_var_decl_children(decl)?,
    };
    if replaced {
      return Ok(());
    };
    let edits = match init {
      ForInit::None => return Ok(()),
      ForInit::Expr(expr) => self.run_callbacks(Phase::Exit, AnyNodeMut::Expr(expr), ctx)?,
      ForInit::Decl(decl) => self.run_callbacks(Phase::Exit, AnyNodeMut::VarDecl(decl), ctx)?,
    };
    self.apply_for_init_edits(init, edits)?;
    Ok(())
  }

  // Returns whether the init was replaced.
  fn apply_for_init_edits(&mut self, init: &mut ForInit, mut edits: Edits) -> TransformResult<bool> {
    self.take_renames(&mut edits);
    let (kind, loc) = match init {
      ForInit::None => return Ok(false),
      ForInit::Expr(expr) => (NodeKind::of_expr(&expr.stx), expr.loc),
      ForInit::Decl(decl) => (NodeKind::VariableDeclaration, decl.loc),
    };
    match edits.change {
      None => Ok(false),
      Some(Change::Remove) => {
        self.record_remove(kind, loc);
        *init = ForInit::None;
        Ok(false)
      }
      Some(Change::Replace(AnyNode::Expr(expr))) => {
        self.record_replace(kind, NodeKind::of_expr(&expr.stx), loc);
        *init = ForInit::Expr(expr);
        Ok(true)
      }
      Some(Change::Replace(AnyNode::Stmt(stmt))) => {
        let stmt_loc = stmt.loc;
        match *stmt.stx {
          Stmt::VarDecl(decl) => {
            self.record_replace(kind, NodeKind::VariableDeclaration, loc);
            *init = ForInit::Decl(decl);
            Ok(true)
          }
          _ => Err(TransformError::CategoryMismatch {
            expected: "declaration or expression",
            found: "statement",
            loc: stmt_loc,
          }),
        }
      }
    }
  }
}
