use crate::assoc::DeclaredBinding;
use crate::assoc::IntroducedScope;
use crate::error::DuplicateBindingError;
use crate::scope::BindingKind;
use crate::scope::ScopeId;
use crate::scope::ScopeKind;
use crate::scope::ScopeTree;
use derive_visitor::VisitorMut;
use parse_lite::ast::expr::IdExpr;
use parse_lite::ast::expr::IdPat;
use parse_lite::ast::func::Func;
use parse_lite::ast::node::Node;
use parse_lite::ast::stmt::BlockStmt;
use parse_lite::ast::stmt::ForStmt;
use parse_lite::ast::stmt::FuncDecl;
use parse_lite::ast::stmt::VarDecl;
use parse_lite::ast::stmt::VarDeclMode;
use parse_lite::loc::Loc;

type BlockStmtNode = Node<BlockStmt>;
type ForStmtNode = Node<ForStmt>;
type FuncNode = Node<Func>;
type FuncDeclNode = Node<FuncDecl>;
type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type VarDeclNode = Node<VarDecl>;

/// First pass: builds the scope tree and declares every binding, so that the resolve pass sees
/// hoisted declarations regardless of where they appear.
#[derive(VisitorMut)]
#[visitor(
  BlockStmtNode(enter, exit),
  ForStmtNode(enter, exit),
  FuncNode(enter, exit),
  FuncDeclNode(enter, exit),
  IdExprNode(enter),
  IdPatNode(enter),
  VarDeclNode(enter, exit)
)]
pub(crate) struct DeclareVisitor {
  pub tree: ScopeTree,
  scope_stack: Vec<ScopeId>,
  // What the next `IdPat` declares. Every `IdPat` sits directly under a declaration, a
  // function's parameter list or a function declaration's name.
  kind_stack: Vec<BindingKind>,
  pub error: Option<DuplicateBindingError>,
}

impl DeclareVisitor {
  pub fn new(tree: ScopeTree) -> DeclareVisitor {
    let root = tree.root();
    DeclareVisitor {
      tree,
      scope_stack: vec![root],
      kind_stack: Vec::new(),
      error: None,
    }
  }

  fn current(&self) -> ScopeId {
    *self.scope_stack.last().unwrap()
  }

  fn push_scope(&mut self, kind: ScopeKind, loc: Loc) -> ScopeId {
    let id = self.tree.add_scope(self.current(), kind, loc);
    self.scope_stack.push(id);
    id
  }

  fn pop_scope(&mut self) {
    self.scope_stack.pop().unwrap();
  }

  fn enter_block_stmt_node(&mut self, node: &mut BlockStmtNode) {
    let id = self.push_scope(ScopeKind::Block, node.loc);
    node.assoc.set(IntroducedScope(id));
  }

  fn exit_block_stmt_node(&mut self, _node: &mut BlockStmtNode) {
    self.pop_scope();
  }

  fn enter_for_stmt_node(&mut self, node: &mut ForStmtNode) {
    let id = self.push_scope(ScopeKind::Block, node.loc);
    node.assoc.set(IntroducedScope(id));
  }

  fn exit_for_stmt_node(&mut self, _node: &mut ForStmtNode) {
    self.pop_scope();
  }

  fn enter_func_node(&mut self, node: &mut FuncNode) {
    let id = self.push_scope(ScopeKind::Function, node.loc);
    node.assoc.set(IntroducedScope(id));
    self.kind_stack.push(BindingKind::Param);
  }

  fn exit_func_node(&mut self, _node: &mut FuncNode) {
    self.kind_stack.pop().unwrap();
    self.pop_scope();
  }

  // The name is visited before the function, so it lands in the enclosing scope.
  fn enter_func_decl_node(&mut self, _node: &mut FuncDeclNode) {
    self.kind_stack.push(BindingKind::Function);
  }

  fn exit_func_decl_node(&mut self, _node: &mut FuncDeclNode) {
    self.kind_stack.pop().unwrap();
  }

  fn enter_var_decl_node(&mut self, node: &mut VarDeclNode) {
    self.kind_stack.push(match node.stx.mode {
      VarDeclMode::Const => BindingKind::Const,
      VarDeclMode::Let => BindingKind::Let,
      VarDeclMode::Var => BindingKind::Var,
    });
  }

  fn exit_var_decl_node(&mut self, _node: &mut VarDeclNode) {
    self.kind_stack.pop().unwrap();
  }

  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    node.assoc.set(self.current());
  }

  fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
    let scope = self.current();
    node.assoc.set(scope);
    let kind = *self.kind_stack.last().unwrap();
    let target = if kind.is_hoisted() {
      self.tree.closure_of(scope)
    } else {
      scope
    };
    match self.tree.declare(target, &node.stx.name, kind, node.loc) {
      Ok(id) => node.assoc.set(DeclaredBinding(id)),
      Err(err) => {
        node.assoc.remove::<DeclaredBinding>();
        self.error.get_or_insert(err);
      }
    };
  }
}
