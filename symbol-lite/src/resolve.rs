use crate::assoc::scope_id;
use crate::assoc::AssignmentTarget;
use crate::assoc::ResolvedBinding;
use crate::scope::Reference;
use crate::scope::ScopeTree;
use crate::scope::UnresolvedReference;
use derive_visitor::VisitorMut;
use parse_lite::ast::expr::BinaryExpr;
use parse_lite::ast::expr::Expr;
use parse_lite::ast::expr::IdExpr;
use parse_lite::ast::node::Node;

type BinaryExprNode = Node<BinaryExpr>;
type IdExprNode = Node<IdExpr>;

/// Second pass: links every identifier reference to the binding it refers to. Runs after all
/// declarations exist, so references before a hoisted declaration still resolve.
#[derive(VisitorMut)]
#[visitor(BinaryExprNode(enter), IdExprNode(enter))]
pub(crate) struct ResolveVisitor<'a> {
  pub tree: &'a mut ScopeTree,
}

impl<'a> ResolveVisitor<'a> {
  fn enter_binary_expr_node(&mut self, node: &mut BinaryExprNode) {
    if !node.stx.operator.is_assignment() {
      return;
    };
    if let Expr::Id(target) = node.stx.left.stx.as_mut() {
      target.assoc.set(AssignmentTarget);
    };
  }

  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    let write = node.assoc.get::<AssignmentTarget>().is_some();
    node.assoc.remove::<AssignmentTarget>();
    let scope = scope_id(&node.assoc).unwrap_or(self.tree.root());
    let resolved = self.tree.lookup(scope, &node.stx.name);
    match resolved {
      Some(binding) => self.tree.add_reference(binding, Reference {
        loc: node.loc,
        scope,
        write,
      }),
      None => self.tree.add_unresolved(UnresolvedReference {
        name: node.stx.name.clone(),
        loc: node.loc,
        scope,
      }),
    };
    node.assoc.set(ResolvedBinding(resolved));
  }
}
