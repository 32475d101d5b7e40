use ahash::HashMap;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use parse_lite::ast::expr::IdExpr;
use parse_lite::ast::expr::IdPat;
use parse_lite::ast::node::Node;
use parse_lite::ast::stx::TopLevel;
use symbol_lite::assoc::declared_binding;
use symbol_lite::assoc::resolved_binding;
use symbol_lite::BindingId;
use symbol_lite::ScopeTree;

type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;

#[derive(VisitorMut)]
#[visitor(IdExprNode(enter), IdPatNode(enter))]
struct ApplyVisitor<'a> {
  renames: &'a HashMap<BindingId, String>,
  rewritten: usize,
}

impl ApplyVisitor<'_> {
  fn maybe_apply(&mut self, binding: Option<BindingId>, name: &mut String) {
    let Some(binding) = binding else {
      return;
    };
    let Some(new_name) = self.renames.get(&binding) else {
      return;
    };
    if name != new_name {
      name.clone_from(new_name);
      self.rewritten += 1;
    };
  }

  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    self.maybe_apply(resolved_binding(&node.assoc), &mut node.stx.name);
  }

  fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
    self.maybe_apply(declared_binding(&node.assoc), &mut node.stx.name);
  }
}

/// Renames bindings by identity: every declaration and reference tied to a binding in
/// `renames` gets the new name, leaving same-named bindings elsewhere alone. Updates `tree` to
/// match and returns the number of identifiers rewritten.
///
/// The identifiers must carry binding data from the resolve that produced `tree`.
pub fn rename_bindings(
  top_level: &mut Node<TopLevel>,
  tree: &mut ScopeTree,
  renames: &HashMap<BindingId, String>,
) -> usize {
  let mut visitor = ApplyVisitor {
    renames,
    rewritten: 0,
  };
  top_level.drive_mut(&mut visitor);
  for (&binding, name) in renames.iter() {
    tree.rename(binding, name.as_str());
  }
  tracing::debug!(bindings = renames.len(), identifiers = visitor.rewritten, "renamed");
  visitor.rewritten
}
