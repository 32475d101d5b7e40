use crate::error::TransformError;
use crate::error::TransformResult;
use ahash::HashSet;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use derive_visitor::Visitor;
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

// A reference whose binding lost all its declarations during the traversal.
struct Orphaned;

#[derive(Default, Visitor)]
#[visitor(IdPatNode(enter))]
struct DeclaredCollector {
  declared: HashSet<BindingId>,
}

impl DeclaredCollector {
  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    if let Some(binding) = declared_binding(&node.assoc) {
      self.declared.insert(binding);
    };
  }
}

#[derive(VisitorMut)]
#[visitor(IdExprNode(enter))]
struct OrphanMarker {
  declared: HashSet<BindingId>,
  marked: usize,
}

impl OrphanMarker {
  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    let Some(binding) = resolved_binding(&node.assoc) else {
      return;
    };
    if !self.declared.contains(&binding) {
      node.assoc.set(Orphaned);
      self.marked += 1;
    };
  }
}

#[derive(Default, VisitorMut)]
#[visitor(IdExprNode(enter))]
struct OrphanChecker {
  dangling: Option<TransformError>,
}

impl OrphanChecker {
  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    if node.assoc.get::<Orphaned>().is_none() {
      return;
    };
    node.assoc.remove::<Orphaned>();
    if resolved_binding(&node.assoc).is_none() && self.dangling.is_none() {
      self.dangling = Some(TransformError::DanglingReference {
        name: node.stx.name.clone(),
        loc: node.loc,
      });
    };
  }
}

/// Rebuilds `tree` from scratch after structural edits. References whose declaration was
/// removed must resolve to some other declaration in the rebuilt tree.
pub(crate) fn rebuild_scopes(
  top_level: &mut Node<TopLevel>,
  tree: &mut ScopeTree,
) -> TransformResult<()> {
  let mut collector = DeclaredCollector::default();
  top_level.drive(&mut collector);
  let mut marker = OrphanMarker {
    declared: collector.declared,
    marked: 0,
  };
  top_level.drive_mut(&mut marker);

  *tree = symbol_lite::resolve(top_level)?;

  if marker.marked == 0 {
    return Ok(());
  };
  let mut checker = OrphanChecker::default();
  top_level.drive_mut(&mut checker);
  match checker.dangling {
    Some(err) => Err(err),
    None => Ok(()),
  }
}
