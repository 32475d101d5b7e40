use crate::err::MinifyError;
use crate::err::MinifyResult;
use crate::MinifyOptions;
use ahash::HashMap;
use ahash::HashSet;
use derive_visitor::Drive;
use derive_visitor::Visitor;
use itertools::Itertools;
use parse_lite::ast::expr::IdExpr;
use parse_lite::ast::expr::IdPat;
use parse_lite::ast::node::Node;
use parse_lite::ast::stx::TopLevel;
use parse_lite::loc::Loc;
use symbol_lite::assoc::declared_binding;
use symbol_lite::assoc::scope_id;
use symbol_lite::BindingId;
use symbol_lite::ScopeId;
use symbol_lite::ScopeKind;
use symbol_lite::ScopeTree;

/// New names chosen for bindings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenameMap {
  names: HashMap<BindingId, String>,
}

impl RenameMap {
  pub fn get(&self, binding: BindingId) -> Option<&str> {
    self.names.get(&binding).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }

  /// Entries ordered by binding.
  pub fn iter(&self) -> impl Iterator<Item = (BindingId, &str)> {
    self
      .names
      .iter()
      .map(|(&binding, name)| (binding, name.as_str()))
      .sorted_by_key(|&(binding, _)| binding)
  }

  pub(crate) fn as_map(&self) -> &HashMap<BindingId, String> {
    &self.names
  }
}

struct NameGenerator {
  counter: usize,
}

impl NameGenerator {
  fn new() -> Self {
    Self { counter: 0 }
  }

  fn next_name<F: Fn(&str) -> bool>(&mut self, allowed: F) -> String {
    loop {
      let candidate = format!("v{}", self.counter);
      self.counter += 1;
      if allowed(&candidate) {
        return candidate;
      }
    }
  }
}

/// Names of unresolved references made anywhere within each scope, including nested scopes.
fn unknown_names(tree: &ScopeTree) -> HashMap<ScopeId, HashSet<String>> {
  let mut unknown = HashMap::<ScopeId, HashSet<String>>::default();
  for reference in tree.unresolved() {
    for scope in tree.ancestors(reference.scope) {
      unknown
        .entry(scope)
        .or_default()
        .insert(reference.name.clone());
    }
  }
  unknown
}

/// Picks a short name for every binding outside pinned scopes.
///
/// Scopes are visited parent first, bindings in declaration order, and each scope restarts at
/// `v0`. A name is skipped if an enclosing scope already uses it (under its final name) or if
/// something in this scope's subtree refers to an undeclared global by that name. Sibling
/// scopes cannot see each other's bindings, so they reuse the same names.
pub fn assign_names(tree: &ScopeTree, options: &MinifyOptions) -> RenameMap {
  let unknown = unknown_names(tree);
  let mut names = HashMap::<BindingId, String>::default();
  for scope in tree.scopes() {
    if scope.kind == ScopeKind::Global && !options.mangle_toplevel {
      continue;
    };
    let mut reserved = HashSet::<String>::default();
    for ancestor in tree.ancestors(scope.id).skip(1) {
      for binding in tree.scope(ancestor).bindings() {
        let name = names
          .get(binding)
          .cloned()
          .unwrap_or_else(|| tree.binding(*binding).name.clone());
        reserved.insert(name);
      }
    }
    if let Some(globals) = unknown.get(&scope.id) {
      reserved.extend(globals.iter().cloned());
    };

    let mut generator = NameGenerator::new();
    for &binding in scope.bindings() {
      // The generator never repeats, so names within this scope stay distinct.
      let name = generator.next_name(|candidate| !reserved.contains(candidate));
      names.insert(binding, name);
    }
  }
  RenameMap { names }
}

type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;

#[derive(Default, Visitor)]
#[visitor(IdExprNode(enter), IdPatNode(enter))]
struct MissingScopeFinder {
  found: Option<(String, Loc)>,
}

impl MissingScopeFinder {
  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    if self.found.is_none() && scope_id(&node.assoc).is_none() {
      self.found = Some((node.stx.name.clone(), node.loc));
    };
  }

  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    if self.found.is_none() && declared_binding(&node.assoc).is_none() {
      self.found = Some((node.stx.name.clone(), node.loc));
    };
  }
}

/// Fails if some identifier was never resolved, e.g. one inserted after the scope tree was
/// built. Such an identifier would keep its old name while its binding is renamed.
pub(crate) fn check_scope_data(top_level: &Node<TopLevel>) -> MinifyResult<()> {
  let mut finder = MissingScopeFinder::default();
  top_level.drive(&mut finder);
  match finder.found {
    Some((name, loc)) => Err(MinifyError::StaleScopes { name, loc }),
    None => Ok(()),
  }
}
