use crate::assoc::declared_binding;
use crate::assoc::resolved_binding;
use crate::assoc::scope_id;
use crate::resolve;
use crate::BindingId;
use crate::BindingKind;
use crate::ScopeId;
use crate::ScopeKind;
use crate::ScopeTree;
use derive_visitor::Drive;
use derive_visitor::Visitor;
use parse_lite::ast::expr::IdExpr;
use parse_lite::ast::expr::IdPat;
use parse_lite::ast::node::Node;
use parse_lite::ast::stx::TopLevel;
use parse_lite::parse_source;

fn parse_and_resolve(source: &str) -> (Node<TopLevel>, ScopeTree) {
  let mut top = parse_source(source).unwrap();
  let tree = resolve(&mut top).unwrap();
  (top, tree)
}

type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;

#[derive(Default, Visitor)]
#[visitor(IdExprNode(enter), IdPatNode(enter))]
struct IdCollector {
  exprs: Vec<(String, Option<BindingId>)>,
  pats: Vec<(Option<ScopeId>, Option<BindingId>)>,
}

impl IdCollector {
  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    self
      .exprs
      .push((node.stx.name.clone(), resolved_binding(&node.assoc)));
  }

  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    self
      .pats
      .push((scope_id(&node.assoc), declared_binding(&node.assoc)));
  }
}

fn collect_ids(top: &Node<TopLevel>) -> IdCollector {
  let mut collector = IdCollector::default();
  top.drive(&mut collector);
  collector
}

fn id_exprs(top: &Node<TopLevel>) -> Vec<(String, Option<BindingId>)> {
  collect_ids(top).exprs
}

#[test]
fn test_function_scopes() {
  let (_, tree) = parse_and_resolve("function add(a, b) { return a + b; }");
  let root = tree.root();
  assert_eq!(tree.scope(root).kind, ScopeKind::Global);
  let names: Vec<_> = tree.bindings_in(root).map(|b| b.name.as_str()).collect();
  assert_eq!(names, vec!["add"]);
  assert_eq!(tree.scope(root).children.len(), 1);
  let func = tree.scope(root).children[0];
  assert_eq!(tree.scope(func).kind, ScopeKind::Function);
  let params: Vec<_> = tree
    .bindings_in(func)
    .map(|b| (b.name.as_str(), b.kind))
    .collect();
  assert_eq!(params, vec![
    ("a", BindingKind::Param),
    ("b", BindingKind::Param)
  ]);
  for b in tree.bindings_in(func) {
    assert_eq!(b.references.len(), 1);
  }
}

#[test]
fn test_references_link_to_declarations() {
  let (top, tree) = parse_and_resolve("let x = 1; function f(y) { return x + y + z; }");
  let refs = id_exprs(&top);
  let x = tree.lookup(tree.root(), "x").unwrap();
  assert_eq!(refs[0], ("x".to_string(), Some(x)));
  assert_eq!(tree.binding(refs[1].1.unwrap()).kind, BindingKind::Param);
  assert_eq!(refs[2], ("z".to_string(), None));
  assert_eq!(tree.unresolved().len(), 1);
  assert_eq!(tree.unresolved()[0].name, "z");
}

#[test]
fn test_shadowing() {
  let (top, tree) = parse_and_resolve("let x = 1; { let x = 2; x; } x;");
  let refs = id_exprs(&top);
  assert_eq!(refs.len(), 2);
  let outer = tree.lookup(tree.root(), "x").unwrap();
  let inner = refs[0].1.unwrap();
  assert_ne!(inner, outer);
  assert_eq!(tree.scope(tree.binding(inner).scope).kind, ScopeKind::Block);
  assert_eq!(refs[1].1, Some(outer));
}

#[test]
fn test_hoisting() {
  let (top, tree) = parse_and_resolve("f(); x; function f() { return 1; } var x = 2;");
  let refs = id_exprs(&top);
  assert_eq!(refs[0].1, tree.lookup(tree.root(), "f"));
  assert_eq!(refs[1].1, tree.lookup(tree.root(), "x"));
  assert!(tree.unresolved().is_empty());
}

#[test]
fn test_var_hoists_out_of_blocks() {
  let (_, tree) = parse_and_resolve("function f() { if (1) { var v = 1; let l = 2; } }");
  let func = tree.scope(tree.root()).children[0];
  let names: Vec<_> = tree.bindings_in(func).map(|b| b.name.as_str()).collect();
  assert_eq!(names, vec!["v"]);
  let block = tree.scope(func).children[0];
  let names: Vec<_> = tree.bindings_in(block).map(|b| b.name.as_str()).collect();
  assert_eq!(names, vec!["l"]);
}

#[test]
fn test_duplicate_var_merges() {
  let (_, tree) = parse_and_resolve("var a = 1; var a = 2; a;");
  let bindings: Vec<_> = tree.bindings_in(tree.root()).collect();
  assert_eq!(bindings.len(), 1);
  assert_eq!(bindings[0].declarations.len(), 2);
  assert_eq!(bindings[0].declaration().0, 4);
}

#[test]
fn test_duplicate_let_errors() {
  let mut top = parse_source("let a = 1;\nlet a = 2;").unwrap();
  let err = resolve(&mut top).unwrap_err();
  assert_eq!(err.name, "a");
  assert_eq!(err.first.0, 4);
  assert_eq!(err.duplicate.0, 15);
  assert_eq!(err.code(), "SY0001");

  let mut top = parse_source("var a; const a = 1;").unwrap();
  assert!(resolve(&mut top).is_err());
}

#[test]
fn test_same_name_in_sibling_blocks() {
  let (_, tree) = parse_and_resolve("{ let a = 1; } { let a = 2; }");
  assert_eq!(tree.bindings().count(), 2);
}

#[test]
fn test_function_name_binds_outside() {
  let (_, tree) = parse_and_resolve("function f(f) { return f; }");
  let outer = tree.lookup(tree.root(), "f").unwrap();
  assert_eq!(tree.binding(outer).kind, BindingKind::Function);
  assert!(!tree.binding(outer).is_referenced());
  let func = tree.scope(tree.root()).children[0];
  let param = tree.scope(func).get("f").unwrap();
  assert_eq!(tree.binding(param).references.len(), 1);
}

#[test]
fn test_for_scope() {
  let (_, tree) = parse_and_resolve("for (let i = 0; i < 3; i = i + 1) { i; }");
  let for_scope = tree.scope(tree.root()).children[0];
  assert_eq!(tree.scope(for_scope).kind, ScopeKind::Block);
  let i = tree.scope(for_scope).get("i").unwrap();
  let binding = tree.binding(i);
  assert_eq!(binding.references.len(), 4);
  assert_eq!(binding.mutation_count, 1);
  assert_eq!(tree.scope(for_scope).children.len(), 1);
}

#[test]
fn test_writes() {
  let (_, tree) = parse_and_resolve("let n = 0; n = n + 1; n += 2; o.n = 3;");
  let n = tree.binding(tree.lookup(tree.root(), "n").unwrap());
  assert_eq!(n.mutation_count, 2);
  let writes: Vec<_> = n.references.iter().map(|r| r.write).collect();
  assert_eq!(writes, vec![true, false, true]);
}

#[test]
fn test_arrow_params() {
  let (_, tree) = parse_and_resolve("const f = (a) => a * k;");
  let func = tree.scope(tree.root()).children[0];
  assert_eq!(tree.scope(func).kind, ScopeKind::Function);
  assert!(tree.scope(func).get("a").is_some());
  assert_eq!(tree.unresolved()[0].name, "k");
  assert_eq!(tree.unresolved()[0].scope, func);
}

#[test]
fn test_assoc_data() {
  let (top, tree) = parse_and_resolve("function f(a) { return a; }");
  let pats = collect_ids(&top).pats;
  let func = tree.scope(tree.root()).children[0];
  assert_eq!(pats, vec![
    (Some(tree.root()), tree.lookup(tree.root(), "f")),
    (Some(func), tree.lookup(func, "a")),
  ]);
}

#[test]
fn test_ancestors_and_lookup() {
  let (_, tree) = parse_and_resolve("let a; function f() { { let b; } }");
  let func = tree.scope(tree.root()).children[0];
  let block = tree.scope(func).children[0];
  let chain: Vec<_> = tree.ancestors(block).collect();
  assert_eq!(chain, vec![block, func, tree.root()]);
  assert_eq!(tree.closure_of(block), func);
  assert!(tree.lookup(block, "a").is_some());
  assert!(tree.lookup(func, "b").is_none());
}

#[test]
fn test_scope_order_is_preorder() {
  let (_, tree) = parse_and_resolve("function f() { { } } function g() { }");
  let kinds: Vec<_> = tree.scopes().map(|s| (s.id.0, s.parent.map(|p| p.0))).collect();
  assert_eq!(kinds, vec![(0, None), (1, Some(0)), (2, Some(1)), (3, Some(0))]);
}

#[test]
fn test_rename() {
  let (_, mut tree) = parse_and_resolve("let a = 1;");
  let a = tree.lookup(tree.root(), "a").unwrap();
  tree.rename(a, "b");
  assert_eq!(tree.binding(a).name, "b");
  assert_eq!(tree.lookup(tree.root(), "b"), Some(a));
  assert_eq!(tree.lookup(tree.root(), "a"), None);
}

#[test]
fn test_unresolved_diagnostics() {
  let (_, tree) = parse_and_resolve("console.log(x);");
  let diags = tree.diagnostics(diagnostics::FileId(0));
  assert_eq!(diags.len(), 2);
  assert!(diags.iter().all(|d| d.code == "SY0002" && !d.is_error()));
  assert!(diags[0].message.contains("console"));
}
