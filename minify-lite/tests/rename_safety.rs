use derive_visitor::Drive;
use derive_visitor::Visitor;
use minify_lite::minify_source;
use minify_lite::Config;
use minify_lite::MinifyOptions;
use parse_lite::ast::expr::IdExpr;
use parse_lite::ast::node::Node;
use parse_lite::parse_source;
use proptest::prelude::*;
use proptest::sample::select;
use symbol_lite::assoc::resolved_binding;
use symbol_lite::resolve;
use symbol_lite::BindingId;

type IdExprNode = Node<IdExpr>;

/// What each identifier expression refers to, in source order.
#[derive(Default, Visitor)]
#[visitor(IdExprNode(enter))]
struct ReferenceShape {
  targets: Vec<Result<BindingId, String>>,
}

impl ReferenceShape {
  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    self.targets.push(match resolved_binding(&node.assoc) {
      Some(binding) => Ok(binding),
      None => Err(node.stx.name.clone()),
    });
  }
}

fn shape(source: &str) -> Vec<Result<BindingId, String>> {
  let mut top = parse_source(source).unwrap_or_else(|err| panic!("failed to parse {source:?}: {err:?}"));
  resolve(&mut top).unwrap();
  let mut visitor = ReferenceShape::default();
  top.drive(&mut visitor);
  visitor.targets
}

// Names that minified output also uses, so collisions with globals get exercised.
fn name() -> impl Strategy<Value = String> {
  select(vec!["a", "b", "v0", "v1", "v2"]).prop_map(String::from)
}

fn expr() -> impl Strategy<Value = String> {
  let leaf = prop_oneof![name(), (0u32..10).prop_map(|n| n.to_string())];
  leaf.prop_recursive(3, 16, 2, |inner| {
    prop_oneof![
      (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("({l} + {r})")),
      (name(), inner.clone()).prop_map(|(callee, arg)| format!("{callee}({arg})")),
      (name(), inner.clone()).prop_map(|(param, body)| format!("(({param}) => {body})")),
    ]
  })
}

// `var`, functions and parameters may redeclare each other. A `let` only appears alone at the
// top of a fresh block so no declaration collides with it.
fn stmt() -> impl Strategy<Value = String> {
  let leaf = prop_oneof![
    (name(), expr()).prop_map(|(n, e)| format!("var {n} = {e};")),
    expr().prop_map(|e| format!("f({e});")),
    expr().prop_map(|e| format!("return {e};")),
    (name(), expr(), prop::collection::vec(expr(), 0..3)).prop_map(|(n, e, rest)| {
      let rest: Vec<_> = rest.into_iter().map(|r| format!("g({r});")).collect();
      format!("{{ let {n} = {e}; {} }}", rest.join(" "))
    }),
  ];
  leaf.prop_recursive(3, 24, 4, |inner| {
    (name(), name(), name(), prop::collection::vec(inner, 0..4)).prop_map(|(f, p, q, body)| {
      format!("function {f}({p}, {q}) {{ {} }}", body.join(" "))
    })
  })
}

fn program() -> impl Strategy<Value = String> {
  prop::collection::vec(stmt(), 0..5).prop_map(|stmts| stmts.join("\n"))
}

proptest! {
  #[test]
  fn prop_minified_program_refers_to_same_bindings(source in program(), mangle_toplevel in any::<bool>()) {
    let out = minify_source(&source, &Config::default(), &MinifyOptions { mangle_toplevel }).unwrap();
    prop_assert_eq!(shape(&out), shape(&source), "minified to {}", out);
  }

  #[test]
  fn prop_minify_is_stable(source in program()) {
    let options = MinifyOptions::default();
    let once = minify_source(&source, &Config::default(), &options).unwrap();
    let twice = minify_source(&once, &Config::default(), &options).unwrap();
    prop_assert_eq!(once, twice);
  }
}
