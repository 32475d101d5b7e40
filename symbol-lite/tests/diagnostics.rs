use diagnostics::files::SimpleFiles;
use diagnostics::render::render_diagnostic;
use parse_lite::parse_source;
use symbol_lite::resolve;

#[test]
fn duplicate_binding_renders_both_sites() {
  let source = "let a = 1;\nlet a = 2;\n";
  let mut files = SimpleFiles::new();
  let file = files.add("dup.js", source);
  let mut top = parse_source(source).unwrap();
  let err = resolve(&mut top).unwrap_err();
  let rendered = render_diagnostic(&files, &err.to_diagnostic(file));
  assert!(rendered.starts_with("error[SY0001]: identifier `a` has already been declared\n"));
  assert!(rendered.contains(" --> dup.js:2:5\n"));
  assert!(rendered.contains("^ identifier `a` has already been declared"));
  assert!(rendered.contains("- first declared here"));
}

#[test]
fn unresolved_reference_is_a_warning() {
  let source = "let a = b;";
  let mut files = SimpleFiles::new();
  let file = files.add("warn.js", source);
  let mut top = parse_source(source).unwrap();
  let tree = resolve(&mut top).unwrap();
  let diags = tree.diagnostics(file);
  assert_eq!(diags.len(), 1);
  let rendered = render_diagnostic(&files, &diags[0]);
  assert!(rendered.starts_with("warning[SY0002]: `b` is not declared in any enclosing scope\n"));
  assert!(rendered.contains(" --> warn.js:1:9\n"));
}
