use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::stmt::ForInit;
use crate::ast::stmt::LeadingComments;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::VarDeclMode;
use crate::error::SyntaxErrorType;
use crate::lex::tokenize;
use crate::loc::Loc;
use crate::parse_source;
use crate::parse_source_with_comments;
use crate::token::TT;
use serde_json::json;
use serde_json::Value;

fn body_json(source: &str) -> Value {
  let top = parse_source(source).unwrap();
  serde_json::to_value(&top).unwrap()["body"].clone()
}

fn first_expr(source: &str) -> Value {
  body_json(source)[0]["expr"].clone()
}

fn error_of(source: &str) -> SyntaxErrorType {
  parse_source(source).unwrap_err().typ
}

#[test]
fn test_parser() {
  let tokens = tokenize("let x = 1;").unwrap();
  let mut p = Parser::new(&tokens);
  assert_eq!(p.next_tok_i, 0);

  let t = p.peek();
  assert_eq!(t.text, "let");
  assert_eq!(p.next_tok_i, 0);

  let t = p.consume();
  assert_eq!(t.typ, TT::Keyword);
  assert_eq!(p.next_tok_i, 1);
  assert_eq!(p.prev_end(), 3);

  assert!(!p.consume_if_punct(";").is_match());
  assert_eq!(p.consume_if(TT::Identifier, "x").match_loc(), Some(Loc(4, 5)));

  // Reading past the end keeps returning EOF.
  for _ in 0..10 {
    p.consume();
  }
  assert_eq!(p.peek().typ, TT::EOF);
  assert_eq!(p.peek().loc, Loc(10, 10));
}

#[test]
fn test_parse_concrete_declarations() {
  let top = parse_source("const x=1;const y=2;").unwrap();
  assert_eq!(top.stx.body.len(), 2);
  for (stmt, name) in top.stx.body.iter().zip(["x", "y"]) {
    let Stmt::VarDecl(decl) = stmt.stx.as_ref() else {
      panic!("expected a variable declaration");
    };
    assert_eq!(decl.stx.mode, VarDeclMode::Const);
    assert_eq!(decl.stx.name.stx.name, name);
  }
  assert_eq!(top.stx.body[1].loc, Loc(10, 20));
}

#[test]
fn test_parse_precedence_and_associativity() {
  assert_eq!(
    first_expr("a + b * c;"),
    json!({
      "$t": "Binary",
      "operator": "Addition",
      "left": { "$t": "Id", "name": "a" },
      "right": {
        "$t": "Binary",
        "operator": "Multiplication",
        "left": { "$t": "Id", "name": "b" },
        "right": { "$t": "Id", "name": "c" },
      },
    })
  );
  // Left associative.
  assert_eq!(
    first_expr("a - b - c;"),
    json!({
      "$t": "Binary",
      "operator": "Subtraction",
      "left": {
        "$t": "Binary",
        "operator": "Subtraction",
        "left": { "$t": "Id", "name": "a" },
        "right": { "$t": "Id", "name": "b" },
      },
      "right": { "$t": "Id", "name": "c" },
    })
  );
  // Parentheses only group.
  assert_eq!(
    first_expr("(a + b) * c;")["left"]["operator"],
    json!("Addition")
  );
  assert_eq!(
    first_expr("a < b == c > d;")["operator"],
    json!("Equality")
  );
}

#[test]
fn test_parse_assignment_is_right_associative() {
  let expr = first_expr("a = b += 1;");
  assert_eq!(expr["operator"], json!("Assignment"));
  assert_eq!(expr["right"]["operator"], json!("AssignmentAddition"));
  assert_eq!(expr["right"]["right"], json!({ "$t": "LitNum", "value": 1.0 }));

  assert_eq!(first_expr("o.p = 2;")["left"]["$t"], json!("Member"));
  assert_eq!(first_expr("o[k] = 2;")["left"]["$t"], json!("ComputedMember"));
}

#[test]
fn test_parse_invalid_assignment_target() {
  let err = parse_source("1 = 2;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
  assert_eq!(err.loc, Loc(0, 1));
  assert_eq!(error_of("f() = 2;"), SyntaxErrorType::InvalidAssignmentTarget);
}

#[test]
fn test_parse_unary() {
  assert_eq!(
    first_expr("!-x;"),
    json!({
      "$t": "Unary",
      "operator": "LogicalNot",
      "argument": {
        "$t": "Unary",
        "operator": "UnaryNegation",
        "argument": { "$t": "Id", "name": "x" },
      },
    })
  );
  assert_eq!(first_expr("-a * b;")["left"]["$t"], json!("Unary"));
}

#[test]
fn test_parse_postfix_chain() {
  assert_eq!(
    first_expr("a.b(c, 1)[d];"),
    json!({
      "$t": "ComputedMember",
      "object": {
        "$t": "Call",
        "callee": {
          "$t": "Member",
          "left": { "$t": "Id", "name": "a" },
          "right": "b",
        },
        "arguments": [
          { "$t": "Id", "name": "c" },
          { "$t": "LitNum", "value": 1.0 },
        ],
      },
      "member": { "$t": "Id", "name": "d" },
    })
  );
  // Keywords are valid property names.
  assert_eq!(first_expr("a.if;")["right"], json!("if"));
}

#[test]
fn test_parse_arrow_functions() {
  let init = body_json("const f = (a, b) => a + b;")[0]["initializer"].clone();
  assert_eq!(init["$t"], json!("ArrowFunc"));
  assert_eq!(init["func"]["arrow"], json!(true));
  assert_eq!(
    init["func"]["parameters"],
    json!([{ "name": "a" }, { "name": "b" }])
  );
  assert_eq!(init["func"]["body"]["Expression"]["operator"], json!("Addition"));

  let expr = first_expr("g(x => { return x; });");
  let arrow = &expr["arguments"][0];
  assert_eq!(arrow["func"]["parameters"], json!([{ "name": "x" }]));
  assert_eq!(arrow["func"]["body"]["Block"][0]["$t"], json!("Return"));

  assert_eq!(first_expr("(() => 1);")["func"]["parameters"], json!([]));
  // Not an arrow function: the parenthesized list is not followed by `=>`.
  assert_eq!(first_expr("(a) + (b);")["$t"], json!("Binary"));
}

#[test]
fn test_parse_literals() {
  assert_eq!(
    first_expr("[1, 'two', true, null,];"),
    json!({
      "$t": "LitArr",
      "elements": [
        { "$t": "LitNum", "value": 1.0 },
        { "$t": "LitStr", "value": "two" },
        { "$t": "LitBool", "value": true },
        { "$t": "LitNull" },
      ],
    })
  );
  assert_eq!(
    first_expr("({ a: 1, \"b c\": 2, 3: x, d });"),
    json!({
      "$t": "LitObj",
      "members": [
        { "key": "a", "value": { "$t": "LitNum", "value": 1.0 } },
        { "key": "b c", "value": { "$t": "LitNum", "value": 2.0 } },
        { "key": "3", "value": { "$t": "Id", "name": "x" } },
        { "key": "d", "value": { "$t": "Id", "name": "d" } },
      ],
    })
  );
  assert_eq!(first_expr("({});"), json!({ "$t": "LitObj", "members": [] }));
}

#[test]
fn test_parse_statements() {
  let body = body_json(
    "function f(a) { if (a) { return; } else if (b) { a = 1; } else { } } while (x) { } for (let i = 0; i < 3; i += 1) { } for (;;) { }",
  );
  assert_eq!(body[0]["$t"], json!("FunctionDecl"));
  assert_eq!(body[0]["name"]["name"], json!("f"));
  let if_stmt = &body[0]["function"]["body"]["Block"][0];
  assert_eq!(if_stmt["$t"], json!("If"));
  assert_eq!(if_stmt["consequent"]["body"][0], json!({ "$t": "Return", "value": null }));
  assert_eq!(if_stmt["alternate"]["$t"], json!("If"));
  assert_eq!(if_stmt["alternate"]["alternate"], json!({ "$t": "Block", "body": [] }));
  assert_eq!(body[1]["$t"], json!("While"));
  assert_eq!(body[2]["init"]["Decl"]["mode"], json!("Let"));
  assert_eq!(body[2]["post"]["operator"], json!("AssignmentAddition"));
  assert_eq!(body[3]["init"], json!("None"));
  assert_eq!(body[3]["cond"], json!(null));
}

#[test]
fn test_parse_for_init_expression() {
  let top = parse_source("for (i = 0; i < n; i = i + 1) { f(i); }").unwrap();
  let Stmt::For(for_stmt) = top.stx.body[0].stx.as_ref() else {
    panic!("expected for");
  };
  assert!(matches!(for_stmt.stx.init, ForInit::Expr(_)));
  assert!(matches!(
    for_stmt.stx.cond.as_ref().map(|c| c.stx.as_ref()),
    Some(Expr::Binary(_))
  ));
}

#[test]
fn test_parse_let_and_var_without_initializer() {
  let body = body_json("let a; var b;");
  assert_eq!(body[0]["initializer"], json!(null));
  assert_eq!(body[1]["mode"], json!("Var"));
}

#[test]
fn test_parse_errors() {
  // No automatic semicolon insertion.
  assert_eq!(
    error_of("let a = 1\nlet b = 2;"),
    SyntaxErrorType::RequiredTokenNotFound(TT::Punctuation, ";")
  );
  assert_eq!(
    error_of("else { }"),
    SyntaxErrorType::ExpectedSyntax("statement")
  );
  assert_eq!(
    error_of("f(1;"),
    SyntaxErrorType::RequiredTokenNotFound(TT::Punctuation, ")")
  );
  assert_eq!(
    error_of("const a;"),
    SyntaxErrorType::RequiredTokenNotFound(TT::Operator, "=")
  );
  assert_eq!(
    error_of("{ a;"),
    SyntaxErrorType::RequiredTokenNotFound(TT::Punctuation, "}")
  );
  assert_eq!(error_of("a + ;"), SyntaxErrorType::ExpectedSyntax("expression"));
  assert_eq!(error_of("if (a) b;"), SyntaxErrorType::RequiredTokenNotFound(TT::Punctuation, "{"));

  let err = parse_source("let x = 1 +;").unwrap_err();
  assert_eq!(err.actual_token, Some((TT::Punctuation, ";".to_string())));
  assert_eq!((err.pos.line, err.pos.column), (1, 12));
}

#[test]
fn test_parse_attaches_leading_comments() {
  let top = parse_source_with_comments(
    "// first\n// second\nlet a = 1;\nfunction f() {\n  // inner\n  return a;\n  // dropped\n}\n// trailing\n",
  )
  .unwrap();
  let comments = top.stx.body[0].assoc.get::<LeadingComments>().unwrap();
  let texts: Vec<_> = comments.0.iter().map(|c| c.text.as_str()).collect();
  assert_eq!(texts, [" first", " second"]);
  assert!(top.stx.body[1].assoc.get::<LeadingComments>().is_none());

  let Stmt::FunctionDecl(func) = top.stx.body[1].stx.as_ref() else {
    panic!("expected function");
  };
  let crate::ast::func::FuncBody::Block(body) = &func.stx.function.stx.body else {
    panic!("expected block body");
  };
  let inner = body[0].assoc.get::<LeadingComments>().unwrap();
  assert_eq!(inner.0[0].text, " inner");
}

#[test]
fn test_parse_empty_program() {
  let top = parse_source("// only a comment").unwrap();
  assert!(top.stx.body.is_empty());
}
