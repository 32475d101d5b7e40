use crate::error::SyntaxErrorType;
use crate::lex::tokenize;
use crate::lex::tokenize_with_comments;
use crate::loc::Loc;
use crate::token::TT;
use crate::token::TT::*;

fn check<const N: usize>(code: &str, expecteds: [(TT, &str); N]) {
  let tokens = tokenize(code).unwrap();
  let actual: Vec<(TT, &str)> = tokens.iter().map(|t| (t.typ, t.text.as_str())).collect();
  let mut expected = expecteds.to_vec();
  expected.push((EOF, ""));
  assert_eq!(actual, expected, "tokens of {:?}", code);
}

#[test]
fn test_lex_concrete_declarations() {
  let tokens = tokenize("const x=1;const y=2;").unwrap();
  assert_eq!(tokens.len(), 11);
  let texts: Vec<_> = tokens[..10].iter().map(|t| t.text.as_str()).collect();
  assert_eq!(texts, ["const", "x", "=", "1", ";", "const", "y", "=", "2", ";"]);
  assert_eq!(tokens[10].typ, EOF);
  assert_eq!(tokens[10].loc, Loc(20, 20));
}

#[test]
fn test_lex_keywords_and_identifiers() {
  check("const", [(Keyword, "const")]);
  check("function", [(Keyword, "function")]);
  check("null true false", [(Keyword, "null"), (Keyword, "true"), (Keyword, "false")]);
  check("h929", [(Identifier, "h929")]);
  check("_a $b constant", [
    (Identifier, "_a"),
    (Identifier, "$b"),
    (Identifier, "constant"),
  ]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [(LiteralNumber, "1")]);
  check("929.25", [(LiteralNumber, "929.25")]);
  check("1.x", [(LiteralNumber, "1"), (Punctuation, "."), (Identifier, "x")]);
  check("1..2", [
    (LiteralNumber, "1"),
    (Punctuation, "."),
    (Punctuation, "."),
    (LiteralNumber, "2"),
  ]);
}

#[test]
fn test_lex_operators_extend_with_equals() {
  check("+ += = == != <= >= ! =>", [
    (Operator, "+"),
    (Operator, "+="),
    (Operator, "="),
    (Operator, "=="),
    (Operator, "!="),
    (Operator, "<="),
    (Operator, ">="),
    (Operator, "!"),
    (Operator, "=>"),
  ]);
  // Never longer than two characters.
  check("===", [(Operator, "=="), (Operator, "=")]);
}

#[test]
fn test_lex_strings_decode_escapes() {
  check(r#""a\nb""#, [(LiteralString, "a\nb")]);
  check(r#"'it\'s'"#, [(LiteralString, "it's")]);
  check(r#""\q\t""#, [(LiteralString, "q\t")]);
}

#[test]
fn test_lex_skips_comments() {
  check("a // comment\nb", [(Identifier, "a"), (Identifier, "b")]);
  let (tokens, comments) = tokenize_with_comments("// one\nx; // two").unwrap();
  assert_eq!(tokens.len(), 3);
  let texts: Vec<_> = comments.iter().map(|c| c.text.as_str()).collect();
  assert_eq!(texts, [" one", " two"]);
  assert_eq!(comments[0].loc, Loc(0, 6));
}

#[test]
fn test_lex_positions() {
  let tokens = tokenize("a\n  bc").unwrap();
  assert_eq!((tokens[0].pos.line, tokens[0].pos.column), (1, 1));
  assert_eq!((tokens[1].pos.line, tokens[1].pos.column), (2, 3));
  assert_eq!(tokens[1].pos.offset, 4);
  assert_eq!(tokens[1].loc, Loc(4, 6));
}

#[test]
fn test_lex_unrecognized_character() {
  let err = tokenize("let a = 1 # 2;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnrecognizedCharacter('#'));
  assert_eq!(err.loc, Loc(10, 11));
  assert_eq!((err.pos.line, err.pos.column, err.pos.offset), (1, 11, 10));
  assert!(err.is_lex_error());
}

#[test]
fn test_lex_unterminated_string() {
  let err = tokenize("x = 'abc").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnterminatedString);
  assert_eq!(err.pos.offset, 4);
  let err = tokenize("x = \"a\nb\";").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnterminatedString);
}

#[test]
fn test_lex_empty_input() {
  check("", []);
  check("   \n\t ", []);
}
