use ast::{node::Node, stx::TopLevel};
use error::SyntaxResult;
use parse::Parser;
use token::Token;

pub mod ast;
pub mod error;
pub mod lex;
pub mod loc;
pub mod num;
pub mod operator;
pub mod parse;
pub mod token;

pub use lex::tokenize;
pub use lex::tokenize_with_comments;

/// Parses a token sequence, as produced by [`tokenize`], into a program.
pub fn parse(tokens: &[Token]) -> SyntaxResult<Node<TopLevel>> {
  let _span = tracing::debug_span!("parse", tokens = tokens.len()).entered();
  let mut parser = Parser::new(tokens);
  parser.parse_top_level()
}

/// Tokenizes and parses `source`. Comments are discarded.
pub fn parse_source(source: &str) -> SyntaxResult<Node<TopLevel>> {
  let tokens = tokenize(source)?;
  parse(&tokens)
}

/// Tokenizes and parses `source`, attaching `//` comments to the statements that follow them.
pub fn parse_source_with_comments(source: &str) -> SyntaxResult<Node<TopLevel>> {
  let (tokens, comments) = tokenize_with_comments(source)?;
  let _span = tracing::debug_span!("parse", tokens = tokens.len()).entered();
  let mut parser = Parser::new(&tokens).with_comments(comments);
  parser.parse_top_level()
}

/// Serializes the syntax tree as tagged JSON (`"$t"` names each node kind). Locations and
/// associated data are not included.
pub fn to_json(top_level: &Node<TopLevel>) -> serde_json::Result<String> {
  serde_json::to_string_pretty(top_level)
}
