use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::Comment;
use crate::token::Position;
use crate::token::Token;
use crate::token::TT;

pub mod expr;
pub mod stmt;
#[cfg(test)]
mod tests;

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    if self.matched {
      Some(self.loc)
    } else {
      None
    }
  }
}

pub struct Parser<'a> {
  tokens: &'a [Token],
  next_tok_i: usize,
  // Returned when reading past the end so the parser never has to handle a missing token.
  eof: Token,
  comments: Vec<Comment>,
  next_comment_i: usize,
}

impl<'a> Parser<'a> {
  pub fn new(tokens: &'a [Token]) -> Parser<'a> {
    let end = tokens.last().map_or(0, |t| t.loc.1);
    let pos = tokens.last().map_or(
      Position {
        line: 1,
        column: 1,
        offset: 0,
      },
      |t| t.pos,
    );
    Parser {
      tokens,
      next_tok_i: 0,
      eof: Token {
        typ: TT::EOF,
        text: String::new(),
        loc: Loc(end, end),
        pos,
      },
      comments: Vec::new(),
      next_comment_i: 0,
    }
  }

  /// Comments to attach to statements as leading comments. Must be in source order.
  pub fn with_comments(mut self, comments: Vec<Comment>) -> Parser<'a> {
    self.comments = comments;
    self
  }

  pub fn peek(&self) -> &Token {
    self.peek_n(0)
  }

  pub fn peek_n(&self, n: usize) -> &Token {
    self
      .tokens
      .get(self.next_tok_i + n)
      .filter(|t| t.typ != TT::EOF)
      .unwrap_or(&self.eof)
  }

  pub fn consume(&mut self) -> Token {
    let t = self.peek().clone();
    if t.typ != TT::EOF {
      self.next_tok_i += 1;
    };
    t
  }

  /// End offset of the most recently consumed token.
  pub fn prev_end(&self) -> usize {
    match self.next_tok_i {
      0 => self.peek().loc.0,
      i => self.tokens[i - 1].loc.1,
    }
  }

  /// Location from `start` to the end of the most recently consumed token.
  pub fn since(&self, start: usize) -> Loc {
    Loc(start, self.prev_end().max(start))
  }

  pub fn consume_if(&mut self, typ: TT, text: &str) -> MaybeToken {
    let t = self.peek();
    let matched = t.is(typ, text);
    let res = MaybeToken {
      loc: t.loc,
      matched,
    };
    if matched {
      self.next_tok_i += 1;
    };
    res
  }

  pub fn consume_if_punct(&mut self, text: &str) -> MaybeToken {
    self.consume_if(TT::Punctuation, text)
  }

  /// Creates an error at the next token, recording it as the found token.
  pub fn error_at_peek(&self, typ: SyntaxErrorType) -> SyntaxError {
    let t = self.peek();
    t.loc.error(typ, t.pos, Some((t.typ, t.text.clone())))
  }

  pub fn require(&mut self, typ: TT, text: &'static str) -> SyntaxResult<Token> {
    if !self.peek().is(typ, text) {
      return Err(self.error_at_peek(SyntaxErrorType::RequiredTokenNotFound(typ, text)));
    };
    Ok(self.consume())
  }

  pub fn require_punct(&mut self, text: &'static str) -> SyntaxResult<Token> {
    self.require(TT::Punctuation, text)
  }

  pub fn require_predicate<P: FnOnce(&Token) -> bool>(
    &mut self,
    pred: P,
    expected: &'static str,
  ) -> SyntaxResult<Token> {
    if !pred(self.peek()) {
      return Err(self.error_at_peek(SyntaxErrorType::ExpectedSyntax(expected)));
    };
    Ok(self.consume())
  }

  pub fn require_identifier(&mut self) -> SyntaxResult<Token> {
    self.require_predicate(|t| t.typ == TT::Identifier, "identifier")
  }

  /// Takes the pending comments that end before `offset`.
  pub fn take_comments_before(&mut self, offset: usize) -> Vec<Comment> {
    let start = self.next_comment_i;
    while self
      .comments
      .get(self.next_comment_i)
      .is_some_and(|c| c.loc.1 <= offset)
    {
      self.next_comment_i += 1;
    }
    self.comments[start..self.next_comment_i].to_vec()
  }
}
