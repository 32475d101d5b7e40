use super::Parser;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::IdPat;
use crate::ast::expr::LitArrExpr;
use crate::ast::expr::LitBoolExpr;
use crate::ast::expr::LitNullExpr;
use crate::ast::expr::LitNumExpr;
use crate::ast::expr::LitObjExpr;
use crate::ast::expr::LitStrExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::ObjMember;
use crate::ast::expr::UnaryExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::num::number_to_string;
use crate::operator::BINARY_OPERATOR_MAPPING;
use crate::operator::UNARY_OPERATOR_MAPPING;
use crate::token::Token;
use crate::token::TT;

type ParseLevel<'a> = fn(&mut Parser<'a>) -> SyntaxResult<Node<Expr>>;

impl<'a> Parser<'a> {
  pub fn parse_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    self.parse_assignment()
  }

  pub fn parse_id_pat(&mut self) -> SyntaxResult<Node<IdPat>> {
    let t = self.require_identifier()?;
    Ok(Node::new(t.loc, IdPat { name: t.text }))
  }

  pub fn parse_assignment(&mut self) -> SyntaxResult<Node<Expr>> {
    if self.is_arrow_func_ahead() {
      return self.parse_arrow_func();
    };
    let start = self.peek().clone();
    let left = self.parse_equality()?;
    let t = self.peek();
    let Some(&operator) = BINARY_OPERATOR_MAPPING
      .get(t.text.as_str())
      .filter(|op| t.typ == TT::Operator && op.is_assignment())
    else {
      return Ok(left);
    };
    if !left.stx.is_assignment_target() {
      return Err(left.loc.error(
        SyntaxErrorType::InvalidAssignmentTarget,
        start.pos,
        Some((start.typ, start.text)),
      ));
    };
    self.consume();
    // Right associative.
    let right = self.parse_assignment()?;
    let loc = self.since(start.loc.0);
    Ok(Node::new(loc, BinaryExpr {
      operator,
      left,
      right,
    }).wrap(Expr::Binary))
  }

  // Either `x =>` or a parenthesized list whose matching `)` is followed by `=>`.
  fn is_arrow_func_ahead(&self) -> bool {
    let t = self.peek();
    if t.typ == TT::Identifier {
      return self.peek_n(1).is_operator("=>");
    };
    if !t.is_punct("(") {
      return false;
    };
    let mut depth = 0usize;
    let mut n = 0;
    loop {
      let t = self.peek_n(n);
      if t.typ == TT::EOF {
        return false;
      };
      if t.is_punct("(") {
        depth += 1;
      } else if t.is_punct(")") {
        depth -= 1;
        if depth == 0 {
          return self.peek_n(n + 1).is_operator("=>");
        };
      };
      n += 1;
    }
  }

  pub fn parse_arrow_func(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc.0;
    let mut parameters = Vec::new();
    if self.peek().typ == TT::Identifier {
      parameters.push(self.parse_id_pat()?);
    } else {
      self.require_punct("(")?;
      while !self.peek().is_punct(")") {
        parameters.push(self.parse_id_pat()?);
        if !self.consume_if_punct(",").is_match() {
          break;
        };
      }
      self.require_punct(")")?;
    };
    self.require(TT::Operator, "=>")?;
    // A `{` after `=>` always starts a block body; object literal bodies must be parenthesized.
    let body = if self.peek().is_punct("{") {
      FuncBody::Block(self.parse_func_body()?)
    } else {
      FuncBody::Expression(self.parse_assignment()?)
    };
    let loc = self.since(start);
    let func = Node::new(loc, Func {
      arrow: true,
      parameters,
      body,
    });
    Ok(Node::new(loc, ArrowFuncExpr { func }).wrap(Expr::ArrowFunc))
  }

  fn parse_binary_level(&mut self, operators: &[&str], next: ParseLevel<'a>) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc.0;
    let mut left = next(self)?;
    loop {
      let t = self.peek();
      if t.typ != TT::Operator || !operators.contains(&t.text.as_str()) {
        break;
      };
      let operator = BINARY_OPERATOR_MAPPING[t.text.as_str()];
      self.consume();
      let right = next(self)?;
      left = Node::new(self.since(start), BinaryExpr {
        operator,
        left,
        right,
      })
      .wrap(Expr::Binary);
    }
    Ok(left)
  }

  pub fn parse_equality(&mut self) -> SyntaxResult<Node<Expr>> {
    self.parse_binary_level(&["==", "!="], Parser::parse_relational)
  }

  pub fn parse_relational(&mut self) -> SyntaxResult<Node<Expr>> {
    self.parse_binary_level(&["<", ">", "<=", ">="], Parser::parse_expression)
  }

  /// Additive level: `+` and `-`.
  pub fn parse_expression(&mut self) -> SyntaxResult<Node<Expr>> {
    self.parse_binary_level(&["+", "-"], Parser::parse_term)
  }

  /// Multiplicative level: `*`, `/` and `%`.
  pub fn parse_term(&mut self) -> SyntaxResult<Node<Expr>> {
    self.parse_binary_level(&["*", "/", "%"], Parser::parse_unary)
  }

  pub fn parse_unary(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.peek();
    let operator = match t.typ {
      TT::Operator => UNARY_OPERATOR_MAPPING.get(t.text.as_str()).copied(),
      _ => None,
    };
    let Some(operator) = operator else {
      return self.parse_postfix();
    };
    let start = self.consume().loc.0;
    let argument = self.parse_unary()?;
    Ok(Node::new(self.since(start), UnaryExpr { operator, argument }).wrap(Expr::Unary))
  }

  pub fn parse_postfix(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc.0;
    let mut expr = self.parse_factor()?;
    loop {
      if self.consume_if_punct("(").is_match() {
        let arguments = self.parse_expr_list(")")?;
        expr = Node::new(self.since(start), CallExpr {
          callee: expr,
          arguments,
        })
        .wrap(Expr::Call);
      } else if self.consume_if_punct(".").is_match() {
        let name = self.require_predicate(
          |t| matches!(t.typ, TT::Identifier | TT::Keyword),
          "property name",
        )?;
        expr = Node::new(self.since(start), MemberExpr {
          left: expr,
          right: name.text,
        })
        .wrap(Expr::Member);
      } else if self.consume_if_punct("[").is_match() {
        let member = self.parse_expr()?;
        self.require_punct("]")?;
        expr = Node::new(self.since(start), ComputedMemberExpr {
          object: expr,
          member,
        })
        .wrap(Expr::ComputedMember);
      } else {
        break;
      };
    }
    Ok(expr)
  }

  /// Comma separated expressions up to and including `close`. A trailing comma is allowed.
  fn parse_expr_list(&mut self, close: &'static str) -> SyntaxResult<Vec<Node<Expr>>> {
    let mut exprs = Vec::new();
    while !self.peek().is_punct(close) {
      exprs.push(self.parse_expr()?);
      if !self.consume_if_punct(",").is_match() {
        break;
      };
    }
    self.require_punct(close)?;
    Ok(exprs)
  }

  fn parse_number(&self, t: &Token) -> SyntaxResult<f64> {
    t.text.parse::<f64>().map_err(|_| {
      t.loc
        .error(SyntaxErrorType::ExpectedSyntax("number literal"), t.pos, Some((t.typ, t.text.clone())))
    })
  }

  pub fn parse_factor(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.peek().clone();
    let expr = match (t.typ, t.text.as_str()) {
      (TT::LiteralNumber, _) => {
        let value = self.parse_number(&t)?;
        self.consume();
        Node::new(t.loc, LitNumExpr { value }).wrap(Expr::LitNum)
      }
      (TT::LiteralString, _) => {
        self.consume();
        Node::new(t.loc, LitStrExpr { value: t.text.clone() }).wrap(Expr::LitStr)
      }
      (TT::Identifier, _) => {
        self.consume();
        Node::new(t.loc, IdExpr { name: t.text.clone() }).wrap(Expr::Id)
      }
      (TT::Keyword, "true" | "false") => {
        self.consume();
        Node::new(t.loc, LitBoolExpr {
          value: t.text == "true",
        })
        .wrap(Expr::LitBool)
      }
      (TT::Keyword, "null") => {
        self.consume();
        Node::new(t.loc, LitNullExpr {}).wrap(Expr::LitNull)
      }
      (TT::Punctuation, "(") => {
        self.consume();
        let expr = self.parse_expr()?;
        self.require_punct(")")?;
        expr
      }
      (TT::Punctuation, "[") => {
        self.consume();
        let elements = self.parse_expr_list("]")?;
        Node::new(self.since(t.loc.0), LitArrExpr { elements }).wrap(Expr::LitArr)
      }
      (TT::Punctuation, "{") => self.parse_obj()?,
      _ => return Err(self.error_at_peek(SyntaxErrorType::ExpectedSyntax("expression"))),
    };
    Ok(expr)
  }

  fn parse_obj(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require_punct("{")?.loc.0;
    let mut members = Vec::new();
    while !self.peek().is_punct("}") {
      let key_tok = self.require_predicate(
        |t| {
          matches!(
            t.typ,
            TT::Identifier | TT::Keyword | TT::LiteralString | TT::LiteralNumber
          )
        },
        "property key",
      )?;
      let key = match key_tok.typ {
        TT::LiteralNumber => number_to_string(self.parse_number(&key_tok)?),
        _ => key_tok.text.clone(),
      };
      let shorthand = key_tok.typ == TT::Identifier
        && (self.peek().is_punct(",") || self.peek().is_punct("}"));
      let value = if shorthand {
        Node::new(key_tok.loc, IdExpr { name: key.clone() }).wrap(Expr::Id)
      } else {
        self.require_punct(":")?;
        self.parse_expr()?
      };
      members.push(Node::new(self.since(key_tok.loc.0), ObjMember {
        key,
        shorthand,
        value,
      }));
      if !self.consume_if_punct(",").is_match() {
        break;
      };
    }
    self.require_punct("}")?;
    Ok(Node::new(self.since(start), LitObjExpr { members }).wrap(Expr::LitObj))
  }
}
