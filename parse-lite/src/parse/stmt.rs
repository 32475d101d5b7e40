use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::expr::IdPat;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForInit;
use crate::ast::stmt::ForStmt;
use crate::ast::stmt::FuncDecl;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LeadingComments;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::VarDecl;
use crate::ast::stmt::VarDeclMode;
use crate::ast::stmt::WhileStmt;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let body = self.parse_stmts(None)?;
    let end = self.peek().loc.1;
    Ok(Node::new(Loc(0, end), TopLevel { body }))
  }

  /// Parses statements until `close` (not consumed), or until the end if `close` is `None`.
  pub fn parse_stmts(&mut self, close: Option<&'static str>) -> SyntaxResult<Vec<Node<Stmt>>> {
    let mut body = Vec::new();
    loop {
      let t = self.peek();
      match close {
        None if t.typ == TT::EOF => break,
        Some(close) if t.is_punct(close) => break,
        Some(close) if t.typ == TT::EOF => {
          return Err(self.error_at_peek(SyntaxErrorType::RequiredTokenNotFound(
            TT::Punctuation,
            close,
          )))
        }
        _ => {}
      };
      let offset = t.loc.0;
      let comments = self.take_comments_before(offset);
      let mut stmt = self.parse_stmt()?;
      if !comments.is_empty() {
        stmt.assoc.set(LeadingComments(comments));
      };
      body.push(stmt);
    }
    // Comments after the last statement of a list have nothing to attach to.
    let end = self.peek().loc.0;
    self.take_comments_before(end);
    Ok(body)
  }

  fn starts_expr(&self) -> bool {
    let t = self.peek();
    match t.typ {
      TT::Identifier | TT::LiteralNumber | TT::LiteralString => true,
      TT::Keyword => matches!(t.text.as_str(), "true" | "false" | "null"),
      TT::Punctuation => t.is_punct("(") || t.is_punct("["),
      TT::Operator => matches!(t.text.as_str(), "!" | "-" | "+"),
      TT::EOF => false,
    }
  }

  pub fn parse_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let t = self.peek();
    let keyword = (t.typ == TT::Keyword).then(|| t.text.clone());
    match keyword.as_deref() {
      Some("const" | "let" | "var") => {
        let start = self.peek().loc.0;
        let decl = self.parse_var_decl()?;
        self.require_punct(";")?;
        Ok(Node::new(self.since(start), Stmt::VarDecl(decl)))
      }
      Some("function") => self.parse_func_decl(),
      Some("if") => self.parse_if(),
      Some("return") => self.parse_return(),
      Some("while") => self.parse_while(),
      Some("for") => self.parse_for(),
      _ if self.peek().is_punct("{") => self.parse_block_stmt(),
      _ if self.starts_expr() => {
        let start = self.peek().loc.0;
        let expr = self.parse_expr()?;
        self.require_punct(";")?;
        let loc = self.since(start);
        Ok(Node::new(loc, Stmt::Expr(Node::new(loc, ExprStmt { expr }))))
      }
      _ => Err(self.error_at_peek(SyntaxErrorType::ExpectedSyntax("statement"))),
    }
  }

  pub fn parse_block_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require_punct("{")?.loc.0;
    let body = self.parse_stmts(Some("}"))?;
    self.require_punct("}")?;
    let loc = self.since(start);
    Ok(Node::new(loc, Stmt::Block(Node::new(loc, BlockStmt { body }))))
  }

  /// `{ ... }` of a function. Unlike a block statement, this does not introduce its own scope.
  pub fn parse_func_body(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.require_punct("{")?;
    let body = self.parse_stmts(Some("}"))?;
    self.require_punct("}")?;
    Ok(body)
  }

  /// Parses `const|let|var name [= init]` without the trailing semicolon, so `for` headers can share it.
  pub fn parse_var_decl(&mut self) -> SyntaxResult<Node<VarDecl>> {
    let kw = self.require_predicate(
      |t| t.typ == TT::Keyword && matches!(t.text.as_str(), "const" | "let" | "var"),
      "variable declaration",
    )?;
    let mode = match kw.text.as_str() {
      "const" => VarDeclMode::Const,
      "let" => VarDeclMode::Let,
      _ => VarDeclMode::Var,
    };
    let name = self.parse_id_pat()?;
    let initializer = if mode == VarDeclMode::Const {
      self.require(TT::Operator, "=")?;
      Some(self.parse_expr()?)
    } else if self.consume_if(TT::Operator, "=").is_match() {
      Some(self.parse_expr()?)
    } else {
      None
    };
    Ok(Node::new(self.since(kw.loc.0), VarDecl {
      mode,
      name,
      initializer,
    }))
  }

  fn parse_params(&mut self) -> SyntaxResult<Vec<Node<IdPat>>> {
    self.require_punct("(")?;
    let mut parameters = Vec::new();
    while !self.peek().is_punct(")") {
      parameters.push(self.parse_id_pat()?);
      if !self.consume_if_punct(",").is_match() {
        break;
      };
    }
    self.require_punct(")")?;
    Ok(parameters)
  }

  pub fn parse_func_decl(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::Keyword, "function")?.loc.0;
    let name = self.parse_id_pat()?;
    let func_start = self.peek().loc.0;
    let parameters = self.parse_params()?;
    let body = self.parse_func_body()?;
    let function = Node::new(self.since(func_start), Func {
      arrow: false,
      parameters,
      body: FuncBody::Block(body),
    });
    let loc = self.since(start);
    Ok(Node::new(loc, Stmt::FunctionDecl(Node::new(loc, FuncDecl { name, function }))))
  }

  fn parse_paren_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    self.require_punct("(")?;
    let expr = self.parse_expr()?;
    self.require_punct(")")?;
    Ok(expr)
  }

  pub fn parse_if(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::Keyword, "if")?.loc.0;
    let test = self.parse_paren_expr()?;
    let consequent = self.parse_block_stmt()?;
    let alternate = if self.consume_if(TT::Keyword, "else").is_match() {
      if self.peek().is_keyword("if") {
        Some(self.parse_if()?)
      } else {
        Some(self.parse_block_stmt()?)
      }
    } else {
      None
    };
    let loc = self.since(start);
    Ok(Node::new(loc, Stmt::If(Node::new(loc, IfStmt {
      test,
      consequent,
      alternate,
    }))))
  }

  pub fn parse_return(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::Keyword, "return")?.loc.0;
    let value = if self.peek().is_punct(";") {
      None
    } else {
      Some(self.parse_expr()?)
    };
    self.require_punct(";")?;
    let loc = self.since(start);
    Ok(Node::new(loc, Stmt::Return(Node::new(loc, ReturnStmt { value }))))
  }

  pub fn parse_while(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::Keyword, "while")?.loc.0;
    let condition = self.parse_paren_expr()?;
    let body = self.parse_block_stmt()?;
    let loc = self.since(start);
    Ok(Node::new(loc, Stmt::While(Node::new(loc, WhileStmt { condition, body }))))
  }

  pub fn parse_for(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::Keyword, "for")?.loc.0;
    self.require_punct("(")?;
    let init = if self.peek().is_punct(";") {
      ForInit::None
    } else if ["const", "let", "var"].iter().any(|kw| self.peek().is_keyword(kw)) {
      ForInit::Decl(self.parse_var_decl()?)
    } else {
      ForInit::Expr(self.parse_expr()?)
    };
    self.require_punct(";")?;
    let cond = if self.peek().is_punct(";") {
      None
    } else {
      Some(self.parse_expr()?)
    };
    self.require_punct(";")?;
    let post = if self.peek().is_punct(")") {
      None
    } else {
      Some(self.parse_expr()?)
    };
    self.require_punct(")")?;
    let body = self.parse_block_stmt()?;
    let loc = self.since(start);
    Ok(Node::new(loc, Stmt::For(Node::new(loc, ForStmt {
      init,
      cond,
      post,
      body,
    }))))
  }
}
