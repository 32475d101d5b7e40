use crate::doc::comma_separated;
use crate::doc::concat;
use crate::doc::group;
use crate::doc::indent;
use crate::doc::space;
use crate::doc::text;
use crate::doc::Doc;
use crate::escape::number_literal;
use crate::escape::object_key;
use crate::escape::string_literal_double_quoted;
use crate::precedence::child_min_prec_for_binary;
use crate::precedence::expr_prec;
use crate::precedence::needs_parens;
use crate::precedence::Prec;
use crate::precedence::Side;
use crate::precedence::CALL_MEMBER_PRECEDENCE;
use crate::precedence::UNARY_PRECEDENCE;
use crate::Layout;
use crate::PrintOptions;
use itertools::Itertools;
use parse_lite::ast::expr::Expr;
use parse_lite::ast::expr::ObjMember;
use parse_lite::ast::func::Func;
use parse_lite::ast::func::FuncBody;
use parse_lite::ast::node::Node;
use parse_lite::ast::stmt::ForInit;
use parse_lite::ast::stmt::LeadingComments;
use parse_lite::ast::stmt::Stmt;
use parse_lite::ast::stmt::VarDecl;
use parse_lite::ast::stx::TopLevel;
use parse_lite::lex::is_valid_identifier;

pub(crate) struct Printer<'o> {
  options: &'o PrintOptions,
}

impl<'o> Printer<'o> {
  pub fn new(options: &'o PrintOptions) -> Self {
    Self { options }
  }

  fn keep_comments(&self) -> bool {
    !self.options.strip_comments && self.options.layout == Layout::Pretty
  }

  pub fn top_level(&self, top: &Node<TopLevel>) -> Doc {
    concat(self.stmt_list(&top.stx.body))
  }

  /// Statements separated by hard lines, each preceded by its comments.
  fn stmt_list(&self, stmts: &[Node<Stmt>]) -> Vec<Doc> {
    let mut docs = Vec::new();
    for (i, stmt) in stmts.iter().enumerate() {
      if i > 0 {
        docs.push(Doc::HardLine);
      };
      if self.keep_comments() {
        if let Some(LeadingComments(comments)) = stmt.assoc.get::<LeadingComments>() {
          for comment in comments {
            docs.push(text(format!("//{}", comment.text.trim_end())));
            docs.push(Doc::HardLine);
          }
        };
      };
      docs.push(self.stmt(stmt));
    }
    docs
  }

  fn block(&self, stmts: &[Node<Stmt>]) -> Doc {
    if stmts.is_empty() {
      return text("{}");
    };
    let mut body = vec![Doc::HardLine];
    body.extend(self.stmt_list(stmts));
    concat([text("{"), indent(body), Doc::HardLine, text("}")])
  }

  /// Statement positions that must hold a block. Anything else is wrapped so the output parses.
  fn block_like(&self, stmt: &Node<Stmt>) -> Doc {
    match stmt.stx.as_ref() {
      Stmt::Block(block) => self.block(&block.stx.body),
      _ => self.block(std::slice::from_ref(stmt)),
    }
  }

  fn var_decl(&self, decl: &Node<VarDecl>) -> Doc {
    let decl = decl.stx.as_ref();
    let mut docs = vec![text(decl.mode.keyword()), space(), text(&decl.name.stx.name)];
    if let Some(init) = &decl.initializer {
      docs.extend([space(), text("="), space(), self.expr(init, Prec::LOWEST)]);
    };
    concat(docs)
  }

  pub fn stmt(&self, stmt: &Node<Stmt>) -> Doc {
    match stmt.stx.as_ref() {
      Stmt::Block(block) => self.block(&block.stx.body),
      Stmt::Expr(expr_stmt) => {
        let expr = &expr_stmt.stx.expr;
        let doc = self.expr(expr, Prec::LOWEST);
        // A leading `{` would start a block.
        let doc = if starts_with_object(expr) {
          parenthesize(doc)
        } else {
          doc
        };
        concat([doc, text(";")])
      }
      Stmt::For(for_stmt) => {
        let for_stmt = for_stmt.stx.as_ref();
        let mut header = vec![text("for"), space(), text("(")];
        match &for_stmt.init {
          ForInit::None => {}
          ForInit::Expr(expr) => header.push(self.expr(expr, Prec::LOWEST)),
          ForInit::Decl(decl) => header.push(self.var_decl(decl)),
        };
        header.push(text(";"));
        if let Some(cond) = &for_stmt.cond {
          header.extend([space(), self.expr(cond, Prec::LOWEST)]);
        };
        header.push(text(";"));
        if let Some(post) = &for_stmt.post {
          header.extend([space(), self.expr(post, Prec::LOWEST)]);
        };
        header.extend([text(")"), space(), self.block_like(&for_stmt.body)]);
        concat(header)
      }
      Stmt::If(if_stmt) => {
        let if_stmt = if_stmt.stx.as_ref();
        let mut docs = vec![
          text("if"),
          space(),
          text("("),
          self.expr(&if_stmt.test, Prec::LOWEST),
          text(")"),
          space(),
          self.block_like(&if_stmt.consequent),
        ];
        if let Some(alternate) = &if_stmt.alternate {
          docs.extend([space(), text("else"), space()]);
          docs.push(match alternate.stx.as_ref() {
            Stmt::If(_) => self.stmt(alternate),
            _ => self.block_like(alternate),
          });
        };
        concat(docs)
      }
      Stmt::Return(ret) => match &ret.stx.value {
        Some(value) => concat([
          text("return"),
          space(),
          self.expr(value, Prec::LOWEST),
          text(";"),
        ]),
        None => text("return;"),
      },
      Stmt::While(while_stmt) => concat([
        text("while"),
        space(),
        text("("),
        self.expr(&while_stmt.stx.condition, Prec::LOWEST),
        text(")"),
        space(),
        self.block_like(&while_stmt.stx.body),
      ]),
      Stmt::FunctionDecl(decl) => concat([
        text("function"),
        space(),
        text(&decl.stx.name.stx.name),
        self.params(&decl.stx.function.stx),
        space(),
        self.func_body(&decl.stx.function.stx),
      ]),
      Stmt::VarDecl(decl) => concat([self.var_decl(decl), text(";")]),
    }
  }

  fn params(&self, func: &Func) -> Doc {
    let params = func.parameters.iter().map(|p| text(&p.stx.name));
    group([text("("), indent(comma_separated(params)), text(")")])
  }

  fn func_body(&self, func: &Func) -> Doc {
    match &func.body {
      FuncBody::Block(stmts) => self.block(stmts),
      FuncBody::Expression(expr) => {
        let doc = self.expr(expr, Prec::LOWEST);
        if starts_with_object(expr) {
          parenthesize(doc)
        } else {
          doc
        }
      }
    }
  }

  fn list(&self, open: &str, items: &[Node<Expr>], close: &str) -> Doc {
    let items = items.iter().map(|item| self.expr(item, Prec::LOWEST));
    group([text(open), indent(comma_separated(items)), text(close)])
  }

  fn obj_member(&self, member: &Node<ObjMember>) -> Doc {
    let member = member.stx.as_ref();
    let shorthand = is_valid_identifier(&member.key)
      && matches!(member.value.stx.as_ref(), Expr::Id(id) if id.stx.name == member.key);
    if shorthand {
      return text(&member.key);
    };
    concat([
      text(object_key(&member.key)),
      text(":"),
      space(),
      self.expr(&member.value, Prec::LOWEST),
    ])
  }

  /// `expr`, parenthesized if it binds looser than `min_prec`.
  pub fn expr(&self, expr: &Node<Expr>, min_prec: Prec) -> Doc {
    let doc = self.expr_inner(expr);
    if needs_parens(expr_prec(expr), min_prec) {
      parenthesize(doc)
    } else {
      doc
    }
  }

  fn expr_inner(&self, expr: &Node<Expr>) -> Doc {
    match expr.stx.as_ref() {
      Expr::ArrowFunc(arrow) => {
        let func = arrow.stx.func.stx.as_ref();
        concat([
          self.params(func),
          space(),
          text("=>"),
          space(),
          self.func_body(func),
        ])
      }
      Expr::Binary(binary) => {
        let binary = binary.stx.as_ref();
        let op = binary.operator;
        let left = self.expr(&binary.left, child_min_prec_for_binary(op, Side::Left));
        let right = self.expr(&binary.right, child_min_prec_for_binary(op, Side::Right));
        // `x = () => {...}` keeps the function on the same line as the operator.
        if matches!(binary.right.stx.as_ref(), Expr::ArrowFunc(_)) {
          return concat([left, space(), text(op.text()), space(), right]);
        };
        group([left, space(), text(op.text()), indent([Doc::Line, right])])
      }
      Expr::Call(call) => concat([
        self.expr(&call.stx.callee, CALL_MEMBER_PRECEDENCE),
        self.list("(", &call.stx.arguments, ")"),
      ]),
      Expr::ComputedMember(member) => concat([
        self.expr(&member.stx.object, CALL_MEMBER_PRECEDENCE),
        text("["),
        self.expr(&member.stx.member, Prec::LOWEST),
        text("]"),
      ]),
      Expr::Id(id) => text(&id.stx.name),
      Expr::Member(member) => concat([
        self.expr(&member.stx.left, CALL_MEMBER_PRECEDENCE),
        text("."),
        text(&member.stx.right),
      ]),
      Expr::Unary(unary) => concat([
        text(unary.stx.operator.text()),
        self.expr(&unary.stx.argument, UNARY_PRECEDENCE),
      ]),
      Expr::LitArr(arr) => self.list("[", &arr.stx.elements, "]"),
      Expr::LitBool(b) => text(if b.stx.value { "true" } else { "false" }),
      Expr::LitNull(_) => text("null"),
      Expr::LitNum(num) => text(number_literal(num.stx.value)),
      Expr::LitObj(obj) => {
        if obj.stx.members.is_empty() {
          return text("{}");
        };
        let members = obj.stx.members.iter().map(|m| self.obj_member(m)).collect_vec();
        group([
          text("{"),
          indent([Doc::Line].into_iter().chain(comma_separated(members))),
          Doc::Line,
          text("}"),
        ])
      }
      Expr::LitStr(s) => text(string_literal_double_quoted(&s.stx.value)),
    }
  }
}

fn parenthesize(doc: Doc) -> Doc {
  concat([text("("), doc, text(")")])
}

/// Whether the printed expression's first token is the `{` of an object literal.
fn starts_with_object(expr: &Node<Expr>) -> bool {
  let leftmost = match expr.stx.as_ref() {
    Expr::LitObj(_) => return true,
    Expr::Binary(binary) => &binary.stx.left,
    Expr::Call(call) => &call.stx.callee,
    Expr::ComputedMember(member) => &member.stx.object,
    Expr::Member(member) => &member.stx.left,
    _ => return false,
  };
  // A parenthesized operand starts with `(` instead.
  if needs_parens(expr_prec(leftmost), leftmost_min_prec(expr)) {
    return false;
  };
  starts_with_object(leftmost)
}

fn leftmost_min_prec(expr: &Node<Expr>) -> Prec {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => child_min_prec_for_binary(binary.stx.operator, Side::Left),
    _ => CALL_MEMBER_PRECEDENCE,
  }
}
