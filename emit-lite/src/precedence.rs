use parse_lite::ast::expr::Expr;
use parse_lite::ast::node::Node;
use parse_lite::operator::Associativity;
use parse_lite::operator::OperatorName;
use parse_lite::operator::PRECEDENCE_ASSIGNMENT;
use parse_lite::operator::PRECEDENCE_POSTFIX;
use parse_lite::operator::PRECEDENCE_PRIMARY;
use parse_lite::operator::PRECEDENCE_UNARY;

/// Wrapper around a precedence value with total ordering.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Prec(u8);

impl Prec {
  pub const LOWEST: Prec = Prec(0);

  pub const fn new(value: u8) -> Self {
    Prec(value)
  }

  pub const fn tighter(self) -> Self {
    Prec(self.0 + 1)
  }
}

/// Calls and member accesses.
pub const CALL_MEMBER_PRECEDENCE: Prec = Prec::new(PRECEDENCE_POSTFIX);
/// Identifiers, literals and anything already wrapped in brackets.
pub const PRIMARY_PRECEDENCE: Prec = Prec::new(PRECEDENCE_PRIMARY);
/// Arrow functions only parse at assignment level, so they need parentheses anywhere tighter.
pub const ARROW_FUNCTION_PRECEDENCE: Prec = Prec::new(PRECEDENCE_ASSIGNMENT);
pub const UNARY_PRECEDENCE: Prec = Prec::new(PRECEDENCE_UNARY);

#[derive(Clone, Copy, Debug)]
pub enum Side {
  Left,
  Right,
}

pub fn needs_parens(child_prec: Prec, min_prec: Prec) -> bool {
  child_prec < min_prec
}

pub fn child_min_prec_for_binary(op: OperatorName, side: Side) -> Prec {
  let operator = op.operator();
  let prec = Prec::new(operator.precedence);
  match (operator.associativity, side) {
    (Associativity::Left, Side::Left) => prec,
    (Associativity::Left, Side::Right) => prec.tighter(),
    (Associativity::Right, Side::Left) => prec.tighter(),
    (Associativity::Right, Side::Right) => prec,
  }
}

/// Precedence of an expression as printed. Derived from the parser's operator table, so
/// printing without stored parenthesis flags parses back to the same tree.
pub fn expr_prec(expr: &Node<Expr>) -> Prec {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => Prec::new(binary.stx.operator.operator().precedence),
    Expr::Unary(unary) => Prec::new(unary.stx.operator.operator().precedence),
    Expr::Call(_) | Expr::Member(_) | Expr::ComputedMember(_) => CALL_MEMBER_PRECEDENCE,
    Expr::ArrowFunc(_) => ARROW_FUNCTION_PRECEDENCE,
    // Negative literals only come from rewrites and print with a leading `-`.
    Expr::LitNum(num) if num.stx.value.is_finite() && num.stx.value.is_sign_negative() => {
      UNARY_PRECEDENCE
    }
    Expr::Id(_)
    | Expr::LitArr(_)
    | Expr::LitBool(_)
    | Expr::LitNull(_)
    | Expr::LitNum(_)
    | Expr::LitObj(_)
    | Expr::LitStr(_) => PRIMARY_PRECEDENCE,
  }
}
