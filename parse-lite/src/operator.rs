use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentDivision,
  AssignmentMultiplication,
  AssignmentRemainder,
  AssignmentSubtraction,
  Call,
  ComputedMemberAccess,
  Division,
  Equality,
  GreaterThan,
  GreaterThanOrEqual,
  Inequality,
  LessThan,
  LessThanOrEqual,
  LogicalNot,
  MemberAccess,
  Multiplication,
  Remainder,
  Subtraction,
  UnaryNegation,
  UnaryPlus,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }

  pub fn operator(self) -> &'static Operator {
    &OPERATORS[&self]
  }

  /// Source text of the operator, e.g. `+=`. Empty for call and computed member access.
  pub fn text(self) -> &'static str {
    self.operator().text
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Debug)]
pub struct Operator {
  pub name: OperatorName,
  pub text: &'static str,
  pub precedence: u8,
  pub associativity: Associativity,
}

// Precedence levels follow ECMAScript; higher binds tighter.
pub const PRECEDENCE_ASSIGNMENT: u8 = 2;
pub const PRECEDENCE_EQUALITY: u8 = 8;
pub const PRECEDENCE_RELATIONAL: u8 = 9;
pub const PRECEDENCE_ADDITIVE: u8 = 11;
pub const PRECEDENCE_MULTIPLICATIVE: u8 = 12;
pub const PRECEDENCE_UNARY: u8 = 14;
pub const PRECEDENCE_POSTFIX: u8 = 17;
pub const PRECEDENCE_PRIMARY: u8 = 20;

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;
  let mut map = HashMap::<OperatorName, Operator>::new();
  let mut add = |name, text, precedence, associativity| {
    map.insert(name, Operator { name, text, precedence, associativity });
  };
  add(Assignment, "=", PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentAddition, "+=", PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentDivision, "/=", PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentMultiplication, "*=", PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentRemainder, "%=", PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentSubtraction, "-=", PRECEDENCE_ASSIGNMENT, Right);
  add(Equality, "==", PRECEDENCE_EQUALITY, Left);
  add(Inequality, "!=", PRECEDENCE_EQUALITY, Left);
  add(GreaterThan, ">", PRECEDENCE_RELATIONAL, Left);
  add(GreaterThanOrEqual, ">=", PRECEDENCE_RELATIONAL, Left);
  add(LessThan, "<", PRECEDENCE_RELATIONAL, Left);
  add(LessThanOrEqual, "<=", PRECEDENCE_RELATIONAL, Left);
  add(Addition, "+", PRECEDENCE_ADDITIVE, Left);
  add(Subtraction, "-", PRECEDENCE_ADDITIVE, Left);
  add(Division, "/", PRECEDENCE_MULTIPLICATIVE, Left);
  add(Multiplication, "*", PRECEDENCE_MULTIPLICATIVE, Left);
  add(Remainder, "%", PRECEDENCE_MULTIPLICATIVE, Left);
  add(LogicalNot, "!", PRECEDENCE_UNARY, Right);
  add(UnaryNegation, "-", PRECEDENCE_UNARY, Right);
  add(UnaryPlus, "+", PRECEDENCE_UNARY, Right);
  add(Call, "", PRECEDENCE_POSTFIX, Left);
  add(ComputedMemberAccess, "", PRECEDENCE_POSTFIX, Left);
  add(MemberAccess, ".", PRECEDENCE_POSTFIX, Left);
  map
});

/// Binary (and assignment) operators keyed by their source text.
#[rustfmt::skip]
pub static BINARY_OPERATOR_MAPPING: Lazy<HashMap<&'static str, OperatorName>> = Lazy::new(|| {
  use OperatorName::*;
  let mut map = HashMap::<&'static str, OperatorName>::new();
  for name in [
    Addition, Assignment, AssignmentAddition, AssignmentDivision, AssignmentMultiplication,
    AssignmentRemainder, AssignmentSubtraction, Division, Equality, GreaterThan,
    GreaterThanOrEqual, Inequality, LessThan, LessThanOrEqual, Multiplication, Remainder,
    Subtraction,
  ] {
    map.insert(name.text(), name);
  }
  map
});

pub static UNARY_OPERATOR_MAPPING: Lazy<HashMap<&'static str, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, OperatorName>::new();
  map.insert("!", OperatorName::LogicalNot);
  map.insert("-", OperatorName::UnaryNegation);
  map.insert("+", OperatorName::UnaryPlus);
  map
});

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn binary_mapping_round_trips_text() {
    for (text, name) in BINARY_OPERATOR_MAPPING.iter() {
      assert_eq!(name.text(), *text);
    }
    assert_eq!(BINARY_OPERATOR_MAPPING["+="], OperatorName::AssignmentAddition);
  }

  #[test]
  fn multiplicative_binds_tighter_than_additive() {
    assert!(
      OperatorName::Multiplication.operator().precedence
        > OperatorName::Addition.operator().precedence
    );
    assert_eq!(
      OperatorName::Assignment.operator().associativity,
      Associativity::Right
    );
  }
}
