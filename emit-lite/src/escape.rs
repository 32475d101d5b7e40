use parse_lite::lex::is_valid_identifier;
use parse_lite::lex::KEYWORDS;
use parse_lite::num::number_to_string;

/// A string literal delimited by double quotes. Only the escapes the lexer decodes are
/// produced; every other character is written as is.
pub fn string_literal_double_quoted(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');
  for ch in value.chars() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      ch => out.push(ch),
    };
  }
  out.push('"');
  out
}

/// Source text for a number literal. Values the literal grammar cannot express print as
/// parenthesized expressions that evaluate to them.
pub fn number_literal(value: f64) -> String {
  if value.is_nan() {
    "(0/0)".to_string()
  } else if value == f64::INFINITY {
    "(1/0)".to_string()
  } else if value == f64::NEG_INFINITY {
    "(-1/0)".to_string()
  } else if value.is_sign_negative() {
    format!("-{}", number_to_string(-value))
  } else {
    number_to_string(value)
  }
}

/// An object literal key: bare when it lexes back as the same name or canonical number,
/// otherwise quoted.
pub fn object_key(key: &str) -> String {
  if is_valid_identifier(key) || KEYWORDS.contains(key) || is_canonical_number(key) {
    key.to_string()
  } else {
    string_literal_double_quoted(key)
  }
}

fn is_canonical_number(key: &str) -> bool {
  key.starts_with(|c: char| c.is_ascii_digit())
    && key
      .parse::<f64>()
      .is_ok_and(|value| value.is_finite() && number_to_string(value) == key)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_string_escapes() {
    assert_eq!(string_literal_double_quoted("plain"), "\"plain\"");
    assert_eq!(
      string_literal_double_quoted("a\"b\\c\nd\te\r"),
      "\"a\\\"b\\\\c\\nd\\te\\r\""
    );
    assert_eq!(string_literal_double_quoted("ünï"), "\"ünï\"");
  }

  #[test]
  fn test_number_literals() {
    assert_eq!(number_literal(1.0), "1");
    assert_eq!(number_literal(0.25), "0.25");
    assert_eq!(number_literal(-2.0), "-2");
    assert_eq!(number_literal(f64::NAN), "(0/0)");
    assert_eq!(number_literal(f64::INFINITY), "(1/0)");
  }

  #[test]
  fn test_object_keys() {
    assert_eq!(object_key("name"), "name");
    assert_eq!(object_key("if"), "if");
    assert_eq!(object_key("10"), "10");
    assert_eq!(object_key("010"), "\"010\"");
    assert_eq!(object_key("a b"), "\"a b\"");
    assert_eq!(object_key(""), "\"\"");
  }
}
