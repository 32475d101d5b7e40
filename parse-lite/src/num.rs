/// Canonical source form of a number literal: the shortest text that parses back to `value`.
pub fn number_to_string(value: f64) -> String {
  if value == value.trunc() && value.abs() < 1e21 {
    format!("{}", value as i128)
  } else {
    format!("{}", value)
  }
}
