use crate::doc::fits_flat;
use crate::doc::Doc;
use crate::emitter::Emitter;
use crate::Layout;
use crate::PrintOptions;

struct Renderer<'o> {
  options: &'o PrintOptions,
  out: Emitter,
  indent: usize,
}

impl<'o> Renderer<'o> {
  fn compact(&self) -> bool {
    self.options.layout == Layout::Compact
  }

  fn render(&mut self, doc: &Doc, flat: bool) {
    match doc {
      Doc::Text(text) => {
        if text.chars().all(char::is_whitespace) {
          if !self.compact() && !text.is_empty() {
            self.out.write_space();
          };
        } else {
          self.out.write_token(text);
        };
      }
      Doc::Line => {
        if self.compact() {
          // Nothing.
        } else if flat {
          self.out.write_space();
        } else {
          self.out.write_newline(self.indent);
        };
      }
      Doc::HardLine => {
        if !self.compact() {
          self.out.write_newline(self.indent);
        };
      }
      Doc::Group(docs) => {
        let flat = flat || self.compact() || self.fits(docs);
        for doc in docs {
          self.render(doc, flat);
        }
      }
      Doc::Indent(docs) => {
        self.indent += self.options.indent_width;
        for doc in docs {
          self.render(doc, flat);
        }
        self.indent -= self.options.indent_width;
      }
    }
  }

  fn fits(&self, docs: &[Doc]) -> bool {
    let Some(remaining) = self.options.print_width.checked_sub(self.out.column()) else {
      return false;
    };
    fits_flat(docs, remaining, self.out.trailing())
  }
}

/// Lays out `doc`. In pretty layout each group is rendered flat when its flat width, measured
/// from the current column, fits within `print_width`; otherwise its `Line`s become newlines
/// and nested groups get the same choice. Compact layout renders everything flat with no
/// optional whitespace.
pub fn render(doc: &Doc, options: &PrintOptions) -> String {
  let _span = tracing::trace_span!("render", layout = ?options.layout).entered();
  let mut renderer = Renderer {
    options,
    out: Emitter::new(),
    indent: 0,
  };
  renderer.render(doc, false);
  renderer.out.into_string()
}

/// [`render`] with pretty layout, two-space indentation and the given width.
pub fn render_width(doc: &Doc, width: usize) -> String {
  render(doc, &PrintOptions {
    print_width: width,
    indent_width: 2,
    layout: Layout::Pretty,
    strip_comments: false,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::doc::group;
  use crate::doc::indent;
  use crate::doc::text;

  fn call(args: &[&str]) -> Doc {
    let mut inner = Vec::new();
    for (i, arg) in args.iter().enumerate() {
      if i > 0 {
        inner.push(text(","));
      };
      inner.push(Doc::Line);
      inner.push(text(*arg));
    }
    group([text("f("), indent(inner), Doc::Line, text(")")])
  }

  #[test]
  fn test_group_fits_flat() {
    assert_eq!(render_width(&call(&["a", "b"]), 80), "f( a, b )");
  }

  #[test]
  fn test_group_breaks_when_too_wide() {
    assert_eq!(
      render_width(&call(&["alpha", "beta"]), 10),
      "f(\n  alpha,\n  beta\n)"
    );
  }

  #[test]
  fn test_width_is_measured_from_current_column() {
    let doc = group([text("0123456789"), group([text("("), Doc::Line, text(")")])]);
    // The outer group does not fit, the inner one starts at column 10.
    assert_eq!(render_width(&doc, 12), "0123456789(\n)");
    assert_eq!(render_width(&doc, 13), "0123456789( )");
  }

  #[test]
  fn test_width_counts_separator_spaces() {
    // `x - -a` is six columns wide once the signs are kept apart.
    let doc = group([text("x"), Doc::Line, text("-"), text("-"), text("a")]);
    assert_eq!(render_width(&doc, 6), "x - -a");
    assert_eq!(render_width(&doc, 5), "x\n- -a");
    // A group starting right after a word pays for the space before its number.
    let doc = group([text("return"), group([text("1"), Doc::Line, text("2")])]);
    assert_eq!(render_width(&doc, 10), "return 1 2");
    assert_eq!(render_width(&doc, 9), "return 1\n2");
  }

  #[test]
  fn test_hard_line_breaks_enclosing_group() {
    let doc = group([text("a"), Doc::Line, text("b"), Doc::HardLine, text("c")]);
    assert_eq!(render_width(&doc, 80), "a\nb\nc");
  }

  #[test]
  fn test_compact_drops_optional_whitespace() {
    let doc = group([text("a"), text(" "), text("="), Doc::Line, text("1"), Doc::HardLine]);
    let options = PrintOptions {
      layout: Layout::Compact,
      ..PrintOptions::default()
    };
    assert_eq!(render(&doc, &options), "a=1");
  }

  #[test]
  fn test_no_trailing_whitespace() {
    let doc = group([text("x"), text(" "), Doc::HardLine, indent([Doc::HardLine, text("y")])]);
    let out = render_width(&doc, 80);
    assert!(out.lines().all(|line| !line.ends_with(' ')));
    assert_eq!(out, "x\n\n  y");
  }
}
