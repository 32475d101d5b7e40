use emit_lite::Layout;
use emit_lite::PrintOptions;
use serde::Deserialize;
use serde::Serialize;

/// Pipeline configuration. Missing fields in a serialized config take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
  pub indent_width: usize,
  pub print_width: usize,
  /// Whether [`crate::minify_source`] renames bindings or only compacts whitespace.
  pub rename_bindings: bool,
  pub strip_comments: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      indent_width: 2,
      print_width: 80,
      rename_bindings: true,
      strip_comments: true,
    }
  }
}

impl Config {
  pub fn print_options(&self) -> PrintOptions {
    PrintOptions {
      indent_width: self.indent_width,
      print_width: self.print_width,
      layout: Layout::Pretty,
      strip_comments: self.strip_comments,
    }
  }

  pub fn minify_print_options(&self) -> PrintOptions {
    PrintOptions::compact()
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinifyOptions {
  /// Also rename bindings declared at the top level. Off by default since a script's top-level
  /// bindings are visible to other scripts.
  pub mangle_toplevel: bool,
}
