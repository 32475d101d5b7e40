//! Scope-safe minification and formatting for parse-lite programs.
//!
//! [`minify`] gives every binding a short name (`v0`, `v1`, …) through binding identity, so
//! shadowed names and undeclared globals are never captured. The pipeline helpers tie the
//! stages together: [`format`] pretty prints source and [`minify_source`] resolves, renames
//! and prints it compactly.
//!
//! ```
//! use minify_lite::{minify_source, Config, MinifyOptions};
//!
//! let out = minify_source(
//!   "function add(a, b) { return a + b; }",
//!   &Config::default(),
//!   &MinifyOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(out, "function add(v0,v1){return v0+v1;}");
//! ```

use parse_lite::ast::node::Node;
use parse_lite::ast::stx::TopLevel;
use rename::assign_names;
use rename::check_scope_data;
use symbol_lite::ScopeTree;
use transform_lite::rename_bindings;

mod config;
mod err;
mod rename;

pub use config::Config;
pub use config::MinifyOptions;
pub use emit_lite::PrintOptions;
pub use err::MinifyError;
pub use err::MinifyResult;
pub use parse_lite::parse;
pub use parse_lite::tokenize;
pub use rename::RenameMap;
pub use symbol_lite::resolve;

/// Renames the bindings of `top_level` to short generated names and returns the names chosen.
///
/// `scopes` must come from resolving `top_level` and is updated to the new names. Top-level
/// bindings keep their names unless [`MinifyOptions::mangle_toplevel`] is set.
pub fn minify(
  top_level: &mut Node<TopLevel>,
  scopes: &mut ScopeTree,
  options: &MinifyOptions,
) -> MinifyResult<RenameMap> {
  let _span = tracing::debug_span!("minify").entered();
  check_scope_data(top_level)?;
  let renames = assign_names(scopes, options);
  let rewritten = rename_bindings(top_level, scopes, renames.as_map());
  tracing::debug!(
    bindings = renames.len(),
    identifiers = rewritten,
    "assigned short names"
  );
  Ok(renames)
}

/// Pretty prints `source` with the layout settings in `config`.
pub fn format(source: &str, config: &Config) -> MinifyResult<String> {
  let _span = tracing::debug_span!("format", bytes = source.len()).entered();
  Ok(emit_lite::format(source, &config.print_options())?)
}

/// Parses, resolves and (if `config.rename_bindings`) renames `source`, then prints it in
/// compact layout.
pub fn minify_source(
  source: &str,
  config: &Config,
  options: &MinifyOptions,
) -> MinifyResult<String> {
  let _span = tracing::debug_span!("minify_source", bytes = source.len()).entered();
  let mut top_level = parse_lite::parse_source(source)?;
  let mut scopes = resolve(&mut top_level)?;
  if config.rename_bindings {
    minify(&mut top_level, &mut scopes, options)?;
  };
  Ok(emit_lite::print(
    &top_level,
    &config.minify_print_options(),
  ))
}
