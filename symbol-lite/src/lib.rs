//! Scope analysis for parse-lite programs.
//!
//! [`resolve`] builds a [`ScopeTree`] and annotates the syntax tree: every identifier gets the
//! [`ScopeId`] it appears in, declarations get a [`assoc::DeclaredBinding`] and references a
//! [`assoc::ResolvedBinding`]. The tree is an arena; ids are plain indices and stay valid for the
//! lifetime of the tree, but a tree must be rebuilt after the syntax changes.
//!
//! ```
//! use parse_lite::parse_source;
//! use symbol_lite::resolve;
//!
//! let mut top = parse_source("function add(a, b) { return a + b; }").unwrap();
//! let tree = resolve(&mut top).unwrap();
//! let add = tree.lookup(tree.root(), "add").unwrap();
//! assert_eq!(tree.binding(add).name, "add");
//! assert!(tree.unresolved().is_empty());
//! ```

use declare::DeclareVisitor;
use derive_visitor::DriveMut;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use error::ResolveResult;
use error::UNRESOLVED_REFERENCE_CODE;
use parse_lite::ast::node::Node;
use parse_lite::ast::stx::TopLevel;
use resolve::ResolveVisitor;

pub mod assoc;
mod declare;
pub mod error;
mod resolve;
pub mod scope;

pub use error::DuplicateBindingError;
pub use scope::Binding;
pub use scope::BindingId;
pub use scope::BindingKind;
pub use scope::Reference;
pub use scope::ScopeData;
pub use scope::ScopeId;
pub use scope::ScopeKind;
pub use scope::ScopeTree;
pub use scope::UnresolvedReference;

/// Builds the scope tree for `top_level`, annotating its identifiers. Fails only on a duplicate
/// lexical declaration; unresolved references are recorded, not reported as errors.
pub fn resolve(top_level: &mut Node<TopLevel>) -> ResolveResult<ScopeTree> {
  let _span = tracing::debug_span!("resolve").entered();
  let mut declarer = DeclareVisitor::new(ScopeTree::new(top_level.loc));
  top_level.drive_mut(&mut declarer);
  if let Some(err) = declarer.error {
    return Err(err);
  };
  let mut tree = declarer.tree;
  let mut resolver = ResolveVisitor { tree: &mut tree };
  top_level.drive_mut(&mut resolver);
  tracing::debug!(
    scopes = tree.scopes().count(),
    bindings = tree.bindings().count(),
    unresolved = tree.unresolved().len(),
    "resolved"
  );
  Ok(tree)
}

impl ScopeTree {
  /// Warnings for references that resolve to no binding.
  pub fn diagnostics(&self, file: FileId) -> Vec<Diagnostic> {
    self
      .unresolved()
      .iter()
      .map(|u| {
        Diagnostic::warning(
          UNRESOLVED_REFERENCE_CODE,
          format!("`{}` is not declared in any enclosing scope", u.name),
          u.loc.to_diagnostics_span(file),
        )
      })
      .collect()
  }
}

#[cfg(test)]
mod tests;
