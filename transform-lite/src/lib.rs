//! Scope-aware rewriting of parse-lite programs.
//!
//! A [`Visitor`] registers callbacks per [`NodeKind`]. [`transform`] walks the program once,
//! handing each callback a [`Path`] through which it can replace, remove or insert nodes and
//! rename bindings. Renames go through binding identity, so shadowed bindings of the same name
//! are never touched. After structural edits the scope tree is rebuilt.

use ahash::HashMap;
use engine::Engine;
use parse_lite::ast::node::Node;
use parse_lite::ast::stx::TopLevel;
use rebuild::rebuild_scopes;
use symbol_lite::ScopeTree;

pub mod build;
mod engine;
pub mod error;
pub mod kind;
pub mod path;
mod rebuild;
mod rename;
pub mod report;
pub mod visitor;

pub use error::TransformError;
pub use error::TransformResult;
pub use kind::NodeKind;
pub use path::AnyNode;
pub use path::AnyNodeMut;
pub use path::AnyNodeRef;
pub use path::Path;
pub use path::Slot;
pub use rename::rename_bindings;
pub use report::TraceEvent;
pub use report::TransformReport;
pub use visitor::Visitor;

/// Runs `visitor` over `top_level` in one pre-order traversal.
///
/// `scopes` must come from resolving `top_level` and is kept current: renames are applied to it
/// and it is rebuilt after any replace, remove or insert. On error the program may be partially
/// transformed.
pub fn transform(
  top_level: &mut Node<TopLevel>,
  scopes: &mut ScopeTree,
  visitor: &mut Visitor<'_>,
) -> TransformResult<TransformReport> {
  let _span = tracing::debug_span!("transform").entered();
  let mut engine = Engine::new(visitor, scopes);
  engine.visit_program(top_level)?;
  let Engine {
    mut report,
    renames,
    ..
  } = engine;

  if !renames.is_empty() {
    let mut map = HashMap::<_, String>::default();
    for rename in renames {
      report.trace.push(TraceEvent::Renamed {
        from: rename.from,
        to: rename.to.clone(),
      });
      map.insert(rename.binding, rename.to);
    }
    report.renamed = map.len();
    rename_bindings(top_level, scopes, &map);
  };

  if report.is_structural() {
    rebuild_scopes(top_level, scopes)?;
    report.rebuilt_scopes = true;
    report.trace.push(TraceEvent::RebuiltScopes {
      scopes: scopes.scopes().count(),
      bindings: scopes.bindings().count(),
    });
  };

  tracing::debug!(
    replaced = report.replaced,
    removed = report.removed,
    inserted = report.inserted,
    renamed = report.renamed,
    "transformed"
  );
  Ok(report)
}
