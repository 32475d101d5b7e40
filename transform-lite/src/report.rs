use crate::kind::NodeKind;
use parse_lite::loc::Loc;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// One applied edit. Callers may print these; the engine itself never does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
  Replaced { kind: NodeKind, with: NodeKind, loc: Loc },
  Removed { kind: NodeKind, loc: Loc },
  Inserted { kind: NodeKind, loc: Loc },
  Renamed { from: String, to: String },
  RebuiltScopes { scopes: usize, bindings: usize },
}

impl Display for TraceEvent {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TraceEvent::Replaced { kind, with, loc } => {
        write!(f, "replaced {kind} at {} with {with}", loc.0)
      }
      TraceEvent::Removed { kind, loc } => write!(f, "removed {kind} at {}", loc.0),
      TraceEvent::Inserted { kind, .. } => write!(f, "inserted {kind}"),
      TraceEvent::Renamed { from, to } => write!(f, "renamed `{from}` to `{to}`"),
      TraceEvent::RebuiltScopes { scopes, bindings } => {
        write!(f, "rebuilt {scopes} scopes with {bindings} bindings")
      }
    }
  }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct TransformReport {
  pub replaced: usize,
  pub removed: usize,
  pub inserted: usize,
  /// Bindings renamed, not identifiers rewritten.
  pub renamed: usize,
  pub rebuilt_scopes: bool,
  pub trace: Vec<TraceEvent>,
}

impl TransformReport {
  /// Whether the traversal changed the shape of the tree, which invalidates scope data.
  pub fn is_structural(&self) -> bool {
    self.replaced + self.removed + self.inserted > 0
  }
}
