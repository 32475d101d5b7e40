use crate::error::TransformResult;
use crate::kind::NodeKind;
use crate::path::Path;
use ahash::HashMap;

pub type Callback<'v> = Box<dyn FnMut(&mut Path<'_>) -> TransformResult<()> + 'v>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Phase {
  Enter,
  Exit,
}

/// Per-kind callbacks for one traversal. Several callbacks may be registered for the same kind;
/// they run in registration order on the same node.
///
/// ```
/// use parse_lite::parse_source;
/// use transform_lite::{transform, NodeKind, Visitor};
///
/// let mut top = parse_source("let a = 1; a;").unwrap();
/// let mut scopes = symbol_lite::resolve(&mut top).unwrap();
/// let mut visitor = Visitor::new().on(NodeKind::VariableDeclaration, |path| {
///   path.rename_binding("a", "count")
/// });
/// let report = transform(&mut top, &mut scopes, &mut visitor).unwrap();
/// assert_eq!(report.renamed, 1);
/// ```
#[derive(Default)]
pub struct Visitor<'v> {
  enter: HashMap<NodeKind, Vec<Callback<'v>>>,
  exit: HashMap<NodeKind, Vec<Callback<'v>>>,
}

impl<'v> Visitor<'v> {
  pub fn new() -> Visitor<'v> {
    Visitor::default()
  }

  /// Registers `f` to run when a node of `kind` is entered, before its children.
  pub fn on<F>(mut self, kind: NodeKind, f: F) -> Visitor<'v>
  where
    F: FnMut(&mut Path<'_>) -> TransformResult<()> + 'v,
  {
    self.enter.entry(kind).or_default().push(Box::new(f));
    self
  }

  /// Registers `f` to run when a node of `kind` is left, after its children.
  pub fn on_exit<F>(mut self, kind: NodeKind, f: F) -> Visitor<'v>
  where
    F: FnMut(&mut Path<'_>) -> TransformResult<()> + 'v,
  {
    self.exit.entry(kind).or_default().push(Box::new(f));
    self
  }

  /// Appends every callback of `other` after this visitor's callbacks for the same kind.
  pub fn merge(mut self, other: Visitor<'v>) -> Visitor<'v> {
    for (kind, callbacks) in other.enter {
      self.enter.entry(kind).or_default().extend(callbacks);
    }
    for (kind, callbacks) in other.exit {
      self.exit.entry(kind).or_default().extend(callbacks);
    }
    self
  }

  pub fn is_empty(&self) -> bool {
    self.enter.values().all(Vec::is_empty) && self.exit.values().all(Vec::is_empty)
  }

  pub(crate) fn callbacks_mut(&mut self, phase: Phase, kind: NodeKind) -> &mut [Callback<'v>] {
    let map = match phase {
      Phase::Enter => &mut self.enter,
      Phase::Exit => &mut self.exit,
    };
    match map.get_mut(&kind) {
      Some(callbacks) => callbacks,
      None => &mut [],
    }
  }
}
