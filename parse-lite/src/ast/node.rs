use crate::loc::Loc;
use ahash::HashMap;
use derive_visitor::{Drive, DriveMut};
use serde::{Serialize, Serializer};
use std::any::{Any, TypeId};
use std::fmt;
use std::fmt::{Debug, Formatter};

/// Side table attached to every node, keyed by type. Later stages (scope
/// resolution, the printer) use this to annotate nodes without changing the syntax types.
#[derive(Default)]
pub struct NodeAssocData {
  // Values are Send + Sync so a whole program can move to a worker thread.
  map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl NodeAssocData {
  pub fn get<T: Any>(&self) -> Option<&T> {
    let t = TypeId::of::<T>();
    self.map.get(&t).and_then(|v| v.downcast_ref())
  }

  pub fn set<T: Any + Send + Sync>(&mut self, v: T) {
    let t = TypeId::of::<T>();
    self.map.insert(t, Box::new(v));
  }

  pub fn remove<T: Any>(&mut self) {
    self.map.remove(&TypeId::of::<T>());
  }
}

#[derive(Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  #[drive(skip)]
  pub loc: Loc,
  pub stx: Box<S>,
  #[drive(skip)]
  pub assoc: NodeAssocData,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
      assoc: NodeAssocData::default(),
    }
  }

  /// Wraps this node in a new node at the same location, e.g. `IdExpr` into `Expr::Id`.
  pub fn wrap<T: Drive + DriveMut, F: FnOnce(Node<S>) -> T>(self, f: F) -> Node<T> {
    let loc = self.loc;
    let stx = f(self);
    Node::new(loc, stx)
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

impl<S: Serialize + Drive + DriveMut> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    self.stx.serialize(serializer)
  }
}
