use crate::error::DuplicateBindingError;
use ahash::HashMap;
use parse_lite::loc::Loc;
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct BindingId(pub u32);

impl BindingId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum ScopeKind {
  Global,
  Function,
  Block,
}

impl ScopeKind {
  /// `var` and function declarations bind in the nearest closure scope.
  pub fn is_closure(self) -> bool {
    matches!(self, ScopeKind::Global | ScopeKind::Function)
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum BindingKind {
  Var,
  Let,
  Const,
  Param,
  Function,
}

impl BindingKind {
  pub fn is_lexical(self) -> bool {
    matches!(self, BindingKind::Let | BindingKind::Const)
  }

  pub fn is_hoisted(self) -> bool {
    matches!(self, BindingKind::Var | BindingKind::Function)
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Reference {
  pub loc: Loc,
  /// Scope the reference appears in.
  pub scope: ScopeId,
  /// Target of an assignment (including compound assignment).
  pub write: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Binding {
  pub id: BindingId,
  pub name: String,
  pub kind: BindingKind,
  pub scope: ScopeId,
  /// Every declaration site, in source order. Redeclared `var`s, functions and parameters merge
  /// into one binding, so the first entry is the one reported.
  pub declarations: Vec<Loc>,
  pub references: Vec<Reference>,
  pub mutation_count: usize,
}

impl Binding {
  pub fn declaration(&self) -> Loc {
    self.declarations[0]
  }

  pub fn is_referenced(&self) -> bool {
    !self.references.is_empty()
  }
}

#[derive(Clone, Debug, Serialize)]
pub struct ScopeData {
  pub id: ScopeId,
  pub kind: ScopeKind,
  pub parent: Option<ScopeId>,
  pub children: Vec<ScopeId>,
  pub loc: Loc,
  bindings: Vec<BindingId>,
  #[serde(skip)]
  names: HashMap<String, BindingId>,
}

impl ScopeData {
  /// Bindings declared in this scope, in declaration order.
  pub fn bindings(&self) -> &[BindingId] {
    &self.bindings
  }

  pub fn get(&self, name: &str) -> Option<BindingId> {
    self.names.get(name).copied()
  }
}

/// An identifier that no enclosing scope declares, e.g. a global provided by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnresolvedReference {
  pub name: String,
  pub loc: Loc,
  pub scope: ScopeId,
}

/// Arena of scopes and bindings for one program. Scopes are stored in creation (pre-)order, so
/// index 0 is always the global scope and a parent always precedes its children.
#[derive(Clone, Debug, Serialize)]
pub struct ScopeTree {
  scopes: Vec<ScopeData>,
  bindings: Vec<Binding>,
  unresolved: Vec<UnresolvedReference>,
}

impl ScopeTree {
  pub fn new(loc: Loc) -> ScopeTree {
    ScopeTree {
      scopes: vec![ScopeData {
        id: ScopeId(0),
        kind: ScopeKind::Global,
        parent: None,
        children: Vec::new(),
        loc,
        bindings: Vec::new(),
        names: HashMap::default(),
      }],
      bindings: Vec::new(),
      unresolved: Vec::new(),
    }
  }

  pub fn root(&self) -> ScopeId {
    ScopeId(0)
  }

  pub fn scope(&self, id: ScopeId) -> &ScopeData {
    &self.scopes[id.index()]
  }

  pub fn binding(&self, id: BindingId) -> &Binding {
    &self.bindings[id.index()]
  }

  pub fn scopes(&self) -> impl Iterator<Item = &ScopeData> {
    self.scopes.iter()
  }

  pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
    self.bindings.iter()
  }

  pub fn bindings_in(&self, scope: ScopeId) -> impl Iterator<Item = &Binding> {
    self.scope(scope).bindings.iter().map(|&id| self.binding(id))
  }

  pub fn unresolved(&self) -> &[UnresolvedReference] {
    &self.unresolved
  }

  /// `scope` followed by its ancestors, innermost first.
  pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
    std::iter::successors(Some(scope), |&id| self.scope(id).parent)
  }

  /// The nearest function or global scope containing `scope` (possibly itself).
  pub fn closure_of(&self, scope: ScopeId) -> ScopeId {
    self
      .ancestors(scope)
      .find(|&id| self.scope(id).kind.is_closure())
      .unwrap_or(self.root())
  }

  /// Resolves `name` by walking the scope chain outward from `scope`.
  pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
    self.ancestors(scope).find_map(|id| self.scope(id).get(name))
  }

  pub fn add_scope(&mut self, parent: ScopeId, kind: ScopeKind, loc: Loc) -> ScopeId {
    let id = ScopeId(self.scopes.len() as u32);
    self.scopes.push(ScopeData {
      id,
      kind,
      parent: Some(parent),
      children: Vec::new(),
      loc,
      bindings: Vec::new(),
      names: HashMap::default(),
    });
    self.scopes[parent.index()].children.push(id);
    id
  }

  /// Declares `name` directly in `scope`. A redeclaration merges into the existing binding unless
  /// either declaration is `let` or `const`.
  pub fn declare(
    &mut self,
    scope: ScopeId,
    name: &str,
    kind: BindingKind,
    loc: Loc,
  ) -> Result<BindingId, DuplicateBindingError> {
    if let Some(existing) = self.scope(scope).get(name) {
      let binding = &mut self.bindings[existing.index()];
      if binding.kind.is_lexical() || kind.is_lexical() {
        return Err(DuplicateBindingError {
          name: name.to_string(),
          scope,
          first: binding.declaration(),
          duplicate: loc,
        });
      };
      binding.declarations.push(loc);
      return Ok(existing);
    };
    let id = BindingId(self.bindings.len() as u32);
    self.bindings.push(Binding {
      id,
      name: name.to_string(),
      kind,
      scope,
      declarations: vec![loc],
      references: Vec::new(),
      mutation_count: 0,
    });
    let data = &mut self.scopes[scope.index()];
    data.bindings.push(id);
    data.names.insert(name.to_string(), id);
    Ok(id)
  }

  pub fn add_reference(&mut self, binding: BindingId, reference: Reference) {
    let binding = &mut self.bindings[binding.index()];
    if reference.write {
      binding.mutation_count += 1;
    };
    binding.references.push(reference);
  }

  pub fn add_unresolved(&mut self, unresolved: UnresolvedReference) {
    self.unresolved.push(unresolved);
  }

  /// Changes the name a binding is known by in its scope. This only updates the tree; the
  /// identifiers in the syntax tree are rewritten separately.
  pub fn rename(&mut self, binding: BindingId, new_name: impl Into<String>) {
    let new_name = new_name.into();
    let (scope, old_name) = {
      let b = &mut self.bindings[binding.index()];
      (b.scope, std::mem::replace(&mut b.name, new_name.clone()))
    };
    let names = &mut self.scopes[scope.index()].names;
    if names.get(&old_name) == Some(&binding) {
      names.remove(&old_name);
    };
    names.insert(new_name, binding);
  }
}
