//! Data attached to syntax nodes by [`crate::resolve`], read back by later stages.

use crate::scope::BindingId;
use crate::scope::ScopeId;
use parse_lite::ast::node::NodeAssocData;

/// Set on every `IdPat` to the binding it declares.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DeclaredBinding(pub BindingId);

/// Set on every `IdExpr`. `None` if the name is not declared in any enclosing scope.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ResolvedBinding(pub Option<BindingId>);

/// Set on every block, `for` statement and function to the scope it creates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IntroducedScope(pub ScopeId);

// Marks an `IdExpr` as the target of an assignment. Only lives between entering the assignment
// and entering its left side during the resolve pass.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AssignmentTarget;

/// The scope an identifier appears in.
pub fn scope_id(assoc: &NodeAssocData) -> Option<ScopeId> {
  assoc.get::<ScopeId>().copied()
}

pub fn declared_binding(assoc: &NodeAssocData) -> Option<BindingId> {
  assoc.get::<DeclaredBinding>().map(|d| d.0)
}

pub fn resolved_binding(assoc: &NodeAssocData) -> Option<BindingId> {
  assoc.get::<ResolvedBinding>().and_then(|r| r.0)
}

pub fn introduced_scope(assoc: &NodeAssocData) -> Option<ScopeId> {
  assoc.get::<IntroducedScope>().map(|s| s.0)
}

/// The binding an identifier declares or refers to, whichever applies.
pub fn binding_of(assoc: &NodeAssocData) -> Option<BindingId> {
  declared_binding(assoc).or_else(|| resolved_binding(assoc))
}
