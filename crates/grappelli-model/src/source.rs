//! Boundary between the declaration extractor and the graph engine.

use crate::required::RequiredDependencies;
use crate::scope::ScopeClass;
use crate::ty::ScopeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The generated contract of a Scope compiled in a separate module.
///
/// When a parent Scope lives in an already-compiled library, the extractor
/// reads the contract off the generated container instead of re-parsing the
/// Scope's sources. The graph builder substitutes it directly and does not
/// recurse into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecompiledContract {
	id: ScopeId,
	required: RequiredDependencies,
}

impl PrecompiledContract {
	pub fn new(id: ScopeId, required: RequiredDependencies) -> Self {
		Self { id, required }
	}

	pub fn id(&self) -> &ScopeId {
		&self.id
	}

	pub fn required(&self) -> &RequiredDependencies {
		&self.required
	}
}

/// One discoverable Scope: either a full declaration or a pre-resolved
/// contract from a separately-compiled module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeEntry {
	Declared(ScopeClass),
	Precompiled(PrecompiledContract),
}

impl ScopeEntry {
	pub fn id(&self) -> &ScopeId {
		match self {
			ScopeEntry::Declared(scope) => scope.id(),
			ScopeEntry::Precompiled(contract) => contract.id(),
		}
	}
}

/// Parse-phase failures owned by the declaration extractor.
///
/// A declaration that fails to parse is excluded from the [`SourceSet`]
/// entirely; the engine resolves the rest of the batch and surfaces these
/// alongside its own graph errors so one pass reports every problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ParseError {
	#[error("scope must be an interface: {scope}")]
	ScopeMustBeAnInterface { scope: ScopeId },

	#[error("scope method is invalid: {scope}.{method}")]
	InvalidScopeMethod { scope: ScopeId, method: String },

	#[error("provider method must return a value: {scope}.{method}")]
	VoidProviderMethod { scope: ScopeId, method: String },

	#[error("provider method may not be nullable: {scope}.{method}")]
	NullableProviderMethod { scope: ScopeId, method: String },

	#[error("parameter may not be nullable: {parameter} in {scope}.{method}")]
	NullableParameter {
		scope: ScopeId,
		method: String,
		parameter: String,
	},

	#[error("binds method parameter is not assignable to its return type: {scope}.{method}")]
	UnassignableBindsMethod { scope: ScopeId, method: String },

	#[error("no suitable constructor found for {ty} at {scope}.{method}")]
	NoSuitableConstructor {
		scope: ScopeId,
		method: String,
		ty: String,
	},
}

/// Everything one extractor batch hands to the engine: the discoverable
/// Scopes plus the parse errors for declarations that had to be excluded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSet {
	entries: HashMap<ScopeId, ScopeEntry>,
	parse_errors: Vec<ParseError>,
}

impl SourceSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_scope(&mut self, scope: ScopeClass) {
		self.entries
			.insert(scope.id().clone(), ScopeEntry::Declared(scope));
	}

	pub fn push_precompiled(&mut self, contract: PrecompiledContract) {
		self.entries
			.insert(contract.id().clone(), ScopeEntry::Precompiled(contract));
	}

	pub fn push_parse_error(&mut self, error: ParseError) {
		self.parse_errors.push(error);
	}

	pub fn lookup(&self, id: &ScopeId) -> Option<&ScopeEntry> {
		self.entries.get(id)
	}

	pub fn parse_errors(&self) -> &[ParseError] {
		&self.parse_errors
	}

	pub fn scope_ids(&self) -> impl Iterator<Item = &ScopeId> {
		self.entries.keys()
	}

	/// Scope ids not declared as a child of any other Scope in this set, in
	/// sorted order. A convenience for callers that want to resolve a whole
	/// batch without naming the roots themselves.
	pub fn roots(&self) -> Vec<ScopeId> {
		let mut roots: Vec<ScopeId> = self
			.entries
			.keys()
			.filter(|id| {
				!self.entries.values().any(|entry| match entry {
					ScopeEntry::Declared(scope) => {
						scope.children().iter().any(|child| child.target() == *id)
					}
					ScopeEntry::Precompiled(_) => false,
				})
			})
			.cloned()
			.collect();
		roots.sort();
		roots
	}
}
