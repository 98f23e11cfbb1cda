//! Per-Scope declaration record.
//!
//! A [`ScopeClass`] is the engine's view of one Scope declaration: the
//! provider methods it owns, the access methods through which it consumes
//! values itself, its child-scope declarations, and an optional explicit
//! dependency contract. The declaration extractor builds these; the engine
//! treats them as immutable. Type-correctness and annotation-legality checks
//! are parse-time concerns and never appear here.

use crate::dependency::Dependency;
use crate::required::{RequiredDependencies, RequiredDependency};
use crate::ty::ScopeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A factory method owned by a Scope: produces one dependency, possibly
/// consuming others provided in the same Scope or received from ancestors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMethod {
	name: String,
	provided: Dependency,
	parameters: Vec<Dependency>,
	exposed: bool,
}

impl ProviderMethod {
	pub fn new(name: impl Into<String>, provided: Dependency, parameters: Vec<Dependency>) -> Self {
		Self {
			name: name.into(),
			provided,
			parameters,
			exposed: false,
		}
	}

	/// Mark the provided dependency as consumable by descendant Scopes.
	pub fn exposed(mut self) -> Self {
		self.exposed = true;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn provided(&self) -> &Dependency {
		&self.provided
	}

	pub fn parameters(&self) -> &[Dependency] {
		&self.parameters
	}

	pub fn is_exposed(&self) -> bool {
		self.exposed
	}
}

/// A method through which the Scope itself consumes a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessMethod {
	name: String,
	dependency: Dependency,
}

impl AccessMethod {
	pub fn new(name: impl Into<String>, dependency: Dependency) -> Self {
		Self {
			name: name.into(),
			dependency,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn dependency(&self) -> &Dependency {
		&self.dependency
	}
}

/// A value the parent passes into a child at construction time, bypassing
/// ancestor resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicDependency {
	dependency: Dependency,
	exposed: bool,
}

impl DynamicDependency {
	pub fn new(dependency: Dependency) -> Self {
		Self {
			dependency,
			exposed: false,
		}
	}

	/// Mark the value as consumable by the child's own descendants.
	pub fn exposed(mut self) -> Self {
		self.exposed = true;
		self
	}

	pub fn dependency(&self) -> &Dependency {
		&self.dependency
	}

	pub fn is_exposed(&self) -> bool {
		self.exposed
	}
}

/// A child-scope declaration: the method on the parent Scope that constructs
/// the child, along with the dynamic dependencies it passes in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildDeclaration {
	name: String,
	target: ScopeId,
	dynamic_dependencies: Vec<DynamicDependency>,
}

impl ChildDeclaration {
	pub fn new(name: impl Into<String>, target: ScopeId) -> Self {
		Self {
			name: name.into(),
			target,
			dynamic_dependencies: Vec::new(),
		}
	}

	pub fn with_dynamic(mut self, dynamic: DynamicDependency) -> Self {
		self.dynamic_dependencies.push(dynamic);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn target(&self) -> &ScopeId {
		&self.target
	}

	pub fn dynamic_dependencies(&self) -> &[DynamicDependency] {
		&self.dynamic_dependencies
	}
}

/// A developer-authored, closed contract for exactly what a Scope accepts
/// from outside. When present it replaces the computed required set as the
/// Scope's contract surface; computed requirements it does not cover become
/// missing-dependency diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitContract {
	declared: Vec<Dependency>,
}

impl ExplicitContract {
	pub fn new(declared: Vec<Dependency>) -> Self {
		Self { declared }
	}

	pub fn declared(&self) -> &[Dependency] {
		&self.declared
	}
}

/// One Scope's declared contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeClass {
	id: ScopeId,
	providers: Vec<ProviderMethod>,
	access_methods: Vec<AccessMethod>,
	children: Vec<ChildDeclaration>,
	explicit_contract: Option<ExplicitContract>,
}

impl ScopeClass {
	pub fn new(id: ScopeId) -> Self {
		Self {
			id,
			providers: Vec::new(),
			access_methods: Vec::new(),
			children: Vec::new(),
			explicit_contract: None,
		}
	}

	pub fn push_provider(&mut self, provider: ProviderMethod) {
		self.providers.push(provider);
	}

	pub fn push_access_method(&mut self, access: AccessMethod) {
		self.access_methods.push(access);
	}

	pub fn push_child(&mut self, child: ChildDeclaration) {
		self.children.push(child);
	}

	pub fn set_explicit_contract(&mut self, contract: ExplicitContract) {
		self.explicit_contract = Some(contract);
	}

	pub fn id(&self) -> &ScopeId {
		&self.id
	}

	pub fn providers(&self) -> &[ProviderMethod] {
		&self.providers
	}

	pub fn access_methods(&self) -> &[AccessMethod] {
		&self.access_methods
	}

	pub fn children(&self) -> &[ChildDeclaration] {
		&self.children
	}

	pub fn explicit_contract(&self) -> Option<&ExplicitContract> {
		self.explicit_contract.as_ref()
	}

	/// The Scope's own type as a dependency. A Scope can always supply
	/// itself to its providers and descendants.
	pub fn scope_dependency(&self) -> Dependency {
		Dependency::new(self.id.type_ref().clone())
	}

	/// Everything this Scope can supply: each provider's output plus the
	/// Scope's own type.
	pub fn provided(&self) -> Vec<Dependency> {
		let mut provided: Vec<Dependency> = self
			.providers
			.iter()
			.map(|p| p.provided().clone())
			.collect();
		provided.push(self.scope_dependency());
		provided
	}

	/// The subset of [`provided`] that descendants are permitted to consume.
	/// The Scope's own type is always exposed. `exposed_provided ⊆ provided`
	/// holds by construction.
	///
	/// [`provided`]: ScopeClass::provided
	pub fn exposed_provided(&self) -> Vec<Dependency> {
		let mut exposed: Vec<Dependency> = self
			.providers
			.iter()
			.filter(|p| p.is_exposed())
			.map(|p| p.provided().clone())
			.collect();
		exposed.push(self.scope_dependency());
		exposed
	}

	/// Providers whose output is not marked exposed, keyed by the dependency
	/// they provide. The validator reports these when a descendant turns out
	/// to need one.
	pub fn unexposed_providers(&self) -> HashMap<Dependency, &ProviderMethod> {
		self.providers
			.iter()
			.filter(|p| !p.is_exposed())
			.map(|p| (p.provided().clone(), p))
			.collect()
	}

	/// What this Scope consumes directly and cannot satisfy from its own
	/// providers: provider parameters plus access methods, minus everything
	/// in [`provided`]. Each entry is non-transitive and consumed by this
	/// Scope.
	///
	/// [`provided`]: ScopeClass::provided
	pub fn self_required(&self) -> RequiredDependencies {
		let provided = self.provided();
		let consumed = self
			.providers
			.iter()
			.flat_map(|p| p.parameters().iter())
			.chain(self.access_methods.iter().map(AccessMethod::dependency));
		consumed
			.filter(|dependency| !provided.contains(dependency))
			.map(|dependency| RequiredDependency::direct(dependency.clone(), self.id.clone()))
			.collect()
	}
}
