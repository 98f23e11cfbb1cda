//! Post-resolution validation: walks the resolved graph and collects every
//! remaining structural error into one ordered report. No check
//! short-circuits another.

use crate::cycle::find_provider_cycle;
use crate::error::GraphError;
use crate::graph::ScopeGraph;
use crate::resolve::Resolution;
use grappelli_model::{Dependency, ScopeClass, ScopeEntry, ScopeId};
use std::collections::{BTreeSet, HashMap};

/// A provider visible to some scope: either one of its own or one exposed
/// by an ancestor.
type VisibleProvider = (ScopeId, String, Dependency);

pub(crate) fn validate(graph: &ScopeGraph, resolution: &Resolution) -> Vec<GraphError> {
	let mut validator = Validator {
		graph,
		resolution,
		exposed_from_ancestors: HashMap::new(),
	};

	// Grouped in the order diagnostics read best: exposure problems first,
	// then conflicts, then cycles and contract gaps.
	let mut errors = Vec::new();
	validator.not_exposed_errors(&mut errors);
	validator.not_exposed_dynamic_errors(&mut errors);
	validator.duplicate_provider_errors(&mut errors);
	validator.dependency_cycle_errors(&mut errors);
	validator.missing_dependency_errors(&mut errors);
	errors
}

struct Validator<'g> {
	graph: &'g ScopeGraph,
	resolution: &'g Resolution,
	/// Memoized per scope; `BTreeSet` deduplicates diamond ancestry.
	exposed_from_ancestors: HashMap<ScopeId, BTreeSet<VisibleProvider>>,
}

impl Validator<'_> {
	fn declared_scopes(&self) -> impl Iterator<Item = &ScopeClass> {
		self.graph.entries().filter_map(|entry| match entry {
			ScopeEntry::Declared(scope) => Some(scope),
			ScopeEntry::Precompiled(_) => None,
		})
	}

	/// Providers exposed to `id` by its ancestors, transitively.
	fn ancestor_exposed(&mut self, id: &ScopeId) -> BTreeSet<VisibleProvider> {
		if let Some(memoized) = self.exposed_from_ancestors.get(id) {
			return memoized.clone();
		}

		let mut visible = BTreeSet::new();
		let parents: Vec<ScopeId> = self.graph.parents_of(id).cloned().collect();
		for parent in parents {
			visible.extend(self.ancestor_exposed(&parent));
			if let Some(ScopeEntry::Declared(scope)) = self.graph.entry(&parent) {
				for provider in scope.providers().iter().filter(|p| p.is_exposed()) {
					visible.insert((
						parent.clone(),
						provider.name().to_string(),
						provider.provided().clone(),
					));
				}
			}
		}

		self.exposed_from_ancestors
			.insert(id.clone(), visible.clone());
		visible
	}

	/// A scope provides a dependency a descendant needs, without exposing it.
	fn not_exposed_errors(&self, errors: &mut Vec<GraphError>) {
		for scope in self.declared_scopes() {
			let unexposed = scope.unexposed_providers();
			let resolved = &self.resolution.nodes[scope.id()];
			for required in resolved.child_required().iter() {
				if let Some(provider) = unexposed.get(required.dependency()) {
					errors.push(GraphError::NotExposed {
						scope: scope.id().clone(),
						provider: provider.name().to_string(),
						required: required.clone(),
					});
				}
			}
		}
	}

	/// A dynamic dependency satisfies a requirement the child forwards from
	/// its own descendants, without being exposed to them.
	fn not_exposed_dynamic_errors(&self, errors: &mut Vec<GraphError>) {
		for scope in self.declared_scopes() {
			for declaration in scope.children() {
				let Some(child) = self.resolution.nodes.get(declaration.target()) else {
					// Edge pruned by the builder (unresolved child).
					continue;
				};
				for dynamic in declaration.dynamic_dependencies() {
					if dynamic.is_exposed() {
						continue;
					}
					let Some(required) = child.required().get(dynamic.dependency()) else {
						continue;
					};
					if required.is_transitive() {
						errors.push(GraphError::NotExposedDynamic {
							scope: scope.id().clone(),
							child: declaration.name().to_string(),
							required: required.clone(),
						});
					}
				}
			}
		}
	}

	/// More than one provider visible to a scope yields the same dependency.
	/// Every one of the scope's own providers for that dependency is
	/// reported, each with the full conflicting set.
	fn duplicate_provider_errors(&mut self, errors: &mut Vec<GraphError>) {
		let scopes: Vec<ScopeId> = self.declared_scopes().map(|s| s.id().clone()).collect();
		for id in scopes {
			let ancestor_exposed = self.ancestor_exposed(&id);
			let Some(ScopeEntry::Declared(scope)) = self.graph.entry(&id) else {
				continue;
			};

			let mut visible: HashMap<&Dependency, Vec<&ScopeId>> = HashMap::new();
			for provider in scope.providers() {
				visible.entry(provider.provided()).or_default().push(scope.id());
			}
			for (ancestor, _, dependency) in &ancestor_exposed {
				visible.entry(dependency).or_default().push(ancestor);
			}

			for provider in scope.providers() {
				let providers_for_dependency = &visible[provider.provided()];
				if providers_for_dependency.len() > 1 {
					let mut conflicting: Vec<ScopeId> = providers_for_dependency
						.iter()
						.map(|&conflict| conflict.clone())
						.collect();
					// Drop one occurrence of this provider's own scope; the
					// rest are the genuine conflicts.
					if let Some(own) = conflicting.iter().position(|c| c == scope.id()) {
						conflicting.remove(own);
					}
					errors.push(GraphError::DuplicateProviders {
						scope: scope.id().clone(),
						provider: provider.name().to_string(),
						dependency: provider.provided().clone(),
						conflicting_scopes: conflicting,
					});
				}
			}
		}
	}

	fn dependency_cycle_errors(&self, errors: &mut Vec<GraphError>) {
		for scope in self.declared_scopes() {
			if let Some(cycle) = find_provider_cycle(scope) {
				errors.push(GraphError::DependencyCycle {
					scope: scope.id().clone(),
					cycle,
				});
			}
		}
	}

	fn missing_dependency_errors(&self, errors: &mut Vec<GraphError>) {
		// Resolution order keeps the report deterministic.
		for id in &self.resolution.order {
			if let Some(missing) = self.resolution.nodes[id].missing() {
				errors.push(GraphError::MissingDependencies {
					scope: id.clone(),
					dependencies: missing.dependencies().cloned().collect(),
				});
			}
		}
	}
}
