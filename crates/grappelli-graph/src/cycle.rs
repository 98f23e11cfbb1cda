//! Local provider cycle detection.
//!
//! A provider's parameters can only be satisfied by providers in the same
//! scope (or by the scope's ancestry, which is resolved separately), so this
//! check never needs to look across scope boundaries.

use grappelli_model::{Dependency, ScopeClass};
use std::collections::HashMap;

/// Find a cycle among one scope's own provider methods: a provider that,
/// directly or through other providers in the same scope, requires a
/// dependency it produces itself.
///
/// Returns the provider names in cycle order, or `None` when the scope's
/// providers are acyclic.
pub fn find_provider_cycle(scope: &ScopeClass) -> Option<Vec<String>> {
	let providers_by_output: HashMap<&Dependency, usize> = scope
		.providers()
		.iter()
		.enumerate()
		.map(|(index, provider)| (provider.provided(), index))
		.collect();

	let mut path = Vec::new();
	for start in 0..scope.providers().len() {
		if let Some(cycle) = visit(scope, &providers_by_output, &mut path, start) {
			return Some(
				cycle
					.into_iter()
					.map(|index| scope.providers()[index].name().to_string())
					.collect(),
			);
		}
	}
	None
}

fn visit(
	scope: &ScopeClass,
	providers_by_output: &HashMap<&Dependency, usize>,
	path: &mut Vec<usize>,
	current: usize,
) -> Option<Vec<usize>> {
	if let Some(position) = path.iter().position(|&visited| visited == current) {
		return Some(path[position..].to_vec());
	}

	path.push(current);
	for parameter in scope.providers()[current].parameters() {
		if let Some(&next) = providers_by_output.get(parameter) {
			if let Some(cycle) = visit(scope, providers_by_output, path, next) {
				path.pop();
				return Some(cycle);
			}
		}
	}
	path.pop();
	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use grappelli_model::{ProviderMethod, ScopeId, TypeRef};
	use rstest::rstest;

	fn dep(name: &str) -> Dependency {
		Dependency::new(TypeRef::new(name))
	}

	fn scope_with(providers: Vec<ProviderMethod>) -> ScopeClass {
		let mut scope = ScopeClass::new(ScopeId::new(TypeRef::new("app.Scope")));
		for provider in providers {
			scope.push_provider(provider);
		}
		scope
	}

	#[rstest]
	fn mutual_providers_form_a_cycle() {
		// Arrange: p1 produces A from B, p2 produces B from A
		let scope = scope_with(vec![
			ProviderMethod::new("p1", dep("app.TypeA"), vec![dep("app.TypeB")]),
			ProviderMethod::new("p2", dep("app.TypeB"), vec![dep("app.TypeA")]),
		]);

		// Act
		let cycle = find_provider_cycle(&scope).unwrap();

		// Assert
		assert_eq!(cycle, vec!["p1".to_string(), "p2".to_string()]);
	}

	#[rstest]
	fn self_referential_provider_is_a_cycle_of_one() {
		let scope = scope_with(vec![ProviderMethod::new(
			"database",
			dep("app.Database"),
			vec![dep("app.Database")],
		)]);

		assert_eq!(
			find_provider_cycle(&scope).unwrap(),
			vec!["database".to_string()]
		);
	}

	#[rstest]
	fn cycle_excludes_the_acyclic_prefix() {
		// entry -> p1 -> p2 -> p1; only the p1/p2 loop is the cycle
		let scope = scope_with(vec![
			ProviderMethod::new("entry", dep("app.Entry"), vec![dep("app.TypeA")]),
			ProviderMethod::new("p1", dep("app.TypeA"), vec![dep("app.TypeB")]),
			ProviderMethod::new("p2", dep("app.TypeB"), vec![dep("app.TypeA")]),
		]);

		assert_eq!(
			find_provider_cycle(&scope).unwrap(),
			vec!["p1".to_string(), "p2".to_string()]
		);
	}

	#[rstest]
	fn chains_satisfied_externally_are_not_cycles() {
		// p1 consumes something no local provider produces
		let scope = scope_with(vec![
			ProviderMethod::new("p1", dep("app.TypeA"), vec![dep("app.External")]),
			ProviderMethod::new("p2", dep("app.TypeB"), vec![dep("app.TypeA")]),
		]);

		assert!(find_provider_cycle(&scope).is_none());
	}
}
