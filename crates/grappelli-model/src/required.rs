//! Required-dependency records and their merge/subtract algebra.

use crate::dependency::Dependency;
use crate::ty::ScopeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// One unsatisfied requirement, annotated with where it came from.
///
/// `transitive` means the requirement is forwarded from a descendant Scope
/// rather than consumed directly by the Scope whose set it appears in.
/// `consuming_scopes` accumulates every Scope that ultimately needs the
/// value, which is what diagnostics report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDependency {
	dependency: Dependency,
	transitive: bool,
	consuming_scopes: BTreeSet<ScopeId>,
}

impl RequiredDependency {
	pub fn new(
		dependency: Dependency,
		transitive: bool,
		consuming_scopes: BTreeSet<ScopeId>,
	) -> Self {
		Self {
			dependency,
			transitive,
			consuming_scopes,
		}
	}

	/// A direct (non-transitive) requirement consumed by a single Scope.
	pub fn direct(dependency: Dependency, consumer: ScopeId) -> Self {
		Self {
			dependency,
			transitive: false,
			consuming_scopes: BTreeSet::from([consumer]),
		}
	}

	pub fn dependency(&self) -> &Dependency {
		&self.dependency
	}

	pub fn is_transitive(&self) -> bool {
		self.transitive
	}

	pub fn consuming_scopes(&self) -> &BTreeSet<ScopeId> {
		&self.consuming_scopes
	}
}

impl fmt::Display for RequiredDependency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.transitive {
			write!(f, "{} (transitive)", self.dependency)
		} else {
			fmt::Display::fmt(&self.dependency, f)
		}
	}
}

/// An ordered collection of [`RequiredDependency`] keyed by [`Dependency`].
///
/// Iteration order is insertion order so that diagnostics and generated code
/// are deterministic, but membership and equality are keyed by dependency
/// identity only: two sets are equal iff they contain the same entries,
/// regardless of the order they were merged in. That makes [`plus`] a
/// commutative, associative merge, which is what allows a node's children to
/// be combined in any order.
///
/// [`plus`]: RequiredDependencies::plus
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<RequiredDependency>", into = "Vec<RequiredDependency>")]
pub struct RequiredDependencies {
	entries: Vec<RequiredDependency>,
	index: HashMap<Dependency, usize>,
}

impl RequiredDependencies {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn get(&self, dependency: &Dependency) -> Option<&RequiredDependency> {
		self.index.get(dependency).map(|&i| &self.entries[i])
	}

	pub fn contains(&self, dependency: &Dependency) -> bool {
		self.index.contains_key(dependency)
	}

	pub fn iter(&self) -> impl Iterator<Item = &RequiredDependency> {
		self.entries.iter()
	}

	/// The dependency keys, in insertion order.
	pub fn dependencies(&self) -> impl Iterator<Item = &Dependency> {
		self.entries.iter().map(RequiredDependency::dependency)
	}

	/// Insert one entry; an existing entry for the same dependency is merged
	/// (transitive OR'ed, consuming scopes unioned) in place.
	pub fn insert(&mut self, required: RequiredDependency) {
		match self.index.get(&required.dependency) {
			Some(&i) => {
				let existing = &mut self.entries[i];
				existing.transitive |= required.transitive;
				existing.consuming_scopes.extend(required.consuming_scopes);
			}
			None => {
				self.index
					.insert(required.dependency.clone(), self.entries.len());
				self.entries.push(required);
			}
		}
	}

	/// Drop every requirement satisfied by one of `satisfied`.
	pub fn minus(&self, satisfied: &[Dependency]) -> Self {
		self.entries
			.iter()
			.filter(|entry| !satisfied.contains(&entry.dependency))
			.cloned()
			.collect()
	}

	/// Union keyed by dependency. For keys present in both operands the
	/// transitive flags are OR'ed and the consuming-scope sets unioned, so
	/// no metadata is lost and operand order does not matter.
	pub fn plus(&self, other: &Self) -> Self {
		let mut merged = self.clone();
		for entry in &other.entries {
			merged.insert(entry.clone());
		}
		merged
	}

	/// Mark every entry transitive. Applied when a requirement set crosses a
	/// Scope boundary upward.
	pub fn to_transitive(&self) -> Self {
		self.entries
			.iter()
			.map(|entry| {
				RequiredDependency::new(
					entry.dependency.clone(),
					true,
					entry.consuming_scopes.clone(),
				)
			})
			.collect()
	}

	/// Group the entries by consuming Scope, for per-Scope diagnostics.
	pub fn by_consuming_scope(&self) -> BTreeMap<ScopeId, Vec<Dependency>> {
		let mut grouped: BTreeMap<ScopeId, Vec<Dependency>> = BTreeMap::new();
		for entry in &self.entries {
			for scope in &entry.consuming_scopes {
				grouped
					.entry(scope.clone())
					.or_default()
					.push(entry.dependency.clone());
			}
		}
		grouped
	}
}

impl PartialEq for RequiredDependencies {
	fn eq(&self, other: &Self) -> bool {
		self.entries.len() == other.entries.len()
			&& self
				.entries
				.iter()
				.all(|entry| other.get(&entry.dependency) == Some(entry))
	}
}

impl Eq for RequiredDependencies {}

impl FromIterator<RequiredDependency> for RequiredDependencies {
	fn from_iter<I: IntoIterator<Item = RequiredDependency>>(iter: I) -> Self {
		let mut set = Self::new();
		for required in iter {
			set.insert(required);
		}
		set
	}
}

impl From<Vec<RequiredDependency>> for RequiredDependencies {
	fn from(entries: Vec<RequiredDependency>) -> Self {
		entries.into_iter().collect()
	}
}

impl From<RequiredDependencies> for Vec<RequiredDependency> {
	fn from(set: RequiredDependencies) -> Self {
		set.entries
	}
}

impl<'a> IntoIterator for &'a RequiredDependencies {
	type Item = &'a RequiredDependency;
	type IntoIter = std::slice::Iter<'a, RequiredDependency>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
