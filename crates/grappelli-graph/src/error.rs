//! Structural errors produced by graph construction, resolution, and
//! validation.

use grappelli_model::{Dependency, RequiredDependency, ScopeId};
use serde::{Deserialize, Serialize};

fn join_scopes(ids: &[ScopeId]) -> String {
	ids.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(" -> ")
}

/// One structural error found during a resolution pass.
///
/// The engine returns these as data; it never formats or prints messages on
/// its own. Each variant carries the offending scope/method identities so a
/// compiler integration or IDE can map it back to a source location. The
/// `Display` output (via `thiserror`) is a terse single-line summary;
/// `grappelli-report` renders the full multi-line messages.
///
/// All variants except `ScopeCycle` are recoverable: resolution continues
/// and the pass always yields a complete report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum GraphError {
	/// A scope declares itself as a descendant, directly or indirectly.
	/// Fatal for the affected root: there is no well-defined resolution
	/// order for a cyclic scope hierarchy.
	#[error("scope cycle: {}", join_scopes(.path))]
	ScopeCycle { path: Vec<ScopeId> },

	/// A child declaration points at a scope the source set cannot supply,
	/// either because it was never discovered or because it was dropped for
	/// parse errors.
	#[error("scope implementation not found: {id}")]
	UnresolvedScope {
		id: ScopeId,
		/// The scope whose child declaration referenced the missing scope,
		/// if the reference did not come from the root set itself.
		declared_by: Option<ScopeId>,
	},

	/// A provider method requires a dependency that, through other providers
	/// in the same scope, is produced by itself.
	#[error("provider cycle in {scope}: {}", .cycle.join(" -> "))]
	DependencyCycle {
		scope: ScopeId,
		/// Provider method names in path order.
		cycle: Vec<String>,
	},

	/// The scope declares an explicit dependency contract that does not
	/// cover everything the scope actually requires.
	#[error("missing dependencies in {scope}")]
	MissingDependencies {
		scope: ScopeId,
		dependencies: Vec<Dependency>,
	},

	/// More than one provider visible to this scope (its own, or exposed by
	/// an ancestor) yields the same dependency.
	#[error("duplicate providers for {dependency}: {scope}.{provider}")]
	DuplicateProviders {
		scope: ScopeId,
		provider: String,
		dependency: Dependency,
		conflicting_scopes: Vec<ScopeId>,
	},

	/// A descendant requires a dependency this scope provides but has not
	/// exposed. The provision was still allowed to satisfy the descendant
	/// during resolution so the rest of the graph keeps its accurate shape;
	/// this error is what makes that leniency visible.
	#[error("{required} is provided by {scope}.{provider} but not exposed")]
	NotExposed {
		scope: ScopeId,
		provider: String,
		required: RequiredDependency,
	},

	/// A dynamic dependency passed into a child satisfies a requirement the
	/// child merely forwards from its own descendants, without being marked
	/// exposed to them.
	#[error("dynamic dependency {required} passed to {scope}.{child} is not exposed")]
	NotExposedDynamic {
		scope: ScopeId,
		child: String,
		required: RequiredDependency,
	},
}

impl GraphError {
	/// The scope a consumer should attach this diagnostic to.
	pub fn scope(&self) -> Option<&ScopeId> {
		match self {
			GraphError::ScopeCycle { path } => path.first(),
			GraphError::UnresolvedScope { declared_by, id } => {
				declared_by.as_ref().or(Some(id))
			}
			GraphError::DependencyCycle { scope, .. }
			| GraphError::MissingDependencies { scope, .. }
			| GraphError::DuplicateProviders { scope, .. }
			| GraphError::NotExposed { scope, .. }
			| GraphError::NotExposedDynamic { scope, .. } => Some(scope),
		}
	}
}
