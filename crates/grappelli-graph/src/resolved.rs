//! The one-pass entry point tying construction, resolution, and validation
//! together.

use crate::builder;
use crate::error::GraphError;
use crate::graph::ScopeGraph;
use crate::resolve::{self, ResolvedNode};
use crate::validate;
use grappelli_model::{ParseError, RequiredDependencies, ScopeId, SourceSet};
use tracing::debug;

/// A fully resolved scope hierarchy plus the complete error report for the
/// pass.
///
/// Everything is computed eagerly by [`ResolvedGraph::resolve`]; the
/// accessors are cheap lookups. A pass is coarse-grained: when the inputs
/// change (a new compiler round, a fresh IDE index), callers drop this value
/// and resolve again; no state carries over.
#[derive(Debug)]
pub struct ResolvedGraph {
	graph: ScopeGraph,
	resolution: resolve::Resolution,
	errors: Vec<GraphError>,
	parse_errors: Vec<ParseError>,
}

impl ResolvedGraph {
	/// Build, resolve, and validate the hierarchy reachable from `roots`.
	///
	/// Scope cycles abort the affected root only; every other error kind is
	/// collected without interrupting the pass, so the report covers all
	/// problems the batch has at once.
	pub fn resolve(source: &SourceSet, roots: &[ScopeId]) -> Self {
		let built = builder::build(source, roots);
		let resolution = resolve::resolve(&built.graph);

		let mut errors = built.errors;
		errors.extend(validate::validate(&built.graph, &resolution));

		debug!(
			scopes = built.graph.len(),
			errors = errors.len(),
			parse_errors = source.parse_errors().len(),
			"resolution pass finished"
		);

		Self {
			graph: built.graph,
			resolution,
			errors,
			parse_errors: source.parse_errors().to_vec(),
		}
	}

	/// Convenience for resolving every root the source set contains.
	pub fn resolve_all(source: &SourceSet) -> Self {
		Self::resolve(source, &source.roots())
	}

	pub fn graph(&self) -> &ScopeGraph {
		&self.graph
	}

	pub fn node(&self, id: &ScopeId) -> Option<&ResolvedNode> {
		self.resolution.nodes.get(id)
	}

	/// The contract the generated container constructor for `id` must
	/// accept from its ancestry.
	pub fn required_dependencies(&self, id: &ScopeId) -> Option<&RequiredDependencies> {
		self.node(id).map(ResolvedNode::required)
	}

	/// The merged transitive requirements of `id`'s children.
	pub fn child_required_dependencies(&self, id: &ScopeId) -> Option<&RequiredDependencies> {
		self.node(id).map(ResolvedNode::child_required)
	}

	/// Scopes in the order they were resolved: strictly children before
	/// parents, each exactly once. A ready-made emission order for code
	/// generation.
	pub fn resolution_order(&self) -> &[ScopeId] {
		&self.resolution.order
	}

	/// Every scope in the graph, in construction order.
	pub fn scopes(&self) -> impl Iterator<Item = &ScopeId> {
		self.graph.scope_ids()
	}

	pub fn children_of(&self, id: &ScopeId) -> Vec<&ScopeId> {
		self.graph.children_of(id)
	}

	pub fn parents_of(&self, id: &ScopeId) -> impl Iterator<Item = &ScopeId> {
		self.graph.parents_of(id)
	}

	/// Graph-validation errors, in report order.
	pub fn errors(&self) -> &[GraphError] {
		&self.errors
	}

	/// Parse-phase errors carried over from the declaration extractor.
	pub fn parse_errors(&self) -> &[ParseError] {
		&self.parse_errors
	}

	pub fn is_valid(&self) -> bool {
		self.errors.is_empty() && self.parse_errors.is_empty()
	}
}
