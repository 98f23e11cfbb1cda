//! Fixed-point resolution of required-dependency sets.

use crate::graph::{NodeId, ScopeGraph};
use grappelli_model::{
	Dependency, RequiredDependencies, RequiredDependency, ScopeClass, ScopeEntry, ScopeId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// The resolved view of one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedNode {
	required: RequiredDependencies,
	child_required: RequiredDependencies,
	missing: Option<RequiredDependencies>,
}

impl ResolvedNode {
	/// The contract the scope's generated container constructor must accept
	/// from its ancestry. When the scope declares an explicit contract this
	/// is the declared surface, regardless of missing dependencies.
	pub fn required(&self) -> &RequiredDependencies {
		&self.required
	}

	/// The merged, transitive requirements of the scope's children before
	/// the scope's own provisions were subtracted. The validator uses this
	/// to catch unexposed provisions that satisfied a descendant.
	pub fn child_required(&self) -> &RequiredDependencies {
		&self.child_required
	}

	/// Computed requirements not covered by the scope's explicit contract.
	pub fn missing(&self) -> Option<&RequiredDependencies> {
		self.missing.as_ref()
	}
}

#[derive(Debug, Default)]
pub(crate) struct Resolution {
	pub(crate) nodes: HashMap<ScopeId, ResolvedNode>,
	/// Scopes in the order their sets were computed: strictly
	/// children-before-parents, each scope exactly once.
	pub(crate) order: Vec<ScopeId>,
}

/// Resolve every node reachable from the graph's roots.
///
/// A single recursive function with an explicit memoization table; a scope
/// referenced as a child from several parents is computed exactly once.
/// Termination is guaranteed because the builder rejected cyclic scope
/// declarations, so every recursive call strictly descends toward leaves.
pub(crate) fn resolve(graph: &ScopeGraph) -> Resolution {
	let mut resolution = Resolution::default();
	for node_id in 0..graph.len() {
		resolve_node(graph, NodeId(node_id), &mut resolution);
	}
	debug!(scopes = resolution.order.len(), "dependency resolution complete");
	resolution
}

fn resolve_node(graph: &ScopeGraph, node_id: NodeId, resolution: &mut Resolution) {
	let node = graph.node(node_id);
	let scope_id = node.entry.id();
	if resolution.nodes.contains_key(scope_id) {
		return;
	}

	let resolved = match &node.entry {
		ScopeEntry::Precompiled(contract) => ResolvedNode {
			required: contract.required().clone(),
			child_required: RequiredDependencies::new(),
			missing: None,
		},
		ScopeEntry::Declared(scope) => {
			// Children first; the memo table makes re-entry from another
			// parent a no-op.
			for edge in &node.children {
				resolve_node(graph, edge.target, resolution);
			}
			resolve_scope(graph, node_id, scope, resolution)
		}
	};

	resolution.nodes.insert(scope_id.clone(), resolved);
	resolution.order.push(scope_id.clone());
}

fn resolve_scope(
	graph: &ScopeGraph,
	node_id: NodeId,
	scope: &ScopeClass,
	resolution: &Resolution,
) -> ResolvedNode {
	let node = graph.node(node_id);

	// Merge each child's requirements, minus the dynamic dependencies
	// supplied at its declaration, marked transitive on the way up. Dynamic
	// values may satisfy transitive entries here even though only exposed
	// ones legitimately reach grandchildren; the validator reports the
	// unexposed cases, keeping the rest of the graph's shape accurate.
	let mut child_required = RequiredDependencies::new();
	for edge in &node.children {
		let declaration = &scope.children()[edge.declaration];
		let child_id = graph.node(edge.target).entry.id();
		let child = &resolution.nodes[child_id];
		let dynamic: Vec<Dependency> = declaration
			.dynamic_dependencies()
			.iter()
			.map(|d| d.dependency().clone())
			.collect();
		child_required = child_required.plus(&child.required().minus(&dynamic).to_transitive());
	}

	// Subtracting all provided dependencies, exposed or not, is deliberate:
	// an unexposed match becomes a NotExposed error during validation
	// instead of a spurious missing requirement here.
	let required = child_required
		.minus(&scope.provided())
		.plus(&scope.self_required());

	match scope.explicit_contract() {
		Some(contract) => {
			let missing = required.minus(contract.declared());
			// The declared contract replaces the computed set as this
			// scope's surface; computed metadata is kept where the two
			// overlap so upstream diagnostics stay accurate.
			let effective: RequiredDependencies = contract
				.declared()
				.iter()
				.map(|dependency| {
					required.get(dependency).cloned().unwrap_or_else(|| {
						RequiredDependency::direct(dependency.clone(), scope.id().clone())
					})
				})
				.collect();
			ResolvedNode {
				required: effective,
				child_required,
				missing: (!missing.is_empty()).then_some(missing),
			}
		}
		None => ResolvedNode {
			required,
			child_required,
			missing: None,
		},
	}
}
