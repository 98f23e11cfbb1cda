//! Graph construction: depth-first discovery of the scope hierarchy.

use crate::error::GraphError;
use crate::graph::{ChildEdge, Node, NodeId, ScopeGraph};
use grappelli_model::{ScopeEntry, ScopeId, SourceSet};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Construction aborts for the current root when its subtree contains a
/// scope-declaration cycle; other roots are unaffected.
struct ScopeCycle;

pub(crate) struct BuildOutput {
	pub(crate) graph: ScopeGraph,
	pub(crate) errors: Vec<GraphError>,
}

/// Build the connected graph reachable from `roots`.
///
/// Two bookkeeping structures do different jobs here: `path` is the current
/// recursion stack and detects cycles; `ids` is the global memo map and
/// detects sharing, so a diamond-shaped hierarchy builds each shared child
/// exactly once.
pub(crate) fn build(source: &SourceSet, roots: &[ScopeId]) -> BuildOutput {
	let mut builder = GraphBuilder {
		source,
		nodes: Vec::new(),
		ids: HashMap::new(),
		errors: Vec::new(),
	};

	let mut root_nodes = Vec::new();
	for root in roots {
		let mut path = Vec::new();
		match builder.build_node(&mut path, root, None) {
			Ok(Some(node_id)) => root_nodes.push(node_id),
			// Unresolved root; already recorded.
			Ok(None) => {}
			// Cycle below this root; already recorded, other roots continue.
			Err(ScopeCycle) => {}
		}
	}

	debug!(
		scopes = builder.nodes.len(),
		roots = root_nodes.len(),
		errors = builder.errors.len(),
		"scope graph built"
	);

	BuildOutput {
		graph: ScopeGraph::new(builder.nodes, builder.ids, root_nodes),
		errors: builder.errors,
	}
}

struct GraphBuilder<'s> {
	source: &'s SourceSet,
	nodes: Vec<Node>,
	ids: HashMap<ScopeId, NodeId>,
	errors: Vec<GraphError>,
}

impl GraphBuilder<'_> {
	/// Returns `Ok(None)` when the scope cannot be supplied by the source
	/// set; the referencing edge is pruned and resolution continues without
	/// it.
	fn build_node(
		&mut self,
		path: &mut Vec<ScopeId>,
		id: &ScopeId,
		declared_by: Option<&ScopeId>,
	) -> Result<Option<NodeId>, ScopeCycle> {
		if let Some(position) = path.iter().position(|visited| visited == id) {
			self.errors.push(GraphError::ScopeCycle {
				path: path[position..].to_vec(),
			});
			return Err(ScopeCycle);
		}
		if let Some(&node_id) = self.ids.get(id) {
			trace!(scope = %id, "scope already built, sharing node");
			return Ok(Some(node_id));
		}

		let Some(entry) = self.source.lookup(id) else {
			self.errors.push(GraphError::UnresolvedScope {
				id: id.clone(),
				declared_by: declared_by.cloned(),
			});
			return Ok(None);
		};

		let children = match entry {
			// Pre-resolved in a separately compiled module; its contract is
			// substituted as-is, no recursion.
			ScopeEntry::Precompiled(_) => Vec::new(),
			ScopeEntry::Declared(scope) => {
				path.push(id.clone());
				let mut children = Vec::new();
				for (declaration, child) in scope.children().iter().enumerate() {
					let built = self.build_node(path, child.target(), Some(id));
					match built {
						Ok(Some(target)) => children.push(ChildEdge {
							declaration,
							target,
						}),
						Ok(None) => {}
						Err(cycle) => {
							path.pop();
							return Err(cycle);
						}
					}
				}
				path.pop();
				children
			}
		};

		let node_id = NodeId(self.nodes.len());
		self.nodes.push(Node {
			entry: entry.clone(),
			children,
		});
		self.ids.insert(id.clone(), node_id);
		trace!(scope = %id, node = node_id.0, "scope node created");
		Ok(Some(node_id))
	}
}
