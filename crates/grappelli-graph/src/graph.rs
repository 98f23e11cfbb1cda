//! Arena-backed scope graph.
//!
//! Nodes are stored in a flat vector and reference each other by index, with
//! parent links kept in a separate map built as a post-pass over the child
//! adjacency. This keeps the structure free of reference cycles even though
//! the scope hierarchy itself is a DAG with shared children, and makes it
//! serializable for tooling and tests.

use grappelli_model::{ScopeEntry, ScopeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) struct NodeId(pub(crate) usize);

/// An edge from a scope to one of its declared children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ChildEdge {
	/// Index into the parent scope's child declarations. The declaration
	/// carries the dynamic dependencies for this edge.
	pub(crate) declaration: usize,
	pub(crate) target: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Node {
	pub(crate) entry: ScopeEntry,
	pub(crate) children: Vec<ChildEdge>,
}

/// The connected scope hierarchy for one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeGraph {
	pub(crate) nodes: Vec<Node>,
	pub(crate) ids: HashMap<ScopeId, NodeId>,
	pub(crate) roots: Vec<NodeId>,
	parents_of: HashMap<ScopeId, BTreeSet<ScopeId>>,
}

impl ScopeGraph {
	pub(crate) fn new(nodes: Vec<Node>, ids: HashMap<ScopeId, NodeId>, roots: Vec<NodeId>) -> Self {
		let mut parents_of: HashMap<ScopeId, BTreeSet<ScopeId>> = HashMap::new();
		for node in &nodes {
			let parent = node.entry.id();
			for edge in &node.children {
				let child = nodes[edge.target.0].entry.id();
				parents_of
					.entry(child.clone())
					.or_default()
					.insert(parent.clone());
			}
		}
		Self {
			nodes,
			ids,
			roots,
			parents_of,
		}
	}

	pub(crate) fn node(&self, id: NodeId) -> &Node {
		&self.nodes[id.0]
	}

	pub(crate) fn node_id(&self, id: &ScopeId) -> Option<NodeId> {
		self.ids.get(id).copied()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn contains(&self, id: &ScopeId) -> bool {
		self.ids.contains_key(id)
	}

	/// Every scope in the graph, in construction (depth-first) order.
	pub fn scope_ids(&self) -> impl Iterator<Item = &ScopeId> {
		self.nodes.iter().map(|node| node.entry.id())
	}

	/// The scope entries, in construction order.
	pub fn entries(&self) -> impl Iterator<Item = &ScopeEntry> {
		self.nodes.iter().map(|node| &node.entry)
	}

	pub fn entry(&self, id: &ScopeId) -> Option<&ScopeEntry> {
		self.node_id(id).map(|node_id| &self.node(node_id).entry)
	}

	/// Direct children of a scope, in declaration order.
	pub fn children_of(&self, id: &ScopeId) -> Vec<&ScopeId> {
		match self.node_id(id) {
			Some(node_id) => self
				.node(node_id)
				.children
				.iter()
				.map(|edge| self.node(edge.target).entry.id())
				.collect(),
			None => Vec::new(),
		}
	}

	/// Direct parents of a scope. More than one entry means the scope is a
	/// shared (diamond) child.
	pub fn parents_of(&self, id: &ScopeId) -> impl Iterator<Item = &ScopeId> {
		self.parents_of.get(id).into_iter().flatten()
	}
}
