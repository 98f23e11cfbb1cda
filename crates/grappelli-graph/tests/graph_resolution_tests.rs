//! Integration tests for graph construction and required-dependency
//! resolution.

use grappelli_graph::ResolvedGraph;
use grappelli_model::{
	AccessMethod, ChildDeclaration, Dependency, DynamicDependency, ExplicitContract,
	PrecompiledContract, ProviderMethod, RequiredDependencies, RequiredDependency, ScopeClass,
	ScopeId, SourceSet, TypeRef,
};
use rstest::rstest;

fn dep(name: &str) -> Dependency {
	Dependency::new(TypeRef::new(name))
}

fn scope_id(name: &str) -> ScopeId {
	ScopeId::new(TypeRef::new(name))
}

fn scope(name: &str) -> ScopeClass {
	ScopeClass::new(scope_id(name))
}

#[rstest]
fn child_requirements_flow_upward_as_transitive() {
	// Arrange: the child consumes a database (provided and exposed by the
	// root) and an http client nobody provides.
	let mut child = scope("app.ChildScope");
	child.push_provider(ProviderMethod::new(
		"controller",
		dep("app.Controller"),
		vec![dep("app.Database"), dep("app.HttpClient")],
	));

	let mut root = scope("app.RootScope");
	root.push_provider(ProviderMethod::new("database", dep("app.Database"), vec![]).exposed());
	root.push_child(ChildDeclaration::new("child", scope_id("app.ChildScope")));

	let mut source = SourceSet::new();
	source.push_scope(root);
	source.push_scope(child);

	// Act
	let graph = ResolvedGraph::resolve(&source, &[scope_id("app.RootScope")]);

	// Assert: the child requires both values directly
	let child_required = graph.required_dependencies(&scope_id("app.ChildScope")).unwrap();
	assert_eq!(child_required.len(), 2);
	assert!(child_required.iter().all(|r| !r.is_transitive()));

	// The root satisfies the database locally; the http client is forwarded
	// on the child's behalf, marked transitive.
	let root_required = graph.required_dependencies(&scope_id("app.RootScope")).unwrap();
	assert_eq!(root_required.len(), 1);
	let forwarded = root_required.get(&dep("app.HttpClient")).unwrap();
	assert!(forwarded.is_transitive());
	assert!(forwarded.consuming_scopes().contains(&scope_id("app.ChildScope")));
	assert!(graph.is_valid());
}

#[rstest]
fn diamond_child_is_resolved_exactly_once() {
	// Arrange: Root -> {Left, Right}, both -> Leaf
	let mut leaf = scope("app.LeafScope");
	leaf.push_access_method(AccessMethod::new("logger", dep("app.Logger")));

	let mut left = scope("app.LeftScope");
	left.push_child(ChildDeclaration::new("leaf", scope_id("app.LeafScope")));
	let mut right = scope("app.RightScope");
	right.push_child(ChildDeclaration::new("leaf", scope_id("app.LeafScope")));

	let mut root = scope("app.RootScope");
	root.push_child(ChildDeclaration::new("left", scope_id("app.LeftScope")));
	root.push_child(ChildDeclaration::new("right", scope_id("app.RightScope")));

	let mut source = SourceSet::new();
	source.push_scope(root);
	source.push_scope(left);
	source.push_scope(right);
	source.push_scope(leaf);

	// Act
	let graph = ResolvedGraph::resolve(&source, &[scope_id("app.RootScope")]);

	// Assert: each scope appears exactly once in the resolution order, and
	// the shared leaf was computed before either parent.
	let order = graph.resolution_order();
	assert_eq!(order.len(), 4);
	let occurrences = order.iter().filter(|id| **id == scope_id("app.LeafScope")).count();
	assert_eq!(occurrences, 1);
	let position = |id: &ScopeId| order.iter().position(|o| o == id).unwrap();
	assert!(position(&scope_id("app.LeafScope")) < position(&scope_id("app.LeftScope")));
	assert!(position(&scope_id("app.LeafScope")) < position(&scope_id("app.RightScope")));
	assert!(position(&scope_id("app.RootScope")) == order.len() - 1);

	// The leaf has two parents in the graph view.
	let parents: Vec<_> = graph.parents_of(&scope_id("app.LeafScope")).collect();
	assert_eq!(parents.len(), 2);

	// The logger requirement reaches the root exactly once, attributed to
	// the leaf.
	let root_required = graph.required_dependencies(&scope_id("app.RootScope")).unwrap();
	assert_eq!(root_required.len(), 1);
	let logger = root_required.get(&dep("app.Logger")).unwrap();
	assert_eq!(
		logger.consuming_scopes().iter().collect::<Vec<_>>(),
		vec![&scope_id("app.LeafScope")]
	);
}

#[rstest]
fn consuming_scopes_accumulate_across_siblings() {
	// Arrange: both children consume the same logger
	let mut left = scope("app.LeftScope");
	left.push_access_method(AccessMethod::new("logger", dep("app.Logger")));
	let mut right = scope("app.RightScope");
	right.push_access_method(AccessMethod::new("logger", dep("app.Logger")));

	let mut root = scope("app.RootScope");
	root.push_child(ChildDeclaration::new("left", scope_id("app.LeftScope")));
	root.push_child(ChildDeclaration::new("right", scope_id("app.RightScope")));

	let mut source = SourceSet::new();
	source.push_scope(root);
	source.push_scope(left);
	source.push_scope(right);

	// Act
	let graph = ResolvedGraph::resolve(&source, &[scope_id("app.RootScope")]);

	// Assert
	let root_required = graph.required_dependencies(&scope_id("app.RootScope")).unwrap();
	let logger = root_required.get(&dep("app.Logger")).unwrap();
	assert!(logger.is_transitive());
	assert!(logger.consuming_scopes().contains(&scope_id("app.LeftScope")));
	assert!(logger.consuming_scopes().contains(&scope_id("app.RightScope")));
}

#[rstest]
fn dynamic_dependency_satisfies_the_childs_direct_requirement() {
	// Arrange: the child consumes a session token passed in dynamically
	let mut child = scope("app.ChildScope");
	child.push_access_method(AccessMethod::new("token", dep("app.SessionToken")));

	let mut root = scope("app.RootScope");
	root.push_child(
		ChildDeclaration::new("child", scope_id("app.ChildScope"))
			.with_dynamic(DynamicDependency::new(dep("app.SessionToken"))),
	);

	let mut source = SourceSet::new();
	source.push_scope(root);
	source.push_scope(child);

	// Act
	let graph = ResolvedGraph::resolve(&source, &[scope_id("app.RootScope")]);

	// Assert: the child still advertises the requirement, but the root does
	// not forward it anywhere because the construction site supplies it.
	assert!(
		graph
			.required_dependencies(&scope_id("app.ChildScope"))
			.unwrap()
			.contains(&dep("app.SessionToken"))
	);
	assert!(
		graph
			.required_dependencies(&scope_id("app.RootScope"))
			.unwrap()
			.is_empty()
	);
	assert!(graph.is_valid());
}

#[rstest]
fn grandchild_requirement_stays_transitive_on_the_child() {
	// Arrange: Root passes TypeY into Child dynamically, but it is the
	// grandchild that consumes it.
	let mut grandchild = scope("app.GrandchildScope");
	grandchild.push_access_method(AccessMethod::new("value", dep("app.TypeY")));

	let mut child = scope("app.ChildScope");
	child.push_child(ChildDeclaration::new(
		"grandchild",
		scope_id("app.GrandchildScope"),
	));

	let mut root = scope("app.RootScope");
	root.push_child(
		ChildDeclaration::new("child", scope_id("app.ChildScope"))
			.with_dynamic(DynamicDependency::new(dep("app.TypeY"))),
	);

	let mut source = SourceSet::new();
	source.push_scope(root);
	source.push_scope(child);
	source.push_scope(grandchild);

	// Act
	let graph = ResolvedGraph::resolve(&source, &[scope_id("app.RootScope")]);

	// Assert: the child's own contract still carries TypeY, marked
	// transitive; the dynamic value belongs to the parent's construction
	// site, not to the child's resolved ancestry.
	let child_required = graph.required_dependencies(&scope_id("app.ChildScope")).unwrap();
	let forwarded = child_required.get(&dep("app.TypeY")).unwrap();
	assert!(forwarded.is_transitive());

	// The unexposed dynamic binding is flagged; see validation_tests for
	// the full error shape.
	assert!(!graph.is_valid());
}

#[rstest]
fn explicit_contract_reports_missing_and_replaces_the_surface() {
	// Arrange: the child needs a database and an http client but only
	// declares the database in its contract.
	let mut child = scope("app.ChildScope");
	child.push_provider(ProviderMethod::new(
		"controller",
		dep("app.Controller"),
		vec![dep("app.Database"), dep("app.HttpClient")],
	));
	child.set_explicit_contract(ExplicitContract::new(vec![dep("app.Database")]));

	let mut root = scope("app.RootScope");
	root.push_child(ChildDeclaration::new("child", scope_id("app.ChildScope")));

	let mut source = SourceSet::new();
	source.push_scope(root);
	source.push_scope(child);

	// Act
	let graph = ResolvedGraph::resolve(&source, &[scope_id("app.RootScope")]);

	// Assert: the contract surface is exactly what was declared
	let child_required = graph.required_dependencies(&scope_id("app.ChildScope")).unwrap();
	assert_eq!(child_required.len(), 1);
	assert!(child_required.contains(&dep("app.Database")));

	// The uncovered requirement is a diagnostic, not an abort; upstream
	// resolution keeps going against the declared contract.
	assert!(graph.errors().iter().any(|error| matches!(
		error,
		grappelli_graph::GraphError::MissingDependencies { scope, dependencies }
			if *scope == scope_id("app.ChildScope")
				&& dependencies == &vec![dep("app.HttpClient")]
	)));
	let root_required = graph.required_dependencies(&scope_id("app.RootScope")).unwrap();
	assert_eq!(root_required.len(), 1);
	assert!(root_required.contains(&dep("app.Database")));
}

#[rstest]
fn explicit_contract_may_declare_more_than_is_required() {
	// Arrange
	let mut child = scope("app.ChildScope");
	child.push_access_method(AccessMethod::new("database", dep("app.Database")));
	child.set_explicit_contract(ExplicitContract::new(vec![
		dep("app.Database"),
		dep("app.Metrics"),
	]));

	let mut root = scope("app.RootScope");
	root.push_child(ChildDeclaration::new("child", scope_id("app.ChildScope")));

	let mut source = SourceSet::new();
	source.push_scope(root);
	source.push_scope(child);

	// Act
	let graph = ResolvedGraph::resolve(&source, &[scope_id("app.RootScope")]);

	// Assert: no missing-dependency error; the surplus declaration becomes
	// part of the contract surface as a direct requirement.
	assert!(graph.is_valid());
	let child_required = graph.required_dependencies(&scope_id("app.ChildScope")).unwrap();
	assert_eq!(child_required.len(), 2);
	let surplus = child_required.get(&dep("app.Metrics")).unwrap();
	assert!(!surplus.is_transitive());
	assert!(surplus.consuming_scopes().contains(&scope_id("app.ChildScope")));
}

#[rstest]
fn precompiled_contract_substitutes_without_recursion() {
	// Arrange: the child lives in a separately compiled module; only its
	// generated contract is known.
	let contract: RequiredDependencies = vec![RequiredDependency::direct(
		dep("app.Database"),
		scope_id("lib.ChildScope"),
	)]
	.into_iter()
	.collect();

	let mut root = scope("app.RootScope");
	root.push_child(ChildDeclaration::new("child", scope_id("lib.ChildScope")));

	let mut source = SourceSet::new();
	source.push_scope(root);
	source.push_precompiled(PrecompiledContract::new(scope_id("lib.ChildScope"), contract));

	// Act
	let graph = ResolvedGraph::resolve(&source, &[scope_id("app.RootScope")]);

	// Assert
	assert!(graph.is_valid());
	let root_required = graph.required_dependencies(&scope_id("app.RootScope")).unwrap();
	let forwarded = root_required.get(&dep("app.Database")).unwrap();
	assert!(forwarded.is_transitive());
}

#[rstest]
fn scope_can_always_supply_itself() {
	// Arrange: the child consumes its parent scope and itself
	let mut child = scope("app.ChildScope");
	child.push_provider(ProviderMethod::new(
		"controller",
		dep("app.Controller"),
		vec![dep("app.ChildScope"), dep("app.RootScope")],
	));

	let mut root = scope("app.RootScope");
	root.push_child(ChildDeclaration::new("child", scope_id("app.ChildScope")));

	let mut source = SourceSet::new();
	source.push_scope(root);
	source.push_scope(child);

	// Act
	let graph = ResolvedGraph::resolve(&source, &[scope_id("app.RootScope")]);

	// Assert: the child satisfies its own type locally and the parent
	// satisfies the rest; nothing reaches the root's ancestry.
	assert!(graph.is_valid());
	assert!(
		graph
			.required_dependencies(&scope_id("app.RootScope"))
			.unwrap()
			.is_empty()
	);
}

#[rstest]
fn unknown_child_is_reported_and_pruned() {
	// Arrange
	let mut root = scope("app.RootScope");
	root.push_child(ChildDeclaration::new("child", scope_id("app.MissingScope")));

	let mut source = SourceSet::new();
	source.push_scope(root);

	// Act
	let graph = ResolvedGraph::resolve(&source, &[scope_id("app.RootScope")]);

	// Assert: the root still resolves, minus the missing subtree.
	assert!(graph.required_dependencies(&scope_id("app.RootScope")).is_some());
	assert_eq!(graph.errors().len(), 1);
	assert!(matches!(
		&graph.errors()[0],
		grappelli_graph::GraphError::UnresolvedScope { id, declared_by: Some(parent) }
			if *id == scope_id("app.MissingScope") && *parent == scope_id("app.RootScope")
	));
}

#[rstest]
fn scope_graph_serializes_for_tooling() {
	// Arrange
	let mut child = scope("app.ChildScope");
	child.push_access_method(AccessMethod::new("logger", dep("app.Logger")));
	let mut root = scope("app.RootScope");
	root.push_child(ChildDeclaration::new("child", scope_id("app.ChildScope")));

	let mut source = SourceSet::new();
	source.push_scope(root);
	source.push_scope(child);

	let graph = ResolvedGraph::resolve(&source, &[scope_id("app.RootScope")]);

	// Act
	let json = serde_json::to_string(graph.graph()).unwrap();
	let restored: grappelli_graph::ScopeGraph = serde_json::from_str(&json).unwrap();

	// Assert
	assert_eq!(&restored, graph.graph());
	assert_eq!(restored.children_of(&scope_id("app.RootScope")).len(), 1);
}
