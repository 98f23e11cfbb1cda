//! # Grappelli
//!
//! A compile-time dependency-injection resolution engine for hierarchical
//! scopes.
//!
//! Developers declare a forest of Scopes, each providing some dependencies,
//! consuming others, and declaring child Scopes. Grappelli statically
//! resolves, for every Scope, the complete set of dependencies it must
//! receive from its ancestors, and collects every structural error
//! (scope cycles, provider cycles, duplicate providers, unexposed
//! dependencies crossing scope boundaries) into a single typed report.
//!
//! The engine is an in-process library: it consumes a [`SourceSet`] produced
//! by a host-language declaration extractor and produces a [`ResolvedGraph`]
//! for a code emitter or IDE tooling. It performs no I/O and defines no wire
//! format.
//!
//! ## Crates
//!
//! - `grappelli-model`: dependency identity, required-dependency set
//!   algebra, and the immutable per-Scope model.
//! - `grappelli-graph`: graph construction, fixed-point resolution, and
//!   validation.
//! - `grappelli-report`: optional human-readable rendering of the error
//!   report.
//!
//! ## Example
//!
//! ```rust
//! use grappelli::{
//! 	Dependency, ProviderMethod, ResolvedGraph, ScopeClass, ScopeId, SourceSet, TypeRef,
//! };
//!
//! let child_id = ScopeId::new(TypeRef::new("app.ChildScope"));
//! let mut child = ScopeClass::new(child_id.clone());
//! child.push_provider(ProviderMethod::new(
//! 	"controller",
//! 	Dependency::new(TypeRef::new("app.Controller")),
//! 	vec![Dependency::new(TypeRef::new("app.Database"))],
//! ));
//!
//! let root_id = ScopeId::new(TypeRef::new("app.RootScope"));
//! let mut root = ScopeClass::new(root_id.clone());
//! root.push_child(grappelli::ChildDeclaration::new("child", child_id.clone()));
//!
//! let mut source = SourceSet::new();
//! source.push_scope(root);
//! source.push_scope(child);
//!
//! let graph = ResolvedGraph::resolve(&source, &[root_id.clone()]);
//! let required = graph.required_dependencies(&root_id).unwrap();
//! // The database is not provided anywhere, so the root scope must
//! // receive it from whoever constructs the root container.
//! assert_eq!(required.len(), 1);
//! ```

pub use grappelli_graph::{
	GraphError, ResolvedGraph, ResolvedNode, ScopeGraph, find_provider_cycle,
};
pub use grappelli_model::{
	AccessMethod, AnnotationRef, ChildDeclaration, Dependency, DynamicDependency,
	ExplicitContract, ParseError, PrecompiledContract, ProviderMethod, RequiredDependencies,
	RequiredDependency, ScopeClass, ScopeEntry, ScopeId, SourceSet, TypeRef,
};
pub use grappelli_report::ErrorReport;
