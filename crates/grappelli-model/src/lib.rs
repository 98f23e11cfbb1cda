//! Immutable input model for the Grappelli resolution engine.
//!
//! Everything in this crate is produced by a host-language declaration
//! extractor and treated as read-only by the graph engine: canonical
//! dependency identities, the ordered required-dependency set algebra, the
//! per-Scope declaration record, and the [`SourceSet`] boundary through which
//! an extractor hands its output to the engine.

mod dependency;
mod required;
mod scope;
mod source;
mod ty;

pub use dependency::Dependency;
pub use required::{RequiredDependencies, RequiredDependency};
pub use scope::{
	AccessMethod, ChildDeclaration, DynamicDependency, ExplicitContract, ProviderMethod,
	ScopeClass,
};
pub use source::{ParseError, PrecompiledContract, ScopeEntry, SourceSet};
pub use ty::{AnnotationRef, ScopeId, TypeRef};
