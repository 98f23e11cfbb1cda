//! Scope graph construction, fixed-point resolution, and validation.
//!
//! The engine runs as one synchronous, in-process pass:
//!
//! 1. Construction turns a set of root scope ids plus a
//!    [`SourceSet`](grappelli_model::SourceSet) into an arena-backed
//!    [`ScopeGraph`], detecting scope-declaration cycles along the way.
//! 2. Resolution computes every node's required-dependency set bottom-up
//!    with an explicit memoization table, so each scope is resolved exactly
//!    once no matter how many parents reference it.
//! 3. Validation walks the resolved graph and collects the remaining
//!    structural errors without short-circuiting.
//!
//! [`ResolvedGraph::resolve`] is the single entry point tying the phases
//! together. Memoization tables live for one pass and are rebuilt from
//! scratch on the next extractor batch; nothing is shared across passes.

mod builder;
mod cycle;
mod error;
mod graph;
mod resolve;
mod resolved;
mod validate;

pub use cycle::find_provider_cycle;
pub use error::GraphError;
pub use graph::ScopeGraph;
pub use resolve::ResolvedNode;
pub use resolved::ResolvedGraph;
