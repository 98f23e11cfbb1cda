//! Human-readable rendering for graph diagnostics.
//!
//! The engine crates return structured errors and never format prose; this
//! crate turns a finished pass into the multi-line report a compiler plugin
//! or CLI prints. Pure string formatting, no graph logic.

use grappelli_graph::{GraphError, ResolvedGraph};
use grappelli_model::{Dependency, ParseError, RequiredDependency, ScopeId};
use std::fmt;

const HEADER: &str = "\
====================================
          Grappelli Errors
====================================";

const FOOTER: &str = "====================================";

const SEPARATOR: &str = "------------------------------------";

/// Short uppercase tag naming the error kind, used as the section title of
/// each rendered entry.
pub fn title(error: &GraphError) -> &'static str {
	match error {
		GraphError::ScopeCycle { .. } => "SCOPE CYCLE",
		GraphError::UnresolvedScope { .. } => "UNRESOLVED SCOPE",
		GraphError::DependencyCycle { .. } => "DEPENDENCY CYCLE",
		GraphError::MissingDependencies { .. } => "MISSING DEPENDENCIES",
		GraphError::DuplicateProviders { .. } => "DUPLICATE PROVIDERS",
		GraphError::NotExposed { .. } => "NOT EXPOSED",
		GraphError::NotExposedDynamic { .. } => "NOT EXPOSED (DYNAMIC)",
	}
}

/// Render one error as its full multi-line message: a header sentence
/// followed by indented detail lines.
pub fn render(error: &GraphError) -> String {
	match error {
		GraphError::ScopeCycle { path } => render_scope_cycle(path),
		GraphError::UnresolvedScope { id, declared_by } => {
			render_unresolved_scope(id, declared_by.as_ref())
		}
		GraphError::DependencyCycle { scope, cycle } => render_dependency_cycle(scope, cycle),
		GraphError::MissingDependencies {
			scope,
			dependencies,
		} => render_missing_dependencies(scope, dependencies),
		GraphError::DuplicateProviders {
			scope,
			provider,
			dependency,
			conflicting_scopes,
		} => render_duplicate_providers(scope, provider, dependency, conflicting_scopes),
		GraphError::NotExposed {
			scope,
			provider,
			required,
		} => render_not_exposed(scope, provider, required),
		GraphError::NotExposedDynamic {
			scope,
			child,
			required,
		} => render_not_exposed_dynamic(scope, child, required),
	}
}

fn render_scope_cycle(path: &[ScopeId]) -> String {
	let mut out = String::from("Scope hierarchy contains a cycle:\n\n");
	for (index, scope) in path.iter().enumerate() {
		let prefix = if index == 0 { "  " } else { "  -> " };
		out.push_str(prefix);
		out.push_str(&scope.to_string());
		out.push('\n');
	}
	out.push_str("  -> ");
	if let Some(first) = path.first() {
		out.push_str(&first.to_string());
	}
	out.push('\n');
	out
}

fn render_unresolved_scope(
	id: &ScopeId,
	declared_by: Option<&ScopeId>,
) -> String {
	let mut out = format!("No implementation found for scope:\n\n  {id}\n");
	match declared_by {
		Some(parent) => {
			out.push_str(&format!("\n  [Declared by]\n    {parent}\n"));
		}
		None => {
			out.push_str("\n  [Declared by]\n    the root set\n");
		}
	}
	out.push_str(
		"\nSuggestions:\n  \
		 * Check that the scope interface is on the processing path.\n  \
		 * Fix any parse errors reported for it.\n",
	);
	out
}

fn render_dependency_cycle(scope: &ScopeId, cycle: &[String]) -> String {
	let mut out = format!("Provider cycle detected in {scope}:\n\n");
	for (index, provider) in cycle.iter().enumerate() {
		let prefix = if index == 0 { "  " } else { "  -> " };
		out.push_str(prefix);
		out.push_str(provider);
		out.push('\n');
	}
	if let Some(first) = cycle.first() {
		out.push_str(&format!("  -> {first}\n"));
	}
	out
}

fn render_missing_dependencies(
	scope: &ScopeId,
	dependencies: &[Dependency],
) -> String {
	let mut out = format!(
		"{scope} requires dependencies its declared contract does not list:\n\n"
	);
	for dependency in dependencies {
		out.push_str(&format!("  * {dependency}\n"));
	}
	out.push_str(
		"\nSuggestions:\n  \
		 * Add the dependencies to the declared contract.\n  \
		 * Provide or expose them from an ancestor scope instead.\n",
	);
	out
}

fn render_duplicate_providers(
	scope: &ScopeId,
	provider: &str,
	dependency: &Dependency,
	conflicting_scopes: &[ScopeId],
) -> String {
	let mut out = format!("Multiple providers found for:\n\n  {dependency}\n\n");
	out.push_str(&format!("  [Provider]\n    {scope}.{provider}\n"));
	if !conflicting_scopes.is_empty() {
		out.push_str("\n  [Also provided by]\n");
		for conflict in conflicting_scopes {
			out.push_str(&format!("    {conflict}\n"));
		}
	}
	out
}

fn render_not_exposed(
	scope: &ScopeId,
	provider: &str,
	required: &RequiredDependency,
) -> String {
	let mut out = String::from(
		"Dependency is provided but not exposed to the descendants that require it:\n\n",
	);
	out.push_str(&format!("  [Source]\n    {scope}.{provider}\n"));
	out.push_str(&format!(
		"\n  [Required]\n    {}\n",
		required.dependency()
	));
	push_consumers(&mut out, required);
	out.push_str(
		"\nSuggestions:\n  \
		 * Mark the provider as exposed.\n  \
		 * Provide the dependency in the descendant scope instead.\n",
	);
	out
}

fn render_not_exposed_dynamic(
	scope: &ScopeId,
	child: &str,
	required: &RequiredDependency,
) -> String {
	let mut out = String::from(
		"Dynamic dependency satisfies a descendant requirement but is not exposed:\n\n",
	);
	out.push_str(&format!("  [Source]\n    {scope}.{child}\n"));
	out.push_str(&format!(
		"\n  [Required]\n    {}\n",
		required.dependency()
	));
	push_consumers(&mut out, required);
	out.push_str(
		"\nSuggestions:\n  \
		 * Mark the dynamic dependency as exposed.\n  \
		 * Provide the dependency in the descendant scope instead.\n",
	);
	out
}

fn push_consumers(out: &mut String, required: &RequiredDependency) {
	if required.consuming_scopes().is_empty() {
		return;
	}
	out.push_str("\n  [Required by]\n");
	for consumer in required.consuming_scopes() {
		out.push_str(&format!("    {consumer}\n"));
	}
}

/// The full report for one resolution pass.
///
/// Parse errors come first, then graph errors, each numbered and framed by
/// banner lines. `Display` produces the exact text a build log shows.
#[derive(Debug, Clone)]
pub struct ErrorReport {
	parse_errors: Vec<ParseError>,
	graph_errors: Vec<GraphError>,
}

impl ErrorReport {
	pub fn new(parse_errors: Vec<ParseError>, graph_errors: Vec<GraphError>) -> Self {
		Self {
			parse_errors,
			graph_errors,
		}
	}

	/// Collect everything a finished pass reported.
	pub fn of(resolved: &ResolvedGraph) -> Self {
		Self::new(
			resolved.parse_errors().to_vec(),
			resolved.errors().to_vec(),
		)
	}

	pub fn is_empty(&self) -> bool {
		self.parse_errors.is_empty() && self.graph_errors.is_empty()
	}

	pub fn len(&self) -> usize {
		self.parse_errors.len() + self.graph_errors.len()
	}
}

impl fmt::Display for ErrorReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{HEADER}")?;

		let mut number = 0usize;
		for error in &self.parse_errors {
			number += 1;
			writeln!(f, "\n{SEPARATOR}\n")?;
			writeln!(f, "{number}. [PARSE ERROR]\n")?;
			writeln!(f, "{error}")?;
		}
		for error in &self.graph_errors {
			number += 1;
			writeln!(f, "\n{SEPARATOR}\n")?;
			writeln!(f, "{number}. [{}]\n", title(error))?;
			write!(f, "{}", render(error))?;
		}

		writeln!(f, "\n{FOOTER}")
	}
}
