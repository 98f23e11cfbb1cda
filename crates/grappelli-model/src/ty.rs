//! Canonical identities for types, qualifier annotations, and Scopes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical reference to a host-language type.
///
/// Identity is the fully qualified name as the declaration extractor
/// canonicalized it. The engine never inspects the name beyond equality,
/// hashing, and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef {
	qualified_name: String,
}

impl TypeRef {
	pub fn new(qualified_name: impl Into<String>) -> Self {
		Self {
			qualified_name: qualified_name.into(),
		}
	}

	pub fn qualified_name(&self) -> &str {
		&self.qualified_name
	}

	/// The simple (unqualified) name, for compact diagnostics.
	pub fn simple_name(&self) -> &str {
		self.qualified_name
			.rsplit('.')
			.next()
			.unwrap_or(&self.qualified_name)
	}
}

impl fmt::Display for TypeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.qualified_name)
	}
}

/// Reference to a qualifier annotation, e.g. a named binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationRef {
	qualified_name: String,
}

impl AnnotationRef {
	pub fn new(qualified_name: impl Into<String>) -> Self {
		Self {
			qualified_name: qualified_name.into(),
		}
	}

	pub fn qualified_name(&self) -> &str {
		&self.qualified_name
	}
}

impl fmt::Display for AnnotationRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "@{}", self.qualified_name)
	}
}

/// Identity of a Scope declaration.
///
/// A Scope's identity is the type that declares it, so `ScopeId` is a thin
/// wrapper over [`TypeRef`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(TypeRef);

impl ScopeId {
	pub fn new(ty: TypeRef) -> Self {
		Self(ty)
	}

	pub fn type_ref(&self) -> &TypeRef {
		&self.0
	}
}

impl fmt::Display for ScopeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}
