//! Dependency identity: a requested or provided value.

use crate::ty::{AnnotationRef, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed, optionally qualified value that a Scope requests or supplies.
///
/// Identity and equality are defined by the `(type, qualifier)` pair: two
/// dependencies are the same request iff both components match. Instances
/// are created once by the declaration extractor and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dependency {
	ty: TypeRef,
	qualifier: Option<AnnotationRef>,
}

impl Dependency {
	/// An unqualified dependency on `ty`.
	pub fn new(ty: TypeRef) -> Self {
		Self {
			ty,
			qualifier: None,
		}
	}

	/// A dependency on `ty` qualified by an annotation.
	pub fn qualified(ty: TypeRef, qualifier: AnnotationRef) -> Self {
		Self {
			ty,
			qualifier: Some(qualifier),
		}
	}

	pub fn ty(&self) -> &TypeRef {
		&self.ty
	}

	pub fn qualifier(&self) -> Option<&AnnotationRef> {
		self.qualifier.as_ref()
	}
}

impl fmt::Display for Dependency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.qualifier {
			Some(qualifier) => write!(f, "{} {}", qualifier, self.ty),
			None => fmt::Display::fmt(&self.ty, f),
		}
	}
}
