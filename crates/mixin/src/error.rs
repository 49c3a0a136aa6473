use std::fmt;

use thiserror::Error;

use crate::annotation::MixinAnnotation;

/// Where an annotation was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
	pub filename: String,
	/// Source offset of the annotation.
	pub offset: u32,
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} @ {}", self.filename, self.offset)
	}
}

/// An annotation that could not be resolved.
///
/// Every variant carries the annotation's position and the annotation kind, so
/// a caller can report it without other context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
	/// A member annotation inside a type with no root `@Mixin` processed yet.
	#[error("{position}: {annotation} on {declaration}: owner {owner} has no @Mixin")]
	UnresolvedMixinOwner {
		position: Position,
		annotation: MixinAnnotation,
		owner: String,
		declaration: String,
	},

	/// An accessor whose name follows no convention and that has no usable
	/// explicit target.
	#[error("{position}: {annotation} on {owner}.{method}{desc} does not match a valid naming format")]
	UnresolvedAccessorName {
		position: Position,
		annotation: MixinAnnotation,
		owner: String,
		method: String,
		desc: String,
	},

	/// An argument of an unexpected name or kind.
	#[error("{position}: invalid {annotation} argument: {cause}")]
	InvalidAnnotationArgument {
		position: Position,
		annotation: MixinAnnotation,
		cause: String,
	},

	/// The annotation is attached to a kind of declaration it does not apply to.
	#[error("{position}: {annotation} is not valid on {declaration}")]
	InvalidAnnotationTarget {
		position: Position,
		annotation: MixinAnnotation,
		declaration: String,
	},

	/// An explicit target names a different class than the mixin targets.
	#[error("{position}: {annotation} targets {found} but the mixin targets {expected}")]
	MixinTargetMismatch {
		position: Position,
		annotation: MixinAnnotation,
		expected: String,
		found: String,
	},
}

impl ResolveError {
	pub fn position(&self) -> &Position {
		match self {
			Self::UnresolvedMixinOwner { position, .. }
			| Self::UnresolvedAccessorName { position, .. }
			| Self::InvalidAnnotationArgument { position, .. }
			| Self::InvalidAnnotationTarget { position, .. }
			| Self::MixinTargetMismatch { position, .. } => position,
		}
	}

	pub fn annotation(&self) -> MixinAnnotation {
		match self {
			Self::UnresolvedMixinOwner { annotation, .. }
			| Self::UnresolvedAccessorName { annotation, .. }
			| Self::InvalidAnnotationArgument { annotation, .. }
			| Self::InvalidAnnotationTarget { annotation, .. }
			| Self::MixinTargetMismatch { annotation, .. } => *annotation,
		}
	}
}

pub type Result<T> = std::result::Result<T, ResolveError>;
