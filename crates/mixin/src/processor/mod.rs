//! Per-file annotation handling.
//!
//! One [`MixinProcessor`] is created per source file, borrowing that file's
//! [`RangeMapBuilder`] and the run's [`MixinRegistry`]. Each handler validates
//! all of an annotation's arguments before it emits entries or touches the
//! registry, so a rejected annotation leaves no partial state behind.

mod accessor;
mod interface;
mod mixin;
mod overwrite;
mod shadow;

#[cfg(test)]
mod tests;

use tracing::warn;
use xrefmap_range::RangeMapBuilder;

use crate::annotation::{Annotation, Declaration, MixinAnnotation, StringLiteral, Value};
use crate::error::{Position, ResolveError, Result};
use crate::registry::MixinRegistry;

/// Prefix `@Shadow` members may be referenced under when none is given.
pub const DEFAULT_SHADOW_PREFIX: &str = "shadow$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorOptions {
	/// Return resolution errors to the caller. When `false` they are logged and
	/// the annotation is skipped.
	pub fatal: bool,
	pub shadow_prefix: String,
}

impl Default for ProcessorOptions {
	fn default() -> Self {
		Self {
			fatal: true,
			shadow_prefix: DEFAULT_SHADOW_PREFIX.to_string(),
		}
	}
}

pub struct MixinProcessor<'a> {
	registry: &'a MixinRegistry,
	builder: &'a mut RangeMapBuilder,
	options: &'a ProcessorOptions,
}

impl<'a> MixinProcessor<'a> {
	pub fn new(registry: &'a MixinRegistry, builder: &'a mut RangeMapBuilder, options: &'a ProcessorOptions) -> Self {
		Self {
			registry,
			builder,
			options,
		}
	}

	/// Handles one annotation attached to `declaration`.
	///
	/// Annotations that are not mixin annotations are ignored.
	///
	/// # Errors
	///
	/// Returns a [`ResolveError`] when the annotation cannot be resolved and
	/// [`ProcessorOptions::fatal`] is set.
	pub fn process(&mut self, annotation: &Annotation, declaration: &Declaration) -> Result<()> {
		let Some(kind) = MixinAnnotation::from_type_name(&annotation.type_name) else {
			return Ok(());
		};

		let result = match kind {
			MixinAnnotation::Mixin => self.process_mixin(annotation, declaration),
			MixinAnnotation::Accessor | MixinAnnotation::Invoker => self.process_accessor(kind, annotation, declaration),
			MixinAnnotation::Shadow => self.process_shadow(annotation, declaration),
			MixinAnnotation::Overwrite => self.process_overwrite(annotation, declaration),
			MixinAnnotation::Interface => self.process_interface(annotation, declaration),
		};

		result.or_else(|err| {
			let position = err.position();
			warn!(
				filename = %position.filename,
				offset = position.offset,
				error = %err,
				"unresolved mixin annotation"
			);
			if self.options.fatal { Err(err) } else { Ok(()) }
		})
	}

	/// The class a field reference really resolves to, accounting for
	/// `@Shadow` fields.
	pub fn field_owner(&self, owner: &str, name: &str, desc: &str) -> String {
		self.registry
			.get_shaded_owner(owner, name, desc)
			.unwrap_or_else(|| owner.to_string())
	}

	/// Records a reference to a shadowed method against the mixin target.
	///
	/// A shadow prefix on the referenced name is trimmed from both the range and
	/// the recorded name. Returns `false` without recording anything when the
	/// reference needs no redirection.
	pub fn process_method_reference(
		&mut self,
		start: u32,
		length: u32,
		text: &str,
		owner: &str,
		name: &str,
		desc: &str,
	) -> bool {
		let resolved = self
			.registry
			.with_info(owner, |info| {
				let target = info.target()?;
				let shadow = info.find_shadow(name, desc)?;
				Some((target.to_string(), shadow.prefix.clone()))
			})
			.flatten();
		let Some((target, prefix)) = resolved else {
			return false;
		};

		let (skip, name, text) = match name.strip_prefix(prefix.as_str()) {
			Some(rest) if !prefix.is_empty() => {
				let skip = u32::try_from(prefix.len()).unwrap_or(0);
				(skip, rest, text.strip_prefix(prefix.as_str()).unwrap_or(text))
			}
			_ => (0, name, text),
		};

		self.builder.add_method_reference(
			start.saturating_add(skip),
			length.saturating_sub(skip),
			text,
			target,
			name,
			desc,
		);
		true
	}

	fn position(&self, annotation: &Annotation) -> Position {
		Position {
			filename: self.builder.filename().to_string(),
			offset: annotation.start,
		}
	}

	fn invalid_argument(&self, kind: MixinAnnotation, annotation: &Annotation, cause: impl Into<String>) -> ResolveError {
		ResolveError::InvalidAnnotationArgument {
			position: self.position(annotation),
			annotation: kind,
			cause: cause.into(),
		}
	}

	fn invalid_target(&self, kind: MixinAnnotation, annotation: &Annotation, declaration: &Declaration) -> ResolveError {
		ResolveError::InvalidAnnotationTarget {
			position: self.position(annotation),
			annotation: kind,
			declaration: declaration.to_string(),
		}
	}

	fn unresolved_owner(
		&self,
		kind: MixinAnnotation,
		annotation: &Annotation,
		owner: &str,
		declaration: &Declaration,
	) -> ResolveError {
		ResolveError::UnresolvedMixinOwner {
			position: self.position(annotation),
			annotation: kind,
			owner: owner.to_string(),
			declaration: declaration.to_string(),
		}
	}

	/// Requires `value` to be a plain string literal.
	fn expect_str<'v>(
		&self,
		kind: MixinAnnotation,
		annotation: &Annotation,
		member: &str,
		value: &'v Value,
	) -> Result<&'v StringLiteral> {
		match value {
			Value::Str(lit) => Ok(lit),
			other => Err(self.invalid_argument(
				kind,
				annotation,
				format!("{member} must be a string literal, found {other}"),
			)),
		}
	}
}
