use indexmap::IndexSet;
use tracing::debug;

use super::MixinProcessor;
use crate::annotation::{Annotation, AnnotationArgs, Declaration, MixinAnnotation, StringLiteral, Value};
use crate::error::Result;

const KIND: MixinAnnotation = MixinAnnotation::Mixin;

impl MixinProcessor<'_> {
	/// `@Mixin` on a type: registers the type and its targets.
	///
	/// `value` holds class literals and `targets` holds string names in either
	/// `a.b.C` or `a/b/C` form. String targets are recorded as class literals so
	/// renaming the target class rewrites them. `priority` and `remap` do not
	/// affect naming and are ignored.
	pub(super) fn process_mixin(&mut self, annotation: &Annotation, declaration: &Declaration) -> Result<()> {
		let Declaration::Type { name: owner } = declaration else {
			return Err(self.invalid_target(KIND, annotation, declaration));
		};

		let mut targets = IndexSet::new();
		let mut literals: Vec<(&StringLiteral, String)> = Vec::new();

		match &annotation.args {
			AnnotationArgs::Marker => {
				return Err(self.invalid_argument(KIND, annotation, "@Mixin must name at least one target"));
			}
			AnnotationArgs::Single(value) => self.read_class_references(annotation, value, &mut targets)?,
			AnnotationArgs::Normal(pairs) => {
				for (member, value) in pairs {
					match member.as_str() {
						"priority" | "remap" => {}
						"value" => self.read_class_references(annotation, value, &mut targets)?,
						"targets" => {
							for item in value.elements() {
								let lit = self.expect_str(KIND, annotation, "targets", item)?;
								let target = lit.value.replace('.', "/");
								targets.insert(target.clone());
								literals.push((lit, target));
							}
						}
						other => {
							return Err(self.invalid_argument(KIND, annotation, format!("unknown member {other}")));
						}
					}
				}
			}
		}

		for (lit, target) in literals {
			self.builder
				.add_class_literal(lit.start, lit.length, lit.escaped.as_str(), target);
		}

		debug!(owner = %owner, targets = ?targets, "registered mixin");
		self.registry.upsert(owner, |info| info.set_targets(targets));
		Ok(())
	}

	/// Collects class literal targets from a single literal or an array of them.
	fn read_class_references(
		&self,
		annotation: &Annotation,
		value: &Value,
		targets: &mut IndexSet<String>,
	) -> Result<()> {
		for item in value.elements() {
			let Value::Type(ty) = item else {
				return Err(self.invalid_argument(
					KIND,
					annotation,
					format!("value must be class literals, found {item}"),
				));
			};
			targets.insert(ty.internal_name.clone());
		}
		Ok(())
	}
}
