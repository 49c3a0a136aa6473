use super::MixinProcessor;
use crate::annotation::{Annotation, AnnotationArgs, Declaration, MixinAnnotation};
use crate::error::Result;

const KIND: MixinAnnotation = MixinAnnotation::Overwrite;

impl MixinProcessor<'_> {
	/// `@Overwrite` on a method: it replaces the target's method of the same
	/// name and descriptor.
	pub(super) fn process_overwrite(&mut self, annotation: &Annotation, declaration: &Declaration) -> Result<()> {
		match &annotation.args {
			AnnotationArgs::Marker => {}
			AnnotationArgs::Single(value) => {
				return Err(self.invalid_argument(KIND, annotation, format!("unexpected value {value}")));
			}
			AnnotationArgs::Normal(pairs) => {
				if let Some((other, _)) = pairs
					.iter()
					.find(|(member, _)| !matches!(member.as_str(), "constraints" | "remap" | "aliases"))
				{
					return Err(self.invalid_argument(KIND, annotation, format!("unknown member {other}")));
				}
			}
		}

		let Declaration::Method { owner, name, desc } = declaration else {
			return Err(self.invalid_target(KIND, annotation, declaration));
		};

		self.registry
			.update(owner, |info| info.add_overwrite(name, desc))
			.ok_or_else(|| self.unresolved_owner(KIND, annotation, owner, declaration))
	}
}
