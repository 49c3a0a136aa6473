use super::MixinProcessor;
use crate::annotation::{Annotation, AnnotationArgs, Declaration, MixinAnnotation};
use crate::error::Result;

const KIND: MixinAnnotation = MixinAnnotation::Shadow;

impl MixinProcessor<'_> {
	/// `@Shadow` on a field or method: the member really belongs to the target.
	pub(super) fn process_shadow(&mut self, annotation: &Annotation, declaration: &Declaration) -> Result<()> {
		let prefix = match &annotation.args {
			AnnotationArgs::Marker => self.options.shadow_prefix.clone(),
			AnnotationArgs::Single(_) => {
				return Err(self.invalid_argument(KIND, annotation, "@Shadow has no value member"));
			}
			AnnotationArgs::Normal(pairs) => {
				let mut prefix = self.options.shadow_prefix.clone();
				for (member, value) in pairs {
					match member.as_str() {
						"remap" | "aliases" => {}
						"prefix" => prefix = self.expect_str(KIND, annotation, "prefix", value)?.value.clone(),
						other => {
							return Err(self.invalid_argument(KIND, annotation, format!("unknown member {other}")));
						}
					}
				}
				prefix
			}
		};

		let (owner, members): (&str, Vec<(&str, &str)>) = match declaration {
			Declaration::Field { owner, fragments } => (
				owner.as_str(),
				fragments
					.iter()
					.map(|(name, desc)| (name.as_str(), desc.as_str()))
					.collect(),
			),
			Declaration::Method { owner, name, desc } => (owner.as_str(), vec![(name.as_str(), desc.as_str())]),
			Declaration::Type { .. } => return Err(self.invalid_target(KIND, annotation, declaration)),
		};

		self.registry
			.update(owner, |info| {
				for (name, desc) in members {
					info.add_shadow(name, desc, prefix.as_str());
				}
			})
			.ok_or_else(|| self.unresolved_owner(KIND, annotation, owner, declaration))
	}
}
